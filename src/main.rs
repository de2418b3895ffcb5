// SPDX-License-Identifier: MIT
//
// scribe — headless driver for the scribe text area.
//
// Opens a file in a `TextArea`, paints one frame into a character grid and
// prints it:
//
//   file → TextArea::load_from_file → go_to_line → paint → GridSurface → stdout
//
// One grid cell is one pixel (`MonospaceMetrics::cell()`), so padding, the
// line-number gutter and the scroll bars all show up as whole cells. Without
// `--config`, options are scaled down to suit cells; a config file is taken
// as written.
//
// Logs go to stderr (`RUST_LOG`, default `warn`) so stdout carries only the
// frame.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use scribe_core::highlight::highlighter_for_path;
use scribe_core::{MemoryClipboard, Result, TextArea, TextAreaOptions};
use scribe_paint::geometry::Size;
use scribe_paint::grid::GridSurface;
use scribe_paint::metrics::MonospaceMetrics;
use tracing_subscriber::EnvFilter;

// ─── Arguments ──────────────────────────────────────────────────────────────

/// Render a text file through the scribe text area.
#[derive(Debug, Parser)]
#[command(name = "scribe", version)]
struct Args {
    /// File to open.
    path: PathBuf,

    /// TOML options file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Builtin theme (`light` or `dark`), overriding the config.
    #[arg(long)]
    theme: Option<String>,

    /// Frame size in cells.
    #[arg(long, value_name = "COLSxROWS", default_value = "80x24", value_parser = parse_size)]
    size: Size,

    /// 1-based line to put the caret on and scroll into view.
    #[arg(long)]
    line: Option<usize>,

    /// Hide the line-number gutter.
    #[arg(long)]
    no_line_numbers: bool,

    /// Print 24-bit ANSI colors instead of plain text.
    #[arg(long)]
    ansi: bool,
}

fn parse_size(s: &str) -> std::result::Result<Size, String> {
    let (cols, rows) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected COLSxROWS, got `{s}`"))?;
    let parse = |part: &str| match part.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("invalid dimension `{part}` in `{s}`")),
    };
    Ok(Size::new(parse(cols)?, parse(rows)?))
}

// ─── Options ────────────────────────────────────────────────────────────────

/// Defaults sized for a character grid.
fn grid_options() -> TextAreaOptions {
    TextAreaOptions {
        padding: 1,
        caret_width: 1,
        scroll_bar_width: 1,
        scroll_bar_min_thumb: 1,
        scroll_bar_corner_radius: 0,
        line_numbers_padding: 1,
        ..TextAreaOptions::default()
    }
}

fn options(args: &Args) -> Result<TextAreaOptions> {
    let mut options = match &args.config {
        Some(path) => TextAreaOptions::load(path)?,
        None => grid_options(),
    };
    if let Some(theme) = &args.theme {
        options.theme.clone_from(theme);
    }
    if args.no_line_numbers {
        options.line_numbers = false;
    }
    Ok(options)
}

// ─── Render ─────────────────────────────────────────────────────────────────

fn render(args: &Args) -> Result<String> {
    let options = options(args)?;
    let mut area = TextArea::from_options(
        &options,
        Box::new(MonospaceMetrics::cell()),
        Box::new(MemoryClipboard::new()),
    )?;
    area.set_size(args.size);
    area.set_syntax_highlighter(highlighter_for_path(&args.path));
    area.load_from_file(&args.path)?;
    if let Some(line) = args.line {
        area.go_to_line(line.saturating_sub(1));
    }
    area.focus_gained(Instant::now());

    let mut grid = GridSurface::new(args.size.width, args.size.height);
    area.paint(&mut grid);
    tracing::debug!(
        path = %args.path.display(),
        lines = area.buffer().line_count(),
        scroll_y = area.scroll().scroll_y(),
        "rendered frame"
    );

    Ok(if args.ansi {
        grid.to_ansi()
    } else {
        let mut text = grid.to_plain_text();
        text.push('\n');
        text
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing();

    match render(&args) {
        Ok(frame) => print!("{frame}"),
        Err(e) => {
            eprintln!("scribe: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
