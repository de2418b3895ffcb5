//! Error type for the fallible edges of the editor: files, configuration,
//! and the system clipboard.
//!
//! Editing itself never returns errors. Out-of-range buffer mutations are
//! caller bugs and panic; navigation clamps; undo on an empty stack reports
//! `false`.

use std::io;
use std::path::PathBuf;

/// Everything that can go wrong outside the editing model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unknown theme `{0}`")]
    UnknownTheme(String),

    #[error("unknown token kind `{0}`")]
    UnknownTokenKind(String),

    #[error("invalid color `{value}` for `{field}`")]
    InvalidColor { field: String, value: String },

    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_path() {
        let err = Error::Read {
            path: PathBuf::from("/tmp/missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "failed to read `/tmp/missing.txt`: not found"
        );
    }

    #[test]
    fn invalid_color_message() {
        let err = Error::InvalidColor {
            field: "caret".to_string(),
            value: "#zzz".to_string(),
        };
        assert_eq!(err.to_string(), "invalid color `#zzz` for `caret`");
    }

    #[test]
    fn config_error_converts() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("padding = ");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }
}
