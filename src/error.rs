//! Error types for cozyterm.
//!
//! User-facing command failures are plain output text and never reach this
//! type; these are the failures of the ambient machinery around the shell.

use std::io;

/// Errors produced outside of command execution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let e = Error::Storage("localStorage unavailable".into());
        assert_eq!(format!("{e}"), "storage error: localStorage unavailable");
    }

    #[test]
    fn test_json_error_from() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let e: Error = parse.into();
        assert!(format!("{e}").starts_with("JSON error:"));
    }
}
