//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: render error (bad dimensions)
//! - 11: I/O error (file write, PNG encoding)
//! - 12: input error (unknown ratio, palette or wallpaper id, bad settings)
//! - 13: serialization error
//! - 14: bulk export finished with failed items

use hausa_scribble_core::ScribbleError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A render-level error.
    Render(ScribbleError),
    /// An I/O error (file write, encoding).
    Io(String),
    /// A user input error.
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
    /// Some items of a bulk export failed; the rest were written.
    PartialExport { failed: usize, total: usize },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
            CliError::PartialExport { .. } => 14,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Render(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
            CliError::PartialExport { failed, total } => {
                write!(f, "{failed} of {total} wallpapers failed to export")
            }
        }
    }
}

impl From<ScribbleError> for CliError {
    fn from(e: ScribbleError) -> Self {
        match e {
            ScribbleError::Io(msg) | ScribbleError::Encode(msg) => CliError::Io(msg),
            ScribbleError::InvalidDimensions { .. } => CliError::Render(e),
            other => CliError::Input(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}
