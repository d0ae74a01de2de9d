//! Error types for the hausa-scribble core.
//!
//! Rendering itself never fails; these errors cover everything around it:
//! surface allocation, catalog lookups, settings and file output.

use thiserror::Error;

/// Errors produced around pattern rendering.
#[derive(Debug, Error)]
pub enum ScribbleError {
    /// Width or height was zero, or too large to allocate a surface.
    #[error("invalid dimensions {width}x{height}: width and height must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// No palette with the given name exists.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// No aspect-ratio preset matches the given id or name.
    #[error("unknown aspect ratio: {0}")]
    UnknownRatio(String),

    /// A wallpaper id outside the catalog was requested.
    #[error("unknown wallpaper #{id} (catalog holds 1..={count})")]
    UnknownWallpaper { id: u32, count: usize },

    /// A settings file held a value that cannot be used.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Reading or writing a file failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// A rendered surface could not be encoded to an image format.
    #[error("encode error: {0}")]
    Encode(String),
}

impl From<std::io::Error> for ScribbleError {
    fn from(e: std::io::Error) -> Self {
        ScribbleError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_includes_both_sides() {
        let err = ScribbleError::InvalidDimensions {
            width: 0,
            height: 1920,
        };
        let msg = format!("{err}");
        assert!(msg.contains("0x1920"), "missing dimensions in: {msg}");
    }

    #[test]
    fn unknown_ratio_includes_input() {
        let err = ScribbleError::UnknownRatio("21:9".into());
        let msg = format!("{err}");
        assert!(msg.contains("21:9"), "missing ratio in: {msg}");
    }

    #[test]
    fn unknown_wallpaper_includes_id_and_range() {
        let err = ScribbleError::UnknownWallpaper { id: 999, count: 240 };
        let msg = format!("{err}");
        assert!(msg.contains("999"), "missing id in: {msg}");
        assert!(msg.contains("240"), "missing count in: {msg}");
    }

    #[test]
    fn io_error_converts_with_message() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.json missing");
        let err = ScribbleError::from(io);
        assert!(matches!(err, ScribbleError::Io(_)));
        assert!(err.to_string().contains("settings.json missing"));
    }

    #[test]
    fn scribble_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScribbleError>();
    }

    #[test]
    fn scribble_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<ScribbleError>();
    }
}
