//! Generation and export settings.
//!
//! Settings come from an optional JSON file; every key is optional and a
//! missing or mistyped key keeps its default. Command-line flags override
//! whatever was loaded.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::catalog::{AspectRatio, PRODUCT_NAME, WALLPAPER_COUNT};
use crate::error::ScribbleError;
use crate::params::{setting_f64, setting_string, setting_u64, setting_usize};

/// Default density multiplier.
pub const DEFAULT_DENSITY: f64 = 1.0;
/// Default pause between bulk-export items.
pub const DEFAULT_PAUSE_MS: u64 = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Settings {
    /// File-name prefix for exports.
    pub product: String,
    /// Aspect-ratio preset id or name.
    pub ratio: String,
    /// Shape-count multiplier; the preview slider spans 0.2 to 3.0.
    pub density: f64,
    /// Number of wallpapers in the catalog.
    pub wallpaper_count: usize,
    /// Pause between bulk-export items, in milliseconds.
    pub pause_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            product: PRODUCT_NAME.to_string(),
            ratio: AspectRatio::default().id.to_string(),
            density: DEFAULT_DENSITY,
            wallpaper_count: WALLPAPER_COUNT,
            pause_ms: DEFAULT_PAUSE_MS,
        }
    }
}

impl Settings {
    /// Reads settings from a JSON object, falling back to defaults per key.
    pub fn from_json(value: &Value) -> Self {
        let d = Self::default();
        Self {
            product: setting_string(value, "product", &d.product),
            ratio: setting_string(value, "ratio", &d.ratio),
            density: setting_f64(value, "density", d.density),
            wallpaper_count: setting_usize(value, "wallpaper_count", d.wallpaper_count),
            pause_ms: setting_u64(value, "pause_ms", d.pause_ms),
        }
    }

    /// Loads and validates a JSON settings file.
    pub fn load(path: &Path) -> Result<Self, ScribbleError> {
        let text = std::fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| ScribbleError::InvalidSettings(format!("{}: {e}", path.display())))?;
        if !value.is_object() {
            return Err(ScribbleError::InvalidSettings(format!(
                "{}: expected a JSON object",
                path.display()
            )));
        }
        let settings = Self::from_json(&value);
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the ratio resolves and the density and product name are usable.
    pub fn validate(&self) -> Result<(), ScribbleError> {
        AspectRatio::lookup(&self.ratio)?;
        if !self.density.is_finite() {
            return Err(ScribbleError::InvalidSettings(format!(
                "density must be finite, got {}",
                self.density
            )));
        }
        if self.product.is_empty() || self.product.contains(['/', '\\']) {
            return Err(ScribbleError::InvalidSettings(format!(
                "product name {:?} cannot be used in a file name",
                self.product
            )));
        }
        Ok(())
    }

    /// The resolved aspect-ratio preset.
    pub fn aspect_ratio(&self) -> Result<AspectRatio, ScribbleError> {
        AspectRatio::lookup(&self.ratio)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_the_studio() {
        let s = Settings::default();
        assert_eq!(s.product, "hausa-scribble");
        assert_eq!(s.ratio, "9:16");
        assert!((s.density - 1.0).abs() < f64::EPSILON);
        assert_eq!(s.wallpaper_count, 240);
        assert_eq!(s.pause(), Duration::from_millis(200));
        assert!(s.validate().is_ok());
    }

    #[test]
    fn from_json_overrides_present_keys_only() {
        let s = Settings::from_json(&json!({"density": 2.5, "ratio": "desktop"}));
        assert!((s.density - 2.5).abs() < f64::EPSILON);
        assert_eq!(s.aspect_ratio().unwrap().id, "16:9");
        assert_eq!(s.pause_ms, 200);
    }

    #[test]
    fn from_json_ignores_mistyped_keys() {
        let s = Settings::from_json(&json!({"density": "high", "pause_ms": -5}));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn validate_rejects_unknown_ratio() {
        let s = Settings {
            ratio: "21:9".into(),
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(ScribbleError::UnknownRatio(_))));
    }

    #[test]
    fn validate_rejects_path_separators_in_product() {
        let s = Settings {
            product: "../evil".into(),
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(ScribbleError::InvalidSettings(_))));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"product": "scribbles", "pause_ms": 0}"#).unwrap();
        let s = Settings::load(&path).unwrap();
        assert_eq!(s.product, "scribbles");
        assert_eq!(s.pause(), Duration::ZERO);
    }

    #[test]
    fn load_rejects_non_object_and_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let array = dir.path().join("array.json");
        std::fs::write(&array, "[1, 2]").unwrap();
        assert!(matches!(Settings::load(&array), Err(ScribbleError::InvalidSettings(_))));

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{density:").unwrap();
        assert!(matches!(Settings::load(&broken), Err(ScribbleError::InvalidSettings(_))));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ScribbleError::Io(_)));
    }
}
