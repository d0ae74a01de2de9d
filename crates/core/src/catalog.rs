//! The wallpaper catalog and output presets.
//!
//! Wallpapers are never stored: each one is an id whose seed is derived from
//! the id, so the catalog is the same in every session.

use serde::{Deserialize, Serialize};

use crate::error::ScribbleError;

/// Product name used as the export file-name prefix.
pub const PRODUCT_NAME: &str = "hausa-scribble";

/// Number of wallpapers in the default catalog.
pub const WALLPAPER_COUNT: usize = 240;

/// Width of a preview raster; the height follows the aspect ratio.
pub const PREVIEW_WIDTH: u32 = 300;

const SEED_STRIDE: i64 = 1337;
const SEED_OFFSET: i64 = 42;

/// A named output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AspectRatio {
    pub id: &'static str,
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Output presets, in display order. The first is the default.
pub const RATIOS: [AspectRatio; 4] = [
    AspectRatio {
        id: "9:16",
        name: "Phone",
        width: 1080,
        height: 1920,
    },
    AspectRatio {
        id: "16:9",
        name: "Desktop",
        width: 1920,
        height: 1080,
    },
    AspectRatio {
        id: "4:3",
        name: "Tablet",
        width: 2048,
        height: 1536,
    },
    AspectRatio {
        id: "1:1",
        name: "Square",
        width: 1080,
        height: 1080,
    },
];

impl AspectRatio {
    /// Finds a preset by id (`"16:9"`) or name (`"desktop"`, case insensitive).
    pub fn lookup(key: &str) -> Result<AspectRatio, ScribbleError> {
        RATIOS
            .iter()
            .find(|r| r.id == key || r.name.eq_ignore_ascii_case(key))
            .copied()
            .ok_or_else(|| ScribbleError::UnknownRatio(key.to_string()))
    }

    /// Preview size: [`PREVIEW_WIDTH`] wide, height rounded to keep the ratio.
    pub fn preview_size(&self) -> (u32, u32) {
        let height = (f64::from(PREVIEW_WIDTH) * f64::from(self.height) / f64::from(self.width))
            .round() as u32;
        (PREVIEW_WIDTH, height.max(1))
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        RATIOS[0]
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Wallpaper {
    pub id: u32,
    pub seed: i64,
}

impl Wallpaper {
    /// The wallpaper with the given id: `seed = id * 1337 + 42`.
    pub fn from_id(id: u32) -> Wallpaper {
        Wallpaper {
            id,
            seed: i64::from(id) * SEED_STRIDE + SEED_OFFSET,
        }
    }

    /// The seed as the renderer takes it.
    pub fn seed_f64(&self) -> f64 {
        self.seed as f64
    }

    /// Export file name: `<product>-<id>-<ratio name lowercased>.png`.
    pub fn file_name(&self, product: &str, ratio: &AspectRatio) -> String {
        format!("{product}-{}-{}.png", self.id, ratio.name.to_lowercase())
    }
}

/// Wallpapers with ids `1..=count`.
pub fn catalog(count: usize) -> Vec<Wallpaper> {
    (1..=count)
        .map_while(|i| u32::try_from(i).ok())
        .map(Wallpaper::from_id)
        .collect()
}

/// Resolves ids against a catalog of `count` wallpapers, keeping the order
/// given.
pub fn select(ids: &[u32], count: usize) -> Result<Vec<Wallpaper>, ScribbleError> {
    ids.iter()
        .map(|&id| {
            if id >= 1 && (id as usize) <= count {
                Ok(Wallpaper::from_id(id))
            } else {
                Err(ScribbleError::UnknownWallpaper { id, count })
            }
        })
        .collect()
}
