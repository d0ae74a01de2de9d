#![deny(unsafe_code)]
//! Rendering wallpapers to pixels and files.
//!
//! This crate sits between `hausa-scribble-core` (which draws onto a
//! `Surface`) and the command line. It owns the pixel conversion, PNG output,
//! the parallel preview grid and the paced bulk exporter, so front ends never
//! duplicate that logic.

pub mod batch;
pub mod pixel;
pub mod preview;

#[cfg(feature = "png")]
pub mod snapshot;

pub use batch::{BatchReport, BulkExporter, CancelToken, ExportOptions, ExportSink, ItemOutcome};
#[cfg(feature = "png")]
pub use batch::DirectorySink;
pub use preview::{render_at, render_preview, render_previews, Preview};

use hausa_scribble_core::{AspectRatio, Raster, ScribbleError, Wallpaper};

/// Renders a wallpaper at the full resolution of `ratio`.
pub fn render_full(
    wallpaper: Wallpaper,
    ratio: &AspectRatio,
    density: f64,
) -> Result<Raster, ScribbleError> {
    render_at(wallpaper, ratio.width, ratio.height, density)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_render_uses_ratio_dimensions() {
        let ratio = AspectRatio {
            id: "1:1",
            name: "Square",
            width: 24,
            height: 24,
        };
        let raster = render_full(Wallpaper::from_id(1), &ratio, 1.0).unwrap();
        assert_eq!((raster.width(), raster.height()), (24, 24));
    }

    #[test]
    fn same_wallpaper_renders_identically() {
        let ratio = AspectRatio {
            id: "9:16",
            name: "Phone",
            width: 27,
            height: 48,
        };
        let a = render_full(Wallpaper::from_id(12), &ratio, 1.0).unwrap();
        let b = render_full(Wallpaper::from_id(12), &ratio, 1.0).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn different_wallpapers_differ() {
        let ratio = AspectRatio::lookup("1:1").unwrap();
        let (w, h) = ratio.preview_size();
        let a = render_at(Wallpaper::from_id(1), w, h, 1.0).unwrap();
        let b = render_at(Wallpaper::from_id(2), w, h, 1.0).unwrap();
        assert_ne!(a.data(), b.data());
    }
}
