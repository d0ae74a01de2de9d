//! Preview rendering for the wallpaper grid.
//!
//! Previews are small rasters sized by [`AspectRatio::preview_size`]. Each
//! render owns its own PRNG, so a batch fans out across the `rayon` pool with
//! no shared state.

use hausa_scribble_core::{render, AspectRatio, Raster, ScribbleError, Wallpaper};
use rayon::prelude::*;

/// A rendered preview.
pub struct Preview {
    pub wallpaper: Wallpaper,
    pub raster: Raster,
}

/// Renders one wallpaper at an explicit size.
pub fn render_at(
    wallpaper: Wallpaper,
    width: u32,
    height: u32,
    density: f64,
) -> Result<Raster, ScribbleError> {
    let mut raster = Raster::new(width, height)?;
    render(&mut raster, width, height, wallpaper.seed_f64(), density);
    Ok(raster)
}

/// Renders one preview-size raster.
pub fn render_preview(
    wallpaper: Wallpaper,
    ratio: &AspectRatio,
    density: f64,
) -> Result<Preview, ScribbleError> {
    let (width, height) = ratio.preview_size();
    let raster = render_at(wallpaper, width, height, density)?;
    Ok(Preview { wallpaper, raster })
}

/// Renders previews in parallel. Results keep the input order.
pub fn render_previews(
    wallpapers: &[Wallpaper],
    ratio: &AspectRatio,
    density: f64,
) -> Vec<Result<Preview, ScribbleError>> {
    log::debug!(
        "rendering {} previews at {}x{} (density {density})",
        wallpapers.len(),
        ratio.preview_size().0,
        ratio.preview_size().1,
    );
    wallpapers
        .par_iter()
        .map(|&w| render_preview(w, ratio, density))
        .collect()
}
