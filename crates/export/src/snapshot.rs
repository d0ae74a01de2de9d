//! PNG encoding and atomic file output of a rendered [`Raster`].
//!
//! This module is feature-gated behind `png` (default on) so that consumers
//! that only need pixels can skip the `image` crate. Files are written to a
//! temporary file next to the destination and renamed into place, so a
//! failed or interrupted export never leaves a partial PNG behind.

use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use hausa_scribble_core::{Raster, ScribbleError};
use image::{ImageFormat, RgbaImage};

use crate::pixel::raster_to_rgba;

fn to_image(raster: &Raster) -> Result<RgbaImage, ScribbleError> {
    RgbaImage::from_raw(raster.width(), raster.height(), raster_to_rgba(raster))
        .ok_or_else(|| ScribbleError::Encode("RGBA buffer size mismatch".into()))
}

/// Encodes the raster as PNG bytes.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, ScribbleError> {
    let img = to_image(raster)?;
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| ScribbleError::Encode(e.to_string()))?;
    Ok(bytes.into_inner())
}

/// Writes the raster as a PNG at `path`, atomically.
///
/// Returns `ScribbleError::Encode` if encoding fails, or `ScribbleError::Io`
/// if the file cannot be created or moved into place.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), ScribbleError> {
    let img = to_image(raster)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".scribble-")
        .suffix(".png.part")
        .tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        img.write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| ScribbleError::Encode(e.to_string()))?;
        writer.flush()?;
    }
    tmp.persist(path)
        .map_err(|e| ScribbleError::Io(format!("{}: {}", path.display(), e.error)))?;
    Ok(())
}
