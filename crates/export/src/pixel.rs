//! Pure-computation pixel buffer conversion from a rendered [`Raster`].
//!
//! This module is always available (no feature gate) so that both the `png`
//! snapshot path and any in-memory consumer share the same conversion.

use hausa_scribble_core::Raster;

/// Converts the raster's premultiplied pixels to straight-alpha RGBA8.
///
/// The buffer length is `width * height * 4`.
pub fn raster_to_rgba(raster: &Raster) -> Vec<u8> {
    raster
        .pixmap()
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hausa_scribble_core::{render, Srgb, Surface};

    #[test]
    fn raster_to_rgba_correct_length() {
        let raster = Raster::new(8, 4).unwrap();
        assert_eq!(raster_to_rgba(&raster).len(), 8 * 4 * 4);
    }

    #[test]
    fn rendered_wallpaper_background_is_opaque_at_zero_density() {
        let mut raster = Raster::new(16, 16).unwrap();
        let c = render(&mut raster, 16, 16, 1379.0, 0.0).unwrap();
        let buf = raster_to_rgba(&raster);
        for px in buf.chunks_exact(4) {
            assert_eq!(px, [c.background.r, c.background.g, c.background.b, 255]);
        }
    }

    #[test]
    fn translucent_pixels_are_demultiplied() {
        let mut raster = Raster::new(2, 2).unwrap();
        raster.set_global_alpha(0.5);
        raster.set_fill_color(Srgb::from_u32(0xFF0000));
        raster.fill_rect(0.0, 0.0, 2.0, 2.0);
        let buf = raster_to_rgba(&raster);
        assert!(buf[0] >= 250, "red should be restored to ~255, got {}", buf[0]);
        assert!((126..=129).contains(&buf[3]), "alpha {}", buf[3]);
    }
}
