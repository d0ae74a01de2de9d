//! The fixed palette table.
//!
//! Every render picks exactly one of these palettes and draws its background,
//! layers and scribbles from its five colors.

use crate::color::Srgb;
use crate::error::ScribbleError;
use crate::prng::SineRng;

/// Number of colors in every palette.
pub const PALETTE_SIZE: usize = 5;

/// A named, ordered set of five colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    name: &'static str,
    colors: [Srgb; PALETTE_SIZE],
}

const fn palette(name: &'static str, hex: [u32; PALETTE_SIZE]) -> Palette {
    Palette {
        name,
        colors: [
            Srgb::from_u32(hex[0]),
            Srgb::from_u32(hex[1]),
            Srgb::from_u32(hex[2]),
            Srgb::from_u32(hex[3]),
            Srgb::from_u32(hex[4]),
        ],
    }
}

/// The palette table, in selection order. Index order is part of every
/// wallpaper's identity.
static PALETTES: [Palette; 6] = [
    palette("nautical", [0xE63946, 0xF1FAEE, 0xA8DADC, 0x457B9D, 0x1D3557]),
    palette("earth", [0x264653, 0x2A9D8F, 0xE9C46A, 0xF4A261, 0xE76F51]),
    palette("sunset", [0x003049, 0xD62828, 0xF77F00, 0xFCBF49, 0xEAE2B7]),
    palette("deep", [0x5F0F40, 0x9A031E, 0xFB8B24, 0xE36414, 0x0F4C5C]),
    palette("urban", [0x2B2D42, 0x8D99AE, 0xEDF2F4, 0xEF233C, 0xD90429]),
    palette("savanna", [0x606C38, 0x283618, 0xFEFAE0, 0xDDA15E, 0xBC6C25]),
];

impl Palette {
    /// Returns the whole table in selection order.
    pub fn all() -> &'static [Palette] {
        &PALETTES
    }

    /// Looks up a palette by name (case insensitive).
    pub fn from_name(name: &str) -> Result<&'static Palette, ScribbleError> {
        PALETTES
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ScribbleError::UnknownPalette(name.to_string()))
    }

    /// Returns the names of all palettes in selection order.
    pub fn list_names() -> Vec<&'static str> {
        PALETTES.iter().map(|p| p.name).collect()
    }

    /// Draws one value and picks a palette from the table.
    pub fn pick(rng: &mut SineRng) -> &'static Palette {
        &PALETTES[rng.next_index(PALETTES.len())]
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn colors(&self) -> &[Srgb; PALETTE_SIZE] {
        &self.colors
    }

    pub fn contains(&self, color: Srgb) -> bool {
        self.colors.contains(&color)
    }

    /// Draws one value and picks a color from this palette.
    pub fn pick_color(&self, rng: &mut SineRng) -> Srgb {
        self.colors[rng.next_index(PALETTE_SIZE)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_six_palettes_of_five_colors() {
        assert_eq!(Palette::all().len(), 6);
        for p in Palette::all() {
            assert_eq!(p.colors().len(), PALETTE_SIZE);
        }
    }

    #[test]
    fn nautical_matches_authored_hex() {
        let p = Palette::from_name("nautical").unwrap();
        let hexes: Vec<String> = p.colors().iter().map(|c| c.to_hex()).collect();
        assert_eq!(
            hexes,
            ["#e63946", "#f1faee", "#a8dadc", "#457b9d", "#1d3557"]
        );
    }

    #[test]
    fn from_name_is_case_insensitive() {
        assert_eq!(Palette::from_name("SAVANNA").unwrap().name(), "savanna");
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let err = Palette::from_name("neon").unwrap_err();
        assert!(matches!(err, ScribbleError::UnknownPalette(ref n) if n == "neon"));
    }

    #[test]
    fn list_names_preserves_selection_order() {
        assert_eq!(
            Palette::list_names(),
            ["nautical", "earth", "sunset", "deep", "urban", "savanna"]
        );
    }

    #[test]
    fn pick_uses_floor_index() {
        // First draw for seed 1379 is ~0.0362 -> index 0.
        let mut rng = SineRng::new(1379.0);
        assert_eq!(Palette::pick(&mut rng).name(), "nautical");
        // Second draw is ~0.3359 -> color index 1.
        let color = Palette::from_name("nautical").unwrap().pick_color(&mut rng);
        assert_eq!(color, Srgb::from_u32(0xF1FAEE));
    }

    #[test]
    fn picked_colors_always_belong_to_palette() {
        let mut rng = SineRng::new(99.0);
        for _ in 0..100 {
            let p = Palette::pick(&mut rng);
            let c = p.pick_color(&mut rng);
            assert!(p.contains(c));
        }
    }
}
