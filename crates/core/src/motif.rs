//! The motif set and its drawing handlers.
//!
//! Each motif is drawn in a local frame centred on the origin, `size` being
//! its characteristic width or diameter. The caller sets paint state and the
//! frame (position, rotation) beforehand.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScribbleError;
use crate::prng::SineRng;
use crate::surface::{save, Composite, Surface};

/// Probability that a fillable motif is filled rather than stroked.
pub const FILL_PROBABILITY: f64 = 0.6;

/// Probability that a circle gets an inner concentric ring.
pub const RING_PROBABILITY: f64 = 0.5;

/// A decorative shape template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motif {
    Zigzag,
    Diamonds,
    Triangles,
    Circles,
    Waves,
    Crescents,
    Grid,
}

impl Motif {
    /// All motifs in selection order.
    pub const ALL: [Motif; 7] = [
        Motif::Zigzag,
        Motif::Diamonds,
        Motif::Triangles,
        Motif::Circles,
        Motif::Waves,
        Motif::Crescents,
        Motif::Grid,
    ];

    /// Draws one value and picks a motif.
    pub fn pick(rng: &mut SineRng) -> Motif {
        Self::ALL[rng.next_index(Self::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            Motif::Zigzag => "zigzag",
            Motif::Diamonds => "diamonds",
            Motif::Triangles => "triangles",
            Motif::Circles => "circles",
            Motif::Waves => "waves",
            Motif::Crescents => "crescents",
            Motif::Grid => "grid",
        }
    }

    /// Draws the motif at the origin of the current frame.
    ///
    /// Consumes one draw for the fill/stroke decision (used by diamonds,
    /// triangles, circles and crescents), plus one more for circles' ring.
    pub fn draw<S: Surface + ?Sized>(self, surface: &mut S, size: f64, rng: &mut SineRng) {
        let filled = rng.chance(FILL_PROBABILITY);
        let half = size / 2.0;
        let quarter = size / 4.0;

        match self {
            Motif::Zigzag => {
                surface.begin_path();
                surface.move_to(-half, 0.0);
                for j in 0..4 {
                    let dy = if j % 2 == 0 { -quarter } else { quarter };
                    surface.line_to(-half + (j + 1) as f64 * quarter, dy);
                }
                surface.stroke();
            }
            Motif::Diamonds => {
                surface.begin_path();
                surface.move_to(0.0, -half);
                surface.line_to(half, 0.0);
                surface.line_to(0.0, half);
                surface.line_to(-half, 0.0);
                surface.close_path();
                paint(surface, filled);
            }
            Motif::Triangles => {
                surface.begin_path();
                surface.move_to(0.0, -half);
                surface.line_to(half, half);
                surface.line_to(-half, half);
                surface.close_path();
                paint(surface, filled);
            }
            Motif::Circles => {
                surface.begin_path();
                surface.arc(0.0, 0.0, half, 0.0, TAU, false);
                paint(surface, filled);
                if rng.next_f64() > 1.0 - RING_PROBABILITY {
                    surface.begin_path();
                    surface.arc(0.0, 0.0, size / 3.0, 0.0, TAU, false);
                    surface.stroke();
                }
            }
            Motif::Waves => {
                surface.begin_path();
                surface.move_to(-half, 0.0);
                surface.cubic_to(-quarter, -half, quarter, half, half, 0.0);
                surface.stroke();
            }
            Motif::Crescents => crescent(surface, size, filled),
            Motif::Grid => {
                surface.begin_path();
                for i in 0..=4 {
                    let k = -half + i as f64 * quarter;
                    surface.move_to(k, -half);
                    surface.line_to(k, half);
                    surface.move_to(-half, k);
                    surface.line_to(half, k);
                }
                surface.stroke();
            }
        }
    }
}

fn paint<S: Surface + ?Sized>(surface: &mut S, filled: bool) {
    if filled {
        surface.fill();
    } else {
        surface.stroke();
    }
}

/// Outer disc of radius `size / 2` with a bite of radius `size / 2.2`
/// centred `size / 5` along x.
///
/// The lens where the bite overlaps the disc is erased with destination-out
/// inside its own saved state, then the crescent silhouette is filled or the
/// outer outline stroked.
fn crescent<S: Surface + ?Sized>(surface: &mut S, size: f64, filled: bool) {
    let outer = size / 2.0;
    let inner = size / 2.2;
    let offset = size / 5.0;

    // Intersection points of the two circles are (ix, ±iy).
    let ix = (offset * offset + outer * outer - inner * inner) / (2.0 * offset);
    let iy = (outer * outer - ix * ix).max(0.0).sqrt();
    let outer_angle = iy.atan2(ix);
    let inner_angle = iy.atan2(ix - offset);

    {
        let mut carve = save(surface);
        carve.set_composite(Composite::DestinationOut);
        carve.begin_path();
        carve.arc(0.0, 0.0, outer, -outer_angle, outer_angle, false);
        carve.arc(offset, 0.0, inner, inner_angle, TAU - inner_angle, false);
        carve.close_path();
        carve.fill();
    }

    surface.begin_path();
    if filled {
        surface.arc(0.0, 0.0, outer, outer_angle, TAU - outer_angle, false);
        surface.arc(offset, 0.0, inner, -inner_angle, inner_angle - TAU, true);
        surface.close_path();
        surface.fill();
    } else {
        surface.arc(0.0, 0.0, outer, 0.0, TAU, false);
        surface.stroke();
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Motif {
    type Err = ScribbleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ScribbleError::InvalidSettings(format!("unknown motif: {s}")))
    }
}
