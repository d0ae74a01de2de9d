//! Deterministic sine-based PRNG.
//!
//! The generator keeps a single `f64` of state. Every call computes
//! `s = sin(s) * 10000` and returns the fractional part of `s`. It is a weak
//! generator statistically, but it is tiny and portable, and every wallpaper
//! in the catalog is defined by the exact stream it produces, so the formula
//! must not change.

use serde::{Deserialize, Serialize};

/// Sine-hash PRNG. Same seed always produces the same sequence.
///
/// Seeds that are exact multiples of π sit near a fixed point of the
/// recurrence; seed `0.0` is one and yields `0.0` forever. These are left as
/// they are so existing seeds keep their images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SineRng {
    state: f64,
}

impl SineRng {
    /// Fallback seed used when the caller provides NaN or an infinity, which
    /// would otherwise poison the state with NaN.
    const FALLBACK_SEED: f64 = 42.0;

    /// Creates a new generator from `seed`.
    pub fn new(seed: f64) -> Self {
        Self {
            state: if seed.is_finite() {
                seed
            } else {
                Self::FALLBACK_SEED
            },
        }
    }

    /// Advances the state and returns a value in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state.sin() * 10000.0;
        self.state - self.state.floor()
    }

    /// Returns a value in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns `floor(next * len)`, the uniform index used for every table
    /// lookup (palette, color, motif).
    ///
    /// Returns 0 when `len` is 0; the draw is still consumed.
    pub fn next_index(&mut self, len: usize) -> usize {
        let v = (self.next_f64() * len as f64).floor() as usize;
        v.min(len.saturating_sub(1))
    }

    /// Returns `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}
