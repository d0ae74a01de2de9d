//! The drawing-surface abstraction the renderer paints through.
//!
//! [`Surface`] mirrors a 2D canvas context: a current path built from
//! `move_to`/`line_to`/curves, fill and stroke with the current paint state,
//! and a save/restore stack holding transform and paint state. [`save`]
//! wraps the stack in a guard so a scope always restores what it changed.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::color::Srgb;

/// Compositing mode applied to subsequent fills and strokes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composite {
    /// Paint over existing content.
    #[default]
    SourceOver,
    /// Erase existing content where the source covers it.
    DestinationOut,
}

/// Shape at the open ends of stroked lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Shape at the corners of stroked paths.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

/// A 2D raster drawing context.
///
/// Coordinates passed to path methods are in the current local frame
/// (after `translate`/`rotate`). `line_to` and the curve methods start a new
/// subpath at their first point when the path has no current point, the same
/// as a browser canvas.
pub trait Surface {
    /// Fills an axis-aligned rectangle (in the local frame) with the fill
    /// color. Does not touch the current path.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Discards the current path.
    fn begin_path(&mut self);

    fn move_to(&mut self, x: f64, y: f64);

    fn line_to(&mut self, x: f64, y: f64);

    /// Quadratic Bézier from the current point through control `(cx, cy)`.
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);

    /// Cubic Bézier from the current point with controls `c1` and `c2`.
    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64);

    /// Closes the current subpath.
    fn close_path(&mut self);

    /// Fills the current path with the fill color.
    fn fill(&mut self);

    /// Strokes the current path with the stroke color and stroke style.
    fn stroke(&mut self);

    /// Pushes transform and paint state.
    fn save(&mut self);

    /// Pops transform and paint state. Unbalanced calls are ignored.
    fn restore(&mut self);

    fn translate(&mut self, x: f64, y: f64);

    /// Rotates the local frame by `angle` radians.
    fn rotate(&mut self, angle: f64);

    /// Sets the opacity multiplier, clamped to [0, 1].
    fn set_global_alpha(&mut self, alpha: f64);

    fn set_composite(&mut self, composite: Composite);

    fn set_fill_color(&mut self, color: Srgb);

    fn set_stroke_color(&mut self, color: Srgb);

    fn set_line_width(&mut self, width: f64);

    fn set_line_cap(&mut self, cap: LineCap);

    fn set_line_join(&mut self, join: LineJoin);

    /// Adds a circular arc centred on `(cx, cy)` from angle `start` to `end`.
    ///
    /// A line joins the current point to the arc start, or a subpath starts
    /// there if there is no current point. Sweeps of a full turn or more draw
    /// a full circle. The arc is approximated with one cubic per quarter turn.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, anticlockwise: bool) {
        let sweep = arc_sweep(start, end, anticlockwise);
        let radius = radius.abs();
        self.line_to(cx + radius * start.cos(), cy + radius * start.sin());

        let segments = (sweep.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / segments as f64;
        let k = 4.0 / 3.0 * (step / 4.0).tan() * radius;
        let mut a0 = start;
        for _ in 0..segments {
            let a1 = a0 + step;
            let (s0, c0) = a0.sin_cos();
            let (s1, c1) = a1.sin_cos();
            self.cubic_to(
                cx + radius * c0 - k * s0,
                cy + radius * s0 + k * c0,
                cx + radius * c1 + k * s1,
                cy + radius * s1 - k * c1,
                cx + radius * c1,
                cy + radius * s1,
            );
            a0 = a1;
        }
    }
}

/// Signed sweep of a canvas-style arc.
fn arc_sweep(start: f64, end: f64, anticlockwise: bool) -> f64 {
    if anticlockwise {
        if start - end >= TAU {
            -TAU
        } else {
            -(start - end).rem_euclid(TAU)
        }
    } else if end - start >= TAU {
        TAU
    } else {
        (end - start).rem_euclid(TAU)
    }
}

/// Scoped save/restore. Created by [`save`]; restores on drop.
pub struct Saved<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

/// Saves the surface state and returns a guard that restores it when dropped.
///
/// The guard derefs to the surface, so nested scopes are `save(&mut *guard)`.
pub fn save<S: Surface + ?Sized>(surface: &mut S) -> Saved<'_, S> {
    surface.save();
    Saved { surface }
}

impl<S: Surface + ?Sized> Deref for Saved<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for Saved<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for Saved<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
