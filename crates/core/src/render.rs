//! The pattern renderer.
//!
//! A render is a pure function of `(seed, width, height, density)`. It runs in
//! two phases over one freshly seeded [`SineRng`]:
//!
//! 1. [`Composition::plan`] draws every composition decision: palette,
//!    background, layer count, and per layer the motif, color, opacity, line
//!    width and base shape count. None of these depend on the surface size or
//!    on density, so the same seed always plans the same layers.
//! 2. Painting fills the background, scatters each layer's shapes and lays
//!    the scribble overlay on top, consuming the rest of the stream.

use std::f64::consts::TAU;

use serde::Serialize;

use crate::color::Srgb;
use crate::motif::Motif;
use crate::palette::Palette;
use crate::prng::SineRng;
use crate::surface::{save, LineCap, LineJoin, Surface};

/// Minimum number of motif layers.
const MIN_LAYERS: usize = 3;
/// Number of distinct layer counts above the minimum (3..=6).
const LAYER_SPREAD: f64 = 4.0;
/// Minimum base shape count per layer.
const MIN_SHAPES: u32 = 10;
/// Number of distinct base shape counts above the minimum (10..=49).
const SHAPE_SPREAD: f64 = 40.0;
/// Smallest shape size in pixels.
const MIN_SHAPE_SIZE: f64 = 40.0;
/// Extra shape size as a fraction of the shorter surface side.
const SHAPE_SIZE_FRACTION: f64 = 0.3;
/// Scribbles at density 1.
const BASE_SCRIBBLES: f64 = 15.0;
/// Opacity of the scribble overlay.
const SCRIBBLE_ALPHA: f64 = 0.6;
/// Maximum per-axis step of a scribble segment, in pixels.
const SCRIBBLE_STEP: f64 = 200.0;
/// Maximum per-axis offset of a scribble control point from its end point.
const SCRIBBLE_WOBBLE: f64 = 50.0;

/// One motif layer's decisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerPlan {
    pub motif: Motif,
    pub color: Srgb,
    /// Opacity in [0.2, 0.8).
    pub alpha: f64,
    /// Stroke width in [2, 10).
    pub line_width: f64,
    /// Shape count before density scaling, in [10, 49].
    pub base_count: u32,
    /// Shapes actually drawn: `floor(base_count * density)`, at least 0.
    pub shape_count: usize,
}

/// Everything a render decided before painting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub palette: &'static str,
    pub background: Srgb,
    pub layers: Vec<LayerPlan>,
    pub scribble_count: usize,
    #[serde(skip)]
    colors: &'static Palette,
}

impl Composition {
    /// Draws the palette, background, layer count and every layer's settings.
    pub fn plan(rng: &mut SineRng, density: f64) -> Composition {
        let palette = Palette::pick(rng);
        let background = palette.pick_color(rng);
        let layer_count = MIN_LAYERS + (rng.next_f64() * LAYER_SPREAD).floor() as usize;

        let layers = (0..layer_count)
            .map(|_| {
                let motif = Motif::pick(rng);
                let color = palette.pick_color(rng);
                let alpha = rng.next_range(0.2, 0.8);
                let line_width = rng.next_range(2.0, 10.0);
                let base_count = MIN_SHAPES + (rng.next_f64() * SHAPE_SPREAD).floor() as u32;
                LayerPlan {
                    motif,
                    color,
                    alpha,
                    line_width,
                    base_count,
                    shape_count: shape_count(base_count, density),
                }
            })
            .collect();

        Composition {
            palette: palette.name(),
            background,
            layers,
            scribble_count: scribble_count(density),
            colors: palette,
        }
    }

    /// The palette every color of this render comes from.
    pub fn colors(&self) -> &'static Palette {
        self.colors
    }

    /// Total shapes over all layers.
    pub fn total_shapes(&self) -> usize {
        self.layers.iter().map(|l| l.shape_count).sum()
    }
}

/// `floor(base * density)`, clamped to 0. Non-finite density counts as 0.
pub fn shape_count(base: u32, density: f64) -> usize {
    scaled(f64::from(base), density)
}

/// `floor(15 * density)`, clamped to 0. Non-finite density counts as 0.
pub fn scribble_count(density: f64) -> usize {
    scaled(BASE_SCRIBBLES, density)
}

fn scaled(base: f64, density: f64) -> usize {
    if !density.is_finite() {
        return 0;
    }
    (base * density).floor().max(0.0) as usize
}

/// Renders one wallpaper onto `surface`, overwriting the `width` x `height`
/// region from the origin.
///
/// Returns the composition that was painted, or `None` without drawing
/// anything when either dimension is zero.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    width: u32,
    height: u32,
    seed: f64,
    density: f64,
) -> Option<Composition> {
    if width == 0 || height == 0 {
        log::warn!("skipping render of seed {seed}: empty {width}x{height} surface");
        return None;
    }

    let mut rng = SineRng::new(seed);
    let composition = Composition::plan(&mut rng, density);
    let (w, h) = (f64::from(width), f64::from(height));

    log::debug!(
        "render seed={seed} {width}x{height} density={density}: palette={} layers={} shapes={} scribbles={}",
        composition.palette,
        composition.layers.len(),
        composition.total_shapes(),
        composition.scribble_count,
    );

    {
        let mut bg = save(surface);
        bg.set_fill_color(composition.background);
        bg.fill_rect(0.0, 0.0, w, h);
    }

    for (index, layer) in composition.layers.iter().enumerate() {
        log::trace!("layer {index}: {layer:?}");
        paint_layer(surface, layer, w, h, &mut rng);
    }

    paint_scribbles(surface, &composition, w, h, &mut rng);

    Some(composition)
}

fn paint_layer<S: Surface + ?Sized>(
    surface: &mut S,
    layer: &LayerPlan,
    w: f64,
    h: f64,
    rng: &mut SineRng,
) {
    let mut layer_scope = save(surface);
    layer_scope.set_global_alpha(layer.alpha);
    layer_scope.set_fill_color(layer.color);
    layer_scope.set_stroke_color(layer.color);
    layer_scope.set_line_width(layer.line_width);
    layer_scope.set_line_cap(LineCap::Round);
    layer_scope.set_line_join(LineJoin::Round);

    let max_extra = w.min(h) * SHAPE_SIZE_FRACTION;
    for _ in 0..layer.shape_count {
        let x = rng.next_f64() * w;
        let y = rng.next_f64() * h;
        let size = MIN_SHAPE_SIZE + rng.next_f64() * max_extra;
        let rotation = rng.next_f64() * TAU;

        let mut frame = save(&mut *layer_scope);
        frame.translate(x, y);
        frame.rotate(rotation);
        layer.motif.draw(&mut *frame, size, rng);
    }
}

fn paint_scribbles<S: Surface + ?Sized>(
    surface: &mut S,
    composition: &Composition,
    w: f64,
    h: f64,
    rng: &mut SineRng,
) {
    let mut overlay = save(surface);
    overlay.set_global_alpha(SCRIBBLE_ALPHA);
    overlay.set_line_cap(LineCap::Butt);
    overlay.set_line_join(LineJoin::Miter);

    for _ in 0..composition.scribble_count {
        overlay.set_stroke_color(composition.colors.pick_color(rng));
        overlay.set_line_width(rng.next_range(1.0, 3.0));
        overlay.begin_path();

        let mut x = rng.next_f64() * w;
        let mut y = rng.next_f64() * h;
        overlay.move_to(x, y);

        let segments = 5 + (rng.next_f64() * 10.0).floor() as usize;
        for _ in 0..segments {
            x = (x + (rng.next_f64() - 0.5) * SCRIBBLE_STEP).clamp(0.0, w);
            y = (y + (rng.next_f64() - 0.5) * SCRIBBLE_STEP).clamp(0.0, h);
            let cx = x + (rng.next_f64() - 0.5) * SCRIBBLE_WOBBLE;
            let cy = y + (rng.next_f64() - 0.5) * SCRIBBLE_WOBBLE;
            overlay.quad_to(cx, cy, x, y);
        }
        overlay.stroke();
    }
}
