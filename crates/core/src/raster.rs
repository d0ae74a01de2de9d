//! CPU drawing surface backed by a `tiny-skia` pixmap.
//!
//! Path points are mapped through the current transform as they are added,
//! so a path built across `translate`/`rotate` calls keeps the frame each
//! point was specified in. Fills use non-zero winding with antialiasing.

use glam::{DAffine2, DVec2};
use tiny_skia::{BlendMode, Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::color::Srgb;
use crate::error::ScribbleError;
use crate::surface::{Composite, LineCap, LineJoin, Surface};

#[derive(Debug, Clone, Copy)]
struct PaintState {
    transform: DAffine2,
    alpha: f64,
    fill: Srgb,
    stroke: Srgb,
    line_width: f64,
    cap: LineCap,
    join: LineJoin,
    composite: Composite,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            transform: DAffine2::IDENTITY,
            alpha: 1.0,
            fill: Srgb::from_u32(0x000000),
            stroke: Srgb::from_u32(0x000000),
            line_width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            composite: Composite::SourceOver,
        }
    }
}

/// Path verbs in device space.
#[derive(Debug, Clone, Copy)]
enum Verb {
    Move(DVec2),
    Line(DVec2),
    Quad(DVec2, DVec2),
    Cubic(DVec2, DVec2, DVec2),
    Close,
}

/// An RGBA raster that the renderer can paint on.
pub struct Raster {
    pixmap: Pixmap,
    state: PaintState,
    stack: Vec<PaintState>,
    verbs: Vec<Verb>,
    current: Option<DVec2>,
    subpath_start: Option<DVec2>,
}

impl Raster {
    /// Allocates a transparent raster.
    ///
    /// Returns `ScribbleError::InvalidDimensions` if either side is zero or
    /// the pixel buffer cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self, ScribbleError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(ScribbleError::InvalidDimensions { width, height })?;
        Ok(Self {
            pixmap,
            state: PaintState::default(),
            stack: Vec::new(),
            verbs: Vec::new(),
            current: None,
            subpath_start: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The underlying pixmap (premultiplied RGBA).
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Straight-alpha RGBA of one pixel, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    fn to_device(&self, x: f64, y: f64) -> DVec2 {
        self.state.transform.transform_point2(DVec2::new(x, y))
    }

    /// Starts a subpath at `p` if there is no current point.
    fn ensure_subpath(&mut self, p: DVec2) {
        if self.current.is_none() {
            self.verbs.push(Verb::Move(p));
            self.current = Some(p);
            self.subpath_start = Some(p);
        }
    }

    fn build_path(&self) -> Option<tiny_skia::Path> {
        let mut pb = PathBuilder::new();
        for verb in &self.verbs {
            match *verb {
                Verb::Move(p) => pb.move_to(p.x as f32, p.y as f32),
                Verb::Line(p) => pb.line_to(p.x as f32, p.y as f32),
                Verb::Quad(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
                Verb::Cubic(c1, c2, p) => pb.cubic_to(
                    c1.x as f32,
                    c1.y as f32,
                    c2.x as f32,
                    c2.y as f32,
                    p.x as f32,
                    p.y as f32,
                ),
                Verb::Close => pb.close(),
            }
        }
        pb.finish()
    }

    fn paint(&self, color: Srgb) -> Paint<'static> {
        let mut c = Color::from_rgba8(color.r, color.g, color.b, 255);
        c.apply_opacity(self.state.alpha as f32);
        let mut paint = Paint::default();
        paint.set_color(c);
        paint.anti_alias = true;
        paint.blend_mode = match self.state.composite {
            Composite::SourceOver => BlendMode::SourceOver,
            Composite::DestinationOut => BlendMode::DestinationOut,
        };
        paint
    }

    fn stroke_style(&self) -> Stroke {
        Stroke {
            width: self.state.line_width as f32,
            line_cap: match self.state.cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match self.state.join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..Stroke::default()
        }
    }
}

impl Surface for Raster {
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let corners = [
            self.to_device(x, y),
            self.to_device(x + width, y),
            self.to_device(x + width, y + height),
            self.to_device(x, y + height),
        ];
        let mut pb = PathBuilder::new();
        pb.move_to(corners[0].x as f32, corners[0].y as f32);
        for c in &corners[1..] {
            pb.line_to(c.x as f32, c.y as f32);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            let paint = self.paint(self.state.fill);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    fn begin_path(&mut self) {
        self.verbs.clear();
        self.current = None;
        self.subpath_start = None;
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.to_device(x, y);
        self.verbs.push(Verb::Move(p));
        self.current = Some(p);
        self.subpath_start = Some(p);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.to_device(x, y);
        if self.current.is_none() {
            self.ensure_subpath(p);
            return;
        }
        self.verbs.push(Verb::Line(p));
        self.current = Some(p);
    }

    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        let c = self.to_device(cx, cy);
        let p = self.to_device(x, y);
        self.ensure_subpath(c);
        self.verbs.push(Verb::Quad(c, p));
        self.current = Some(p);
    }

    fn cubic_to(&mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) {
        let c1 = self.to_device(c1x, c1y);
        let c2 = self.to_device(c2x, c2y);
        let p = self.to_device(x, y);
        self.ensure_subpath(c1);
        self.verbs.push(Verb::Cubic(c1, c2, p));
        self.current = Some(p);
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.verbs.push(Verb::Close);
            self.current = self.subpath_start;
        }
    }

    fn fill(&mut self) {
        if let Some(path) = self.build_path() {
            let paint = self.paint(self.state.fill);
            self.pixmap
                .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    fn stroke(&mut self) {
        if let Some(path) = self.build_path() {
            let paint = self.paint(self.state.stroke);
            let stroke = self.stroke_style();
            self.pixmap
                .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.state.transform = self.state.transform * DAffine2::from_translation(DVec2::new(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        self.state.transform = self.state.transform * DAffine2::from_angle(angle);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        if alpha.is_finite() {
            self.state.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    fn set_composite(&mut self, composite: Composite) {
        self.state.composite = composite;
    }

    fn set_fill_color(&mut self, color: Srgb) {
        self.state.fill = color;
    }

    fn set_stroke_color(&mut self, color: Srgb) {
        self.state.stroke = color;
    }

    fn set_line_width(&mut self, width: f64) {
        // Zero, negative and non-finite widths are ignored, as on a canvas.
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.join = join;
    }
}
