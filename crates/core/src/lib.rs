#![deny(unsafe_code)]
//! Core of the hausa-scribble wallpaper generator.
//!
//! Provides the `SineRng` PRNG, the fixed `Palette` table, the `Motif` set,
//! the `Surface` drawing abstraction with scoped save/restore, the pattern
//! renderer, the wallpaper catalog and settings. With the `raster` feature
//! (default) a `tiny-skia` backed `Raster` surface is included.

pub mod catalog;
pub mod color;
pub mod error;
pub mod motif;
pub mod palette;
pub mod params;
pub mod prng;
#[cfg(feature = "raster")]
pub mod raster;
pub mod render;
pub mod settings;
pub mod surface;

pub use catalog::{AspectRatio, Wallpaper};
pub use color::Srgb;
pub use error::ScribbleError;
pub use motif::Motif;
pub use palette::Palette;
pub use prng::SineRng;
#[cfg(feature = "raster")]
pub use raster::Raster;
pub use render::{render, Composition, LayerPlan};
pub use settings::Settings;
pub use surface::{save, Composite, LineCap, LineJoin, Surface};
