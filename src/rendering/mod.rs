//! Rendering: paint API, software rasterizer, gallery layout and the
//! procedural placeholder generator.

pub mod layout;
pub mod paint;
pub mod placeholder;
#[cfg(feature = "raster")]
pub mod raster;

pub use paint::{Color, DrawingSurface, Glyph, PaintCommand, RecordingSurface};
pub use placeholder::render_placeholder;
#[cfg(feature = "raster")]
pub use raster::RasterSurface;

/// An encoded image of a rendered surface
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}
