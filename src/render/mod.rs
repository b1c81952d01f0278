//! Layer compositing.
//!
//! Layers are drawn in [`crate::Category::ALL`] order onto a premultiplied RGBA8 surface, each
//! stretched to the full surface, and the result is encoded as PNG.

/// Selection compositor and its encoded output.
pub mod compose;
/// Premultiplied RGBA8 raster surface.
pub mod surface;
