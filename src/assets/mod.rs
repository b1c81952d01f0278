//! Asset locators, per-category catalogs and image decoding.

/// Per-category catalogs with parsed variant tags.
pub mod catalog;
/// Encoded image decoding into premultiplied RGBA8.
pub mod decode;
/// Storage locators for trait images.
pub mod locator;
/// The per-category selection map.
pub mod selection;
