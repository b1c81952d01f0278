//! Shared primitives: error taxonomy, layer categories and colors.

/// Hex-parsed RGBA8 colors.
pub mod color;
/// Layer categories and per-category tables.
pub mod core;
/// Error taxonomy.
pub mod error;
