//! Customizer session: one state struct, reducer-style updates, and the I/O around it.

/// Export flow: compose, write the download, upload, record.
pub mod export;
/// Parallel catalog listing.
pub mod loader;
/// Session state and its reducer.
pub mod state;
