//! External collaborators: object storage, the analytics document store and the image host.
//!
//! Each seam is a trait with an HTTP implementation and an in-memory one for tests and debugging.

/// Analytics document store for download records.
pub mod docs;
/// Firebase Storage REST backend.
pub mod firebase;
/// Image hosting upload API.
pub mod host;
pub(crate) mod http;
/// Object-storage trait plus local and in-memory backends.
pub mod object;
