//! pfpkit composes layered profile pictures from a cloud asset catalog.
//!
//! The library is organised around one session struct and two engines:
//!
//! - [`CustomizerState`] owns catalogs and the live selection and is mutated only through
//!   [`CustomizerState::apply`]
//! - the trait resolver keeps body and skin layers on compatible variants
//! - the [`Compositor`] stacks the high-resolution layers into a PNG
//!
//! External services sit behind [`ObjectStore`], [`ImageHost`] and [`DownloadLog`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Asset locators, catalogs, selections and image decoding.
pub mod assets;
/// Runtime configuration.
pub mod config;
/// Core types shared by every module.
pub mod foundation;
/// Raster surfaces and layer composition.
pub mod render;
/// Variant tags and body/skin compatibility.
pub mod resolve;
/// Session state, catalog loading and export.
pub mod session;
/// Object storage, image hosting and download analytics.
pub mod store;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{Category, PerCategory};
pub use crate::foundation::error::{PfpError, PfpResult};

pub use crate::assets::catalog::{Catalog, CatalogEntry, CategoryCatalog};
pub use crate::assets::locator::AssetRef;
pub use crate::assets::selection::{Selection, empty_selection};
pub use crate::config::{DefaultTraits, FirebaseConfig, PfpConfig};
pub use crate::render::compose::{Compositor, CompositorOpts, EncodedImage};
pub use crate::resolve::resolver::{filter_by_variant, shuffle_all};
pub use crate::resolve::variant::VariantTag;
pub use crate::session::export::{ExportOutcome, Exporter};
pub use crate::session::loader::{list_catalogs, load_catalogs};
pub use crate::session::state::{Action, CustomizerState};
pub use crate::store::docs::{DownloadLog, DownloadRecord, FirestoreLog, InMemoryDownloadLog};
pub use crate::store::firebase::FirebaseStorage;
pub use crate::store::host::{ImageHost, ImgbbHost};
pub use crate::store::object::{InMemoryStore, LocalDirStore, ObjectStore};
