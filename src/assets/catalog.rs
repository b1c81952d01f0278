use crate::assets::locator::AssetRef;
use crate::foundation::core::{Category, PerCategory};
use crate::resolve::variant::VariantTag;

/// One listed asset with its variant tag parsed once at ingestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Storage locator of the low-resolution asset.
    pub asset: AssetRef,
    /// Variant tag found in the file name, if any.
    pub tag: Option<VariantTag>,
}

impl CatalogEntry {
    /// Wrap a locator and parse its variant tag.
    pub fn new(asset: AssetRef) -> Self {
        let tag = VariantTag::find_in(asset.file_name());
        Self { asset, tag }
    }

    /// File name of the underlying asset.
    pub fn file_name(&self) -> &str {
        self.asset.file_name()
    }
}

/// Listing state for a single category.
///
/// `initial` is the full list fetched once per session. `candidates` is the currently offered
/// subset, narrowed by variant filtering and re-derived from `initial`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryCatalog {
    /// Full listing, immutable after load.
    pub initial: Vec<CatalogEntry>,
    /// Currently offered subset.
    pub candidates: Vec<CatalogEntry>,
    /// Set once the listing succeeded.
    pub loaded: bool,
}

impl CategoryCatalog {
    /// Build a loaded catalog from listed locators.
    pub fn from_assets(assets: impl IntoIterator<Item = AssetRef>) -> Self {
        let initial: Vec<CatalogEntry> = assets.into_iter().map(CatalogEntry::new).collect();
        Self {
            candidates: initial.clone(),
            initial,
            loaded: true,
        }
    }

    /// Restore `candidates` to the full listing.
    pub fn reset_candidates(&mut self) {
        self.candidates = self.initial.clone();
    }

    /// Look up an entry of the full listing by file name.
    pub fn find_initial(&self, file_name: &str) -> Option<&CatalogEntry> {
        self.initial.iter().find(|e| e.file_name() == file_name)
    }

    /// Look up an entry of the current candidates by file name.
    pub fn find_candidate(&self, file_name: &str) -> Option<&CatalogEntry> {
        self.candidates.iter().find(|e| e.file_name() == file_name)
    }
}

/// Catalogs for all eight categories.
pub type Catalog = PerCategory<CategoryCatalog>;

/// Return `true` once every category listing succeeded.
pub fn all_loaded(catalog: &Catalog) -> bool {
    catalog.iter().all(|(_, c)| c.loaded)
}

/// Categories whose listing has not succeeded yet.
pub fn missing_categories(catalog: &Catalog) -> Vec<Category> {
    catalog
        .iter()
        .filter(|(_, c)| !c.loaded)
        .map(|(cat, _)| cat)
        .collect()
}
