use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::assets::catalog::{self, Catalog, CatalogEntry, CategoryCatalog};
use crate::assets::locator::AssetRef;
use crate::assets::selection::{Selection, empty_selection};
use crate::config::DefaultTraits;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{Category, PerCategory};
use crate::foundation::error::{PfpError, PfpResult};
use crate::resolve::resolver::{
    filter_by_variant, on_body_selected, on_skin_selected, shuffle_all,
};
use crate::resolve::variant::VariantTag;

/// State transitions accepted by [`CustomizerState::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// A category listing succeeded.
    CatalogLoaded {
        /// Listed category.
        category: Category,
        /// Listed low-resolution assets.
        assets: Vec<AssetRef>,
    },
    /// A category listing failed; the category stays unloaded.
    CatalogFailed {
        /// Category whose listing failed.
        category: Category,
        /// Failure description.
        reason: String,
    },
    /// Select a candidate by file name.
    Select {
        /// Target category.
        category: Category,
        /// File name among the category's current candidates; skins may be any listed skin.
        file: String,
    },
    /// Empty a slot. Clearing the body or skin lifts the constraint it imposed.
    Clear(Category),
    /// Change the fallback background color.
    SetColor(Rgba8),
    /// Randomize every layer, keeping body and skin compatible.
    Shuffle,
    /// Restore defaults.
    Reset,
    /// An export began.
    ExportStarted,
    /// An export ended.
    ExportFinished {
        /// Public URL of the uploaded image, if the upload succeeded.
        share_url: Option<String>,
        /// Set when the upload failed after a successful composition.
        upload_failed: bool,
    },
}

/// Everything the customizer knows, owned by one controller.
///
/// All mutation goes through [`CustomizerState::apply`].
#[derive(Clone, Debug)]
pub struct CustomizerState {
    catalog: Catalog,
    selection: Selection,
    fallback_color: Rgba8,
    default_color: Rgba8,
    skin_type: Option<VariantTag>,
    share_url: Option<String>,
    upload_failed: bool,
    exporting: bool,
    defaults: DefaultTraits,
    rng: ChaCha20Rng,
}

impl CustomizerState {
    /// Fresh state with nothing loaded. `seed` drives shuffles and random continuation picks.
    pub fn new(defaults: DefaultTraits, fallback_color: Rgba8, seed: u64) -> Self {
        Self {
            catalog: PerCategory::default(),
            selection: empty_selection(),
            fallback_color,
            default_color: fallback_color,
            skin_type: None,
            share_url: None,
            upload_failed: false,
            exporting: false,
            defaults,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Selected asset of one category.
    pub fn selected(&self, category: Category) -> Option<&AssetRef> {
        self.selection.get(category).as_ref()
    }

    /// All catalogs.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Currently offered assets of one category.
    pub fn candidates(&self, category: Category) -> &[CatalogEntry] {
        &self.catalog.get(category).candidates
    }

    /// Fill color used when no background is selected.
    pub fn fallback_color(&self) -> Rgba8 {
        self.fallback_color
    }

    /// Skin variant the body/skin pair is currently constrained to.
    pub fn skin_type(&self) -> Option<VariantTag> {
        self.skin_type
    }

    /// Public URL of the last successful upload.
    pub fn share_url(&self) -> Option<&str> {
        self.share_url.as_deref()
    }

    /// Error indicator for the last upload.
    pub fn upload_failed(&self) -> bool {
        self.upload_failed
    }

    /// Return `true` while an export is running.
    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Return `true` once every category listing succeeded.
    pub fn all_loaded(&self) -> bool {
        catalog::all_loaded(&self.catalog)
    }

    /// Apply one transition.
    ///
    /// Variant misses on body/skin selection are absorbed: the selection changes and the
    /// candidate lists stay as they were.
    pub fn apply(&mut self, action: Action) -> PfpResult<()> {
        match action {
            Action::CatalogLoaded { category, assets } => {
                let was_loaded = self.all_loaded();
                *self.catalog.get_mut(category) = CategoryCatalog::from_assets(assets);
                if !was_loaded && self.all_loaded() {
                    tracing::info!("all catalogs loaded; applying defaults");
                    self.apply_defaults();
                }
            }
            Action::CatalogFailed { category, reason } => {
                tracing::warn!(%category, %reason, "asset listing failed");
                self.catalog.get_mut(category).loaded = false;
            }
            Action::Select { category, file } => self.select(category, &file)?,
            Action::Clear(category) => self.clear(category),
            Action::SetColor(color) => self.fallback_color = color,
            Action::Shuffle => {
                if !self.all_loaded() {
                    tracing::debug!(
                        missing = ?catalog::missing_categories(&self.catalog),
                        "shuffle ignored until all catalogs load"
                    );
                    return Ok(());
                }
                self.clear_share_state();
                let shuffle = shuffle_all(&self.catalog, &mut self.rng);
                self.selection = shuffle.selection;
                self.skin_type = shuffle.skin_type;
                self.catalog.get_mut(Category::Body).reset_candidates();
                self.catalog.get_mut(Category::Skin).candidates = shuffle.skin_candidates;
            }
            Action::Reset => {
                self.apply_defaults();
                self.clear_share_state();
            }
            Action::ExportStarted => {
                if self.exporting {
                    return Err(PfpError::validation("an export is already in progress"));
                }
                self.exporting = true;
            }
            Action::ExportFinished {
                share_url,
                upload_failed,
            } => {
                self.exporting = false;
                self.share_url = share_url;
                self.upload_failed = upload_failed;
            }
        }
        Ok(())
    }

    fn select(&mut self, category: Category, file: &str) -> PfpResult<()> {
        let listing = self.catalog.get(category);
        // Any listed skin stays selectable; the narrowed skin list is only the offered view.
        let entry = match category {
            Category::Skin => listing.find_initial(file),
            _ => listing.find_candidate(file),
        }
        .cloned()
        .ok_or_else(|| {
            PfpError::validation(format!("\"{file}\" is not a {category} candidate"))
        })?;
        *self.selection.get_mut(category) = Some(entry.asset.clone());

        match category {
            Category::Body => {
                match on_body_selected(&entry, &self.catalog.get(Category::Skin).initial) {
                    Ok(change) => {
                        self.skin_type = change.skin_type;
                        self.catalog.get_mut(Category::Skin).candidates = change.skin_candidates;
                    }
                    Err(e) => tracing::debug!(error = %e, "body selection left skins unchanged"),
                }
            }
            Category::Skin => {
                let current_body = self.selection.get(Category::Body).clone();
                match on_skin_selected(
                    &entry,
                    current_body.as_ref(),
                    &self.catalog.get(Category::Body).initial,
                    &mut self.rng,
                ) {
                    Ok(change) => {
                        self.skin_type = Some(change.skin_type);
                        let skins = filter_by_variant(
                            &self.catalog.get(Category::Skin).initial,
                            change.skin_type,
                        );
                        self.catalog.get_mut(Category::Skin).candidates = skins;
                        self.catalog.get_mut(Category::Body).candidates = change.body_candidates;
                        if current_body.is_some() {
                            *self.selection.get_mut(Category::Body) = change.body;
                        }
                    }
                    Err(e) => tracing::debug!(error = %e, "skin selection left bodies unchanged"),
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn clear(&mut self, category: Category) {
        *self.selection.get_mut(category) = None;
        match category {
            Category::Body => {
                self.skin_type = None;
                self.catalog.get_mut(Category::Skin).reset_candidates();
            }
            Category::Skin => {
                self.catalog.get_mut(Category::Body).reset_candidates();
                self.skin_type = self
                    .selection
                    .get(Category::Body)
                    .as_ref()
                    .and_then(|body| VariantTag::find_in(body.file_name()))
                    .filter(|t| !t.is_universal());
            }
            _ => {}
        }
    }

    fn apply_defaults(&mut self) {
        for (category, cat) in self.catalog.iter_mut() {
            cat.reset_candidates();
            let wanted = self.defaults.get(category);
            let found = cat.find_initial(wanted).map(|e| e.asset.clone());
            if found.is_none() {
                tracing::debug!(%category, wanted, "default trait not found");
            }
            *self.selection.get_mut(category) = found;
        }
        self.fallback_color = self.default_color;
        self.skin_type = None;
    }

    fn clear_share_state(&mut self) {
        self.share_url = None;
        self.upload_failed = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
