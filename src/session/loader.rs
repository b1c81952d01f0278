use rayon::prelude::*;

use crate::assets::locator::category_folder;
use crate::foundation::core::Category;
use crate::foundation::error::{PfpError, PfpResult};
use crate::session::state::{Action, CustomizerState};
use crate::store::object::ObjectStore;

/// List every category folder under `root` in parallel.
///
/// One action per category, in z-order.
pub fn list_catalogs(store: &dyn ObjectStore, root: &str) -> Vec<Action> {
    Category::ALL
        .par_iter()
        .map(|&category| match store.list(&category_folder(root, category)) {
            Ok(assets) => Action::CatalogLoaded { category, assets },
            Err(e) => Action::CatalogFailed {
                category,
                reason: e.to_string(),
            },
        })
        .collect()
}

/// List all catalogs and feed the results into `state`.
///
/// Successful categories are applied even when others fail; the error names every failed
/// category.
#[tracing::instrument(skip(state, store))]
pub fn load_catalogs(
    state: &mut CustomizerState,
    store: &dyn ObjectStore,
    root: &str,
) -> PfpResult<()> {
    let mut failures = Vec::new();
    for action in list_catalogs(store, root) {
        if let Action::CatalogFailed { category, reason } = &action {
            failures.push(format!("{category}: {reason}"));
        }
        state.apply(action)?;
    }

    if failures.is_empty() {
        tracing::info!("catalogs loaded");
        Ok(())
    } else {
        Err(PfpError::asset_listing(failures.join("; ")))
    }
}
