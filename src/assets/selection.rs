use std::collections::BTreeMap;

use crate::assets::locator::AssetRef;
use crate::foundation::core::{Category, PerCategory};
use crate::store::docs::DownloadRecord;

/// Chosen asset per category; `None` leaves the layer out.
pub type Selection = PerCategory<Option<AssetRef>>;

/// Selection with every slot empty.
pub fn empty_selection() -> Selection {
    PerCategory::from_fn(|_| None)
}

/// Object paths per category, with empty slots as empty strings.
pub fn selection_paths(selection: &Selection) -> BTreeMap<Category, String> {
    selection
        .iter()
        .map(|(category, asset)| (category, asset.as_ref().map(AssetRef::path).unwrap_or_default()))
        .collect()
}

/// Analytics record for an exported selection.
pub fn download_record(selection: &Selection) -> DownloadRecord {
    DownloadRecord {
        selected: selection_paths(selection),
    }
}
