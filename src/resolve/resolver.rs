use rand_chacha::rand_core::RngCore;

use crate::assets::catalog::{Catalog, CatalogEntry};
use crate::assets::locator::AssetRef;
use crate::assets::selection::{Selection, empty_selection};
use crate::foundation::core::Category;
use crate::foundation::error::{PfpError, PfpResult};
use crate::resolve::pick::pick;
use crate::resolve::variant::VariantTag;

/// Variant tag of a body asset: a skin variant or `universal`.
pub fn resolve_variant_from_body(body: &CatalogEntry) -> Option<VariantTag> {
    body.tag
}

/// Variant tag of a skin asset. Only skin variants count; `universal` skins resolve to `None`.
pub fn resolve_variant_from_skin(skin: &CatalogEntry) -> Option<VariantTag> {
    skin.tag.filter(|t| !t.is_universal())
}

/// Keep entries tagged `tag` or `universal`, preserving order.
pub fn filter_by_variant(list: &[CatalogEntry], tag: VariantTag) -> Vec<CatalogEntry> {
    list.iter()
        .filter(|e| matches!(e.tag, Some(t) if t == tag || t.is_universal()))
        .cloned()
        .collect()
}

/// Result of selecting a body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BodyChange {
    /// Skin constraint implied by the body; `None` for `universal` bodies.
    pub skin_type: Option<VariantTag>,
    /// Skins compatible with the body.
    pub skin_candidates: Vec<CatalogEntry>,
}

/// Derive the skin constraint and compatible skins for a newly selected body.
pub fn on_body_selected(
    body: &CatalogEntry,
    initial_skins: &[CatalogEntry],
) -> PfpResult<BodyChange> {
    let tag = resolve_variant_from_body(body).ok_or_else(|| {
        PfpError::variant_miss(format!("no variant tag in body \"{}\"", body.file_name()))
    })?;

    Ok(match tag {
        VariantTag::Universal => BodyChange {
            skin_type: None,
            skin_candidates: initial_skins.to_vec(),
        },
        tag => BodyChange {
            skin_type: Some(tag),
            skin_candidates: filter_by_variant(initial_skins, tag),
        },
    })
}

/// Result of selecting a skin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkinChange {
    /// Skin variant of the new skin.
    pub skin_type: VariantTag,
    /// Bodies compatible with the new skin.
    pub body_candidates: Vec<CatalogEntry>,
    /// Body to select next. Only meaningful when a body was selected before the change;
    /// `None` then means no compatible body exists.
    pub body: Option<AssetRef>,
}

/// Recompute compatible bodies for a newly selected skin and carry the body selection over.
///
/// The current body is kept as "the same file for the new variant" when such a candidate
/// exists; otherwise a compatible body is picked at random.
pub fn on_skin_selected<R: RngCore + ?Sized>(
    skin: &CatalogEntry,
    current_body: Option<&AssetRef>,
    initial_bodies: &[CatalogEntry],
    rng: &mut R,
) -> PfpResult<SkinChange> {
    let tag = resolve_variant_from_skin(skin).ok_or_else(|| {
        PfpError::variant_miss(format!("no skin variant in skin \"{}\"", skin.file_name()))
    })?;

    let body_candidates = filter_by_variant(initial_bodies, tag);
    let body = current_body.and_then(|current| {
        continuation_body(current, tag, &body_candidates)
            .or_else(|| pick(rng, &body_candidates))
            .map(|e| e.asset.clone())
    });

    Ok(SkinChange {
        skin_type: tag,
        body_candidates,
        body,
    })
}

/// Find the candidate named like `current` with its skin token swapped for `tag`.
///
/// Ties resolve to the first match in candidate order.
pub fn continuation_body<'a>(
    current: &AssetRef,
    tag: VariantTag,
    candidates: &'a [CatalogEntry],
) -> Option<&'a CatalogEntry> {
    let wanted = VariantTag::replace_skin_token(current.file_name(), tag);
    candidates.iter().find(|e| e.file_name() == wanted)
}

/// Result of a "shuffle all".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shuffle {
    /// New selection for every category.
    pub selection: Selection,
    /// Skin constraint implied by the chosen body.
    pub skin_type: Option<VariantTag>,
    /// Skins compatible with the chosen body.
    pub skin_candidates: Vec<CatalogEntry>,
}

/// Pick every layer at random, keeping body and skin compatible.
///
/// A variant tag is drawn first (among tags with at least one compatible body), then a body for
/// that tag, then a skin compatible with the body's own tag.
pub fn shuffle_all<R: RngCore + ?Sized>(catalog: &Catalog, rng: &mut R) -> Shuffle {
    let mut selection = empty_selection();
    for (category, entry) in catalog.iter() {
        if matches!(category, Category::Body | Category::Skin) {
            continue;
        }
        *selection.get_mut(category) = pick(rng, &entry.initial).map(|e| e.asset.clone());
    }

    let bodies = &catalog.get(Category::Body).initial;
    let viable: Vec<VariantTag> = VariantTag::ALL
        .into_iter()
        .filter(|&t| !filter_by_variant(bodies, t).is_empty())
        .collect();
    let body = match pick(rng, &viable) {
        Some(&tag) => pick(rng, &filter_by_variant(bodies, tag)).cloned(),
        None => pick(rng, bodies).cloned(),
    };

    let skin_type = body
        .as_ref()
        .and_then(resolve_variant_from_body)
        .filter(|t| !t.is_universal());
    let skins = &catalog.get(Category::Skin).initial;
    let skin_candidates = match skin_type {
        Some(tag) => filter_by_variant(skins, tag),
        None => skins.clone(),
    };
    let skin = pick(rng, &skin_candidates).map(|e| e.asset.clone());

    *selection.get_mut(Category::Body) = body.map(|e| e.asset);
    *selection.get_mut(Category::Skin) = skin;

    Shuffle {
        selection,
        skin_type,
        skin_candidates,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/resolver.rs"]
mod tests;
