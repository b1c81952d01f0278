use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;

use super::*;
use crate::assets::catalog::CategoryCatalog;
use crate::foundation::core::PerCategory;

fn entry(category: Category, file: &str) -> CatalogEntry {
    CatalogEntry::new(AssetRef::new("LD_ASSETS", category, file).unwrap())
}

fn bodies() -> Vec<CatalogEntry> {
    [
        "tshirtwhite_skin1.png",
        "tshirtwhite_skin3.png",
        "tshirtwhite_skin10.png",
        "suit_skin3.png",
        "hoodie_universal.png",
        "nobody.png",
    ]
    .into_iter()
    .map(|f| entry(Category::Body, f))
    .collect()
}

fn skins() -> Vec<CatalogEntry> {
    [
        "skin1_rosy.png",
        "skin1_pale.png",
        "skin3_tan.png",
        "skin10_deep.png",
        "alien_universal.png",
    ]
    .into_iter()
    .map(|f| entry(Category::Skin, f))
    .collect()
}

fn files(list: &[CatalogEntry]) -> Vec<&str> {
    list.iter().map(|e| e.file_name()).collect()
}

fn catalog() -> Catalog {
    PerCategory::from_fn(|category| match category {
        Category::Body => CategoryCatalog::from_assets(bodies().into_iter().map(|e| e.asset)),
        Category::Skin => CategoryCatalog::from_assets(skins().into_iter().map(|e| e.asset)),
        other => CategoryCatalog::from_assets(
            ["a.png", "b.png"]
                .into_iter()
                .map(|f| AssetRef::new("LD_ASSETS", other, f).unwrap()),
        ),
    })
}

#[test]
fn skin_side_ignores_universal() {
    let universal_skin = entry(Category::Skin, "alien_universal.png");
    assert_eq!(resolve_variant_from_skin(&universal_skin), None);
    let universal_body = entry(Category::Body, "hoodie_universal.png");
    assert_eq!(
        resolve_variant_from_body(&universal_body),
        Some(VariantTag::Universal)
    );
}

#[test]
fn filter_keeps_same_tag_and_universal_only() {
    let out = filter_by_variant(&skins(), VariantTag::Skin(1));
    assert_eq!(
        files(&out),
        vec!["skin1_rosy.png", "skin1_pale.png", "alien_universal.png"]
    );

    for body in bodies() {
        let Some(tag) = resolve_variant_from_body(&body) else {
            continue;
        };
        if tag.is_universal() {
            continue;
        }
        for skin in filter_by_variant(&skins(), tag) {
            assert!(matches!(skin.tag, Some(t) if t == tag || t.is_universal()));
        }
    }
}

#[test]
fn filter_does_not_confuse_skin1_with_skin10() {
    let out = filter_by_variant(&bodies(), VariantTag::Skin(1));
    assert_eq!(
        files(&out),
        vec!["tshirtwhite_skin1.png", "hoodie_universal.png"]
    );
}

#[test]
fn universal_body_clears_the_skin_constraint() {
    let change =
        on_body_selected(&entry(Category::Body, "hoodie_universal.png"), &skins()).unwrap();
    assert_eq!(change.skin_type, None);
    assert_eq!(change.skin_candidates.len(), skins().len());
}

#[test]
fn tagged_body_narrows_skins() {
    let change = on_body_selected(&entry(Category::Body, "suit_skin3.png"), &skins()).unwrap();
    assert_eq!(change.skin_type, Some(VariantTag::Skin(3)));
    assert_eq!(
        files(&change.skin_candidates),
        vec!["skin3_tan.png", "alien_universal.png"]
    );
}

#[test]
fn untagged_assets_are_a_resolution_miss() {
    let err = on_body_selected(&entry(Category::Body, "nobody.png"), &skins()).unwrap_err();
    assert!(matches!(err, PfpError::VariantResolutionMiss(_)));

    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let err = on_skin_selected(
        &entry(Category::Skin, "alien_universal.png"),
        None,
        &bodies(),
        &mut rng,
    )
    .unwrap_err();
    assert!(matches!(err, PfpError::VariantResolutionMiss(_)));
}

#[test]
fn skin_change_keeps_the_same_body_file() {
    let current = AssetRef::new("LD_ASSETS", Category::Body, "tshirtwhite_skin1.png").unwrap();
    for seed in 0..16 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let change = on_skin_selected(
            &entry(Category::Skin, "skin3_tan.png"),
            Some(&current),
            &bodies(),
            &mut rng,
        )
        .unwrap();
        assert_eq!(change.skin_type, VariantTag::Skin(3));
        assert_eq!(
            change.body.unwrap().file_name(),
            "tshirtwhite_skin3.png",
            "seed {seed}"
        );
    }
}

#[test]
fn skin_change_without_counterpart_picks_a_compatible_body() {
    let current = AssetRef::new("LD_ASSETS", Category::Body, "suit_skin3.png").unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(3);
    let change = on_skin_selected(
        &entry(Category::Skin, "skin10_deep.png"),
        Some(&current),
        &bodies(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(
        files(&change.body_candidates),
        vec!["tshirtwhite_skin10.png", "hoodie_universal.png"]
    );
    let body = change.body.unwrap();
    assert!(files(&change.body_candidates).contains(&body.file_name()));
}

#[test]
fn universal_body_survives_a_skin_change() {
    let current = AssetRef::new("LD_ASSETS", Category::Body, "hoodie_universal.png").unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let change = on_skin_selected(
        &entry(Category::Skin, "skin1_pale.png"),
        Some(&current),
        &bodies(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(change.body, Some(current));
}

#[test]
fn skin_change_without_a_body_leaves_body_empty() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let change = on_skin_selected(
        &entry(Category::Skin, "skin1_pale.png"),
        None,
        &bodies(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(change.body, None);
    assert!(!change.body_candidates.is_empty());
}

#[test]
fn shuffle_keeps_body_and_skin_compatible() {
    let catalog = catalog();
    for seed in 0..200 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let shuffle = shuffle_all(&catalog, &mut rng);

        let body = shuffle.selection.get(Category::Body).clone().unwrap();
        let skin = shuffle.selection.get(Category::Skin).clone().unwrap();
        let body_tag = VariantTag::find_in(body.file_name());
        let skin_tag = VariantTag::find_in(skin.file_name());

        assert!(body_tag.is_some(), "seed {seed}: untagged body {body}");
        let compatible = body_tag == Some(VariantTag::Universal)
            || skin_tag == Some(VariantTag::Universal)
            || body_tag == skin_tag;
        assert!(compatible, "seed {seed}: {body} vs {skin}");

        for category in [Category::Background, Category::Eyes, Category::Earrings] {
            assert!(shuffle.selection.get(category).is_some());
        }
    }
}

#[test]
fn shuffle_is_deterministic_per_seed() {
    let catalog = catalog();
    let a = shuffle_all(&catalog, &mut ChaCha20Rng::seed_from_u64(42));
    let b = shuffle_all(&catalog, &mut ChaCha20Rng::seed_from_u64(42));
    assert_eq!(a, b);
}
