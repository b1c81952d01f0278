use super::*;

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("").is_err());
}

#[test]
fn parse_path_splits_root_category_and_file() {
    let a = AssetRef::parse_path("LD_ASSETS/body/tshirtwhite_skin1.png").unwrap();
    assert_eq!(a.root(), "LD_ASSETS");
    assert_eq!(a.category(), Category::Body);
    assert_eq!(a.file_name(), "tshirtwhite_skin1.png");
    assert_eq!(a.folder(), "LD_ASSETS/body");
    assert_eq!(a.path(), "LD_ASSETS/body/tshirtwhite_skin1.png");
}

#[test]
fn parse_path_keeps_nested_roots() {
    let a = AssetRef::parse_path("cdn/v2/LD_ASSETS/eyes/blue.png").unwrap();
    assert_eq!(a.root(), "cdn/v2/LD_ASSETS");
    assert_eq!(a.category(), Category::Eyes);
}

#[test]
fn parse_path_rejects_short_or_unknown_paths() {
    assert!(AssetRef::parse_path("body/blue.png").is_err());
    assert!(AssetRef::parse_path("LD_ASSETS/hats/cap.png").is_err());
}

#[test]
fn with_root_preserves_relative_path() {
    let low = AssetRef::parse_path("LD_ASSETS/skin/skin3_tan.png").unwrap();
    let high = low.with_root("HD_ASSETS").unwrap();
    assert_eq!(high.path(), "HD_ASSETS/skin/skin3_tan.png");
    assert_eq!(high.category(), low.category());
    assert_eq!(high.file_name(), low.file_name());
}

#[test]
fn file_names_must_be_single_segments() {
    assert!(AssetRef::new("LD_ASSETS", Category::Top, "a/b.png").is_err());
    assert!(AssetRef::new("LD_ASSETS", Category::Top, "").is_err());
}

#[test]
fn serde_uses_the_object_path() {
    let a = AssetRef::new("HD_ASSETS", Category::Mouth, "trollgrin.png").unwrap();
    let s = serde_json::to_string(&a).unwrap();
    assert_eq!(s, "\"HD_ASSETS/mouth/trollgrin.png\"");
    let back: AssetRef = serde_json::from_str(&s).unwrap();
    assert_eq!(back, a);
}
