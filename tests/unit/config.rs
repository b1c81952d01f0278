use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_the_shipped_asset_layout() {
    let cfg = PfpConfig::default();
    assert_eq!(cfg.low_res_root, "LD_ASSETS");
    assert_eq!(cfg.high_res_root, "HD_ASSETS");
    assert_eq!(cfg.size, 2400);
    assert_eq!(cfg.fallback_color.to_string(), "#aabbcc");
    assert_eq!(cfg.defaults.get(Category::Body), "tshirtwhite_skin1.png");
    assert_eq!(cfg.defaults.get(Category::Earrings), "noearrings.png");
    cfg.validate().unwrap();
}

#[test]
fn overlay_reads_keys_and_skips_blank_values() {
    let mut cfg = PfpConfig::default();
    cfg.overlay(lookup(&[
        ("PFP_FIREBASE_BUCKET", "cfb.appspot.com"),
        ("PFP_IMGBB_API_KEY", "k"),
        ("PFP_HTTP_TIMEOUT_MS", " 500 "),
        ("PFP_FALLBACK_COLOR", "#112233"),
        ("PFP_FIREBASE_PROJECT", "   "),
    ]))
    .unwrap();

    assert_eq!(cfg.firebase.bucket.as_deref(), Some("cfb.appspot.com"));
    assert_eq!(cfg.firebase.project, None);
    assert_eq!(cfg.imgbb_api_key.as_deref(), Some("k"));
    assert_eq!(cfg.http_timeout_ms, 500);
    assert_eq!(cfg.fallback_color, Rgba8::rgb(0x11, 0x22, 0x33));
}

#[test]
fn overlay_rejects_bad_values() {
    let mut cfg = PfpConfig::default();
    assert!(
        cfg.overlay(lookup(&[("PFP_HTTP_TIMEOUT_MS", "soon")]))
            .is_err()
    );
    let mut cfg = PfpConfig::default();
    assert!(
        cfg.overlay(lookup(&[("PFP_HIGH_RES_ROOT", "LD_ASSETS")]))
            .is_err()
    );
}

#[test]
fn config_deserializes_with_partial_json() {
    let cfg: PfpConfig =
        serde_json::from_str(r##"{"size": 1200, "fallback_color": "#000000"}"##).unwrap();
    assert_eq!(cfg.size, 1200);
    assert_eq!(cfg.fallback_color, Rgba8::rgb(0, 0, 0));
    assert_eq!(cfg.preview_size, 600);
    assert_eq!(cfg.compositor_opts().size, 1200);
}
