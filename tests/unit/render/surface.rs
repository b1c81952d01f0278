use super::*;

fn solid(width: u32, height: u32, px: PremulRgba8) -> DecodedImage {
    DecodedImage {
        width,
        height,
        rgba8_premul: px.repeat((width * height) as usize),
    }
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255]), [255, 0, 0, 255]);
}

#[test]
fn over_half_alpha_blends() {
    // 50% premultiplied white over opaque black.
    assert_eq!(over([0, 0, 0, 255], [128, 128, 128, 128]), [128, 128, 128, 255]);
}

#[test]
fn new_rejects_degenerate_sizes() {
    assert!(matches!(
        Surface::new(0, 10),
        Err(PfpError::Composition(_))
    ));
    assert!(matches!(
        Surface::new(MAX_SURFACE_EDGE + 1, 1),
        Err(PfpError::Composition(_))
    ));
}

#[test]
fn fill_sets_every_pixel() {
    let mut s = Surface::new(3, 2).unwrap();
    assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    s.fill(Rgba8::rgb(0xaa, 0xbb, 0xcc));
    assert_eq!(s.pixel(2, 1), Some([0xaa, 0xbb, 0xcc, 255]));
    assert_eq!(s.pixel(3, 0), None);
}

#[test]
fn small_layer_is_stretched_to_cover_the_surface() {
    let mut s = Surface::new(8, 8).unwrap();
    s.draw_stretched(&solid(1, 1, [0, 255, 0, 255])).unwrap();
    for (x, y) in [(0, 0), (7, 0), (0, 7), (7, 7), (3, 4)] {
        assert_eq!(s.pixel(x, y), Some([0, 255, 0, 255]));
    }
}

#[test]
fn transparent_layer_leaves_fill_visible() {
    let mut s = Surface::new(4, 4).unwrap();
    s.fill(Rgba8::rgb(1, 2, 3));
    s.draw_stretched(&solid(4, 4, [0, 0, 0, 0])).unwrap();
    assert_eq!(s.pixel(2, 2), Some([1, 2, 3, 255]));
}

#[test]
fn mismatched_layer_buffer_is_a_composition_error() {
    let mut s = Surface::new(4, 4).unwrap();
    let bad = DecodedImage {
        width: 2,
        height: 2,
        rgba8_premul: vec![0; 3],
    };
    assert!(matches!(
        s.draw_stretched(&bad),
        Err(PfpError::Composition(_))
    ));
}

#[test]
fn encode_png_round_trips_straight_colors() {
    let mut s = Surface::new(2, 2).unwrap();
    s.fill(Rgba8::rgb(0xaa, 0xbb, 0xcc));
    let png = s.encode_png().unwrap();
    let back = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 2));
    assert_eq!(back.get_pixel(1, 1).0, [0xaa, 0xbb, 0xcc, 255]);
}
