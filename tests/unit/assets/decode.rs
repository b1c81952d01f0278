use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_premultiplies_alpha() {
    let img = image::RgbaImage::from_raw(2, 1, vec![255, 0, 0, 255, 200, 100, 50, 0]).unwrap();
    let decoded = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(decoded.width, 2);
    assert_eq!(decoded.height, 1);
    assert_eq!(decoded.rgba8_premul, vec![255, 0, 0, 255, 0, 0, 0, 0]);
}

#[test]
fn decode_rejects_garbage() {
    assert!(decode_image(b"not an image").is_err());
}

#[test]
fn unpremultiply_inverts_premultiply_for_opaque_and_half_alpha() {
    let mut px = vec![255, 128, 0, 128, 9, 8, 7, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![128, 64, 0, 128, 9, 8, 7, 255]);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![255, 128, 0, 128, 9, 8, 7, 255]);
}
