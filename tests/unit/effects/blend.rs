use image::{Rgba, RgbaImage};

use super::*;

#[test]
fn mask_multiplies_color_and_keeps_alpha() {
    let map = RgbaImage::from_pixel(2, 1, Rgba([200, 100, 255, 77]));
    let mut mask = RgbaImage::from_pixel(2, 1, Rgba([255, 128, 0, 10]));
    mask.put_pixel(1, 0, Rgba([0, 255, 51, 255]));

    let out = blend_with_mask(&map, &mask).unwrap();
    assert_eq!(out.get_pixel(0, 0).0, [200, 50, 0, 77]);
    assert_eq!(out.get_pixel(1, 0).0, [0, 100, 51, 77]);
}

#[test]
fn white_mask_is_identity() {
    let map = RgbaImage::from_fn(3, 3, |x, y| Rgba([x as u8 * 40, y as u8 * 40, 7, 255]));
    let mask = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 0]));
    assert_eq!(blend_with_mask(&map, &mask).unwrap(), map);
}

#[test]
fn size_mismatch_is_an_input_error() {
    let map = RgbaImage::new(4, 4);
    let mask = RgbaImage::new(4, 5);
    let err = blend_with_mask(&map, &mask).unwrap_err();
    assert!(matches!(err, HuntmapError::Input(_)));
    assert!(err.to_string().contains("4x5"));
}

#[test]
fn expansions_map_to_shared_masks() {
    assert_eq!(mask_stem_for_expansion("ARR"), Some("arrhw"));
    assert_eq!(mask_stem_for_expansion("HW"), Some("arrhw"));
    assert_eq!(mask_stem_for_expansion("SB"), Some("sb"));
    assert_eq!(mask_stem_for_expansion("EW"), Some("shb"));
    assert_eq!(mask_stem_for_expansion("DT"), Some("shb"));
    assert_eq!(mask_stem_for_expansion("XIV"), None);
}
