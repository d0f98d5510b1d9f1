use super::*;

#[test]
fn origin_maps_to_pixel_zero_for_any_scale() {
    for scale in [50.0, 95.0, 100.0, 200.0, 400.0] {
        assert_eq!(map_to_pixel(1.0, scale), 0);
    }
}

#[test]
fn forward_transform_matches_reference_values() {
    // (21.425 - 1) / 40.85 * 2048 == 1024
    assert_eq!(map_to_pixel(21.425, 100.0), 1024);
    assert_eq!(map_to_pixel(41.85, 100.0), 2048);
    assert_eq!(map_to_pixel(11.2125, 200.0), 1024);
}

#[test]
fn round_trip_is_within_one_quantization_step() {
    for scale in [95.0, 100.0, 200.0, 400.0] {
        let step = 1.0 / pixels_per_map_unit(scale);
        let mut x = -5.0;
        while x < 45.0 {
            let back = pixel_to_map(map_to_pixel(x, scale) as f64, scale);
            assert!((back - x).abs() <= step, "x={x} scale={scale} back={back}");
            x += 0.37;
        }
    }
}

#[test]
fn accepts_negative_and_large_inputs() {
    assert!(map_to_pixel(-100.0, 100.0) < 0);
    let big = map_to_pixel(1.0e6, 100.0);
    assert!(big > 0);
    assert!(pixel_to_map(-512.0, 100.0).is_finite());
}

#[test]
fn spawn_to_screen_converts_both_axes() {
    let p = spawn_to_screen(1.0, 21.425, 100.0);
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, 1024.0);
}
