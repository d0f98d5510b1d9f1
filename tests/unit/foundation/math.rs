use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 128), 128);
    assert_eq!(mul_div255_u8(0, 200), 0);
}

#[test]
fn unpremul_inverts_premul_within_rounding() {
    assert_eq!(unpremul_u8(0, 0), 0);
    assert_eq!(unpremul_u8(128, 255), 128);
    let premul = mul_div255_u8(200, 100);
    assert!((i32::from(unpremul_u8(premul, 100)) - 200).abs() <= 2);
}

#[test]
fn distance_is_euclidean() {
    assert!((distance((0.0, 0.0), (3.0, 4.0)) - 5.0).abs() < 1e-12);
}
