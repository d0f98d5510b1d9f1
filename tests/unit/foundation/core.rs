use super::*;
use serde_json::json;

#[test]
fn position_add_position_pair_and_scalar() {
    let p = Position::new(10, 20);
    assert_eq!(p.add(Position::new(5, 15)), Position::new(15, 35));
    assert_eq!(p + (5.0, 15.0), Position::new(15, 35));
    assert_eq!(p + 5.0, Position::new(15, 25));
}

#[test]
fn position_subtract_scale_negate() {
    let p = Position::new(10, 20);
    assert_eq!(p.subtract((3.0, 5.0)), Position::new(7, 15));
    assert_eq!(p - 5.0, Position::new(5, 15));
    assert_eq!(p.scale((2.0, 3.0)), Position::new(20, 60));
    assert_eq!(p * 2.0, Position::new(20, 40));
    assert_eq!(-p, Position::new(-10, -20));
}

#[test]
fn position_index_get_and_iter() {
    let p = Position::new(10, 20);
    assert_eq!(p[0], 10.0);
    assert_eq!(p[1], 20.0);
    assert_eq!(p.get(1).unwrap(), 20.0);
    assert!(matches!(p.get(2), Err(HuntmapError::Input(_))));
    assert_eq!(p.into_iter().collect::<Vec<_>>(), vec![10.0, 20.0]);
    assert_eq!(p.to_string(), "Position(10,20)");
}

#[test]
fn json_string_operand_is_a_type_error() {
    let err = Operand::try_from(&json!("invalid")).unwrap_err();
    assert!(matches!(err, HuntmapError::Input(_)));
    assert!(err.to_string().contains("a string"));

    assert!(Operand::try_from(&json!([1.0, "x"])).is_err());
    assert!(Operand::try_from(&json!([1.0, 2.0, 3.0])).is_err());
    assert!(Operand::try_from(&json!(true)).is_err());
}

#[test]
fn json_operands_parse_scalar_pair_and_object() {
    assert_eq!(Operand::try_from(&json!(2.5)).unwrap(), Operand::Scalar(2.5));
    assert_eq!(Operand::try_from(&json!([1, 2])).unwrap(), Operand::Pair(1.0, 2.0));
    assert_eq!(
        Operand::try_from(&json!({"x": 3, "y": 4})).unwrap(),
        Operand::Pair(3.0, 4.0)
    );
}

#[test]
fn position_deserializes_from_pairs_only() {
    let p: Position = serde_json::from_value(json!([12, 34])).unwrap();
    assert_eq!(p, Position::new(12, 34));
    assert!(serde_json::from_value::<Position>(json!("(1, 2)")).is_err());
    assert!(serde_json::from_value::<Position>(json!(5)).is_err());
}

#[test]
fn rotate_quarter_turn() {
    let p = Position::new(2, 0).rotate(std::f64::consts::FRAC_PI_2);
    assert!(p.x.abs() < 1e-12);
    assert!((p.y - 2.0).abs() < 1e-12);
}

#[test]
fn premul_from_straight() {
    let c = Rgba8Premul::from_straight_rgba(255, 0, 128, 128);
    assert_eq!(c.to_array(), [128, 0, 64, 128]);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}
