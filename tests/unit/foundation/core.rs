use super::*;

#[test]
fn arithmetic_returns_new_values() {
    let a = Vector2::new(1.0, 2.0);
    let b = Vector2::new(3.0, -1.0);
    assert_eq!(a.plus(b), Vector2::new(4.0, 1.0));
    assert_eq!(a.minus(b), Vector2::new(-2.0, 3.0));
    assert_eq!(a.scale(2.0), Vector2::new(2.0, 4.0));
    assert_eq!(a.divide(2.0), Vector2::new(0.5, 1.0));
    assert_eq!(a + b, a.plus(b));
    assert_eq!(b * 3.0 / 3.0, b);
    assert_eq!(a, Vector2::new(1.0, 2.0));
}

#[test]
fn distances() {
    let a = Vector2::new(0.0, 0.0);
    let b = Vector2::new(3.0, 4.0);
    assert_eq!(a.distance_to(b), 5.0);
    assert_eq!(a.squared_distance_to(b), 25.0);
}

#[test]
fn invalid_sentinel_is_nan_safe() {
    let invalid = Vector2::INVALID;
    assert!(invalid.is_invalid());
    assert!(!invalid.equals(Vector2::INVALID));
    assert!(!Vector2::ZERO.is_invalid());
    assert!(!invalid.is_finite());
}

#[test]
fn approx_equals_respects_epsilon() {
    let a = Vector2::new(1.0, 1.0);
    assert!(a.approx_equals(Vector2::new(1.0 + 1e-7, 1.0), 1e-6));
    assert!(!a.approx_equals(Vector2::new(1.1, 1.0), 1e-6));
}

#[test]
fn update_from_copies_in_place() {
    let mut cursor = Vector2::new(0.0, 0.0);
    cursor.update_from(Vector2::new(7.5, -3.0));
    assert!(cursor.equals(Vector2::new(7.5, -3.0)));
}

#[test]
fn display_and_parse_agree() {
    let v = Vector2::new(10.0, -2.5);
    assert_eq!(v.to_string(), "10,-2.5");
    assert_eq!(Vector2::parse("10, -2.5").unwrap(), v);
    assert!(Vector2::parse("10").is_err());
    assert!(Vector2::parse("a,b").is_err());
}

#[test]
fn kurbo_conversions_roundtrip() {
    let v = Vector2::new(1.5, 2.5);
    let p: Point = v.into();
    assert_eq!(Vector2::from(p), v);
    let k: Vec2 = v.into();
    assert_eq!(Vector2::from(k), v);
}

#[test]
fn viewport_derived_edges() {
    let vp = Viewport::new(10.0, -100.0, 200.0, 100.0).unwrap();
    assert_eq!(vp.left(), 10.0);
    assert_eq!(vp.right(), 210.0);
    assert_eq!(vp.top(), -100.0);
    assert_eq!(vp.bottom(), 0.0);
    assert_eq!(vp.to_rect(), Rect::new(10.0, -100.0, 210.0, 0.0));
}

#[test]
fn viewport_rejects_degenerate_sizes() {
    assert!(Viewport::new(0.0, 0.0, 0.0, 10.0).is_err());
    assert!(Viewport::new(f64::NAN, 0.0, 10.0, 10.0).is_err());
}
