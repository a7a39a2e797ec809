use super::*;
use rand::SeedableRng;

fn ctx(rng: &mut StdRng) -> GenerationContext<'_> {
    GenerationContext {
        rng,
        elevation_min: -5.0,
        elevation_max: -40.0,
        point_distance: 10.0,
    }
}

#[test]
fn diagonal_mountains_keep_unit_slope() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut strategy = Strategy::DiagonalMountains;
    let mut cursor = Vector2::new(0.0, -20.0);
    for _ in 0..50 {
        let before = cursor;
        let cmd = strategy.next_segment(&mut cursor, &mut ctx(&mut rng));
        assert_eq!(cmd, PathCommand::LineTo(cursor));
        let dx = cursor.x - before.x;
        let dy = (cursor.y - before.y).abs();
        assert!((dx - dy).abs() < 1e-9);
        assert!((-40.0..=-5.0).contains(&cursor.y));
    }
}

#[test]
fn random_mountains_use_fixed_spacing() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut strategy = Strategy::RandomMountains;
    let mut cursor = Vector2::new(3.0, -10.0);
    for i in 1..=20 {
        strategy.next_segment(&mut cursor, &mut ctx(&mut rng));
        assert!((cursor.x - (3.0 + 10.0 * f64::from(i))).abs() < 1e-9);
        assert!((-40.0..=-5.0).contains(&cursor.y));
    }
}

#[test]
fn hills_emit_curves_that_chain_from_the_cursor() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut strategy = Strategy::from_kind(StrategyKind::RandomHills);
    assert!(strategy.spline().is_none());

    let mut cursor = Vector2::new(0.0, -12.0);
    let start = cursor;
    let first = strategy.next_segment(&mut cursor, &mut ctx(&mut rng));
    let PathCommand::CurveTo { control1, .. } = first else {
        panic!("expected a curve, got {first:?}");
    };
    // zero-length lead-in pins the first control point on the origin
    assert_eq!(control1, start);
    assert_eq!(cursor.x, 10.0);

    for _ in 0..20 {
        let before = cursor;
        let cmd = strategy.next_segment(&mut cursor, &mut ctx(&mut rng));
        let spline = strategy.spline().unwrap();
        assert_eq!(spline.cursor(), cursor);
        assert_eq!(spline.previous(), before);
        assert_eq!(cmd.endpoint(), cursor);
        assert!(cursor.x > before.x);
        assert!(cmd.to_string().starts_with("C "));
    }
}

#[test]
fn preseeded_spline_is_used() {
    let mut rng = StdRng::seed_from_u64(5);
    let fitter = SplineFitter::new(
        Vector2::new(0.0, -10.0),
        Vector2::new(10.0, -20.0),
        Some(Vector2::new(-10.0, -15.0)),
    );
    let mut strategy = Strategy::from_kind(StrategyKind::DiagonalHills).with_spline(fitter);
    let mut cursor = Vector2::new(0.0, -10.0);
    let cmd = strategy.next_segment(&mut cursor, &mut ctx(&mut rng));
    assert_eq!(cmd.endpoint(), Vector2::new(10.0, -20.0));
    assert_eq!(cursor, Vector2::new(10.0, -20.0));
}

#[test]
fn straight_strategies_ignore_spline() {
    let fitter = SplineFitter::new(Vector2::ZERO, Vector2::new(1.0, 1.0), None);
    let strategy = Strategy::RandomMountains.with_spline(fitter);
    assert_eq!(strategy, Strategy::RandomMountains);
    assert!(!strategy.is_smoothed());
    assert!(Strategy::from_kind(StrategyKind::DiagonalHills).is_smoothed());
}

#[test]
fn kinds_round_trip_through_selector() {
    for kind in [
        StrategyKind::DiagonalMountains,
        StrategyKind::DiagonalHills,
        StrategyKind::RandomMountains,
        StrategyKind::RandomHills,
    ] {
        assert_eq!(Strategy::from_kind(kind).kind(), kind);
    }
    let kind: StrategyKind = serde_json::from_str("\"diagonalHills\"").unwrap();
    assert_eq!(kind, StrategyKind::DiagonalHills);
    assert_eq!(
        Strategy::from_kind(kind).advance_rule(),
        AdvanceRule::Diagonal
    );
}
