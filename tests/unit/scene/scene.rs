use super::*;
use crate::schedule::clock::VirtualClock;

fn config(speed: f64) -> SceneConfig {
    SceneConfig::from_reader(
        format!(
            r##"{{
        "viewBox": {{"x": 0, "y": -50, "width": 200, "height": 50}},
        "speed": {speed},
        "seed": 21,
        "layers": [
            {{"id": "far", "strategy": "randomMountains", "fill": "#556",
              "options": {{"elevationMax": -40, "pointDistance": 10}}}},
            {{"id": "near", "strategy": "diagonalHills",
              "options": {{"elevationMax": -20, "elevationMin": -5}}}},
            {{"id": "legacy", "kind": "polygon", "options": {{"elevationMax": -10}}}}
        ]
    }}"##
        )
        .as_bytes(),
    )
    .unwrap()
}

fn idle_runtime() -> Runtime<VirtualClock, VirtualClock> {
    Runtime::new(
        VirtualClock::new(16.0, 0).with_frame_limit(0),
        VirtualClock::new(16.0, 8),
    )
}

#[test]
fn build_wires_layers_into_document_and_backdrop() {
    let scene = Scene::build(&config(0.0)).unwrap();
    assert_eq!(scene.document().shapes().len(), 3);
    assert!(scene.document().get_element_by_id("near").is_some());

    let backdrop = scene.backdrop().unwrap();
    assert_eq!(backdrop.elements().len(), 2);
    assert_eq!(backdrop.pending_requests(), 2);
    assert_eq!(backdrop.elements()[0].point_distance(), 10.0);
    assert_eq!(backdrop.elements()[1].elevation_max(), -20.0);
}

#[test]
fn settle_fills_every_layer() {
    let mut scene = Scene::build(&config(0.0)).unwrap();
    assert!(scene.settle(&mut idle_runtime()).unwrap() > 0);

    let summaries = scene.layer_summaries();
    assert_eq!(summaries.len(), 3);
    for s in &summaries {
        assert!(s.render_max >= 200.0, "{s:?}");
        assert!(s.render_min <= 0.0, "{s:?}");
        assert!(s.len > 0);
    }
    assert_eq!(summaries[0].strategy, Some(StrategyKind::RandomMountains));
    assert_eq!(summaries[2].kind, LayerKind::Polygon);
    assert_eq!(summaries[2].strategy, None);

    let far = scene.document().require("far").unwrap();
    assert!(far.path_data().starts_with("M 0,"));
    assert!(far.path_data().ends_with("V 0 H 0 Z"));
    let legacy = scene.document().require("legacy").unwrap();
    assert!(legacy.points().len() > 2);
}

#[test]
fn seeded_scenes_are_reproducible() {
    let render = || {
        let mut scene = Scene::build(&config(0.0)).unwrap();
        scene.settle(&mut idle_runtime()).unwrap();
        scene.to_svg_string()
    };
    assert_eq!(render(), render());
}

#[test]
fn run_scrolls_the_viewport_and_keeps_layers_covered() {
    let mut scene = Scene::build(&config(0.05)).unwrap();
    assert!(scene.play().unwrap());
    let mut rt = Runtime::new(
        VirtualClock::new(20.0, 6).with_frame_limit(50),
        VirtualClock::new(20.0, 6),
    );
    let stats = scene.run(&mut rt).unwrap();
    assert_eq!(stats.frames, 50);

    let vp = scene.viewport();
    // 49 moving frames of 20 ms at 0.05 units/ms
    assert!((vp.x - 49.0).abs() < 1e-9);
    for s in scene.layer_summaries() {
        assert!(s.render_max >= vp.right(), "{s:?}");
        assert!(s.render_min <= vp.left(), "{s:?}");
    }
    assert!(scene.to_svg_string().contains(r#"viewBox="49 -50 200 50""#));
}

#[test]
fn stop_ends_playback() {
    let mut scene = Scene::build(&config(0.05)).unwrap();
    scene.play().unwrap();
    scene.stop().unwrap();
    let stats = scene
        .run(&mut Runtime::new(
            VirtualClock::new(20.0, 6).with_frame_limit(50),
            VirtualClock::new(20.0, 6),
        ))
        .unwrap();
    assert_eq!(stats.frames, 1);
    assert_eq!(scene.viewport().x, 0.0);
    assert!(!scene.backdrop().unwrap().is_playing());
}

#[test]
fn invalid_scenes_fail_to_build() {
    let mut cfg = config(0.0);
    cfg.layers[2].id = "far".to_owned();
    assert!(matches!(
        Scene::build(&cfg),
        Err(RidgelineError::Validation(_))
    ));
}
