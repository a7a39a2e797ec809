use super::*;
use crate::backdrop::context::SurfaceId;
use crate::backdrop::options::ElementOptions;
use crate::backdrop::strategy::Strategy;
use crate::drawable::sink::RecordingDrawable;
use crate::foundation::core::Viewport;
use crate::schedule::clock::VirtualClock;
use crate::schedule::deadline::IdleRequestOptions;

fn backdrop_with_element(seed: u64) -> ScrollingBackdrop<RecordingDrawable> {
    let mut b = ScrollingBackdrop::new(
        SurfaceId(0),
        Viewport::new(0.0, -50.0, 100.0, 50.0).unwrap(),
    );
    b.add_element(
        RecordingDrawable::path(),
        Strategy::RandomMountains,
        ElementOptions {
            point_distance: Some(10.0),
            seed: Some(seed),
            ..ElementOptions::default()
        },
    )
    .unwrap();
    b
}

fn idle_only(idle: VirtualClock) -> Runtime<VirtualClock, VirtualClock> {
    Runtime::new(VirtualClock::new(16.0, 0).with_frame_limit(0), idle)
}

#[test]
fn idle_work_is_drained_when_not_playing() {
    let mut b = backdrop_with_element(1);
    let mut rt = idle_only(VirtualClock::new(16.0, 3));
    let stats = rt.run(&mut b).unwrap();

    assert_eq!(stats, RunStats { frames: 0, idle_slots: 4 });
    assert_eq!(
        rt.idle().requests(),
        &[
            IdleRequestOptions::with_timeout(100.0),
            IdleRequestOptions::default(),
            IdleRequestOptions::default(),
            IdleRequestOptions::default(),
        ]
    );
    assert_eq!(b.elements()[0].render_max(), 100.0);
}

#[test]
fn starved_host_keeps_forcing_one_millisecond_slots() {
    let mut b = backdrop_with_element(2);
    let mut rt = idle_only(VirtualClock::new(16.0, 100).starved(true));
    let stats = rt.run(&mut b).unwrap();

    assert_eq!(stats.idle_slots, 10);
    let requests = rt.idle().requests();
    assert_eq!(requests[0], IdleRequestOptions::with_timeout(100.0));
    assert!(
        requests[1..]
            .iter()
            .all(|r| *r == IdleRequestOptions::with_timeout(1.0))
    );
    assert_eq!(b.elements()[0].drawable().update_count(), 1);
}

#[test]
fn scrolling_run_keeps_coverage_every_frame() {
    let mut b = backdrop_with_element(3);
    b.play(0.5);
    let mut rt = Runtime::new(
        VirtualClock::new(16.0, 4).with_frame_limit(120),
        VirtualClock::new(16.0, 4),
    );
    let mut lagging_frames = 0;
    let stats = rt
        .run_with(&mut b, |b| {
            if b.elements()[0].render_max() < b.viewport().right() {
                lagging_frames += 1;
            }
        })
        .unwrap();

    assert_eq!(stats.frames, 120);
    // 119 moving frames at 8 units each
    assert!((b.viewport().x - 952.0).abs() < 1e-9);
    assert!(lagging_frames > 0);
    let el = &b.elements()[0];
    assert!(el.render_max() >= b.viewport().right());
    assert!(el.render_min() <= b.viewport().left());
    assert!(!b.has_pending_work());
    assert!(b.is_playing());
}

#[test]
fn stop_inside_the_loop_ends_the_run_on_the_next_frame() {
    let mut b = backdrop_with_element(4);
    b.play(1.0);
    let mut rt = Runtime::new(
        VirtualClock::new(10.0, 50).with_frame_limit(1000),
        VirtualClock::new(10.0, 50),
    );
    let mut seen = 0;
    let stats = rt
        .run_with(&mut b, |b| {
            seen += 1;
            if seen == 5 {
                b.stop();
            }
        })
        .unwrap();

    assert_eq!(stats.frames, 6);
    assert!(!b.is_playing());
    // frames 2..=5 moved 10 units each; frame 6 moved nothing
    assert_eq!(b.viewport().x, 40.0);
    assert!(b.elements()[0].render_max() >= 140.0);
}
