use super::*;

#[test]
fn virtual_frames_are_evenly_spaced_and_limited() {
    let mut clock = VirtualClock::new(10.0, 4).with_frame_limit(3);
    assert_eq!(clock.next_frame(), Some(10.0));
    assert_eq!(clock.next_frame(), Some(20.0));
    assert_eq!(clock.next_frame(), Some(30.0));
    assert_eq!(clock.next_frame(), None);
    assert_eq!(clock.now(), 30.0);
}

#[test]
fn virtual_idle_slots_record_requests() {
    let mut clock = VirtualClock::new(16.0, 4);
    let dl = clock.next_idle_slot(IdleRequestOptions::with_timeout(100.0));
    assert!(!dl.did_timeout());
    assert_eq!(dl.steps_left(), 4);
    assert_eq!(clock.requests(), &[IdleRequestOptions::with_timeout(100.0)]);
}

#[test]
fn starved_clock_grants_single_steps() {
    let mut clock = VirtualClock::new(16.0, 4).starved(true);
    let forced = clock.next_idle_slot(IdleRequestOptions::with_timeout(1.0));
    assert!(forced.did_timeout());
    assert_eq!(forced.steps_left(), 1);
    // untimed requests are still served, just not flagged as forced
    let plain = clock.next_idle_slot(IdleRequestOptions::default());
    assert!(!plain.did_timeout());
    assert_eq!(plain.steps_left(), 1);
    assert_eq!(clock.requests().len(), 2);
}

#[test]
fn realtime_clock_is_monotonic() {
    let mut clock =
        RealtimeClock::new(Duration::from_millis(1), Duration::from_millis(1)).with_frame_limit(2);
    let a = clock.next_frame().unwrap();
    let b = clock.next_frame().unwrap();
    assert!(b >= a);
    assert!(clock.next_frame().is_none());
}
