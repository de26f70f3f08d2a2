use super::*;

#[test]
fn advance_fires_only_pending_requests() {
    let mut clock = VirtualFrameClock::new(10.0).unwrap();
    assert!(clock.advance().is_none());
    assert_eq!(clock.now(), 10.0);

    let h = clock.request_frame();
    assert!(clock.has_pending());
    assert_eq!(clock.advance(), Some((h, 20.0)));
    assert!(!clock.has_pending());
    assert!(clock.advance().is_none());
    assert_eq!(clock.frames_fired(), 1);
}

#[test]
fn cancel_is_a_noop_for_stale_handles() {
    let mut clock = VirtualFrameClock::new(10.0).unwrap();
    let first = clock.request_frame();
    clock.cancel_frame(first);
    assert!(!clock.has_pending());
    clock.cancel_frame(first);

    let second = clock.request_frame();
    assert_ne!(first, second);
    clock.cancel_frame(first);
    assert!(clock.has_pending());
    assert_eq!(clock.advance().map(|(h, _)| h), Some(second));
}

#[test]
fn idle_time_moves_now_without_firing() {
    let mut clock = VirtualFrameClock::at_fps(50.0).unwrap();
    assert_eq!(clock.frame_interval(), 20.0);
    clock.request_frame();
    clock.idle(35.0);
    assert!(clock.has_pending());
    assert_eq!(clock.now(), 35.0);
    assert_eq!(clock.advance().map(|(_, t)| t), Some(55.0));
}

#[test]
fn time_does_not_drift_over_long_runs() {
    let mut clock = VirtualFrameClock::at_fps(60.0).unwrap();
    for _ in 0..60_000 {
        clock.advance();
    }
    assert!((clock.now() - 1_000_000.0).abs() < 1e-6);
}

#[test]
fn rejects_non_positive_intervals() {
    assert!(VirtualFrameClock::new(0.0).is_err());
    assert!(VirtualFrameClock::at_fps(-30.0).is_err());
}

#[test]
fn handles_are_unique_and_increasing() {
    let mut clock = VirtualFrameClock::new(10.0).unwrap();
    let handles: Vec<FrameHandle> = (0..4).map(|_| clock.request_frame()).collect();
    assert!(handles.windows(2).all(|w| w[0] < w[1]));
    let unique: std::collections::HashSet<_> = handles.iter().copied().collect();
    assert_eq!(unique.len(), handles.len());
    assert_eq!(clock.advance().map(|(h, _)| h), handles.last().copied());
}
