use super::*;

#[test]
fn burst_of_events_requests_one_frame() {
    let mut s = FrameScheduler::new();
    assert_eq!(s.schedule(), FrameRequest::Schedule);
    for _ in 0..9 {
        assert_eq!(s.schedule(), FrameRequest::AlreadyScheduled);
    }
    assert!(s.is_pending());
    assert!(s.begin_frame());
    assert!(!s.is_pending());

    let stats = s.stats();
    assert_eq!(stats.requested, 1);
    assert_eq!(stats.coalesced, 9);
    assert_eq!(stats.frames, 1);
}

#[test]
fn spurious_frame_does_nothing() {
    let mut s = FrameScheduler::new();
    assert!(!s.begin_frame());
    assert_eq!(s.stats().frames, 0);
}

#[test]
fn next_event_after_frame_schedules_again() {
    let mut s = FrameScheduler::new();
    assert!(s.schedule().needs_frame());
    assert!(s.begin_frame());
    assert!(s.schedule().needs_frame());
    assert!(!s.schedule().needs_frame());
    assert_eq!(s.stats().requested, 2);
}
