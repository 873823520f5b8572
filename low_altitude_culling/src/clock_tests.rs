use std::time::Duration;
use super::*;

#[test]
fn test_system_clock_is_monotonic() {
    let clock = SystemClock::new();
    let a = clock.now();
    let b = clock.now();
    assert!(b >= a);
}

#[test]
fn test_manual_clock_starts_at_zero_and_advances() {
    let clock = ManualClock::new();
    assert_eq!(clock.now(), Duration::ZERO);

    clock.advance(Duration::from_millis(150));
    clock.advance(Duration::from_millis(50));
    assert_eq!(clock.now(), Duration::from_millis(200));
}

#[test]
fn test_manual_clock_clones_share_time() {
    let host = ManualClock::new();
    let culler_side = host.clone();

    host.advance(Duration::from_secs(2));

    assert_eq!(culler_side.now(), Duration::from_secs(2));
}

#[test]
fn test_manual_clock_set_never_goes_backwards() {
    let clock = ManualClock::new();
    clock.set(Duration::from_millis(500));
    clock.set(Duration::from_millis(100));
    assert_eq!(clock.now(), Duration::from_millis(500));
}
