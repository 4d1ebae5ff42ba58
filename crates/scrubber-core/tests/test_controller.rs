mod common;

use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use common::{RecordingHost, SharedHost};
use scrubber_core::config::ScrollConfig;
use scrubber_core::scroll::{
    Direction, Disposition, InputEvent, NavKey, Phase, ScrollLockController, ZoneGeometry,
};

/// Section at 1200px in an 800px viewport: boundary 1080, pre-roll from 980.
const GEOMETRY: ZoneGeometry = ZoneGeometry {
    section_top: 1200.0,
    viewport_height: 800.0,
};
const BOUNDARY: f64 = 1080.0;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn controller(total: u32) -> ScrollLockController<RecordingHost> {
    let mut c = ScrollLockController::new(RecordingHost::default(), ScrollConfig::default());
    c.sync(GEOMETRY, total, true);
    c
}

fn scroll(c: &mut ScrollLockController<RecordingHost>, y: f64, now: Instant) -> Disposition {
    c.handle(InputEvent::Scroll { scroll_y: y }, now)
}

fn wheel(c: &mut ScrollLockController<RecordingHost>, delta_y: f64, now: Instant) -> Disposition {
    c.handle(InputEvent::Wheel { delta_y }, now)
}

/// Controller scrolled from the page top into the zone, locked on frame 1.
fn locked(total: u32, t0: Instant) -> ScrollLockController<RecordingHost> {
    let mut c = controller(total);
    scroll(&mut c, 1000.0, t0);
    assert_eq!(c.phase(), Phase::Locked);
    c
}

// ---------------------------------------------------------------------------
// Zone geometry
// ---------------------------------------------------------------------------

#[test]
fn test_zone_boundary() {
    let config = ScrollConfig::default();
    assert_relative_eq!(GEOMETRY.boundary(&config), BOUNDARY);
    assert!(GEOMETRY.is_above(979.0, &config));
    assert!(!GEOMETRY.is_above(980.0, &config));
}

#[test]
fn test_direction_from_delta() {
    assert_eq!(Direction::from_delta(3.0), Some(Direction::Down));
    assert_eq!(Direction::from_delta(-0.5), Some(Direction::Up));
    assert_eq!(Direction::from_delta(0.0), None);
}

// ---------------------------------------------------------------------------
// Locking and stepping
// ---------------------------------------------------------------------------

#[test]
fn test_inert_until_ready() {
    let t0 = Instant::now();
    let mut c = ScrollLockController::new(RecordingHost::default(), ScrollConfig::default());
    c.sync(GEOMETRY, 10, false);

    scroll(&mut c, 1000.0, t0);
    let d = wheel(&mut c, 100.0, t0);

    assert_eq!(d, Disposition::pass());
    assert_eq!(c.phase(), Phase::Idle);
    assert_eq!(c.state().current_frame, 1);
    assert!(c.host().scroll_writes.is_empty());
}

#[test]
fn test_entering_zone_locks_and_pins() {
    let t0 = Instant::now();
    let mut c = controller(10);

    scroll(&mut c, 500.0, t0);
    assert_eq!(c.phase(), Phase::Idle);
    assert!(!c.state().info_visible);

    scroll(&mut c, 1000.0, t0);
    let state = c.state();
    assert!(state.locked);
    assert!(state.info_visible);
    assert_eq!(c.host().scroll_writes.last(), Some(&BOUNDARY));
}

#[test]
fn test_wheel_down_advances_one_frame() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);

    let d = wheel(&mut c, 120.0, t0);

    assert_eq!(d, Disposition::prevent());
    assert_eq!(c.state().current_frame, 2);
    assert_eq!(c.direction(), Direction::Down);
    assert_eq!(c.host().scroll_y, BOUNDARY);
}

#[test]
fn test_repeated_wheel_within_interval_steps_once() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);

    let first = wheel(&mut c, 120.0, t0);
    let second = wheel(&mut c, 120.0, t0 + ms(50));

    assert_eq!(first, Disposition::prevent());
    assert_eq!(second, Disposition::prevent());
    assert_eq!(c.state().current_frame, 2);

    wheel(&mut c, 120.0, t0 + ms(200));
    assert_eq!(c.state().current_frame, 3);
}

#[test]
fn test_wheel_up_retreats() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);
    wheel(&mut c, 120.0, t0);
    wheel(&mut c, 120.0, t0 + ms(200));

    wheel(&mut c, -120.0, t0 + ms(400));

    assert_eq!(c.state().current_frame, 2);
    assert_eq!(c.direction(), Direction::Up);
    assert!(c.state().locked);
}

#[test]
fn test_zero_wheel_delta_is_swallowed() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);

    let d = wheel(&mut c, 0.0, t0);

    assert_eq!(d, Disposition::prevent());
    assert_eq!(c.state().current_frame, 1);
}

#[test]
fn test_touch_uses_longer_interval() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);

    c.handle(InputEvent::TouchStart { y: 500.0 }, t0);
    let d = c.handle(InputEvent::TouchMove { y: 450.0 }, t0);
    assert_eq!(d, Disposition::prevent());
    assert_eq!(c.state().current_frame, 2);

    // Past the wheel interval but inside the touch one.
    c.handle(InputEvent::TouchMove { y: 400.0 }, t0 + ms(500));
    assert_eq!(c.state().current_frame, 2);

    c.handle(InputEvent::TouchMove { y: 400.0 }, t0 + ms(1100));
    assert_eq!(c.state().current_frame, 3);

    // Swipe back down the screen.
    c.handle(InputEvent::TouchMove { y: 480.0 }, t0 + ms(2200));
    assert_eq!(c.state().current_frame, 2);
}

#[test]
fn test_touch_move_without_start_is_ignored() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);
    c.handle(InputEvent::TouchStart { y: 500.0 }, t0);
    c.handle(InputEvent::TouchEnd, t0);

    let d = c.handle(InputEvent::TouchMove { y: 300.0 }, t0);

    assert_eq!(d, Disposition::pass());
    assert_eq!(c.state().current_frame, 1);
}

#[test]
fn test_nav_keys_step_while_locked() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);

    let d = c.handle(InputEvent::Key(NavKey::ArrowDown), t0);
    assert_eq!(d, Disposition::prevent());
    assert_eq!(c.state().current_frame, 2);

    c.handle(InputEvent::Key(NavKey::Space), t0 + ms(200));
    assert_eq!(c.state().current_frame, 3);

    c.handle(InputEvent::Key(NavKey::PageUp), t0 + ms(400));
    assert_eq!(c.state().current_frame, 2);
}

#[test]
fn test_nav_keys_pass_when_idle() {
    let t0 = Instant::now();
    let mut c = controller(10);

    let d = c.handle(InputEvent::Key(NavKey::PageDown), t0);

    assert_eq!(d, Disposition::pass());
    assert_eq!(c.state().current_frame, 1);
}

// ---------------------------------------------------------------------------
// Releasing at the edges
// ---------------------------------------------------------------------------

#[test]
fn test_upward_gesture_on_first_frame_releases() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);

    let d = wheel(&mut c, -120.0, t0);

    assert_eq!(d, Disposition::pass());
    assert_eq!(c.phase(), Phase::ReleasedAtBoundary);
    assert!(!c.state().locked);
    assert_eq!(c.state().current_frame, 1);

    // Native scroll carries the page back above the zone.
    scroll(&mut c, 900.0, t0 + ms(20));
    assert_eq!(c.phase(), Phase::Idle);
}

#[test]
fn test_reaching_last_frame_releases() {
    let t0 = Instant::now();
    let mut c = locked(3, t0);

    wheel(&mut c, 120.0, t0);
    assert!(c.state().locked);
    wheel(&mut c, 120.0, t0 + ms(200));

    assert_eq!(c.state().current_frame, 3);
    assert_eq!(c.phase(), Phase::ReleasedAtBoundary);

    // The next notch scrolls the page natively.
    let d = wheel(&mut c, 120.0, t0 + ms(400));
    assert_eq!(d, Disposition::pass());
    assert_eq!(c.state().current_frame, 3);
}

#[test]
fn test_downward_scroll_after_release_stays_released() {
    let t0 = Instant::now();
    let mut c = locked(3, t0);
    wheel(&mut c, 120.0, t0);
    wheel(&mut c, 120.0, t0 + ms(200));
    let pins = c.host().scroll_writes.len();

    scroll(&mut c, 1500.0, t0 + ms(300));
    scroll(&mut c, 1900.0, t0 + ms(350));
    wheel(&mut c, 120.0, t0 + ms(600));

    assert_eq!(c.phase(), Phase::ReleasedAtBoundary);
    assert_eq!(c.host().scroll_writes.len(), pins);
}

#[test]
fn test_scrolling_back_up_relocks() {
    let t0 = Instant::now();
    let mut c = locked(3, t0);
    wheel(&mut c, 120.0, t0);
    wheel(&mut c, 120.0, t0 + ms(200));
    scroll(&mut c, 1500.0, t0 + ms(300));

    scroll(&mut c, 1450.0, t0 + ms(400));

    assert_eq!(c.phase(), Phase::Locked);
    assert_eq!(c.direction(), Direction::Up);
    assert_eq!(c.host().scroll_y, BOUNDARY);

    wheel(&mut c, -120.0, t0 + ms(600));
    assert_eq!(c.state().current_frame, 2);
}

#[test]
fn test_single_frame_never_locks_downward() {
    let t0 = Instant::now();
    let mut c = controller(1);

    scroll(&mut c, 1000.0, t0);

    assert_eq!(c.phase(), Phase::ReleasedAtBoundary);
    assert!(c.state().info_visible);
}

#[test]
fn test_leaving_zone_upward_resets() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);
    wheel(&mut c, 120.0, t0);
    wheel(&mut c, 120.0, t0 + ms(200));

    scroll(&mut c, 100.0, t0 + ms(300));

    let state = c.state();
    assert_eq!(c.phase(), Phase::Idle);
    assert_eq!(state.current_frame, 1);
    assert!(!state.locked);
    assert!(!state.info_visible);
    assert_relative_eq!(state.progress, 0.0);
}

// ---------------------------------------------------------------------------
// Invariants
// ---------------------------------------------------------------------------

#[test]
fn test_progress() {
    let t0 = Instant::now();
    let mut c = locked(5, t0);
    assert_relative_eq!(c.progress(), 0.0);

    wheel(&mut c, 120.0, t0);
    wheel(&mut c, 120.0, t0 + ms(200));
    assert_relative_eq!(c.state().progress, 0.5);

    wheel(&mut c, 120.0, t0 + ms(400));
    wheel(&mut c, 120.0, t0 + ms(600));
    assert_relative_eq!(c.state().progress, 1.0);

    let single = controller(1);
    assert_relative_eq!(single.progress(), 0.0);
}

#[test]
fn test_frame_stays_in_range() {
    let t0 = Instant::now();
    let total = 4;
    let mut c = controller(total);
    let events = [
        InputEvent::Scroll { scroll_y: 1000.0 },
        InputEvent::Wheel { delta_y: 80.0 },
        InputEvent::Wheel { delta_y: 80.0 },
        InputEvent::Key(NavKey::ArrowDown),
        InputEvent::Wheel { delta_y: 80.0 },
        InputEvent::Wheel { delta_y: 80.0 },
        InputEvent::Scroll { scroll_y: 1300.0 },
        InputEvent::Scroll { scroll_y: 1200.0 },
        InputEvent::Wheel { delta_y: -80.0 },
        InputEvent::TouchStart { y: 300.0 },
        InputEvent::TouchMove { y: 400.0 },
        InputEvent::Wheel { delta_y: -80.0 },
        InputEvent::Key(NavKey::ArrowUp),
        InputEvent::Wheel { delta_y: -80.0 },
        InputEvent::Wheel { delta_y: -80.0 },
        InputEvent::Scroll { scroll_y: 500.0 },
        InputEvent::Scroll { scroll_y: 1100.0 },
    ];

    for (i, event) in events.iter().cycle().take(events.len() * 3).enumerate() {
        c.handle(*event, t0 + ms(i as u64 * 1200));
        let frame = c.state().current_frame;
        assert!((1..=total).contains(&frame), "frame {frame} after {event:?}");
    }
}

#[test]
fn test_shrinking_total_clamps_frame() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);
    for i in 0..6 {
        wheel(&mut c, 120.0, t0 + ms(i * 200));
    }
    assert_eq!(c.state().current_frame, 7);

    c.sync(GEOMETRY, 4, true);

    assert_eq!(c.state().current_frame, 4);
}

#[test]
fn test_reset() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);
    wheel(&mut c, 120.0, t0);

    c.reset();

    assert_eq!(c.phase(), Phase::Idle);
    assert_eq!(c.state().current_frame, 1);
    assert_eq!(c.total_frames(), 0);
    // Nothing to drive until frames arrive again.
    assert_eq!(wheel(&mut c, 120.0, t0 + ms(500)), Disposition::pass());
}

// ---------------------------------------------------------------------------
// Input subscriptions
// ---------------------------------------------------------------------------

#[test]
fn test_resubscribes_only_on_geometry_or_total_change() {
    let t0 = Instant::now();
    let mut c = locked(10, t0);
    assert_eq!(c.host().subscribes, 1);

    wheel(&mut c, 120.0, t0);
    c.sync(GEOMETRY, 10, true);
    assert_eq!(c.host().subscribes, 1);
    assert_eq!(c.host().unsubscribes, 0);

    c.sync(ZoneGeometry::new(1200.0, 900.0), 10, true);
    assert_eq!(c.host().subscribes, 2);
    assert_eq!(c.host().unsubscribes, 1);

    c.sync(ZoneGeometry::new(1200.0, 900.0), 12, true);
    assert_eq!(c.host().subscribes, 3);
    assert!(c.host().subscribed());
}

#[test]
fn test_drop_unsubscribes() {
    let host = SharedHost::default();
    let log = host.0.clone();
    {
        let mut c = ScrollLockController::new(host, ScrollConfig::default());
        c.sync(GEOMETRY, 5, true);
        assert!(log.borrow().subscribed());
    }
    assert!(!log.borrow().subscribed());
    assert_eq!(log.borrow().unsubscribes, 1);
}

#[test]
fn test_becoming_ready_inside_zone_locks() {
    let mut host = RecordingHost::default();
    host.scroll_y = 1100.0;
    let mut c = ScrollLockController::new(host, ScrollConfig::default());
    c.sync(GEOMETRY, 0, false);
    assert_eq!(c.phase(), Phase::Idle);

    c.sync(GEOMETRY, 6, true);

    assert_eq!(c.phase(), Phase::Locked);
    assert_eq!(c.host().scroll_y, BOUNDARY);
}
