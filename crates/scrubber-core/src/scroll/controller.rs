use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::config::ScrollConfig;

use super::geometry::ZoneGeometry;
use super::input::{Direction, Disposition, InputEvent, InputSource, ScrollSurface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Above the zone; native scrolling, frame 1.
    Idle,
    /// Inside the zone; input drives frames and the page is pinned.
    Locked,
    /// Inside the zone but at the edge frame in the direction of travel;
    /// native scrolling passes through.
    ReleasedAtBoundary,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Locked => write!(f, "locked"),
            Self::ReleasedAtBoundary => write!(f, "released"),
        }
    }
}

/// Render-facing view of the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    pub current_frame: u32,
    pub locked: bool,
    pub info_visible: bool,
    /// `(current_frame - 1) / (total_frames - 1)`, 0 for one frame or none.
    pub progress: f64,
}

/// Scroll-capture state machine.
///
/// Turns page scroll, wheel, touch and key input into frame changes while
/// the viewport sits in the interaction zone, and hands scrolling back to
/// the page above the zone or at the first/last frame.
pub struct ScrollLockController<H: InputSource + ScrollSurface> {
    host: H,
    config: ScrollConfig,
    geometry: Option<ZoneGeometry>,
    total_frames: u32,
    ready: bool,
    subscribed_for: Option<(ZoneGeometry, u32)>,
    phase: Phase,
    current_frame: u32,
    previous_frame: u32,
    info_visible: bool,
    direction: Direction,
    last_step_at: Option<Instant>,
    touch_start_y: Option<f64>,
    last_scroll_y: Option<f64>,
}

impl<H: InputSource + ScrollSurface> ScrollLockController<H> {
    pub fn new(host: H, config: ScrollConfig) -> Self {
        Self {
            host,
            config,
            geometry: None,
            total_frames: 0,
            ready: false,
            subscribed_for: None,
            phase: Phase::Idle,
            current_frame: 1,
            previous_frame: 1,
            info_visible: false,
            direction: Direction::Down,
            last_step_at: None,
            touch_start_y: None,
            last_scroll_y: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            current_frame: self.current_frame,
            locked: self.phase == Phase::Locked,
            info_visible: self.info_visible,
            progress: self.progress(),
        }
    }

    pub fn progress(&self) -> f64 {
        if self.total_frames <= 1 {
            return 0.0;
        }
        let done = f64::from(self.current_frame.saturating_sub(1));
        (done / f64::from(self.total_frames - 1)).clamp(0.0, 1.0)
    }

    /// Feed the latest zone geometry and probe result.
    ///
    /// Input subscriptions are renewed only when the geometry or the frame
    /// count changed, never on a mere frame change.
    pub fn sync(&mut self, geometry: ZoneGeometry, total_frames: u32, ready: bool) {
        let was_active = self.is_active();

        self.geometry = Some(geometry);
        self.ready = ready;
        if total_frames != self.total_frames {
            self.total_frames = total_frames;
            let max_frame = total_frames.max(1);
            self.current_frame = self.current_frame.clamp(1, max_frame);
            self.previous_frame = self.previous_frame.clamp(1, max_frame);
        }

        let key = (geometry, total_frames);
        if self.subscribed_for != Some(key) {
            if self.subscribed_for.is_some() {
                self.host.unsubscribe();
            }
            self.host.subscribe();
            self.subscribed_for = Some(key);
            debug!(
                section_top = geometry.section_top,
                viewport_height = geometry.viewport_height,
                total_frames,
                "input subscriptions renewed"
            );
        }

        if !self.is_active() {
            self.phase = Phase::Idle;
        } else if !was_active {
            let scroll_y = self.host.scroll_y();
            self.on_scroll(scroll_y);
        }
    }

    /// Back to frame 1, unlocked, with no frames known. Used when the
    /// sequence being shown is replaced.
    pub fn reset(&mut self) {
        self.total_frames = 0;
        self.ready = false;
        self.phase = Phase::Idle;
        self.current_frame = 1;
        self.previous_frame = 1;
        self.info_visible = false;
        self.direction = Direction::Down;
        self.last_step_at = None;
        self.touch_start_y = None;
        self.last_scroll_y = None;
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Disposition {
        match event {
            InputEvent::TouchStart { y } => {
                self.touch_start_y = Some(y);
                return Disposition::pass();
            }
            InputEvent::TouchEnd => {
                self.touch_start_y = None;
                return Disposition::pass();
            }
            _ => {}
        }

        if !self.is_active() {
            return Disposition::pass();
        }

        match event {
            InputEvent::Scroll { scroll_y } => {
                self.on_scroll(scroll_y);
                Disposition::pass()
            }
            InputEvent::Wheel { delta_y } => {
                if self.phase != Phase::Locked {
                    return Disposition::pass();
                }
                match Direction::from_delta(delta_y) {
                    Some(dir) => self.gesture(dir, now, self.config.wheel_interval()),
                    None => Disposition::prevent(),
                }
            }
            InputEvent::TouchMove { y } => self.on_touch_move(y, now),
            InputEvent::Key(key) => {
                if self.phase != Phase::Locked {
                    return Disposition::pass();
                }
                self.gesture(key.direction(), now, self.config.wheel_interval())
            }
            InputEvent::TouchStart { .. } | InputEvent::TouchEnd => Disposition::pass(),
        }
    }

    fn is_active(&self) -> bool {
        self.ready && self.total_frames > 0 && self.geometry.is_some()
    }

    fn on_scroll(&mut self, scroll_y: f64) {
        let Some(geometry) = self.geometry else {
            return;
        };

        let hint = self
            .last_scroll_y
            .and_then(|prev| Direction::from_delta(scroll_y - prev));
        self.last_scroll_y = Some(scroll_y);

        // While locked the page only moves because it is being pinned.
        let hint = if self.phase == Phase::Locked { None } else { hint };
        self.reconcile_direction(hint);

        if geometry.is_above(scroll_y, &self.config) {
            if self.phase != Phase::Idle || self.current_frame != 1 {
                debug!(scroll_y, "above zone, resetting");
            }
            self.enter_idle();
            return;
        }

        self.info_visible = true;
        if self.points_past_edge(self.direction) {
            self.release();
        } else {
            self.lock(geometry);
        }
    }

    fn on_touch_move(&mut self, y: f64, now: Instant) -> Disposition {
        let Some(start_y) = self.touch_start_y else {
            return Disposition::pass();
        };
        if self.phase != Phase::Locked {
            return Disposition::pass();
        }
        let Some(dir) = Direction::from_delta(start_y - y) else {
            return Disposition::prevent();
        };

        let stepped_before = self.last_step_at;
        let disposition = self.gesture(dir, now, self.config.touch_interval());
        if self.last_step_at != stepped_before {
            self.touch_start_y = Some(y);
        }
        disposition
    }

    /// One wheel notch, swipe or key press in `dir` while locked.
    fn gesture(&mut self, dir: Direction, now: Instant, interval: Duration) -> Disposition {
        if self.points_past_edge(dir) {
            self.direction = dir;
            self.release();
            return Disposition::pass();
        }

        let limited = self
            .last_step_at
            .is_some_and(|last| now.saturating_duration_since(last) <= interval);
        if !limited {
            self.step(dir, now);
        }
        Disposition::prevent()
    }

    fn step(&mut self, dir: Direction, now: Instant) {
        let max_frame = self.total_frames.max(1);
        self.current_frame = match dir {
            Direction::Down => (self.current_frame + 1).min(max_frame),
            Direction::Up => self.current_frame.saturating_sub(1).max(1),
        };
        self.last_step_at = Some(now);
        self.reconcile_direction(Some(dir));
        trace!(frame = self.current_frame, direction = %self.direction, "frame step");

        if self.points_past_edge(self.direction) {
            self.release();
        } else if let Some(geometry) = self.geometry {
            self.lock(geometry);
        }
    }

    /// A changed frame decides the direction; otherwise the raw hint does.
    fn reconcile_direction(&mut self, hint: Option<Direction>) {
        if self.current_frame > self.previous_frame {
            self.direction = Direction::Down;
        } else if self.current_frame < self.previous_frame {
            self.direction = Direction::Up;
        } else if let Some(dir) = hint {
            self.direction = dir;
        }
        self.previous_frame = self.current_frame;
    }

    fn points_past_edge(&self, dir: Direction) -> bool {
        match dir {
            Direction::Down => self.current_frame >= self.total_frames,
            Direction::Up => self.current_frame <= 1,
        }
    }

    fn lock(&mut self, geometry: ZoneGeometry) {
        if self.phase != Phase::Locked {
            debug!(frame = self.current_frame, "scroll locked");
        }
        self.phase = Phase::Locked;
        self.host.scroll_to(geometry.boundary(&self.config));
    }

    fn release(&mut self) {
        if self.phase != Phase::ReleasedAtBoundary {
            debug!(frame = self.current_frame, direction = %self.direction, "scroll released");
        }
        self.phase = Phase::ReleasedAtBoundary;
    }

    fn enter_idle(&mut self) {
        self.phase = Phase::Idle;
        self.current_frame = 1;
        self.previous_frame = 1;
        self.info_visible = false;
    }
}

impl<H: InputSource + ScrollSurface> Drop for ScrollLockController<H> {
    fn drop(&mut self) {
        if self.subscribed_for.take().is_some() {
            self.host.unsubscribe();
        }
    }
}
