/// Vertical direction of travel through the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards later frames / further down the page.
    Down,
    /// Towards earlier frames / back up the page.
    Up,
}

impl Direction {
    /// Sign of a vertical delta, positive meaning down. Zero has no direction.
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Down)
        } else if delta < 0.0 {
            Some(Self::Up)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Down => write!(f, "down"),
            Self::Up => write!(f, "up"),
        }
    }
}

/// Keys that scroll a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Space,
}

impl NavKey {
    pub fn direction(self) -> Direction {
        match self {
            Self::ArrowDown | Self::PageDown | Self::Space => Direction::Down,
            Self::ArrowUp | Self::PageUp => Direction::Up,
        }
    }
}

/// Raw input delivered by the host page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// The page scroll offset changed to `scroll_y`.
    Scroll { scroll_y: f64 },
    /// Mouse wheel; positive `delta_y` scrolls down.
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    TouchEnd,
    Key(NavKey),
}

/// What the host should do with an event after the controller saw it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Disposition {
    /// Suppress the event's native page-scroll effect.
    pub prevent_default: bool,
}

impl Disposition {
    pub fn pass() -> Self {
        Self {
            prevent_default: false,
        }
    }

    pub fn prevent() -> Self {
        Self {
            prevent_default: true,
        }
    }
}

/// Delivery of scroll, wheel, touch and key input to the controller.
///
/// The controller subscribes when it first learns its zone and
/// unsubscribes when dropped. While subscribed the host forwards every
/// event to `ScrollLockController::handle`.
pub trait InputSource {
    fn subscribe(&mut self);
    fn unsubscribe(&mut self);
}

/// Read/write access to the page scroll offset.
pub trait ScrollSurface {
    fn scroll_y(&self) -> f64;
    fn scroll_to(&mut self, y: f64);
}
