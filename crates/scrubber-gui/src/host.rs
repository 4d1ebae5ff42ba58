use scrubber_core::scroll::{InputSource, ScrollSurface};

/// The scrollable page as seen by the scroll-lock controller.
///
/// Programmatic scrolls are queued in `pending_scroll` and applied to the
/// scroll area on the next frame.
#[derive(Default)]
pub struct PageHost {
    pub scroll_y: f64,
    pub pending_scroll: Option<f64>,
    pub subscribed: bool,
}

impl PageHost {
    pub fn take_pending_scroll(&mut self) -> Option<f32> {
        self.pending_scroll.take().map(|y| y as f32)
    }
}

impl InputSource for PageHost {
    fn subscribe(&mut self) {
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }
}

impl ScrollSurface for PageHost {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
        self.pending_scroll = Some(y);
    }
}
