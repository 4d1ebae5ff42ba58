use scrubber_core::probe::{FrameSet, ProbeReporter};

/// Wakes the UI whenever the prober publishes a new frame set.
pub struct RepaintReporter {
    ctx: egui::Context,
}

impl RepaintReporter {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl ProbeReporter for RepaintReporter {
    fn on_progress(&self, frames: &FrameSet) {
        tracing::debug!(found = frames.found(), outcome = %frames.outcome, "probe update");
        self.ctx.request_repaint();
    }
}
