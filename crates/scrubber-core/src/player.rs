use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use crate::asset::{AssetLayout, FrameSource};
use crate::config::ScrubberConfig;
use crate::display::{resolve_display_frame, DisplayFrame};
use crate::error::{Result, ScrubError};
use crate::probe::{FrameProber, FrameSet, ProbeReporter};
use crate::scroll::{
    Disposition, InputEvent, InputSource, ScrollLockController, ScrollState, ScrollSurface,
    ZoneGeometry,
};

/// One scroll-scrubbed image sequence on a page: the routing table, the
/// prober for the selected sequence and the scroll-lock controller.
pub struct Player<H: InputSource + ScrollSurface> {
    config: ScrubberConfig,
    source: Arc<dyn FrameSource>,
    prober: FrameProber,
    controller: ScrollLockController<H>,
    sequence: Option<String>,
    layout: Option<AssetLayout>,
    frames: FrameSet,
}

impl<H: InputSource + ScrollSurface> Player<H> {
    pub fn new(config: ScrubberConfig, source: Arc<dyn FrameSource>, host: H) -> Self {
        let prober = FrameProber::new(config.probe.clone());
        let controller = ScrollLockController::new(host, config.scroll.clone());
        Self {
            config,
            source,
            prober,
            controller,
            sequence: None,
            layout: None,
            frames: FrameSet::loading(),
        }
    }

    pub fn set_probe_listener(&mut self, listener: Arc<dyn ProbeReporter>) {
        self.prober.set_listener(listener);
    }

    pub fn config(&self) -> &ScrubberConfig {
        &self.config
    }

    pub fn sequence_id(&self) -> Option<&str> {
        self.sequence.as_deref()
    }

    pub fn layout(&self) -> Option<&AssetLayout> {
        self.layout.as_ref()
    }

    pub fn source(&self) -> Arc<dyn FrameSource> {
        Arc::clone(&self.source)
    }

    pub fn frames(&self) -> &FrameSet {
        &self.frames
    }

    pub fn state(&self) -> ScrollState {
        self.controller.state()
    }

    pub fn controller(&self) -> &ScrollLockController<H> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ScrollLockController<H> {
        &mut self.controller
    }

    /// Show the sequence `id`. Selecting a different sequence restarts
    /// discovery from an empty frame set and resets the controller.
    /// Returns whether anything changed.
    pub fn select_sequence(&mut self, id: &str) -> Result<bool> {
        if self.sequence.as_deref() == Some(id) {
            return Ok(false);
        }
        let layout = self.config.layout_for(id)?;

        info!(sequence = id, file_path = %layout.file_path, "switching sequence");
        self.controller.reset();
        self.frames = FrameSet::loading();
        self.prober.start(Arc::clone(&self.source), layout.clone());
        self.sequence = Some(id.to_string());
        self.layout = Some(layout);
        Ok(true)
    }

    /// Switch to the route after the current one (or the initial route).
    pub fn toggle_sequence(&mut self) -> Result<String> {
        let next = match self.sequence.as_deref() {
            Some(current) => self.config.next_sequence(current),
            None => self.config.initial_sequence(),
        }
        .map(str::to_string)
        .ok_or_else(|| ScrubError::UnknownSequence("<none configured>".to_string()))?;
        self.select_sequence(&next)?;
        Ok(next)
    }

    /// Pull the latest probe result and hand it, with the current zone
    /// geometry, to the controller.
    pub fn refresh(&mut self, geometry: ZoneGeometry) {
        self.frames = self.prober.snapshot();
        self.controller
            .sync(geometry, self.frames.total_frames, self.frames.ready);
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Disposition {
        self.controller.handle(event, now)
    }

    /// Block until the running probe finished, then take its result.
    pub fn wait_for_probe(&mut self) -> &FrameSet {
        self.prober.wait();
        self.frames = self.prober.snapshot();
        &self.frames
    }

    /// Image for the frame currently shown.
    pub fn display_frame(&self) -> Option<DisplayFrame> {
        let layout = self.layout.as_ref()?;
        Some(resolve_display_frame(
            self.source.as_ref(),
            layout,
            &self.frames,
            self.controller.state().current_frame,
        ))
    }
}
