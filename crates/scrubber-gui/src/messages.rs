use std::sync::Arc;

use scrubber_core::asset::{AssetLayout, FrameSource};
use scrubber_core::display::DisplayFrame;
use scrubber_core::probe::FrameSet;

/// Identifies a rendered frame. `confirmed` flips once the prober finds the
/// asset, so a placeholder texture gets replaced by the real image.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameKey {
    pub sequence: String,
    pub frame: u32,
    pub confirmed: bool,
}

/// Commands sent from UI thread to the frame loader.
pub enum WorkerCommand {
    LoadFrame {
        key: FrameKey,
        source: Arc<dyn FrameSource>,
        layout: AssetLayout,
        frames: FrameSet,
    },
}

/// Results sent back to the UI thread.
pub enum WorkerResult {
    Frame { key: FrameKey, frame: DisplayFrame },
    BaseSelected { path: String },
}
