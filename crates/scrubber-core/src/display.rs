use image::RgbaImage;
use tracing::warn;

use crate::asset::{load_frame, AssetLayout, FrameSource};
use crate::placeholder::placeholder_image;
use crate::probe::FrameSet;

/// Image chosen for one displayed frame.
#[derive(Clone, Debug)]
pub enum DisplayFrame {
    /// The real asset.
    Real(RgbaImage),
    /// The frame was never confirmed by the prober.
    Placeholder(RgbaImage),
    /// The frame was confirmed but failed to load now.
    Fallback(RgbaImage),
}

impl DisplayFrame {
    pub fn image(&self) -> &RgbaImage {
        match self {
            Self::Real(img) | Self::Placeholder(img) | Self::Fallback(img) => img,
        }
    }

    pub fn into_image(self) -> RgbaImage {
        match self {
            Self::Real(img) | Self::Placeholder(img) | Self::Fallback(img) => img,
        }
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Self::Real(_))
    }
}

/// Load frame `index` if the prober confirmed it, otherwise synthesize a
/// placeholder. A confirmed frame that fails to load degrades to a
/// placeholder and is only logged.
pub fn resolve_display_frame(
    source: &dyn FrameSource,
    layout: &AssetLayout,
    frames: &FrameSet,
    index: u32,
) -> DisplayFrame {
    if !frames.contains(index) {
        return DisplayFrame::Placeholder(placeholder_image(index, frames.total_frames));
    }

    let location = layout.location(index);
    match load_frame(source, &location) {
        Ok(img) => DisplayFrame::Real(img),
        Err(e) => {
            warn!("Failed to load image {location}: {e}");
            DisplayFrame::Fallback(placeholder_image(index, frames.total_frames))
        }
    }
}

/// Caption shown above the sequence.
pub fn progress_caption(current_frame: u32, total_frames: u32) -> String {
    format!("See scroll progress: {current_frame} of {total_frames}")
}
