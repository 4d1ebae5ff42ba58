mod frame_set;
mod prober;
mod scan;

pub use frame_set::{FrameSet, ProbeOutcome};
pub use prober::FrameProber;
pub use scan::{probe_frames, CancelToken, NoOpReporter, ProbeReporter};
