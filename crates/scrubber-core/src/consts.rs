use std::time::Duration;

/// Number of frame indices checked together in one probe batch.
pub const DEFAULT_BATCH_SIZE: u32 = 5;

/// Highest frame index the prober will ever check.
pub const DEFAULT_MAX_INDEX: u32 = 250;

/// First index the scan starts at. Sequences numbered from 1 are found
/// through the gap-tolerant leading scan.
pub const DEFAULT_START_INDEX: u32 = 0;

/// File extension of frame assets.
pub const DEFAULT_FRAME_EXTENSION: &str = "jpg";

/// Zero-padded width of the frame index in asset file names.
pub const FRAME_INDEX_WIDTH: usize = 3;

/// Minimum time between two wheel- or key-driven frame steps.
pub const WHEEL_STEP_INTERVAL: Duration = Duration::from_millis(150);

/// Minimum time between two touch-driven frame steps.
pub const TOUCH_STEP_INTERVAL: Duration = Duration::from_millis(1000);

/// Distance (px) the zone boundary sits above the interaction section's top.
pub const DEFAULT_SECTION_LEAD: f64 = 200.0;

/// Fraction of the viewport height added to the zone boundary.
pub const DEFAULT_VIEWPORT_FRACTION: f64 = 0.1;

/// Margin (px) above the zone boundary that already counts as inside the zone.
pub const DEFAULT_PRE_ROLL: f64 = 100.0;

/// Placeholder image dimensions.
pub const PLACEHOLDER_WIDTH: u32 = 800;
pub const PLACEHOLDER_HEIGHT: u32 = 600;

/// Status text shown before the first batch resolves.
pub const STATUS_LOADING: &str = "Loading image sequence...";

/// Status text when no frame exists within the probe ceiling.
pub const STATUS_PLACEHOLDER_ONLY: &str = "Using placeholder images. Scroll to navigate sequence.";

/// Status text when the scan itself failed.
pub const STATUS_PROBE_FAILED: &str = "Error loading images. Using placeholders.";
