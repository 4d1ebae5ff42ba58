use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::asset::{check_frame, AssetLayout, FrameSource};
use crate::config::ProbeConfig;

use super::frame_set::FrameSet;

/// Cooperative cancellation flag shared between a probe run and its owner.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Receives partial results while a probe run is in progress.
pub trait ProbeReporter: Send + Sync {
    /// Called after each batch that confirmed at least one frame.
    fn on_progress(&self, _frames: &FrameSet) {}
}

pub struct NoOpReporter;
impl ProbeReporter for NoOpReporter {}

/// Scan `layout` for consecutively numbered frames.
///
/// Indices are checked `batch_size` at a time, concurrently within a batch
/// and strictly one batch after another. Empty batches before the first hit
/// are skipped; the first empty batch after a hit ends the scan. A cancelled
/// run returns whatever it had with `ProbeOutcome::Aborted`.
pub fn probe_frames(
    source: &dyn FrameSource,
    layout: &AssetLayout,
    config: &ProbeConfig,
    cancel: &CancelToken,
    reporter: &dyn ProbeReporter,
) -> FrameSet {
    let mut frames = FrameSet::loading();
    let batch_size = config.batch_size.max(1);
    let mut current = config.start_index;

    while current <= config.max_index {
        if cancel.is_cancelled() {
            frames.abort();
            return frames;
        }

        let hits = check_batch(source, layout, current, batch_size, config.max_index, cancel);

        if cancel.is_cancelled() {
            frames.abort();
            return frames;
        }

        if hits.is_empty() {
            if frames.loaded_indices.is_empty() {
                debug!(start = current, "no frames yet, skipping batch");
                match current.checked_add(batch_size) {
                    Some(next) => current = next,
                    None => break,
                }
                continue;
            }
            debug!(start = current, "empty batch after hits, sequence ended");
            break;
        }

        frames.merge(&hits);
        debug!(
            start = current,
            found = frames.found(),
            total = frames.total_frames,
            "batch merged"
        );
        reporter.on_progress(&frames);

        match current.checked_add(batch_size) {
            Some(next) => current = next,
            None => break,
        }
    }

    frames.finish();
    info!(
        file_path = %layout.file_path,
        total = frames.total_frames,
        found = frames.found(),
        outcome = %frames.outcome,
        "probe finished"
    );
    frames
}

/// Check one batch and return the indices that count as hits.
///
/// Misses before the batch's first hit are tolerated; the first miss after
/// a hit drops everything after it.
fn check_batch(
    source: &dyn FrameSource,
    layout: &AssetLayout,
    start: u32,
    batch_size: u32,
    max_index: u32,
    cancel: &CancelToken,
) -> Vec<u32> {
    let end = start.saturating_add(batch_size - 1).min(max_index);

    let results: Vec<(u32, bool)> = (start..=end)
        .into_par_iter()
        .map(|index| {
            if cancel.is_cancelled() {
                return (index, false);
            }
            (index, check_frame(source, &layout.location(index)))
        })
        .collect();

    let mut hits = Vec::new();
    for (index, exists) in results {
        if exists {
            hits.push(index);
        } else if !hits.is_empty() {
            break;
        }
    }
    hits
}
