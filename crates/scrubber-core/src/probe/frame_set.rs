use std::collections::BTreeSet;

use crate::consts::{STATUS_LOADING, STATUS_PLACEHOLDER_ONLY, STATUS_PROBE_FAILED};

/// How a probe run ended, or that it is still going.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProbeOutcome {
    Running,
    /// At least one frame found and the sequence end located.
    Completed,
    /// The ceiling was reached without finding a single usable frame.
    Exhausted,
    /// Superseded by a newer run or torn down.
    Aborted,
    /// The scan itself broke down.
    Failed,
}

impl std::fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Completed => write!(f, "Completed"),
            Self::Exhausted => write!(f, "Exhausted"),
            Self::Aborted => write!(f, "Aborted"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Discovered frames of one sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameSet {
    /// Highest confirmed frame index.
    pub total_frames: u32,
    /// Indices confirmed to hold a decodable image.
    pub loaded_indices: BTreeSet<u32>,
    /// True once probing finished with a highest confirmed index above 0.
    pub ready: bool,
    pub status_text: String,
    pub outcome: ProbeOutcome,
}

impl Default for FrameSet {
    fn default() -> Self {
        Self::loading()
    }
}

impl FrameSet {
    /// Empty set of a run that has not resolved any batch yet.
    pub fn loading() -> Self {
        Self {
            total_frames: 0,
            loaded_indices: BTreeSet::new(),
            ready: false,
            status_text: STATUS_LOADING.to_string(),
            outcome: ProbeOutcome::Running,
        }
    }

    pub fn contains(&self, index: u32) -> bool {
        self.loaded_indices.contains(&index)
    }

    pub fn found(&self) -> usize {
        self.loaded_indices.len()
    }

    pub fn is_finished(&self) -> bool {
        self.outcome != ProbeOutcome::Running
    }

    /// Merge one batch of confirmed indices.
    pub(crate) fn merge(&mut self, hits: &[u32]) {
        self.loaded_indices.extend(hits.iter().copied());
        if let Some(&last) = hits.iter().max() {
            self.total_frames = self.total_frames.max(last);
        }
        self.status_text = format!("Loading images... {} found so far.", self.found());
    }

    /// Seal a run that scanned to its end.
    pub(crate) fn finish(&mut self) {
        self.ready = self.total_frames > 0;
        if self.ready {
            self.outcome = ProbeOutcome::Completed;
            self.status_text = format!(
                "{} images loaded. Scroll to navigate sequence.",
                self.found()
            );
        } else {
            self.outcome = ProbeOutcome::Exhausted;
            self.status_text = STATUS_PLACEHOLDER_ONLY.to_string();
        }
    }

    pub(crate) fn fail(&mut self) {
        self.ready = false;
        self.outcome = ProbeOutcome::Failed;
        self.status_text = STATUS_PROBE_FAILED.to_string();
    }

    pub(crate) fn abort(&mut self) {
        self.outcome = ProbeOutcome::Aborted;
    }
}
