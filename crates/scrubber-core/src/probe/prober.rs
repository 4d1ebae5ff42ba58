use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use tracing::{debug, error};

use crate::asset::{AssetLayout, FrameSource};
use crate::config::ProbeConfig;

use super::frame_set::{FrameSet, ProbeOutcome};
use super::scan::{probe_frames, CancelToken, ProbeReporter};

struct Shared {
    generation: u64,
    frames: FrameSet,
}

/// Runs probe scans on a background thread, one live run at a time.
///
/// Every `start` cancels the run in flight and bumps the generation. A run
/// only ever writes into the shared `FrameSet` while its generation is the
/// current one, so a superseded run can never leak results.
pub struct FrameProber {
    config: ProbeConfig,
    shared: Arc<Mutex<Shared>>,
    cancel: Option<CancelToken>,
    listener: Option<Arc<dyn ProbeReporter>>,
    workers: Vec<JoinHandle<()>>,
}

impl FrameProber {
    pub fn new(config: ProbeConfig) -> Self {
        Self {
            config,
            shared: Arc::new(Mutex::new(Shared {
                generation: 0,
                frames: FrameSet::loading(),
            })),
            cancel: None,
            listener: None,
            workers: Vec::new(),
        }
    }

    /// Forward every published update (progress and final) to `listener`.
    pub fn set_listener(&mut self, listener: Arc<dyn ProbeReporter>) {
        self.listener = Some(listener);
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Cancel any run in flight and start probing `layout` from scratch.
    /// Returns the generation number of the new run.
    pub fn start(&mut self, source: Arc<dyn FrameSource>, layout: AssetLayout) -> u64 {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
        self.workers.retain(|w| !w.is_finished());

        let token = CancelToken::new();
        let generation = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            shared.frames = FrameSet::loading();
            shared.generation
        };
        debug!(generation, file_path = %layout.file_path, "starting probe");

        let publisher = Publisher {
            shared: Arc::clone(&self.shared),
            generation,
            cancel: token.clone(),
            listener: self.listener.clone(),
        };
        let config = self.config.clone();
        let run_token = token.clone();

        let spawned = std::thread::Builder::new()
            .name("scrubber-probe".into())
            .spawn(move || {
                let result = catch_unwind(AssertUnwindSafe(|| {
                    probe_frames(source.as_ref(), &layout, &config, &run_token, &publisher)
                }));
                match result {
                    Ok(frames) if frames.outcome == ProbeOutcome::Aborted => {
                        debug!(generation, "probe aborted, discarding results");
                    }
                    Ok(frames) => publisher.publish(frames),
                    Err(_) => {
                        error!(generation, "probe scan panicked");
                        publisher.publish_failure();
                    }
                }
            });

        match spawned {
            Ok(handle) => self.workers.push(handle),
            Err(e) => {
                error!("failed to spawn probe thread: {e}");
                lock(&self.shared).frames.fail();
            }
        }

        self.cancel = Some(token);
        generation
    }

    /// Stop the current run. Its partial results stay visible, marked aborted.
    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
            let mut shared = lock(&self.shared);
            if shared.frames.outcome == ProbeOutcome::Running {
                shared.frames.abort();
            }
        }
    }

    pub fn generation(&self) -> u64 {
        lock(&self.shared).generation
    }

    /// Latest published state of the current run.
    pub fn snapshot(&self) -> FrameSet {
        lock(&self.shared).frames.clone()
    }

    /// Block until every spawned run has returned.
    pub fn wait(&mut self) {
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("probe thread panicked");
            }
        }
    }
}

impl Drop for FrameProber {
    fn drop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

struct Publisher {
    shared: Arc<Mutex<Shared>>,
    generation: u64,
    cancel: CancelToken,
    listener: Option<Arc<dyn ProbeReporter>>,
}

impl Publisher {
    fn publish(&self, frames: FrameSet) {
        {
            let mut shared = lock(&self.shared);
            if self.cancel.is_cancelled() || shared.generation != self.generation {
                return;
            }
            shared.frames = frames.clone();
        }
        if let Some(listener) = &self.listener {
            listener.on_progress(&frames);
        }
    }

    fn publish_failure(&self) {
        let mut frames = {
            let shared = lock(&self.shared);
            if self.cancel.is_cancelled() || shared.generation != self.generation {
                return;
            }
            shared.frames.clone()
        };
        frames.fail();
        self.publish(frames);
    }
}

impl ProbeReporter for Publisher {
    fn on_progress(&self, frames: &FrameSet) {
        self.publish(frames.clone());
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
