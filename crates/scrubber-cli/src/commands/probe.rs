use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use scrubber_core::asset::open_source;
use scrubber_core::probe::{probe_frames, CancelToken, FrameSet, ProbeReporter};

use super::load_config;
use crate::summary::print_probe_summary;

#[derive(Args)]
pub struct ProbeArgs {
    /// TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the asset base path or URL
    #[arg(long)]
    pub base: Option<String>,

    /// Sequence id to probe (defaults to the config's default sequence)
    #[arg(short, long)]
    pub sequence: Option<String>,

    /// Highest frame index to check
    #[arg(long)]
    pub max_index: Option<u32>,

    /// Frames checked per batch
    #[arg(long)]
    pub batch_size: Option<u32>,

    /// List every confirmed frame index
    #[arg(long)]
    pub list: bool,
}

struct SpinnerReporter {
    pb: ProgressBar,
}

impl ProbeReporter for SpinnerReporter {
    fn on_progress(&self, frames: &FrameSet) {
        self.pb.set_message(frames.status_text.clone());
        self.pb.tick();
    }
}

pub fn run(args: &ProbeArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(ref base) = args.base {
        config.base_path = base.clone();
    }
    if let Some(max_index) = args.max_index {
        config.probe.max_index = max_index;
    }
    if let Some(batch_size) = args.batch_size {
        config.probe.batch_size = batch_size;
    }

    let sequence = match args.sequence.as_deref() {
        Some(id) => id.to_string(),
        None => config
            .initial_sequence()
            .context("No sequences configured")?
            .to_string(),
    };
    let layout = config.layout_for(&sequence)?;
    let source = open_source(&config.base_path)
        .with_context(|| format!("Failed to open asset source {}", config.base_path))?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.set_message(format!("Probing {}", layout.location(config.probe.start_index)));
    pb.enable_steady_tick(Duration::from_millis(100));

    let start = Instant::now();
    let reporter = SpinnerReporter { pb: pb.clone() };
    let frames = probe_frames(
        source.as_ref(),
        &layout,
        &config.probe,
        &CancelToken::new(),
        &reporter,
    );
    pb.finish_and_clear();

    print_probe_summary(&sequence, &layout, &frames, start.elapsed());
    if args.list {
        let indices: Vec<String> = frames
            .loaded_indices
            .iter()
            .map(|i| i.to_string())
            .collect();
        println!("  {}", indices.join(" "));
    }

    Ok(())
}
