mod app;
mod convert;
mod host;
mod messages;
mod panels;
mod progress;
mod state;
mod worker;

use std::path::PathBuf;

use anyhow::Result;
use scrubber_core::asset::open_source;
use scrubber_core::config::ScrubberConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Optional TOML config as the only argument.
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => ScrubberConfig::load(&path)?,
        None => ScrubberConfig::default(),
    };
    let source = open_source(&config.base_path)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 800.0])
            .with_min_inner_size([480.0, 480.0])
            .with_title("Scrubber"),
        ..Default::default()
    };

    eframe::run_native(
        "Scrubber",
        options,
        Box::new(move |cc| Ok(Box::new(app::ScrubberApp::new(&cc.egui_ctx, config, source)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
