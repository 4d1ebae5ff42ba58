use std::sync::{mpsc, Arc};

use scrubber_core::asset::{open_source, FrameSource};
use scrubber_core::config::ScrubberConfig;
use scrubber_core::display::DisplayFrame;
use scrubber_core::player::Player;
use scrubber_core::scroll::ZoneGeometry;

use crate::convert::rgba_to_color_image;
use crate::host::PageHost;
use crate::messages::{FrameKey, WorkerCommand, WorkerResult};
use crate::panels;
use crate::progress::RepaintReporter;
use crate::state::{UIState, ViewportState};
use crate::worker;

pub struct ScrubberApp {
    pub player: Player<PageHost>,
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    /// Zone geometry measured during the last layout pass.
    pub geometry: Option<ZoneGeometry>,
}

impl ScrubberApp {
    pub fn new(ctx: &egui::Context, config: ScrubberConfig, source: Arc<dyn FrameSource>) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone());

        let mut app = Self {
            player: new_player(ctx, config, source),
            cmd_tx,
            result_tx,
            result_rx,
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            geometry: None,
        };
        app.toggle_sequence();
        app
    }

    /// Advance to the next configured sequence.
    pub fn toggle_sequence(&mut self) {
        match self.player.toggle_sequence() {
            Ok(id) => {
                self.viewport.clear();
                self.ui_state.add_log(format!("Showing sequence: {id}"));
            }
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    pub fn select_sequence(&mut self, id: &str) {
        match self.player.select_sequence(id) {
            Ok(true) => {
                self.viewport.clear();
                self.ui_state.add_log(format!("Showing sequence: {id}"));
            }
            Ok(false) => {}
            Err(e) => self.ui_state.add_log(format!("ERROR: {e}")),
        }
    }

    /// Serve frames from a new base location, keeping the current sequence.
    fn rebase(&mut self, ctx: &egui::Context, base_path: String) {
        let mut config = self.player.config().clone();
        config.base_path = base_path;

        let source = match open_source(&config.base_path) {
            Ok(source) => source,
            Err(e) => {
                self.ui_state.add_log(format!("ERROR: {e}"));
                return;
            }
        };
        let sequence = self.player.sequence_id().map(str::to_string);

        self.ui_state
            .add_log(format!("Base location: {}", config.base_path));
        self.player = new_player(ctx, config, source);
        self.viewport.clear();
        match sequence {
            Some(id) => self.select_sequence(&id),
            None => self.toggle_sequence(),
        }
    }

    /// Drain all pending results from the loader.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Frame { key, frame } => {
                    if self.player.sequence_id() != Some(key.sequence.as_str()) {
                        continue;
                    }
                    self.update_texture(ctx, key, frame);
                }
                WorkerResult::BaseSelected { path } => self.rebase(ctx, path),
            }
        }
    }

    fn update_texture(&mut self, ctx: &egui::Context, key: FrameKey, frame: DisplayFrame) {
        let image = rgba_to_color_image(frame.image());
        let texture = ctx.load_texture("frame", image, egui::TextureOptions::LINEAR);
        self.viewport.texture = Some(texture);
        self.viewport.is_placeholder = !frame.is_real();
        self.viewport.shown = Some(key);
    }

    /// Ask the loader for the current frame unless it is already on its way.
    fn request_frame(&mut self) {
        let (Some(sequence), Some(layout)) = (self.player.sequence_id(), self.player.layout())
        else {
            return;
        };
        let frame = self.player.state().current_frame;
        let key = FrameKey {
            sequence: sequence.to_string(),
            frame,
            confirmed: self.player.frames().contains(frame),
        };
        if self.viewport.requested.as_ref() == Some(&key) {
            return;
        }

        let _ = self.cmd_tx.send(WorkerCommand::LoadFrame {
            key: key.clone(),
            source: self.player.source(),
            layout: layout.clone(),
            frames: self.player.frames().clone(),
        });
        self.viewport.requested = Some(key);
    }

    fn log_status_change(&mut self) {
        let status = &self.player.frames().status_text;
        if *status != self.ui_state.last_status {
            self.ui_state.last_status = status.clone();
            let line = status.clone();
            self.ui_state.add_log(line);
        }
    }
}

fn new_player(
    ctx: &egui::Context,
    config: ScrubberConfig,
    source: Arc<dyn FrameSource>,
) -> Player<PageHost> {
    let mut player = Player::new(config, source, PageHost::default());
    player.set_probe_listener(Arc::new(RepaintReporter::new(ctx.clone())));
    player
}

impl eframe::App for ScrubberApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        if let Some(geometry) = self.geometry {
            self.player.refresh(geometry);
        }
        self.log_status_change();

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::page::show(ctx, self);

        self.request_frame();

        if self.ui_state.show_about {
            egui::Window::new("About Scrubber")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Scrubber");
                        ui.label("Scroll-controlled image sequences");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
