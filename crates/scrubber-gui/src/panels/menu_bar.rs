use crate::app::ScrubberApp;
use crate::messages::WorkerResult;

pub fn show(ctx: &egui::Context, app: &mut ScrubberApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Asset Folder...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_folder(app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Sequence", |ui| {
                let current = app.player.sequence_id().map(str::to_string);
                let ids: Vec<String> = app
                    .player
                    .config()
                    .sequences
                    .iter()
                    .map(|s| s.id.clone())
                    .collect();
                for id in ids {
                    let selected = current.as_deref() == Some(id.as_str());
                    if ui.radio(selected, id.as_str()).clicked() {
                        ui.close();
                        app.select_sequence(&id);
                    }
                }

                ui.separator();

                if ui.button("Next Sequence").clicked() {
                    ui.close();
                    app.toggle_sequence();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_folder(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

/// Pick a local folder holding `assets/` and serve frames from it.
fn open_folder(app: &mut ScrubberApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            let _ = result_tx.send(WorkerResult::BaseSelected {
                path: path.display().to_string(),
            });
        }
    });
}
