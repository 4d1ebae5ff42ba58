use scrubber_core::probe::ProbeOutcome;

use crate::app::ScrubberApp;

pub fn show(ctx: &egui::Context, app: &mut ScrubberApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        let frames = app.player.frames();
        if frames.outcome == ProbeOutcome::Running {
            let text = format!("Probing... {} found", frames.found());
            ui.add(egui::ProgressBar::new(0.0).text(text).animate(true));
        } else {
            let state = app.player.state();
            ui.add(egui::ProgressBar::new(app.player.controller().progress() as f32).text(
                format!("Frame {} of {}", state.current_frame, frames.total_frames),
            ));
        }

        // Log area, fixed height for 3 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 3.0 + spacing * 2.0;

        egui::ScrollArea::vertical()
            .id_salt("log")
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for msg in &app.ui_state.log_messages {
                    ui.label(msg);
                }
            });

        ui.horizontal(|ui| {
            if let Some(id) = app.player.sequence_id() {
                ui.label(format!("Sequence: {id}"));
                ui.separator();
            }
            ui.label(format!("Probe: {}", app.player.frames().outcome));
            ui.separator();
            ui.label(format!("Scroll: {}", app.player.controller().phase()));
            if app.viewport.is_placeholder {
                ui.separator();
                ui.label("Placeholder");
            }
        });

        ui.add_space(2.0);
    });
}
