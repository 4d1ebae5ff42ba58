use std::time::Instant;

use scrubber_core::display::progress_caption;
use scrubber_core::scroll::{InputEvent, NavKey, Phase, ZoneGeometry};

use crate::app::ScrubberApp;

const NAV_KEYS: [(egui::Key, NavKey); 5] = [
    (egui::Key::ArrowUp, NavKey::ArrowUp),
    (egui::Key::ArrowDown, NavKey::ArrowDown),
    (egui::Key::PageUp, NavKey::PageUp),
    (egui::Key::PageDown, NavKey::PageDown),
    (egui::Key::Space, NavKey::Space),
];

/// Filler above and below the section, in viewport heights.
const FILLER_SCREENS: f32 = 1.5;

const MAX_IMAGE_WIDTH: f32 = 800.0;

pub fn show(ctx: &egui::Context, app: &mut ScrubberApp) {
    if app.player.controller().host().subscribed {
        forward_input(ctx, app);
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        let viewport_height = ui.available_height();

        let mut area = egui::ScrollArea::vertical()
            .id_salt("page")
            .auto_shrink([false, false]);
        if let Some(y) = app.player.controller_mut().host_mut().take_pending_scroll() {
            area = area.vertical_scroll_offset(y);
        }

        let output = area.show(ui, |ui| {
            let origin = ui.cursor().top();
            filler(ui, viewport_height, "Scroll down to the sequence");
            let section_top = ui.cursor().top() - origin;
            section(ui, app, viewport_height);
            filler(ui, viewport_height, "End of page");
            section_top
        });

        // Whole pixels, so sub-pixel layout jitter never counts as a change.
        app.geometry = Some(ZoneGeometry::new(
            f64::from(output.inner.round()),
            f64::from(viewport_height.round()),
        ));

        let offset = f64::from(output.state.offset.y);
        let host = app.player.controller_mut().host_mut();
        if (offset - host.scroll_y).abs() > 0.5 {
            host.scroll_y = offset;
            app.player
                .handle(InputEvent::Scroll { scroll_y: offset }, Instant::now());
        }
        if app.player.controller().host().pending_scroll.is_some() {
            ctx.request_repaint();
        }
    });
}

/// Translate wheel, key and touch input into controller events. Input the
/// controller consumes is removed before the scroll area sees it.
fn forward_input(ctx: &egui::Context, app: &mut ScrubberApp) {
    let now = Instant::now();
    let (wheel, keys, touches) = ctx.input(|i| {
        let keys: Vec<(egui::Key, NavKey)> = NAV_KEYS
            .iter()
            .copied()
            .filter(|(key, _)| i.key_pressed(*key))
            .collect();
        let touches: Vec<InputEvent> = i.events.iter().filter_map(touch_event).collect();
        (i.raw_scroll_delta.y, keys, touches)
    });

    let mut swallow_scroll = false;

    if wheel != 0.0 {
        // egui reports scrolling towards the top as positive.
        let event = InputEvent::Wheel {
            delta_y: -f64::from(wheel),
        };
        swallow_scroll |= app.player.handle(event, now).prevent_default;
    }

    for (key, nav) in keys {
        if app.player.handle(InputEvent::Key(nav), now).prevent_default {
            ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, key));
        }
    }

    for event in touches {
        swallow_scroll |= app.player.handle(event, now).prevent_default;
    }

    if swallow_scroll || app.player.controller().phase() == Phase::Locked {
        ctx.input_mut(|i| {
            i.raw_scroll_delta = egui::Vec2::ZERO;
            i.smooth_scroll_delta = egui::Vec2::ZERO;
        });
    }
}

fn touch_event(event: &egui::Event) -> Option<InputEvent> {
    let egui::Event::Touch { phase, pos, .. } = event else {
        return None;
    };
    let y = f64::from(pos.y);
    Some(match phase {
        egui::TouchPhase::Start => InputEvent::TouchStart { y },
        egui::TouchPhase::Move => InputEvent::TouchMove { y },
        egui::TouchPhase::End | egui::TouchPhase::Cancel => InputEvent::TouchEnd,
    })
}

fn filler(ui: &mut egui::Ui, viewport_height: f32, label: &str) {
    let size = egui::vec2(ui.available_width(), viewport_height * FILLER_SCREENS);
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(24));
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(20.0),
        egui::Color32::from_gray(140),
    );
}

/// Caption plus the current frame. Clicking the frame switches sequence.
fn section(ui: &mut egui::Ui, app: &mut ScrubberApp, viewport_height: f32) {
    let state = app.player.state();
    let frames = app.player.frames();

    ui.add_space(8.0);
    ui.vertical_centered(|ui| {
        if state.info_visible {
            ui.heading(progress_caption(state.current_frame, frames.total_frames));
        } else {
            ui.heading(frames.status_text.as_str());
        }
    });
    ui.add_space(8.0);

    let width = ui.available_width().min(MAX_IMAGE_WIDTH);
    let height = (width * 0.75).min(viewport_height * 0.6);
    let size = egui::vec2(height / 0.75, height);

    let clicked = ui
        .vertical_centered(|ui| {
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
            match &app.viewport.texture {
                Some(texture) => {
                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
                None => {
                    ui.painter()
                        .rect_filled(rect, 0.0, egui::Color32::from_gray(40));
                    ui.put(
                        egui::Rect::from_center_size(rect.center(), egui::vec2(32.0, 32.0)),
                        egui::Spinner::new(),
                    );
                }
            }
            response
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .clicked()
        })
        .inner;
    ui.add_space(8.0);

    if clicked {
        app.toggle_sequence();
    }
}
