use crate::messages::FrameKey;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub log_messages: Vec<String>,
    /// Status text last written to the log, to log each change once.
    pub last_status: String,
    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}

/// Texture currently drawn in the interaction section.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    pub shown: Option<FrameKey>,
    /// Last frame requested from the loader.
    pub requested: Option<FrameKey>,
    /// Marks the last image as a placeholder.
    pub is_placeholder: bool,
}

impl ViewportState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
