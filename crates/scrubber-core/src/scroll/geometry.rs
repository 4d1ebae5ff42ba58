use crate::config::ScrollConfig;

/// Position of the interaction section relative to the page, in page pixels.
///
/// Not stored by the controller beyond change detection; the boundary is
/// recomputed for every scroll event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneGeometry {
    /// Vertical offset of the section's top edge from the page top.
    pub section_top: f64,
    pub viewport_height: f64,
}

impl ZoneGeometry {
    pub fn new(section_top: f64, viewport_height: f64) -> Self {
        Self {
            section_top,
            viewport_height,
        }
    }

    /// Scroll offset the page is pinned to while frames are being driven.
    pub fn boundary(&self, config: &ScrollConfig) -> f64 {
        self.section_top - config.section_lead + self.viewport_height * config.viewport_fraction
    }

    /// Whether `scroll_y` lies above the zone, pre-roll margin included.
    pub fn is_above(&self, scroll_y: f64, config: &ScrollConfig) -> bool {
        scroll_y < self.boundary(config) - config.pre_roll
    }
}
