use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::asset::AssetLayout;
use crate::consts::{
    DEFAULT_BATCH_SIZE, DEFAULT_FRAME_EXTENSION, DEFAULT_MAX_INDEX, DEFAULT_PRE_ROLL,
    DEFAULT_SECTION_LEAD, DEFAULT_START_INDEX, DEFAULT_VIEWPORT_FRACTION, TOUCH_STEP_INTERVAL,
    WHEEL_STEP_INTERVAL,
};
use crate::error::{Result, ScrubError};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScrubberConfig {
    /// Root the `assets/` directory lives under: a filesystem path or an
    /// `http(s)://` URL.
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Sequence shown at startup. Falls back to the first entry if unknown.
    #[serde(default = "default_sequence_id")]
    pub default_sequence: String,
    #[serde(default = "default_sequences")]
    pub sequences: Vec<SequenceEntry>,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for ScrubberConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            default_sequence: default_sequence_id(),
            sequences: default_sequences(),
            probe: ProbeConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

impl ScrubberConfig {
    /// Read a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn sequence(&self, id: &str) -> Result<&SequenceEntry> {
        self.sequences
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ScrubError::UnknownSequence(id.to_string()))
    }

    /// The startup sequence id, or the first configured one when
    /// `default_sequence` names nothing.
    pub fn initial_sequence(&self) -> Option<&str> {
        self.sequences
            .iter()
            .find(|s| s.id == self.default_sequence)
            .or_else(|| self.sequences.first())
            .map(|s| s.id.as_str())
    }

    /// Id of the route after `id`, wrapping around.
    pub fn next_sequence(&self, id: &str) -> Option<&str> {
        let pos = self.sequences.iter().position(|s| s.id == id)?;
        let next = (pos + 1) % self.sequences.len();
        Some(self.sequences[next].id.as_str())
    }

    /// Asset layout for a sequence id.
    pub fn layout_for(&self, id: &str) -> Result<AssetLayout> {
        let entry = self.sequence(id)?;
        Ok(AssetLayout::new(
            &self.base_path,
            &entry.file_path,
            &self.probe.extension,
        ))
    }
}

/// One routable image sequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceEntry {
    pub id: String,
    /// Asset name prefix, e.g. `xal/move-it-pro-lighting-converter`.
    pub file_path: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub batch_size: u32,
    pub max_index: u32,
    pub start_index: u32,
    pub extension: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            max_index: DEFAULT_MAX_INDEX,
            start_index: DEFAULT_START_INDEX,
            extension: DEFAULT_FRAME_EXTENSION.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub wheel_interval_ms: u64,
    pub touch_interval_ms: u64,
    pub section_lead: f64,
    pub viewport_fraction: f64,
    pub pre_roll: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            wheel_interval_ms: WHEEL_STEP_INTERVAL.as_millis() as u64,
            touch_interval_ms: TOUCH_STEP_INTERVAL.as_millis() as u64,
            section_lead: DEFAULT_SECTION_LEAD,
            viewport_fraction: DEFAULT_VIEWPORT_FRACTION,
            pre_roll: DEFAULT_PRE_ROLL,
        }
    }
}

impl ScrollConfig {
    pub fn wheel_interval(&self) -> Duration {
        Duration::from_millis(self.wheel_interval_ms)
    }

    pub fn touch_interval(&self) -> Duration {
        Duration::from_millis(self.touch_interval_ms)
    }
}

fn default_base_path() -> String {
    ".".to_string()
}

fn default_sequence_id() -> String {
    "xal".to_string()
}

fn default_sequences() -> Vec<SequenceEntry> {
    vec![
        SequenceEntry {
            id: "xal".to_string(),
            file_path: "xal/move-it-pro-lighting-converter".to_string(),
        },
        SequenceEntry {
            id: "example".to_string(),
            file_path: "example/videoplayback".to_string(),
        },
    ]
}
