use std::{
    path::Path,
    time::Duration,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::persistence::load_json_or_default;

pub const SETTINGS_FILE: &str = "settings.json";

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_MIN_WORD_LENGTH: usize = 2;
pub const DEFAULT_TOP_LIST_LEN: usize = 10;
pub const DEFAULT_CLOUD_LEN: usize = 100;
pub const DEFAULT_WEIGHT_SCALE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub min_word_length: usize,
    pub top_list_len: usize,
    pub cloud_len: usize,
    /// Cloud weight is `sqrt(count) * weight_scale`.
    pub weight_scale: f64,
    /// Quiet interval before an edited document is written to storage.
    pub debounce_ms: u64,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            top_list_len: DEFAULT_TOP_LIST_LEN,
            cloud_len: DEFAULT_CLOUD_LEN,
            weight_scale: DEFAULT_WEIGHT_SCALE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            canvas_width: 800,
            canvas_height: 400,
        }
    }
}

impl AnalysisConfig {
    pub fn load(data_dir: &Path) -> Self {
        load_json_or_default(&data_dir.join(SETTINGS_FILE))
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
