//! Match clock parameters

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Wall-clock length of one match minute at 1x speed (default: 1000)
    pub base_tick_ms: u64,
    /// Speed used when playback starts: 1, 2 or 4 (default: 1)
    pub default_speed: u8,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { base_tick_ms: 1000, default_speed: 1 }
    }
}

impl PlaybackConfig {
    pub fn base_tick(&self) -> Duration {
        Duration::from_millis(self.base_tick_ms)
    }
}
