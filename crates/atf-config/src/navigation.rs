use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_sample_interval_ms() -> u64 {
    100 // 10 samples per second
}

fn default_settle_ms() -> u64 {
    0
}

fn default_match_threshold() -> f64 {
    0.6
}

fn default_max_attempts() -> Option<u32> {
    Some(1000)
}

fn default_league_region() -> String {
    "p1_league_text".to_string()
}

fn default_team_region() -> String {
    "p1_team_select_text".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NavigationConfig {
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
    /// Extra wait after every emitted input, on top of the emitter's own timing
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,
    /// `None` keeps sampling until the target is confirmed
    #[serde(default = "default_max_attempts")]
    pub max_attempts: Option<u32>,
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_league_region")]
    pub league_region: String,
    #[serde(default = "default_team_region")]
    pub team_region: String,
}

impl NavigationConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: default_sample_interval_ms(),
            settle_ms: default_settle_ms(),
            match_threshold: default_match_threshold(),
            max_attempts: default_max_attempts(),
            timeout_secs: None,
            league_region: default_league_region(),
            team_region: default_team_region(),
        }
    }
}
