use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_hold_ms() -> u64 {
    200
}

fn default_release_ms() -> u64 {
    100
}

/// Press timing owned by the input emitter
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct InputConfig {
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    #[serde(default = "default_release_ms")]
    pub release_ms: u64,
}

impl InputConfig {
    pub fn hold(&self) -> Duration {
        Duration::from_millis(self.hold_ms)
    }

    pub fn release(&self) -> Duration {
        Duration::from_millis(self.release_ms)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            hold_ms: default_hold_ms(),
            release_ms: default_release_ms(),
        }
    }
}
