use std::time::Duration;

use serde::{Deserialize, Serialize};

/// The `[ui]` section of `encore.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Ui {
    pub tick_rate_ms: u64,
}
impl Default for Ui {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}
impl Ui {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

pub type Config = encore_core::config::Config<Ui>;
