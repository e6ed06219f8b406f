use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cell: CellConfig,
}

/// Settings applied to every cell built through [`StateCell::with_config`](crate::cell::StateCell::with_config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellConfig {
    /// When queued updates are applied (default: eager).
    #[serde(default)]
    pub drain: DrainMode,
    /// Number of commit records kept per cell; 0 disables history (default: 64).
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

/// When `request_update` applies queued requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrainMode {
    /// Drain before `request_update` returns.
    #[default]
    Eager,
    /// Only queue; the owner drains with `flush`.
    Deferred,
}

fn default_history_limit() -> usize {
    64
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            drain: DrainMode::default(),
            history_limit: default_history_limit(),
        }
    }
}
