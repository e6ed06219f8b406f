//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use statecell::cell::{StateCell, Subscription};
use statecell::config::{CellConfig, DrainMode};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub type Recorder<T> = Arc<Mutex<Vec<T>>>;

pub fn recorder<T>() -> Recorder<T> {
    Arc::new(Mutex::new(Vec::new()))
}

/// Subscribe a callback that appends every notified value to `rec`.
pub fn record_into<T>(cell: &StateCell<T>, rec: &Recorder<T>) -> Subscription
where
    T: Clone + Send + Sync + 'static,
{
    let rec = Arc::clone(rec);
    cell.subscribe(move |value: &T| rec.lock().push(value.clone()))
}

pub fn deferred_config() -> CellConfig {
    CellConfig {
        drain: DrainMode::Deferred,
        ..CellConfig::default()
    }
}

/// Write `content` to a config.toml inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Small deterministic generator for operation sequences.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}
