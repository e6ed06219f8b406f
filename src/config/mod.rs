//! Configuration for state cells and the demo binary.

mod loader;
mod types;

pub use loader::{ConfigError, MAX_HISTORY_LIMIT};
pub use types::{CellConfig, Config, DrainMode};
