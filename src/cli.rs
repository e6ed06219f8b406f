//! Command-line interface for the `statecell` demo binary.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use parking_lot::Mutex;
use serde_json::Value;

use crate::cell::StateCell;
use crate::config::{CellConfig, Config, DrainMode};
use crate::counter::{CounterIntent, CounterStore};

#[derive(Debug, Parser)]
#[command(name = "statecell", version, about = "Drive reactive state cells from the command line")]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Increment a counter component and print every notification
    Counter {
        /// Number of increments to dispatch
        #[arg(long, default_value_t = 3)]
        increments: u32,
        /// Queue the increments and apply them with a single flush
        #[arg(long)]
        deferred: bool,
    },
    /// Shallow-merge a JSON object patch into a JSON object
    Merge {
        /// Initial value, as JSON
        #[arg(long)]
        initial: String,
        /// Fields to overwrite, as a JSON object
        #[arg(long)]
        patch: String,
    },
}

impl Cli {
    /// Resolve the config: `--config` if given, otherwise the default file.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Ok(config)
    }
}

/// Execute `cli`, writing results to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let config = cli.load_config()?;
    match &cli.command {
        Command::Counter {
            increments,
            deferred,
        } => {
            let mut cell_config = config.cell.clone();
            if *deferred {
                cell_config.drain = DrainMode::Deferred;
            }
            run_counter(&cell_config, *increments, out)
        }
        Command::Merge { initial, patch } => run_merge(&config.cell, initial, patch, out),
    }
}

pub fn run_counter(config: &CellConfig, increments: u32, out: &mut impl Write) -> anyhow::Result<()> {
    let store = CounterStore::with_config(Default::default(), config);
    let seen = Arc::new(Mutex::new(Vec::new()));

    let seen_clone = Arc::clone(&seen);
    let subscription = store.subscribe(move |state| seen_clone.lock().push(state.count));

    for _ in 0..increments {
        store.dispatch(CounterIntent::Increment)?;
    }
    store.cell().flush()?;
    subscription.unsubscribe();

    for count in seen.lock().iter() {
        writeln!(out, "count={}", count)?;
    }
    writeln!(out, "final count={}", store.state().count)?;
    Ok(())
}

pub fn run_merge(config: &CellConfig, initial: &str, patch: &str, out: &mut impl Write) -> anyhow::Result<()> {
    let initial: Value = serde_json::from_str(initial).context("Invalid --initial JSON")?;
    let patch = match serde_json::from_str::<Value>(patch).context("Invalid --patch JSON")? {
        Value::Object(fields) => fields,
        _ => bail!("--patch must be a JSON object"),
    };

    let cell = StateCell::with_config(initial, config);
    cell.merge(patch)?;
    cell.flush()?;

    writeln!(out, "{}", serde_json::to_string(&*cell.read())?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn counter_prints_each_notification() {
        let text = output(|out| run_counter(&CellConfig::default(), 3, out));
        assert_eq!(text, "count=1\ncount=2\ncount=3\nfinal count=3\n");
    }

    #[test]
    fn deferred_counter_prints_same_sequence() {
        let config = CellConfig {
            drain: DrainMode::Deferred,
            ..CellConfig::default()
        };
        let text = output(|out| run_counter(&config, 2, out));
        assert_eq!(text, "count=1\ncount=2\nfinal count=2\n");
    }

    #[test]
    fn merge_prints_merged_object() {
        let text = output(|out| {
            run_merge(&CellConfig::default(), r#"{"a":1,"b":2}"#, r#"{"a":5}"#, out)
        });
        assert_eq!(text, "{\"a\":5,\"b\":2}\n");
    }

    #[test]
    fn merge_rejects_scalar_initial() {
        let mut buf = Vec::new();
        let err = run_merge(&CellConfig::default(), "7", r#"{"a":5}"#, &mut buf).unwrap_err();
        assert!(err.to_string().contains("non-record"));
        assert!(buf.is_empty());
    }

    #[test]
    fn parses_counter_subcommand() {
        let cli = Cli::parse_from(["statecell", "counter", "--increments", "5", "--deferred"]);
        assert!(matches!(
            cli.command,
            Command::Counter {
                increments: 5,
                deferred: true
            }
        ));
        assert!(cli.config.is_none());
    }
}
