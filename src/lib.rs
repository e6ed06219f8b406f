//! Reactive state cells with ordered updates and subscriber notification.

pub mod cell;
pub mod cli;
pub mod config;
pub mod counter;
pub mod lifecycle;
pub mod logging;
pub mod mvi;

pub use cell::{StateCell, StateError, Subscription, UpdateRequest};
