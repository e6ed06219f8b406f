//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides base traits for implementing unidirectional
//! data flow on top of [`StateCell`](crate::cell::StateCell).
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ Subscribers
//!    ↑                                     │
//!    └─────────────────────────────────────┘
//! ```
//!
//! - **State**: Value owned by one component instance, replaced per intent
//! - **Intent**: Named change requested of the component
//! - **Reducer**: Computes the next state from the current one and an intent
//! - **Store**: Owns the state cell and feeds intents through the reducer

mod intent;
mod reducer;
mod state;
mod store;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
pub use store::Store;
