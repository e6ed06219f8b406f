//! Intents: what a component was asked to do.

/// A request to change component state, expressed as data.
///
/// An intent names the change ("increment", "reset") rather than carrying
/// the new state. [`Store::dispatch`](super::Store::dispatch) turns it into
/// a transform on the store's cell, so the reducer sees the state left by
/// the previous intent.
pub trait Intent: Send + 'static {}
