//! Store: a reducer driving a state cell.

use std::marker::PhantomData;
use std::sync::Arc;

use super::reducer::Reducer;
use crate::cell::{StateCell, StateError, Subscription, UpdateRequest};
use crate::config::CellConfig;

/// Holds the state of one component and applies intents through `R`.
///
/// Each dispatched intent becomes a transform on the underlying cell, so
/// intents dispatched in a row each reduce the state left by the previous
/// one, even when dispatched from a subscriber.
pub struct Store<R: Reducer> {
    cell: StateCell<R::State>,
    _reducer: PhantomData<fn() -> R>,
}

impl<R: Reducer + 'static> Store<R> {
    pub fn new() -> Self {
        Self::with_state(R::State::default())
    }

    pub fn with_state(state: R::State) -> Self {
        Self::from_cell(StateCell::new(state))
    }

    pub fn with_config(state: R::State, config: &CellConfig) -> Self {
        Self::from_cell(StateCell::with_config(state, config))
    }

    pub fn from_cell(cell: StateCell<R::State>) -> Self {
        Self {
            cell,
            _reducer: PhantomData,
        }
    }

    /// Reduce `intent` against the state left by the previous dispatch.
    pub fn dispatch(&self, intent: R::Intent) -> Result<(), StateError> {
        self.cell
            .request_update(UpdateRequest::transform(move |state: &R::State| {
                R::reduce(state.clone(), intent)
            }))
    }

    pub fn state(&self) -> Arc<R::State> {
        self.cell.read()
    }

    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&R::State) + Send + Sync + 'static,
    {
        self.cell.subscribe(callback)
    }

    /// Underlying cell, for flushing or lifecycle management.
    pub fn cell(&self) -> &StateCell<R::State> {
        &self.cell
    }
}

impl<R: Reducer + 'static> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Reducer + 'static> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self::from_cell(self.cell.clone())
    }
}
