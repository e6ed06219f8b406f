use serde::{Deserialize, Serialize};

use crate::mvi::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CounterState {
    pub count: i64,
}

impl UiState for CounterState {}

impl CounterState {
    pub fn new(count: i64) -> Self {
        Self { count }
    }
}
