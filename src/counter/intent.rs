use crate::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterIntent {
    Increment,
    Decrement,
    /// Add `amount` (may be negative). Saturates at the `i64` bounds.
    Add { amount: i64 },
    Reset,
}

impl Intent for CounterIntent {}
