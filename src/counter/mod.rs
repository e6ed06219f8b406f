//! The counter component: the smallest useful stateful component.

mod intent;
mod reducer;
mod state;

pub use intent::CounterIntent;
pub use reducer::CounterReducer;
pub use state::CounterState;

use crate::mvi::Store;

/// Store driving a [`CounterState`].
pub type CounterStore = Store<CounterReducer>;
