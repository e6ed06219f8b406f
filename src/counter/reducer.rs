use crate::counter::intent::CounterIntent;
use crate::counter::state::CounterState;
use crate::mvi::Reducer;

pub struct CounterReducer;

impl Reducer for CounterReducer {
    type State = CounterState;
    type Intent = CounterIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            CounterIntent::Increment => CounterState {
                count: state.count.saturating_add(1),
            },
            CounterIntent::Decrement => CounterState {
                count: state.count.saturating_sub(1),
            },
            CounterIntent::Add { amount } => CounterState {
                count: state.count.saturating_add(amount),
            },
            CounterIntent::Reset => CounterState::default(),
        }
    }
}
