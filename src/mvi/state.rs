//! Component state held by a [`Store`](super::Store).

/// State owned by one component instance.
///
/// A new value is built for every intent; the store's cell swaps it in
/// whole. `Default` is the state a freshly mounted component starts from.
/// `Sync` lets the value be shared across threads behind the cell's `Arc`.
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}
