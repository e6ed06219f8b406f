use thiserror::Error;

/// Boxed error returned by fallible transforms.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while updating a [`StateCell`](super::StateCell).
#[derive(Debug, Error)]
pub enum StateError {
    /// A transform failed while computing the successor of `revision`.
    ///
    /// The cell keeps the value it held at `revision`.
    #[error("Transform failed at revision {revision}: {source}")]
    TransformFailure {
        revision: u64,
        #[source]
        source: BoxError,
    },

    /// `merge` was called on a value that does not serialize to an object.
    #[error("Cannot merge into non-record value of type '{type_name}' (serialized as {found})")]
    MergeOnNonRecord {
        type_name: &'static str,
        found: &'static str,
    },
}

impl StateError {
    /// Revision the cell was left at, for transform failures.
    pub fn revision(&self) -> Option<u64> {
        match self {
            StateError::TransformFailure { revision, .. } => Some(*revision),
            StateError::MergeOnNonRecord { .. } => None,
        }
    }
}
