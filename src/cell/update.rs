//! Update requests accepted by a [`StateCell`](super::StateCell).

use std::fmt;

use super::error::BoxError;

/// Boxed transform from the previous value to the next one.
pub type TransformFn<T> = Box<dyn FnOnce(&T) -> Result<T, BoxError> + Send + 'static>;

/// A requested change to the held value.
///
/// Requests are applied strictly in submission order. A `Transform` receives
/// the value produced by the request applied immediately before it.
pub enum UpdateRequest<T> {
    /// Unconditionally replace the held value.
    Replace(T),
    /// Compute the next value from the previous one.
    Transform(TransformFn<T>),
}

impl<T> UpdateRequest<T> {
    pub fn replace(value: T) -> Self {
        UpdateRequest::Replace(value)
    }

    /// Infallible transform.
    pub fn transform<F>(f: F) -> Self
    where
        F: FnOnce(&T) -> T + Send + 'static,
    {
        UpdateRequest::Transform(Box::new(move |prev| Ok(f(prev))))
    }

    /// Transform that may fail. A failure leaves the cell untouched.
    pub fn try_transform<F, E>(f: F) -> Self
    where
        F: FnOnce(&T) -> Result<T, E> + Send + 'static,
        E: Into<BoxError>,
    {
        UpdateRequest::Transform(Box::new(move |prev| f(prev).map_err(Into::into)))
    }

    pub fn kind(&self) -> UpdateKind {
        match self {
            UpdateRequest::Replace(_) => UpdateKind::Replace,
            UpdateRequest::Transform(_) => UpdateKind::Transform,
        }
    }

    /// Produce the successor of `prev`.
    pub(crate) fn apply(self, prev: &T) -> Result<T, BoxError> {
        match self {
            UpdateRequest::Replace(value) => Ok(value),
            UpdateRequest::Transform(f) => f(prev),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for UpdateRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateRequest::Replace(value) => f.debug_tuple("Replace").field(value).finish(),
            UpdateRequest::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

/// What produced a commit. `Merge` is a transform submitted through `merge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Replace,
    Transform,
    Merge,
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateKind::Replace => write!(f, "replace"),
            UpdateKind::Transform => write!(f, "transform"),
            UpdateKind::Merge => write!(f, "merge"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_ignores_previous_value() {
        let req = UpdateRequest::replace(7);
        assert_eq!(req.kind(), UpdateKind::Replace);
        assert_eq!(req.apply(&1).unwrap(), 7);
    }

    #[test]
    fn transform_sees_previous_value() {
        let req = UpdateRequest::transform(|n: &i32| n * 10);
        assert_eq!(req.kind(), UpdateKind::Transform);
        assert_eq!(req.apply(&4).unwrap(), 40);
    }

    #[test]
    fn try_transform_boxes_error() {
        let req = UpdateRequest::try_transform(|_: &i32| Err::<i32, _>("boom"));
        let err = req.apply(&0).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn debug_hides_closure() {
        let req: UpdateRequest<i32> = UpdateRequest::transform(|n| n + 1);
        assert_eq!(format!("{:?}", req), "Transform(..)");
        assert_eq!(format!("{:?}", UpdateRequest::replace(3)), "Replace(3)");
    }
}
