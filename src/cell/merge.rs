//! Shallow merge for record-shaped values.
//!
//! A value is a record when it serializes to a JSON object. Merging copies
//! every field of the current value, overwrites it with the caller's partial
//! fields, and deserializes the result into a fresh value. Nested objects
//! are replaced, not merged.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::error::{BoxError, StateError};
use super::update::{UpdateKind, UpdateRequest};
use super::StateCell;

impl<T> StateCell<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    /// Queue a shallow merge of `partial` into the held value.
    ///
    /// # Errors
    /// Returns [`StateError::MergeOnNonRecord`] right away, with nothing
    /// queued, if the current value does not serialize to an object. Fails
    /// with [`StateError::TransformFailure`] if the merged fields do not
    /// deserialize back into `T`.
    pub fn merge(&self, partial: Map<String, Value>) -> Result<(), StateError> {
        ensure_record(&*self.read())?;
        let request = UpdateRequest::try_transform(move |prev: &T| shallow_merge(prev, partial));
        self.enqueue(request, UpdateKind::Merge)
    }
}

fn ensure_record<T: Serialize>(value: &T) -> Result<(), StateError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(_)) => Ok(()),
        Ok(other) => Err(StateError::MergeOnNonRecord {
            type_name: std::any::type_name::<T>(),
            found: json_kind(&other),
        }),
        Err(_) => Err(StateError::MergeOnNonRecord {
            type_name: std::any::type_name::<T>(),
            found: "unserializable",
        }),
    }
}

/// Field union of `prev` and `partial`, `partial` winning per field.
fn shallow_merge<T>(prev: &T, partial: Map<String, Value>) -> Result<T, BoxError>
where
    T: Serialize + DeserializeOwned,
{
    let mut fields = match serde_json::to_value(prev)? {
        Value::Object(fields) => fields,
        other => {
            return Err(Box::new(StateError::MergeOnNonRecord {
                type_name: std::any::type_name::<T>(),
                found: json_kind(&other),
            }))
        }
    };
    for (key, value) in partial {
        fields.insert(key, value);
    }
    Ok(serde_json::from_value(Value::Object(fields))?)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
