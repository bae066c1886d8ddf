use crate::HandlerError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A schema-less event as delivered by the dispatcher.
///
/// Handlers read only the fields they declare and ignore the rest. The accessors below turn
/// an absent or mistyped field into [`HandlerError::MalformedEvent`] instead of a panic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(Map<String, Value>);

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a raw runtime payload into an event.
    /// Only JSON objects are events, anything else is rejected.
    pub fn from_value(value: Value) -> Result<Self, HandlerError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(HandlerError::MalformedEvent(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns the field or fails with a malformed event error naming it.
    pub fn require(&self, field: &str) -> Result<&Value, HandlerError> {
        self.0.get(field).ok_or_else(|| HandlerError::missing_field(field))
    }

    /// Deserializes an optional field into `T`.
    /// Absent and `null` fields are `None`, a present field of the wrong type is an error.
    pub fn field<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>, HandlerError> {
        match self.0.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => decode_field(field, v).map(Some),
        }
    }

    /// Same as [`Event::field`], but the field must be present.
    pub fn require_field<T: DeserializeOwned>(&self, field: &str) -> Result<T, HandlerError> {
        decode_field(field, self.require(field)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Event {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Event {
    type Error = HandlerError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn decode_field<T: DeserializeOwned>(field: &str, value: &Value) -> Result<T, HandlerError> {
    T::deserialize(value).map_err(|e| HandlerError::MalformedEvent(format!("field `{field}`: {e}")))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: Value) -> Event {
        Event::from_value(value).unwrap()
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        for value in [json!(null), json!(1), json!("a"), json!([1, 2]), json!(true)] {
            let err = Event::from_value(value).unwrap_err();
            assert!(err.is_malformed_event(), "{err}");
        }
    }

    #[test]
    fn test_require_names_missing_field() {
        let ev = event(json!({"a": 1}));
        assert_eq!(ev.require("a").unwrap(), &json!(1));

        let err = ev.require("payload").unwrap_err();
        assert_eq!(err.to_string(), "Malformed event: missing field `payload`");
    }

    #[test]
    fn test_field_optional_and_typed() {
        let ev = event(json!({"firstName": "Ann", "age": "old", "nothing": null}));

        assert_eq!(ev.field::<String>("firstName").unwrap(), Some("Ann".to_string()));
        assert_eq!(ev.field::<String>("lastName").unwrap(), None);
        assert_eq!(ev.field::<String>("nothing").unwrap(), None);

        let err = ev.field::<u32>("age").unwrap_err();
        assert!(err.is_malformed_event());
        assert!(err.to_string().contains("field `age`"), "{err}");
    }

    #[test]
    fn test_require_field() {
        let ev = event(json!({"count": 3}));
        assert_eq!(ev.require_field::<u32>("count").unwrap(), 3);
        assert!(ev.require_field::<u32>("other").unwrap_err().is_malformed_event());
    }

    #[test]
    fn test_serializes_transparently() {
        let ev = event(json!({"a": 1, "nested": {"b": [true, null]}}));
        assert_eq!(serde_json::to_value(&ev).unwrap(), json!({"a": 1, "nested": {"b": [true, null]}}));

        let back: Event = serde_json::from_str(r#"{"a":1}"#).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.into_value(), json!({"a": 1}));
    }

    #[test]
    fn test_empty_event() {
        let ev = Event::new();
        assert!(ev.is_empty());
        assert!(ev.get("anything").is_none());
        assert_eq!(serde_json::to_string(&ev).unwrap(), "{}");
    }
}
