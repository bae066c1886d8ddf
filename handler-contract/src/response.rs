use crate::HandlerError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The value a handler hands back to the dispatcher.
///
/// Only `body` is required. `statusCode` and `headers` are passed through for an API
/// gateway to interpret and are left out of the serialized form when not set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    /// JSON encoding of the handler's result object
    pub body: String,
}

impl Response {
    /// Serializes the whole result into `body`.
    /// This is the only way handlers in this workspace build a response.
    pub fn json<T: Serialize + ?Sized>(result: &T) -> Result<Self, HandlerError> {
        Ok(Self {
            body: serde_json::to_string(result)?,
            ..Default::default()
        })
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Parses `body` back into the result object.
    pub fn decode_body<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
