use thiserror::Error;

/// Everything a handler invocation can fail with.
///
/// Collaborator and serialization failures are wrapped, not translated: the underlying error
/// is kept so the dispatcher sees exactly what went wrong.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The event does not have the structure the handler declared it reads.
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error("Failed to serialize response body: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl HandlerError {
    /// A shortcut for the common "required field is absent" case.
    pub fn missing_field(field: &str) -> Self {
        Self::MalformedEvent(format!("missing field `{field}`"))
    }

    pub fn is_malformed_event(&self) -> bool {
        matches!(self, Self::MalformedEvent(_))
    }
}

/// Failures of the systems a handler calls but does not implement.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Route lookup failed: {0}")]
    Route(String),

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Response from {url} is not valid JSON: {message}")]
    Decode { url: String, message: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Handler already registered: {0}")]
    Duplicate(String),

    #[error("No handler registered under: {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_error_is_kept_as_is() {
        let err = HandlerError::from(CollaboratorError::Status {
            url: "https://example.com/pokemon/bulbasaur".to_string(),
            status: 503,
        });

        // transparent: the message is exactly the collaborator's
        assert_eq!(
            err.to_string(),
            "Request to https://example.com/pokemon/bulbasaur returned status 503"
        );
        match err {
            HandlerError::Collaborator(CollaboratorError::Status { status, .. }) => assert_eq!(status, 503),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_message() {
        let err = HandlerError::missing_field("payload");
        assert!(err.is_malformed_event());
        assert_eq!(err.to_string(), "Malformed event: missing field `payload`");
    }

    #[test]
    fn test_serialization_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: HandlerError = json_err.into();
        assert!(matches!(err, HandlerError::Serialization(_)));
        assert!(!err.is_malformed_event());
    }
}
