//! Owner request error types.
//!
//! Errors are layered by origin (client input, key-value store, object
//! store, configuration, internal) but all flatten to HTTP 400 at the
//! boundary. Internal errors never leak their message to the client.

use std::fmt;

/// Message returned to the client for any internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Error processing request";

/// Origin of an owner request error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum OwnerErrorKind {
    /// Missing or malformed client input.
    #[default]
    InvalidInput,
    /// The key-value store rejected the call.
    Store,
    /// The object store could not produce a signed URL.
    ObjectStore,
    /// The service is missing required configuration.
    Configuration,
    /// Any other failure during create, reported with its detail.
    Unexpected,
    /// Uncaught fault inside dispatch.
    Internal,
}

impl OwnerErrorKind {
    /// Returns the short kind name used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "InvalidInput",
            Self::Store => "Store",
            Self::ObjectStore => "ObjectStore",
            Self::Configuration => "Configuration",
            Self::Unexpected => "Unexpected",
            Self::Internal => "Internal",
        }
    }

    /// Returns the HTTP status code for this kind. Every kind is a 400.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        http::StatusCode::BAD_REQUEST
    }
}

impl fmt::Display for OwnerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owner request error.
#[derive(Debug)]
pub struct OwnerError {
    /// Where the error came from.
    pub kind: OwnerErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for OwnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnerError({}): {}", self.kind, self.message)
    }
}

impl std::error::Error for OwnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl OwnerError {
    /// Create a new `OwnerError` with a message.
    #[must_use]
    pub fn with_message(kind: OwnerErrorKind, message: impl Into<String>) -> Self {
        Self {
            status_code: kind.default_status_code(),
            message: message.into(),
            kind,
            source: None,
        }
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// The message placed in the response body.
    ///
    /// Internal errors are masked; everything else is returned verbatim.
    #[must_use]
    pub fn client_message(&self) -> &str {
        match self.kind {
            OwnerErrorKind::Internal => INTERNAL_ERROR_MESSAGE,
            _ => &self.message,
        }
    }

    // -- Convenience constructors --

    /// Missing or malformed client input.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::with_message(OwnerErrorKind::InvalidInput, message)
    }

    /// A required create field is missing, falsy, or of the wrong type.
    #[must_use]
    pub fn invalid_field(field: &str) -> Self {
        Self::invalid_input(format!("Missing or invalid field: {field}"))
    }

    /// Key-value store failure, message passed through.
    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::with_message(OwnerErrorKind::Store, message)
    }

    /// Object store failure, message passed through.
    #[must_use]
    pub fn object_store(message: impl Into<String>) -> Self {
        Self::with_message(OwnerErrorKind::ObjectStore, message)
    }

    /// Missing or unusable upload bucket configuration.
    #[must_use]
    pub fn bucket_not_configured() -> Self {
        Self::with_message(
            OwnerErrorKind::Configuration,
            "Invalid or missing S3_BUCKET_NAME environment variable",
        )
    }

    /// Unclassified failure during create.
    #[must_use]
    pub fn unexpected(detail: impl fmt::Display) -> Self {
        Self::with_message(OwnerErrorKind::Unexpected, format!("Unexpected error: {detail}"))
    }

    /// Uncaught fault inside dispatch.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(OwnerErrorKind::Internal, message)
    }
}
