//! Error types for the todo API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because deleting an already-deleted
//! todo is the one failure callers can reasonably expect. All other non-2xx
//! responses land in `Http` with the raw status code and body so the UI can
//! show them verbatim.

/// Errors returned by `TodoClient` parse methods and by transports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-success status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The round-trip itself failed (connect, DNS, timeout, read).
    #[error("transport error: {0}")]
    Transport(String),
}
