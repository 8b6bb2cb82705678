//! Error types for the todo API client.
//!
//! # Design
//! Callers branch on the variant, never on the message. `NotFound` and
//! `Validation` get dedicated variants because the views react to them
//! differently from a generic server failure; all other non-2xx responses
//! land in `Server` with the raw status and body for debugging.

use thiserror::Error;

/// Errors returned by `TodoClient` parse methods and `TodoApi` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS,
    /// timeout, broken body stream).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404: the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server rejected the payload (400 or 422 on create).
    #[error("rejected payload (HTTP {status}): {body}")]
    Validation { status: u16, body: String },

    /// Any other non-2xx response.
    #[error("HTTP {status}: {body}")]
    Server { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound => Some(404),
            ApiError::Validation { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
