//! Outbound client for the external medical-inference HTTP service.
//!
//! The service scores symptom evidence and returns candidate conditions
//! pre-sorted by likelihood; it also serves the selectable symptom
//! catalog. Access goes through the [`InferenceApi`] trait so the
//! diagnosis workflow and the API handlers can be exercised against
//! [`MockInferenceClient`] in tests.

pub mod client;
pub mod types;

pub use client::{HttpInferenceClient, InferenceApi, MockInferenceClient};
pub use types::*;

use thiserror::Error;

/// Errors from the external inference service.
///
/// Connection and timeout failures are distinct variants so logs can
/// tell an unreachable service from a slow one.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Cannot reach inference service at {0}")]
    Connection(String),

    #[error("Inference request timed out after {0}s")]
    Timeout(u64),

    #[error("Inference request failed: {0}")]
    Request(String),

    #[error("Inference service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse inference response: {0}")]
    ResponseParsing(String),
}

impl InferenceError {
    /// The upstream HTTP status, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The upstream error payload, when the service answered at all.
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_only_for_http_errors() {
        let http = InferenceError::Http { status: 403, body: "denied".into() };
        assert_eq!(http.status(), Some(403));
        assert_eq!(http.payload(), Some("denied"));

        let conn = InferenceError::Connection("http://api".into());
        assert_eq!(conn.status(), None);
        assert_eq!(conn.payload(), None);
        assert_eq!(InferenceError::Timeout(5).status(), None);
    }
}
