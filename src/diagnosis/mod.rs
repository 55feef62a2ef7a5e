//! Diagnosis resolution: the workflow that turns a set of selected
//! symptom ids into a candidate condition.
//!
//! The primary path asks the external inference service and enriches
//! its top candidate from the local reference table. When the service
//! cannot be reached, resolution degrades to a set-overlap scan of the
//! reference table; only if that also comes up empty is the upstream
//! failure surfaced to the caller.

pub mod reference;
pub mod resolver;

pub use reference::{ConditionRef, ConditionTable};
pub use resolver::DiagnosisResolver;

use thiserror::Error;

/// Failure to load the static condition reference table.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Cannot read reference data at {0}: {1}")]
    Load(String, String),

    #[error("Cannot parse reference data {0}: {1}")]
    Parse(String, String),
}

/// Failure of the diagnosis-resolution workflow.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Bad input, rejected before any network call. Never retried.
    #[error("{0}")]
    Validation(String),

    /// The external service failed and the local fallback found no
    /// overlapping condition either.
    #[error("Failed to get diagnosis from external API: {details}")]
    Upstream {
        status: Option<u16>,
        details: String,
    },
}
