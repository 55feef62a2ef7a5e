//! API endpoint handlers.
//!
//! Each module corresponds to one area of the service: account
//! registration/login, the symptom catalog, diagnosis resolution,
//! query history, and liveness.

pub mod auth;
pub mod diagnose;
pub mod health;
pub mod history;
pub mod symptoms;
