//! API middleware stack.
//!
//! A single auth layer: bearer-credential validation in front of the
//! symptom, diagnosis, and history endpoints.

pub mod auth;
