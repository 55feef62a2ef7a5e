//! HTTP API layer.
//!
//! Exposes the diagnosis workflow, the symptom catalog, account
//! registration/login, and query history as endpoints under `/api/`.
//! Protected routes sit behind the credential middleware.
//!
//! The router is composable — `api_router()` returns a `Router` that
//! can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server, ApiServer};
pub use types::{ApiContext, UserContext};
