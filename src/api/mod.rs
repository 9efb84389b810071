//! HTTP API layer.
//!
//! Routes are nested under `/api/` and every endpoint answers with the
//! uniform `{success, message, data?, count?, error?, errors?}` envelope.
//! The router is composable — `api_router()` returns a `Router` that can
//! be mounted on any axum server.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;

pub use router::api_router;
pub use types::ApiContext;
