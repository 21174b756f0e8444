//! API module for the webhook HTTP surface
//!
//! This module provides the axum router, the shared service state, and
//! the ingress adapter that turns HTTP requests into log records.

pub mod http;
pub mod ingress;
pub mod rest;
pub mod state;

pub use http::create_router;
pub use state::AppState;
