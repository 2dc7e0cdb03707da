//! HTTP service for the Carefully training backend.
//!
//! Exposes the scenario catalog and the session lifecycle (start /
//! conversation turns / completion) over an axum router. The binary
//! entrypoint lives in `main.rs`; everything here is a library so
//! integration tests can build the exact production router.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod locks;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
