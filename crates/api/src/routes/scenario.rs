//! Route definitions for the scenario catalog and session lifecycle.
//!
//! All endpoints require authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{scenario, session};
use crate::state::AppState;

/// Routes mounted at `/scenarios`.
///
/// ```text
/// GET    /                    -> list_scenarios
/// GET    /{id}                -> get_scenario
/// POST   /{id}/start          -> start_session
/// POST   /{id}/conversation   -> submit_turn
/// POST   /{id}/complete       -> complete_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(scenario::list_scenarios))
        .route("/{id}", get(scenario::get_scenario))
        .route("/{id}/start", post(session::start_session))
        .route("/{id}/conversation", post(session::submit_turn))
        .route("/{id}/complete", post(session::complete_session))
}
