//! Route definitions for the caller's own session snapshots.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/user`.
///
/// ```text
/// GET    /scenarios                 -> list_user_sessions
/// GET    /scenarios/{scenario_id}   -> get_user_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scenarios", get(session::list_user_sessions))
        .route("/scenarios/{scenario_id}", get(session::get_user_session))
}
