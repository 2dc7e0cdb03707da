pub mod health;
pub mod scenario;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /scenarios                          catalog list
/// /scenarios/{id}                     catalog read
/// /scenarios/{id}/start               start or resume a session
/// /scenarios/{id}/conversation        submit one turn
/// /scenarios/{id}/complete            finalize and score
///
/// /user/scenarios                     caller's sessions
/// /user/scenarios/{scenario_id}       caller's session for one scenario
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/scenarios", scenario::router())
        .nest("/user", user::router())
}
