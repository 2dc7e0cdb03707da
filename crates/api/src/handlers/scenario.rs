//! Handlers for the scenario catalog.
//!
//! Catalog content is seeded by migration and immutable at runtime, so
//! responses carry an opportunistic `Cache-Control` header.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use carefully_core::error::CoreError;
use carefully_core::types::DbId;
use carefully_db::repositories::ScenarioRepo;

use crate::error::AppResult;
use crate::middleware::auth::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Cache lifetime for catalog responses. Content only changes on deploy.
const CATALOG_CACHE_CONTROL: &str = "private, max-age=3600";

/// GET /api/v1/scenarios
///
/// List the full scenario catalog, easiest first.
pub async fn list_scenarios(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let scenarios = ScenarioRepo::list(&state.pool).await?;

    Ok((
        [(header::CACHE_CONTROL, CATALOG_CACHE_CONTROL)],
        Json(DataResponse { data: scenarios }),
    ))
}

/// GET /api/v1/scenarios/{id}
///
/// Fetch one scenario. 404 if the id is unknown.
pub async fn get_scenario(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let scenario = ScenarioRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Scenario",
            id,
        })?;

    Ok((
        [(header::CACHE_CONTROL, CATALOG_CACHE_CONTROL)],
        Json(DataResponse { data: scenario }),
    ))
}
