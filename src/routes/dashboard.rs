use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::dto::{ColorCount, KpiResponse};
use crate::error::AppError;
use crate::services::DashboardService;
use crate::state::AppState;

/// Build the dashboard route group: `/api/dashboard/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/kpis", get(kpis))
        .route("/colors", get(colors))
        .route("/commander-identities", get(commander_identities))
}

async fn kpis(State(state): State<AppState>) -> Result<Json<KpiResponse>, AppError> {
    Ok(Json(DashboardService::kpis(&state.db).await?))
}

async fn colors(State(state): State<AppState>) -> Result<Json<Vec<ColorCount>>, AppError> {
    Ok(Json(DashboardService::color_distribution(&state.db).await?))
}

async fn commander_identities(
    State(state): State<AppState>,
) -> Result<Json<Vec<ColorCount>>, AppError> {
    Ok(Json(DashboardService::commander_identities(&state.db).await?))
}
