use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::entities::color_identity;
use crate::error::AppError;
use crate::services::ColorService;
use crate::state::AppState;

/// Build the color lookup route group: `/api/colors`
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_colors))
}

/// `GET /api/colors`
async fn list_colors(
    State(state): State<AppState>,
) -> Result<Json<Vec<color_identity::Model>>, AppError> {
    Ok(Json(ColorService::list(&state.db).await?))
}
