use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Form, Json, Router};

use crate::auth::{AdminUser, AuthUser};
use crate::dto::{DeckOption, PlayerDetailResponse, PlayerStatsResponse};
use crate::entities::player;
use crate::error::AppError;
use crate::forms::{FormData, PlayerForm};
use crate::services::PlayerService;
use crate::state::AppState;

/// Build the player route group: `/api/players/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_players).post(create_player))
        .route(
            "/{id}",
            get(get_player).put(rename_player).delete(delete_player),
        )
        .route("/{id}/decks", get(player_decks))
}

/// `GET /api/players`
async fn list_players(
    State(state): State<AppState>,
) -> Result<Json<Vec<PlayerStatsResponse>>, AppError> {
    Ok(Json(PlayerService::list_with_stats(&state.db).await?))
}

/// `GET /api/players/{id}`
async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PlayerDetailResponse>, AppError> {
    Ok(Json(PlayerService::get_with_stats(&state.db, id).await?))
}

/// `GET /api/players/{id}/decks`
async fn player_decks(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<DeckOption>>, AppError> {
    PlayerService::find(&state.db, id).await?;
    Ok(Json(PlayerService::decks_for_player(&state.db, id).await?))
}

/// `POST /api/players`
async fn create_player(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<player::Model>), AppError> {
    let form = PlayerForm::parse(&FormData::from(pairs)).map_err(AppError::Validation)?;
    let created = PlayerService::create(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/players/{id}`
async fn rename_player(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<player::Model>, AppError> {
    let form = PlayerForm::parse(&FormData::from(pairs)).map_err(AppError::Validation)?;
    Ok(Json(PlayerService::rename(&state.db, id, form).await?))
}

/// `DELETE /api/players/{id}`
async fn delete_player(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    PlayerService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
