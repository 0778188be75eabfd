use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Form, Json, Router};

use crate::auth::{AdminUser, AuthUser};
use crate::dto::DeckStatsResponse;
use crate::entities::deck;
use crate::error::AppError;
use crate::forms::{DeckColorsForm, DeckForm, FormData};
use crate::services::DeckService;
use crate::state::AppState;

/// Build the deck route group: `/api/decks/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_decks).post(create_deck))
        .route("/{id}", get(get_deck).put(update_deck).delete(delete_deck))
        .route("/{id}/colors", put(set_deck_colors))
}

/// `GET /api/decks`
async fn list_decks(State(state): State<AppState>) -> Result<Json<Vec<DeckStatsResponse>>, AppError> {
    Ok(Json(DeckService::list_with_stats(&state.db).await?))
}

/// `GET /api/decks/{id}`
async fn get_deck(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeckStatsResponse>, AppError> {
    Ok(Json(DeckService::get_with_stats(&state.db, id).await?))
}

/// `POST /api/decks`
async fn create_deck(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<deck::Model>), AppError> {
    let form = DeckForm::parse(&FormData::from(pairs)).map_err(AppError::Validation)?;
    let created = DeckService::create(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /api/decks/{id}`
async fn update_deck(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<deck::Model>, AppError> {
    let form = DeckForm::parse(&FormData::from(pairs)).map_err(AppError::Validation)?;
    Ok(Json(DeckService::update(&state.db, id, form).await?))
}

/// `PUT /api/decks/{id}/colors`
async fn set_deck_colors(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<DeckStatsResponse>, AppError> {
    let form = DeckColorsForm::parse(&FormData::from(pairs)).map_err(AppError::Validation)?;
    Ok(Json(DeckService::set_colors(&state.db, id, form).await?))
}

/// `DELETE /api/decks/{id}`
async fn delete_deck(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    DeckService::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
