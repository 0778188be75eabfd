use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Form, Json, Router};
use chrono::Utc;

use crate::auth::{AdminUser, AuthUser};
use crate::dto::GameSessionResponse;
use crate::error::AppError;
use crate::forms::{FormData, GameDateRule, GameEntryForm};
use crate::services::GameService;
use crate::state::AppState;

/// Build the game session route group: `/api/game_sessions/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sessions).post(create_session))
        .route(
            "/{id}",
            get(get_session).put(update_session).delete(delete_session),
        )
}

fn parse_entry(pairs: Vec<(String, String)>, rule: GameDateRule) -> Result<GameEntryForm, AppError> {
    let today = Utc::now().date_naive();
    GameEntryForm::parse(&FormData::from(pairs), rule, today).map_err(AppError::Validation)
}

/// `GET /api/game_sessions`
async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<GameSessionResponse>>, AppError> {
    Ok(Json(GameService::list_sessions(&state.db).await?))
}

/// `GET /api/game_sessions/{id}`
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<GameSessionResponse>, AppError> {
    Ok(Json(GameService::get_session(&state.db, id).await?))
}

/// `POST /api/game_sessions`
async fn create_session(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<GameSessionResponse>), AppError> {
    let form = parse_entry(pairs, GameDateRule::DefaultToday)?;
    let session = GameService::create_session(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// `PUT /api/game_sessions/{id}`
async fn update_session(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<GameSessionResponse>, AppError> {
    let form = parse_entry(pairs, GameDateRule::Required)?;
    Ok(Json(GameService::update_session(&state.db, id, form).await?))
}

/// `DELETE /api/game_sessions/{id}`
async fn delete_session(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    GameService::delete_session(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
