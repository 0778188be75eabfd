use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, patch, post};
use axum::{Form, Json, Router};

use crate::auth::AdminUser;
use crate::dto::UserResponse;
use crate::entities::{color_identity, game_result};
use crate::error::AppError;
use crate::forms::{ColorForm, FormData, ResultEntry, UserUpdateForm};
use crate::services::{ColorService, GameService, UserService};
use crate::state::AppState;

/// Build the admin route group: `/api/admin/...`
///
/// Every handler requires an admin account.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).patch(update_user).delete(delete_user))
        .route("/game_results", get(list_results))
        .route(
            "/game_results/{id}",
            patch(update_result).delete(delete_result),
        )
        .route("/colors", post(create_color))
        .route("/colors/{code}", delete(delete_color))
}

/// `GET /api/admin/users`
async fn list_users(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = UserService::list(&state.db).await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// `GET /api/admin/users/{id}`
async fn get_user(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::find(&state.db, id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// `PATCH /api/admin/users/{id}`
async fn update_user(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<UserResponse>, AppError> {
    let form = UserUpdateForm::parse(&FormData::from(pairs)).map_err(AppError::Validation)?;
    let user = UserService::update(&state.db, id, form).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// `DELETE /api/admin/users/{id}`
async fn delete_user(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    UserService::delete(&state.db, admin.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/admin/game_results`
async fn list_results(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<game_result::Model>>, AppError> {
    Ok(Json(GameService::list_results(&state.db).await?))
}

/// `PATCH /api/admin/game_results/{id}`
async fn update_result(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<game_result::Model>, AppError> {
    let entry = ResultEntry::parse_row(&FormData::from(pairs)).map_err(AppError::Validation)?;
    Ok(Json(GameService::update_result(&state.db, id, entry).await?))
}

/// `DELETE /api/admin/game_results/{id}`
async fn delete_result(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    GameService::delete_result(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/admin/colors`
async fn create_color(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<color_identity::Model>), AppError> {
    let form = ColorForm::parse(&FormData::from(pairs)).map_err(AppError::Validation)?;
    let color = ColorService::create(&state.db, form).await?;
    Ok((StatusCode::CREATED, Json(color)))
}

/// `DELETE /api/admin/colors/{code}`
async fn delete_color(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<StatusCode, AppError> {
    ColorService::delete(&state.db, &code).await?;
    Ok(StatusCode::NO_CONTENT)
}
