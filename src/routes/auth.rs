use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Json, Router};

use crate::dto::{AuthResponse, MessageResponse, UserResponse};
use crate::error::AppError;
use crate::forms::{
    FormData, LoginForm, RegistrationForm, ResetPasswordForm, ResetPasswordRequestForm,
};
use crate::services::UserService;
use crate::state::AppState;

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

/// Build the auth route group: `/auth/...`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/reset_password_request", post(reset_password_request))
        .route("/reset_password/{token}", post(reset_password))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// `POST /auth/register`
async fn register(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let form = RegistrationForm::parse(&FormData::from(pairs)).map_err(AppError::Validation)?;
    let created = UserService::register(&state.db, &state.config, form).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(&created))))
}

/// `POST /auth/login`
async fn login(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<AuthResponse>, AppError> {
    let form = LoginForm::parse(&FormData::from(pairs)).map_err(AppError::Validation)?;
    let (user, token) = UserService::authenticate(&state.db, &state.config, form).await?;
    Ok(Json(AuthResponse {
        token,
        user: UserResponse::from(&user),
    }))
}

/// `POST /auth/reset_password_request`
async fn reset_password_request(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<MessageResponse>, AppError> {
    let form =
        ResetPasswordRequestForm::parse(&FormData::from(pairs)).map_err(AppError::Validation)?;

    // Same answer whether or not the account exists
    UserService::request_password_reset(&state.db, &state.config, form).await?;

    Ok(Json(MessageResponse {
        message: "Check your email for the instructions to reset your password.".to_string(),
    }))
}

/// `POST /auth/reset_password/{token}`
async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Json<MessageResponse>, AppError> {
    let form = ResetPasswordForm::parse(&FormData::from(pairs)).map_err(AppError::Validation)?;
    UserService::reset_password(&state.db, &state.config, &token, form).await?;

    Ok(Json(MessageResponse {
        message: "Your password has been reset.".to_string(),
    }))
}
