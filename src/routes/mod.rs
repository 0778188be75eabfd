mod admin;
mod auth;
mod colors;
mod dashboard;
mod decks;
mod games;
mod health;
mod players;

use axum::Router;

use crate::state::AppState;

/// Build the complete application router.
///
/// Structure:
/// - `GET /health`: liveness with database connectivity
/// - `/auth/...`: registration, login and password reset
/// - `/api/...`: players, decks, game sessions, dashboard and the color lookup
/// - `/api/admin/...`: user, result and lookup maintenance for admins
pub fn router() -> Router<AppState> {
    let api = Router::new()
        .nest("/players", players::router())
        .nest("/decks", decks::router())
        .nest("/game_sessions", games::router())
        .nest("/dashboard", dashboard::router())
        .nest("/colors", colors::router())
        .nest("/admin", admin::router());

    Router::new()
        .merge(health::router())
        .nest("/auth", auth::router())
        .nest("/api", api)
}
