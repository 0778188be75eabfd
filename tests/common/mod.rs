#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use migration::{Migrator, MigratorTrait};
use serde_json::Value;
use tower::ServiceExt;

use mtg_stats::config::{Config, Environment};
use mtg_stats::state::AppState;

pub const SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const PASSWORD: &str = "hunter2hunter2";

pub fn test_config() -> Config {
    Config {
        database_url: String::new(),
        server_host: std::net::IpAddr::from([127, 0, 0, 1]),
        server_port: 0,
        environment: Environment::Development,
        log_level: "warn".to_string(),
        secret_key: SECRET.to_string(),
        jwt_expiration_secs: 900,
        admins: vec![ADMIN_EMAIL.to_string()],
        frontend_url: "http://localhost:3001".to_string(),
    }
}

/// Build the app router backed by an in-memory `SQLite` database with migrations.
pub async fn test_app() -> Router {
    let db = sea_orm::Database::connect("sqlite::memory:")
        .await
        .unwrap_or_default();

    Migrator::up(&db, None).await.unwrap_or_default();

    mtg_stats::routes::router().with_state(AppState {
        db,
        config: test_config(),
    })
}

/// Send a request and return (status, body).
///
/// `form` pairs are sent url-encoded; repeated keys are allowed.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    form: Option<&[(&str, &str)]>,
) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let body = match form {
        Some(pairs) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(encode(pairs))
        }
        None => Body::empty(),
    };

    let request = builder.body(body).unwrap_or_default();
    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let body_str = String::from_utf8(body.to_vec()).unwrap_or_default();

    (status, body_str)
}

fn encode(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Test helper: send a GET request to the app and return (status, body).
pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, String) {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_form(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    form: &[(&str, &str)],
) -> (StatusCode, String) {
    send(app, Method::POST, uri, token, Some(form)).await
}

pub async fn put_form(
    app: &Router,
    uri: &str,
    token: &str,
    form: &[(&str, &str)],
) -> (StatusCode, String) {
    send(app, Method::PUT, uri, Some(token), Some(form)).await
}

pub async fn patch_form(
    app: &Router,
    uri: &str,
    token: &str,
    form: &[(&str, &str)],
) -> (StatusCode, String) {
    send(app, Method::PATCH, uri, Some(token), Some(form)).await
}

pub async fn delete(app: &Router, uri: &str, token: &str) -> (StatusCode, String) {
    send(app, Method::DELETE, uri, Some(token), None).await
}

pub fn json(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_default()
}

/// Register an account and return its access token.
pub async fn register_and_login(app: &Router, username: &str, email: &str) -> String {
    let (status, body) = post_form(
        app,
        "/auth/register",
        None,
        &[
            ("username", username),
            ("email", email),
            ("password", PASSWORD),
            ("password2", PASSWORD),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    let (status, body) = post_form(
        app,
        "/auth/login",
        None,
        &[("username", username), ("password", PASSWORD)],
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    json(&body)["token"].as_str().unwrap_or_default().to_string()
}

pub async fn user_token(app: &Router) -> String {
    register_and_login(app, "scribe", "scribe@example.com").await
}

pub async fn admin_token(app: &Router) -> String {
    register_and_login(app, "admin", ADMIN_EMAIL).await
}

pub async fn create_player(app: &Router, token: &str, name: &str) -> i64 {
    let (status, body) = post_form(app, "/api/players", Some(token), &[("player_name", name)]).await;
    assert_eq!(status, StatusCode::CREATED, "create player failed: {body}");
    json(&body)["id"].as_i64().unwrap_or_default()
}

pub async fn create_deck(app: &Router, token: &str, name: &str, identity: &str, owner: i64) -> i64 {
    let owner = owner.to_string();
    let (status, body) = post_form(
        app,
        "/api/decks",
        Some(token),
        &[
            ("deck_name", name),
            ("color_identity_code", identity),
            ("owner_id", owner.as_str()),
        ],
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create deck failed: {body}");
    json(&body)["id"].as_i64().unwrap_or_default()
}

/// One filled result slot: (player id, deck id, finish, eliminated by).
pub type Slot = (i64, i64, i32, Option<i64>);

/// Build the form pairs of a combined game entry.
pub fn game_form(date: &str, slots: &[Slot]) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("game_date".to_string(), date.to_string()),
        ("win_condition".to_string(), "Combat damage".to_string()),
    ];
    for (i, (player, deck, finish, eliminated_by)) in slots.iter().enumerate() {
        pairs.push((format!("results-{i}-player_id"), player.to_string()));
        pairs.push((format!("results-{i}-deck_id"), deck.to_string()));
        pairs.push((format!("results-{i}-finish"), finish.to_string()));
        pairs.push((
            format!("results-{i}-eliminated_by_id"),
            eliminated_by.unwrap_or(0).to_string(),
        ));
    }
    pairs
}

pub fn as_refs(pairs: &[(String, String)]) -> Vec<(&str, &str)> {
    pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

/// Record a game session and return its id.
pub async fn record_session(app: &Router, token: &str, date: &str, slots: &[Slot]) -> i64 {
    let pairs = game_form(date, slots);
    let (status, body) = post_form(app, "/api/game_sessions", Some(token), &as_refs(&pairs)).await;
    assert_eq!(status, StatusCode::CREATED, "record session failed: {body}");
    json(&body)["session_id"].as_i64().unwrap_or_default()
}

/// Four players with one deck each, returned as (player id, deck id) pairs.
pub async fn seed_table(app: &Router, token: &str) -> Vec<(i64, i64)> {
    let mut seats = Vec::new();
    for (name, deck, identity) in [
        ("Alice", "Atraxa Counters", "WUBG"),
        ("Bob", "Krenko Goblins", "R"),
        ("Carol", "Meren Reanimator", "BG"),
        ("Dave", "Talrand Spells", "U"),
    ] {
        let player = create_player(app, token, name).await;
        let deck = create_deck(app, token, deck, identity, player).await;
        seats.push((player, deck));
    }
    seats
}
