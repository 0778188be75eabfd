mod common;

use axum::http::StatusCode;

use common::Slot;

fn full_game(seats: &[(i64, i64)]) -> Vec<Slot> {
    seats
        .iter()
        .zip(1..)
        .map(|(&(player, deck), finish)| (player, deck, finish, None))
        .collect()
}

#[tokio::test]
async fn create_session_returns_results_by_finish() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;
    let seats = common::seed_table(&app, &token).await;

    let slots = vec![
        (seats[2].0, seats[2].1, 3, Some(seats[0].0)),
        (seats[0].0, seats[0].1, 1, None),
        (seats[3].0, seats[3].1, 4, Some(seats[0].0)),
        (seats[1].0, seats[1].1, 2, Some(seats[0].0)),
    ];
    let pairs = common::game_form("2025-06-01", &slots);
    let (status, body) =
        common::post_form(&app, "/api/game_sessions", Some(&token), &common::as_refs(&pairs)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let json = common::json(&body);
    assert_eq!(json["date"], "2025-06-01");
    assert_eq!(json["wincon"], "Combat damage");
    assert_eq!(json["eligible"], true);
    assert_eq!(json["results"][0]["player"], "Alice");
    assert_eq!(json["results"][0]["eliminated_by"], "");
    assert_eq!(json["results"][3]["player"], "Dave");
    assert_eq!(json["results"][3]["eliminated_by"], "Alice");
}

#[tokio::test]
async fn eliminated_by_zero_is_stored_as_null() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;
    let seats = common::seed_table(&app, &token).await;

    let id = common::record_session(&app, &token, "2025-06-01", &full_game(&seats)).await;

    let (_, body) = common::get(&app, &format!("/api/game_sessions/{id}")).await;
    let json = common::json(&body);
    for result in json["results"].as_array().cloned().unwrap_or_default() {
        assert!(result["eliminated_by_id"].is_null());
    }
}

#[tokio::test]
async fn blank_slots_are_skipped() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;
    let seats = common::seed_table(&app, &token).await;

    let (p, d) = (seats[0].0.to_string(), seats[0].1.to_string());
    let form = [
        ("game_date", "2025-06-01"),
        ("results-0-player_id", "0"),
        ("results-0-deck_id", ""),
        ("results-0-finish", ""),
        ("results-1-player_id", p.as_str()),
        ("results-1-deck_id", d.as_str()),
        ("results-1-finish", "1"),
        ("results-1-eliminated_by_id", ""),
    ];
    let (status, body) = common::post_form(&app, "/api/game_sessions", Some(&token), &form).await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    let json = common::json(&body);
    assert_eq!(json["results"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["eligible"], false);
}

#[tokio::test]
async fn session_needs_at_least_one_result() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;

    let (status, body) = common::post_form(
        &app,
        "/api/game_sessions",
        Some(&token),
        &[("game_date", "2025-06-01")],
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        common::json(&body)["error"]["fields"]["results"][0],
        "At least one game result is required."
    );
}

#[tokio::test]
async fn unknown_player_or_deck_is_rejected_per_slot() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;
    let seats = common::seed_table(&app, &token).await;

    let slots = vec![(seats[0].0, seats[0].1, 1, None), (999, 998, 2, Some(997))];
    let pairs = common::game_form("2025-06-01", &slots);
    let (status, body) =
        common::post_form(&app, "/api/game_sessions", Some(&token), &common::as_refs(&pairs)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = &common::json(&body)["error"]["fields"];
    assert!(fields["results-1-player_id"].is_array());
    assert!(fields["results-1-deck_id"].is_array());
    assert!(fields["results-1-eliminated_by_id"].is_array());
    assert!(fields["results-0-player_id"].is_null());

    let (_, body) = common::get(&app, "/api/game_sessions").await;
    assert_eq!(common::json(&body).as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn sessions_are_listed_newest_first() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;
    let seats = common::seed_table(&app, &token).await;

    let first = common::record_session(&app, &token, "2025-06-01", &full_game(&seats)).await;
    let second = common::record_session(&app, &token, "2025-06-02", &full_game(&seats[..2])).await;

    let (status, body) = common::get(&app, "/api/game_sessions").await;
    assert_eq!(status, StatusCode::OK);

    let json = common::json(&body);
    assert_eq!(json[0]["session_id"], second);
    assert_eq!(json[0]["eligible"], false);
    assert_eq!(json[1]["session_id"], first);
    assert_eq!(json[1]["eligible"], true);
}

#[tokio::test]
async fn edit_session_maps_slots_by_position() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;
    let seats = common::seed_table(&app, &token).await;
    let id = common::record_session(&app, &token, "2025-06-01", &full_game(&seats[..3])).await;

    // Swap the winner, drop third place and add a fourth result
    let slots = [
        (seats[1].0, seats[1].1, 1, None),
        (seats[0].0, seats[0].1, 2, Some(seats[1].0)),
    ];
    let mut pairs = common::game_form("2025-06-03", &slots);
    for (field, value) in [
        ("results-3-player_id", seats[3].0.to_string()),
        ("results-3-deck_id", seats[3].1.to_string()),
        ("results-3-finish", "3".to_string()),
    ] {
        pairs.push((field.to_string(), value));
    }
    let (status, body) = common::put_form(
        &app,
        &format!("/api/game_sessions/{id}"),
        &token,
        &common::as_refs(&pairs),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let json = common::json(&body);
    assert_eq!(json["date"], "2025-06-03");
    let players: Vec<&str> = json["results"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["player"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(players, vec!["Bob", "Alice", "Dave"]);
    assert_eq!(json["results"][1]["eliminated_by"], "Bob");
}

#[tokio::test]
async fn edit_session_requires_date() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;
    let seats = common::seed_table(&app, &token).await;
    let id = common::record_session(&app, &token, "2025-06-01", &full_game(&seats)).await;

    let mut pairs = common::game_form("", &full_game(&seats));
    pairs.retain(|(k, _)| k != "game_date");
    let (status, body) = common::put_form(
        &app,
        &format!("/api/game_sessions/{id}"),
        &token,
        &common::as_refs(&pairs),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(common::json(&body)["error"]["fields"]["game_date"].is_array());
}

#[tokio::test]
async fn deleting_session_keeps_other_sessions_eligible() {
    let app = common::test_app().await;
    let admin = common::admin_token(&app).await;
    let seats = common::seed_table(&app, &admin).await;

    let doomed = common::record_session(&app, &admin, "2025-06-01", &full_game(&seats)).await;
    let kept = common::record_session(&app, &admin, "2025-06-02", &full_game(&seats)).await;

    let (status, _) = common::delete(&app, &format!("/api/game_sessions/{doomed}"), &admin).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::get(&app, &format!("/api/game_sessions/{doomed}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = common::get(&app, &format!("/api/game_sessions/{kept}")).await;
    assert_eq!(common::json(&body)["eligible"], true);

    let (_, body) = common::get(&app, &format!("/api/players/{}", seats[0].0)).await;
    let alice = common::json(&body);
    assert_eq!(alice["total_games"], 1);
    assert_eq!(alice["total_valid_games"], 1);
    assert_eq!(alice["wins"], 1);
}

#[tokio::test]
async fn deleting_session_requires_admin() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;
    let seats = common::seed_table(&app, &token).await;
    let id = common::record_session(&app, &token, "2025-06-01", &full_game(&seats)).await;

    let (status, _) = common::delete(&app, &format!("/api/game_sessions/{id}"), &token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
