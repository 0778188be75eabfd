mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn kpis_on_empty_database() {
    let app = common::test_app().await;
    let (status, body) = common::get(&app, "/api/dashboard/kpis").await;

    assert_eq!(status, StatusCode::OK);
    let json = common::json(&body);
    assert_eq!(json["total_games"], 0);
    assert_eq!(json["total_sessions"], 0);
    assert_eq!(json["player_count"], 0);
    assert_eq!(json["avg_winrate"], 0.0);
    assert_eq!(json["top_deck_wins"], 0);
    assert_eq!(json["top_deck_name"], "None");
    assert_eq!(json["total_decks"], 0);
}

#[tokio::test]
async fn kpis_count_every_result() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;
    let seats = common::seed_table(&app, &token).await;

    let table: Vec<common::Slot> = seats
        .iter()
        .zip(1..)
        .map(|(&(player, deck), finish)| (player, deck, finish, None))
        .collect();
    common::record_session(&app, &token, "2025-06-01", &table).await;
    common::record_session(&app, &token, "2025-06-02", &table).await;
    // A two-player game Bob won, ineligible but still counted here
    common::record_session(
        &app,
        &token,
        "2025-06-03",
        &[(seats[1].0, seats[1].1, 1, None), (seats[0].0, seats[0].1, 2, None)],
    )
    .await;

    let (_, body) = common::get(&app, "/api/dashboard/kpis").await;
    let json = common::json(&body);

    assert_eq!(json["total_games"], 10);
    assert_eq!(json["total_sessions"], 3);
    assert_eq!(json["player_count"], 4);
    assert_eq!(json["top_deck_name"], "Atraxa Counters");
    assert_eq!(json["top_deck_wins"], 2);
    assert_eq!(json["total_decks"], 4);
    let rate = json["avg_winrate"].as_f64().unwrap_or_default();
    assert!((rate - 0.3).abs() < 1e-9);
}

#[tokio::test]
async fn color_charts_use_tags_and_identities() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;
    let seats = common::seed_table(&app, &token).await;

    for (deck, colors) in [(seats[0].1, vec!["W", "U"]), (seats[2].1, vec!["U", "B"])] {
        let form: Vec<(&str, &str)> = colors.into_iter().map(|c| ("colors", c)).collect();
        let (status, _) =
            common::put_form(&app, &format!("/api/decks/{deck}/colors"), &token, &form).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = common::get(&app, "/api/dashboard/colors").await;
    assert_eq!(status, StatusCode::OK);
    let colors = common::json(&body);
    assert_eq!(colors[0]["color"], "U");
    assert_eq!(colors[0]["name"], "Blue");
    assert_eq!(colors[0]["count"], 2);
    assert_eq!(colors[1]["color"], "W");
    assert_eq!(colors[2]["color"], "B");
    assert_eq!(colors.as_array().map(Vec::len), Some(3));

    let (_, body) = common::get(&app, "/api/dashboard/commander-identities").await;
    let identities = common::json(&body);
    assert_eq!(identities.as_array().map(Vec::len), Some(4));
    let names: Vec<&str> = identities
        .as_array()
        .map(|rows| rows.iter().filter_map(|r| r["name"].as_str()).collect())
        .unwrap_or_default();
    assert!(names.contains(&"Witch-Maw"));
    assert!(names.contains(&"Golgari"));
}

#[tokio::test]
async fn color_lookup_is_seeded() {
    let app = common::test_app().await;
    let (status, body) = common::get(&app, "/api/colors").await;

    assert_eq!(status, StatusCode::OK);
    let json = common::json(&body);
    assert_eq!(json.as_array().map(Vec::len), Some(32));
    assert_eq!(json[0]["code"], "W");
    assert_eq!(json[0]["identity_name"], "White");
}

#[tokio::test]
async fn top_deck_tie_goes_to_first_name() {
    let app = common::test_app().await;
    let token = common::user_token(&app).await;
    let seats = common::seed_table(&app, &token).await;

    // Krenko and Atraxa win one game each
    for (winner, date) in [(1, "2025-06-01"), (0, "2025-06-02")] {
        let mut next = 1;
        let table: Vec<common::Slot> = seats
            .iter()
            .enumerate()
            .map(|(i, &(player, deck))| {
                let finish = if i == winner {
                    1
                } else {
                    next += 1;
                    next
                };
                (player, deck, finish, None)
            })
            .collect();
        common::record_session(&app, &token, date, &table).await;
    }

    let (_, body) = common::get(&app, "/api/dashboard/kpis").await;
    let json = common::json(&body);
    assert_eq!(json["top_deck_name"], "Atraxa Counters");
    assert_eq!(json["top_deck_wins"], 1);
}
