use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::dto::{ColorCount, KpiResponse};
use crate::entities::{color_identity, deck, deck_color, game_result, game_session};
use crate::error::AppError;
use crate::stats::WINNING_FINISH;

use super::{SINGLE_COLORS, color_sort_key};

/// Shown as the top deck when no deck has won yet.
const NO_TOP_DECK: &str = "None";

pub struct DashboardService;

impl DashboardService {
    /// Headline numbers over every recorded result, eligible or not.
    pub async fn kpis(db: &DatabaseConnection) -> Result<KpiResponse, AppError> {
        let results = game_result::Entity::find().all(db).await?;
        let total_sessions = game_session::Entity::find().count(db).await?;
        let decks = deck::Entity::find().all(db).await?;

        let players: HashSet<i32> = results.iter().map(|r| r.player_id).collect();

        let mut deck_wins: HashMap<i32, u64> = HashMap::new();
        for result in results.iter().filter(|r| r.finish == WINNING_FINISH) {
            *deck_wins.entry(result.deck_id).or_insert(0) += 1;
        }
        let total_wins: u64 = deck_wins.values().sum();

        let top_deck = decks
            .iter()
            .filter_map(|d| deck_wins.get(&d.id).map(|&wins| (wins, d.deck_name.as_str())))
            .min_by_key(|&(wins, name)| (Reverse(wins), name));

        #[allow(clippy::cast_precision_loss)]
        let avg_winrate = if results.is_empty() {
            0.0
        } else {
            total_wins as f64 / results.len() as f64
        };

        Ok(KpiResponse {
            total_games: results.len() as u64,
            total_sessions,
            player_count: players.len() as u64,
            avg_winrate,
            top_deck_wins: top_deck.map_or(0, |(wins, _)| wins),
            top_deck_name: top_deck.map_or(NO_TOP_DECK, |(_, name)| name).to_string(),
            total_decks: decks.len() as u64,
        })
    }

    /// How many decks carry each single-color tag.
    ///
    /// Ordered by count, most common first, then in WUBRG order. Colors no deck
    /// carries are left out.
    pub async fn color_distribution(db: &DatabaseConnection) -> Result<Vec<ColorCount>, AppError> {
        let names = identity_names(db).await?;
        let tags = deck_color::Entity::find().all(db).await?;

        let mut counts: HashMap<String, u64> = HashMap::new();
        for tag in tags
            .into_iter()
            .filter(|t| SINGLE_COLORS.contains(&t.color_id.as_str()))
        {
            *counts.entry(tag.color_id).or_insert(0) += 1;
        }

        Ok(sorted_counts(counts, &names))
    }

    /// How many decks use each commander color identity.
    ///
    /// Identities missing from the lookup are named by their code.
    pub async fn commander_identities(
        db: &DatabaseConnection,
    ) -> Result<Vec<ColorCount>, AppError> {
        let names = identity_names(db).await?;
        let decks = deck::Entity::find().all(db).await?;

        let mut counts: HashMap<String, u64> = HashMap::new();
        for deck in decks {
            *counts.entry(deck.color_identity_code).or_insert(0) += 1;
        }

        Ok(sorted_counts(counts, &names))
    }
}

async fn identity_names(db: &DatabaseConnection) -> Result<HashMap<String, String>, AppError> {
    Ok(color_identity::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.code, c.identity_name))
        .collect())
}

fn sorted_counts(counts: HashMap<String, u64>, names: &HashMap<String, String>) -> Vec<ColorCount> {
    let mut rows: Vec<ColorCount> = counts
        .into_iter()
        .map(|(code, count)| ColorCount {
            name: names.get(&code).cloned().unwrap_or_else(|| code.clone()),
            color: code,
            count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| color_sort_key(&a.color).cmp(&color_sort_key(&b.color)))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_counts_falls_back_to_code() {
        let names = HashMap::from([
            ("W".to_string(), "White".to_string()),
            ("U".to_string(), "Blue".to_string()),
        ]);
        let counts = HashMap::from([
            ("U".to_string(), 2),
            ("W".to_string(), 2),
            ("XYZ".to_string(), 5),
        ]);

        let rows = sorted_counts(counts, &names);

        let order: Vec<&str> = rows.iter().map(|r| r.color.as_str()).collect();
        assert_eq!(order, vec!["XYZ", "W", "U"]);
        assert_eq!(rows[0].name, "XYZ");
        assert_eq!(rows[1].name, "White");
    }
}
