//! Win-rate statistics for players and decks.
//!
//! A game session only counts toward statistics once it has at least
//! [`MIN_RESULTS_FOR_ELIGIBILITY`] recorded results. Everything here is a pure
//! function of already-loaded rows and is recomputed on every read.

use std::collections::HashMap;

use serde::Serialize;

use crate::entities::game_result;

/// A session with fewer recorded results than this is not a valid game for stats.
pub const MIN_RESULTS_FOR_ELIGIBILITY: usize = 4;

/// The placement that counts as a win.
pub const WINNING_FINISH: i32 = 1;

/// Whether a session with `result_count` recorded results counts toward statistics.
#[must_use]
pub const fn is_eligible(result_count: usize) -> bool {
    result_count >= MIN_RESULTS_FOR_ELIGIBILITY
}

/// Number of recorded results per game session.
#[derive(Debug, Clone, Default)]
pub struct SessionSizes(HashMap<i32, usize>);

impl SessionSizes {
    /// Count results per session from a slice of loaded rows.
    ///
    /// The rows must include *every* result of each session that is later queried,
    /// not only the rows of the player or deck being aggregated.
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a game_result::Model>,
    {
        Self::from_session_ids(results.into_iter().map(|r| r.session_id))
    }

    /// Count occurrences of each session id.
    pub fn from_session_ids<I>(session_ids: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let mut sizes = HashMap::new();
        for id in session_ids {
            *sizes.entry(id).or_insert(0) += 1;
        }
        Self(sizes)
    }

    /// Recorded results for a session; unknown sessions have none.
    #[must_use]
    pub fn result_count(&self, session_id: i32) -> usize {
        self.0.get(&session_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_eligible(&self, session_id: i32) -> bool {
        is_eligible(self.result_count(session_id))
    }
}

/// Minimum number of valid games an entity must exceed before its win rate is reported.
///
/// Players and decks use different thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingThreshold {
    min_valid_games: u64,
}

impl ReportingThreshold {
    /// Players report a win rate only after more than ten valid games.
    pub const PLAYER: Self = Self::new(10);
    /// Decks report a win rate as soon as they have one valid game.
    pub const DECK: Self = Self::new(0);

    #[must_use]
    pub const fn new(min_valid_games: u64) -> Self {
        Self { min_valid_games }
    }

    /// Strictly greater than: a player with exactly ten valid games reports zero.
    #[must_use]
    pub const fn reports(self, total_valid_games: u64) -> bool {
        total_valid_games > self.min_valid_games
    }
}

/// Derived statistics for one player or deck.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct WinRecord {
    pub wins: u64,
    pub total_games: u64,
    pub total_valid_games: u64,
    pub win_rate: f64,
}

/// Aggregate the results belonging to one player or deck.
///
/// `wins` and `total_valid_games` only count results whose session is eligible
/// according to `sizes`; `total_games` counts everything.
pub fn aggregate<'a, I>(
    results: I,
    sizes: &SessionSizes,
    threshold: ReportingThreshold,
) -> WinRecord
where
    I: IntoIterator<Item = &'a game_result::Model>,
{
    let mut record = WinRecord::default();

    for result in results {
        record.total_games += 1;
        if !sizes.is_eligible(result.session_id) {
            continue;
        }
        record.total_valid_games += 1;
        if result.finish == WINNING_FINISH {
            record.wins += 1;
        }
    }

    if threshold.reports(record.total_valid_games) {
        #[allow(clippy::cast_precision_loss)]
        {
            record.win_rate = record.wins as f64 / record.total_valid_games as f64;
        }
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(id: i32, session_id: i32, player_id: i32, deck_id: i32, finish: i32) -> game_result::Model {
        game_result::Model {
            id,
            session_id,
            player_id,
            deck_id,
            finish,
            eliminated_by_id: None,
        }
    }

    /// Build `sessions` four-player sessions in which player 1 (deck 10) wins the first `wins`.
    fn four_player_sessions(sessions: i32, wins: i32) -> Vec<game_result::Model> {
        let mut rows = Vec::new();
        let mut id = 0;
        for session in 1..=sessions {
            let hero_finish = if session <= wins { 1 } else { 2 };
            for (seat, player) in (1..=4).enumerate() {
                id += 1;
                let finish = if player == 1 {
                    hero_finish
                } else if hero_finish == 1 {
                    i32::try_from(seat).unwrap_or(0) + 1
                } else if player == 2 {
                    1
                } else {
                    player
                };
                rows.push(result(id, session, player, player * 10, finish));
            }
        }
        rows
    }

    fn rows_for_player(rows: &[game_result::Model], player_id: i32) -> Vec<&game_result::Model> {
        rows.iter().filter(|r| r.player_id == player_id).collect()
    }

    #[test]
    fn test_eligibility_threshold() {
        assert!(!is_eligible(0));
        assert!(!is_eligible(3));
        assert!(is_eligible(4));
        assert!(is_eligible(5));
    }

    #[test]
    fn test_unknown_session_is_not_eligible() {
        let sizes = SessionSizes::default();
        assert_eq!(sizes.result_count(42), 0);
        assert!(!sizes.is_eligible(42));
    }

    #[test]
    fn test_small_session_excluded_from_wins_and_valid_games() {
        let rows = vec![
            result(1, 1, 1, 10, 1),
            result(2, 1, 2, 20, 2),
            result(3, 1, 3, 30, 3),
        ];
        let sizes = SessionSizes::from_results(&rows);

        for player in 1..=3 {
            let record = aggregate(rows_for_player(&rows, player), &sizes, ReportingThreshold::DECK);
            assert_eq!(record.total_games, 1);
            assert_eq!(record.total_valid_games, 0);
            assert_eq!(record.wins, 0);
            assert!(record.win_rate.abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_player_with_eleven_valid_games_reports_rate() {
        let rows = four_player_sessions(11, 5);
        let sizes = SessionSizes::from_results(&rows);

        let record = aggregate(rows_for_player(&rows, 1), &sizes, ReportingThreshold::PLAYER);

        assert_eq!(record.total_valid_games, 11);
        assert_eq!(record.wins, 5);
        assert!((record.win_rate - 5.0 / 11.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_player_with_ten_valid_games_reports_zero() {
        let rows = four_player_sessions(10, 7);
        let sizes = SessionSizes::from_results(&rows);

        let record = aggregate(rows_for_player(&rows, 1), &sizes, ReportingThreshold::PLAYER);

        assert_eq!(record.total_valid_games, 10);
        assert_eq!(record.wins, 7);
        assert!(record.win_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn test_deck_with_single_valid_win_reports_full_rate() {
        let rows = four_player_sessions(1, 1);
        let sizes = SessionSizes::from_results(&rows);
        let deck_rows: Vec<_> = rows.iter().filter(|r| r.deck_id == 10).collect();

        let record = aggregate(deck_rows, &sizes, ReportingThreshold::DECK);

        assert_eq!(record.total_valid_games, 1);
        assert_eq!(record.wins, 1);
        assert!((record.win_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_games_counts_ineligible_sessions() {
        let mut rows = four_player_sessions(2, 1);
        // A three-player game the hero also won
        rows.push(result(100, 50, 1, 10, 1));
        rows.push(result(101, 50, 2, 20, 2));
        rows.push(result(102, 50, 3, 30, 3));
        let sizes = SessionSizes::from_results(&rows);

        let record = aggregate(rows_for_player(&rows, 1), &sizes, ReportingThreshold::DECK);

        assert_eq!(record.total_games, 3);
        assert_eq!(record.total_valid_games, 2);
        assert_eq!(record.wins, 1);
    }

    #[test]
    fn test_thresholds_differ_between_players_and_decks() {
        assert!(ReportingThreshold::DECK.reports(1));
        assert!(!ReportingThreshold::PLAYER.reports(10));
        assert!(ReportingThreshold::PLAYER.reports(11));
        assert_ne!(ReportingThreshold::PLAYER, ReportingThreshold::DECK);
    }
}
