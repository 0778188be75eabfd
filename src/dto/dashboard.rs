use serde::Serialize;

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiResponse {
    /// Number of recorded game results.
    pub total_games: u64,
    pub total_sessions: u64,
    /// Distinct players with at least one result.
    pub player_count: u64,
    /// Share of all results that are wins.
    pub avg_winrate: f64,
    pub top_deck_wins: u64,
    pub top_deck_name: String,
    pub total_decks: u64,
}

/// One slice of a color distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorCount {
    pub color: String,
    pub name: String,
    pub count: u64,
}
