use serde::Serialize;

use crate::stats::WinRecord;

/// Player row of the stats table.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStatsResponse {
    pub id: i32,
    pub player_name: String,
    #[serde(flatten)]
    pub stats: WinRecord,
}

/// A single player with the decks they own.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerDetailResponse {
    #[serde(flatten)]
    pub player: PlayerStatsResponse,
    pub decks: Vec<DeckOption>,
}

/// Minimal deck reference used by game entry pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckOption {
    pub id: i32,
    pub name: String,
}
