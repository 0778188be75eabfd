use serde::Serialize;

use crate::stats::WinRecord;

/// Deck row of the stats table.
#[derive(Debug, Clone, Serialize)]
pub struct DeckStatsResponse {
    pub id: i32,
    pub deck_name: String,
    pub color_identity_code: String,
    /// Display name of the commander identity, falling back to the code.
    pub color_identity: String,
    pub owner_id: Option<i32>,
    pub deck_owner: Option<String>,
    /// Single-color tags, in WUBRG order.
    pub colors: Vec<String>,
    pub color_count: usize,
    #[serde(flatten)]
    pub stats: WinRecord,
}
