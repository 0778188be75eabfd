use serde::Serialize;

/// A game session with its results, ordered by finish.
#[derive(Debug, Clone, Serialize)]
pub struct GameSessionResponse {
    pub session_id: i32,
    /// `YYYY-MM-DD`
    pub date: String,
    pub wincon: String,
    pub comments: String,
    /// Whether the session has enough results to count toward statistics.
    pub eligible: bool,
    pub results: Vec<GameResultResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultResponse {
    pub id: i32,
    pub finish: i32,
    pub player_id: i32,
    pub player: String,
    pub deck_id: i32,
    pub deck: String,
    pub eliminated_by_id: Option<i32>,
    pub eliminated_by: String,
}
