pub mod dashboard;
pub mod deck;
pub mod game;
pub mod player;
pub mod user;

pub use dashboard::{ColorCount, KpiResponse};
pub use deck::DeckStatsResponse;
pub use game::{GameResultResponse, GameSessionResponse};
pub use player::{DeckOption, PlayerDetailResponse, PlayerStatsResponse};
pub use user::{AuthResponse, MessageResponse, UserResponse};
