pub mod color_identity;
pub mod deck;
pub mod deck_color;
pub mod game_result;
pub mod game_session;
pub mod player;
pub mod user;
