use super::{FieldErrors, FormData};

pub const MAX_PLAYER_NAME: usize = 100;

/// Add or rename a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerForm {
    pub player_name: String,
}

impl PlayerForm {
    /// # Errors
    ///
    /// Returns field errors when the name is missing or too long.
    pub fn parse(data: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let player_name = data.required_text("player_name", MAX_PLAYER_NAME, &mut errors);
        errors.into_result(Self { player_name })
    }
}
