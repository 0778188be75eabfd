use super::{FieldErrors, FormData};

/// Partial update of a user from the admin surface. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdateForm {
    pub is_admin: Option<bool>,
    /// `Some(None)` unlinks the player, `0` in the form means "no player".
    pub player_id: Option<Option<i32>>,
}

impl UserUpdateForm {
    /// # Errors
    ///
    /// Returns field errors for values that are not booleans or ids.
    pub fn parse(data: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let is_admin = data.get("is_admin").and_then(|raw| match raw.to_lowercase().as_str() {
            "true" | "1" | "on" | "y" | "yes" => Some(true),
            "false" | "0" | "off" | "n" | "no" => Some(false),
            _ => {
                errors.add("is_admin", "Not a valid boolean value.");
                None
            }
        });

        let player_id = if data.all("player_id").is_empty() {
            None
        } else {
            Some(data.optional_id("player_id", &mut errors))
        };

        errors.into_result(Self { is_admin, player_id })
    }
}

/// New entry for the color identity lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorForm {
    pub code: String,
    pub identity_name: String,
}

impl ColorForm {
    /// # Errors
    ///
    /// Returns field errors for a missing or oversized code or name.
    pub fn parse(data: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let code = data.required_text("code", 5, &mut errors).to_uppercase();
        if !code.is_empty() && !code.chars().all(|c| "WUBRGC".contains(c)) {
            errors.add("code", "Color codes use only the letters W, U, B, R, G and C.");
        }
        let identity_name = data.required_text("identity_name", 20, &mut errors);
        errors.into_result(Self { code, identity_name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::from(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_user_update_distinguishes_absent_and_cleared_player() {
        let untouched = UserUpdateForm::parse(&form(&[("is_admin", "on")])).unwrap_or_default();
        assert_eq!(untouched.is_admin, Some(true));
        assert_eq!(untouched.player_id, None);

        let cleared = UserUpdateForm::parse(&form(&[("player_id", "0")])).unwrap_or_default();
        assert_eq!(cleared.player_id, Some(None));
    }

    #[test]
    fn test_color_form_rejects_unknown_letters() {
        let errors = ColorForm::parse(&form(&[("code", "WX"), ("identity_name", "Nope")]))
            .err()
            .unwrap_or_default();
        assert!(errors.contains("code"));
    }
}
