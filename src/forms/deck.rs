use super::{FieldErrors, FormData, INVALID_CHOICE};

pub const MAX_DECK_NAME: usize = 100;
const MAX_COLOR_CODE: usize = 5;

/// Add or edit a deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckForm {
    pub deck_name: String,
    pub color_identity_code: String,
    pub owner_id: i32,
}

impl DeckForm {
    /// # Errors
    ///
    /// Returns field errors for missing or malformed fields. Whether the color code
    /// and owner exist is checked against the database afterwards.
    pub fn parse(data: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let deck_name = data.required_text("deck_name", MAX_DECK_NAME, &mut errors);
        let color_identity_code = data
            .required_text("color_identity_code", MAX_COLOR_CODE, &mut errors)
            .to_uppercase();
        let owner_id = data.required_id("owner_id", &mut errors);

        errors.into_result(Self {
            deck_name,
            color_identity_code,
            owner_id,
        })
    }
}

/// Replace the single-color tags of a deck (`colors=W&colors=U`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckColorsForm {
    /// Uppercased, deduplicated, in submission order.
    pub colors: Vec<String>,
}

impl DeckColorsForm {
    /// An empty submission clears every tag.
    ///
    /// # Errors
    ///
    /// Returns a field error when a code is longer than a color code can be.
    pub fn parse(data: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let mut colors: Vec<String> = Vec::new();

        for raw in data.all("colors") {
            let code = raw.to_uppercase();
            if code.len() > MAX_COLOR_CODE {
                errors.add("colors", INVALID_CHOICE);
                continue;
            }
            if !colors.contains(&code) {
                colors.push(code);
            }
        }

        errors.into_result(Self { colors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::REQUIRED;

    fn form(pairs: &[(&str, &str)]) -> FormData {
        FormData::from(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_deck_form_normalizes_color_code() {
        let data = form(&[("deck_name", "Atraxa"), ("color_identity_code", "wubg"), ("owner_id", "2")]);

        let parsed = DeckForm::parse(&data).unwrap_or_else(|e| unreachable!("unexpected errors: {e:?}"));

        assert_eq!(parsed.color_identity_code, "WUBG");
        assert_eq!(parsed.owner_id, 2);
    }

    #[test]
    fn test_deck_form_requires_owner() {
        let data = form(&[("deck_name", "Atraxa"), ("color_identity_code", "WUBG"), ("owner_id", "0")]);

        let errors = DeckForm::parse(&data).err().unwrap_or_default();

        assert_eq!(errors.get("owner_id"), Some(&[REQUIRED.to_string()][..]));
    }

    #[test]
    fn test_deck_colors_deduplicates() {
        let data = form(&[("colors", "w"), ("colors", "U"), ("colors", "W")]);

        let parsed = DeckColorsForm::parse(&data).unwrap_or_else(|e| unreachable!("unexpected errors: {e:?}"));

        assert_eq!(parsed.colors, vec!["W".to_string(), "U".to_string()]);
    }
}
