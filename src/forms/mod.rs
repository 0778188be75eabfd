//! Form-encoded input parsing and field-level validation.
//!
//! Handlers extract bodies as `Form<Vec<(String, String)>>` so repeated keys
//! (`colors=W&colors=U`) and slot-indexed keys (`results-0-finish`) both survive.
//! Each form type turns a [`FormData`] into a typed value or a [`FieldErrors`] map.

mod admin;
mod auth;
mod deck;
mod game;
mod player;

use std::collections::BTreeMap;

use serde::Serialize;

pub use admin::{ColorForm, UserUpdateForm};
pub use auth::{LoginForm, RegistrationForm, ResetPasswordForm, ResetPasswordRequestForm};
pub use deck::{DeckColorsForm, DeckForm};
pub use game::{GameDateRule, GameEntryForm, RESULT_SLOTS, ResultEntry};
pub use player::PlayerForm;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Not a valid choice.";
pub const INVALID_INTEGER: &str = "Not a valid integer value.";

/// Validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// `Ok(value)` when no errors were collected.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed validation.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Raw form-encoded key/value pairs, in submission order.
#[derive(Debug, Clone, Default)]
pub struct FormData(Vec<(String, String)>);

impl From<Vec<(String, String)>> for FormData {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }
}

impl FormData {
    /// First non-blank value for `name`, trimmed.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
            .find(|v| !v.is_empty())
    }

    /// Every non-blank value submitted for `name`.
    #[must_use]
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
            .collect()
    }

    /// Required text no longer than `max_len` characters.
    pub fn required_text(&self, name: &str, max_len: usize, errors: &mut FieldErrors) -> String {
        match self.get(name) {
            Some(value) => {
                check_length(name, value, max_len, errors);
                value.to_string()
            }
            None => {
                errors.add(name, REQUIRED);
                String::new()
            }
        }
    }

    /// Optional free text; blank input becomes `None`.
    #[must_use]
    pub fn optional_text(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    /// Optional integer; blank input becomes `None`.
    pub fn optional_int(&self, name: &str, errors: &mut FieldErrors) -> Option<i32> {
        let raw = self.get(name)?;
        raw.parse::<i32>().map_or_else(
            |_| {
                errors.add(name, INVALID_INTEGER);
                None
            },
            Some,
        )
    }

    /// Optional foreign-key selection. Blank and the `0` placeholder both mean "none".
    pub fn optional_id(&self, name: &str, errors: &mut FieldErrors) -> Option<i32> {
        match self.optional_int(name, errors) {
            Some(0) | None => None,
            Some(id) if id < 0 => {
                errors.add(name, INVALID_CHOICE);
                None
            }
            Some(id) => Some(id),
        }
    }

    /// Required foreign-key selection; the `0` placeholder counts as missing.
    pub fn required_id(&self, name: &str, errors: &mut FieldErrors) -> i32 {
        let before = errors.get(name).map_or(0, <[String]>::len);
        match self.optional_id(name, errors) {
            Some(id) => id,
            None => {
                // Only report "required" when the value was absent rather than malformed
                if errors.get(name).map_or(0, <[String]>::len) == before {
                    errors.add(name, REQUIRED);
                }
                0
            }
        }
    }
}

pub(crate) fn check_length(name: &str, value: &str, max_len: usize, errors: &mut FieldErrors) {
    if value.chars().count() > max_len {
        errors.add(
            name,
            format!("Field cannot be longer than {max_len} characters."),
        );
    }
}
