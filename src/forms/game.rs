use chrono::NaiveDate;

use super::{FieldErrors, FormData, REQUIRED};

/// A combined game entry always carries exactly this many result slots.
pub const RESULT_SLOTS: usize = 4;

const MIN_FINISH: i32 = 1;
const MAX_FINISH: i32 = 4;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// How a missing `game_date` is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameDateRule {
    /// New entries fall back to today's date.
    DefaultToday,
    /// Edits must state the date explicitly.
    Required,
}

/// One filled result slot of a game entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    /// Position in the form, `0..RESULT_SLOTS`.
    pub slot: usize,
    pub player_id: i32,
    pub deck_id: i32,
    pub finish: i32,
    pub eliminated_by_id: Option<i32>,
}

impl ResultEntry {
    /// Form field name for `name` in slot `slot`, e.g. `results-2-deck_id`.
    #[must_use]
    pub fn field(slot: usize, name: &str) -> String {
        format!("results-{slot}-{name}")
    }

    /// Parse a single result row whose fields carry no slot prefix
    /// (`player_id`, `deck_id`, `finish`, `eliminated_by_id`).
    ///
    /// # Errors
    ///
    /// Returns every field-level problem found in the row.
    pub fn parse_row(data: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let entry = parse_entry(data, 0, str::to_string, &mut errors);
        errors.into_result(entry)
    }
}

/// A game session together with its result slots, as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEntryForm {
    pub game_date: NaiveDate,
    pub win_condition: Option<String>,
    pub comments: Option<String>,
    /// Filled slots only, in slot order.
    pub results: Vec<ResultEntry>,
}

impl GameEntryForm {
    /// Parse and syntactically validate a game entry.
    ///
    /// Slots with no player, no deck and no finish are skipped. Whether the chosen
    /// players and decks exist is checked later against the database.
    ///
    /// # Errors
    ///
    /// Returns every field-level problem found in the submission.
    pub fn parse(data: &FormData, rule: GameDateRule, today: NaiveDate) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();

        let game_date = match data.get("game_date") {
            Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT).unwrap_or_else(|_| {
                errors.add("game_date", "Not a valid date value.");
                today
            }),
            None if rule == GameDateRule::DefaultToday => today,
            None => {
                errors.add("game_date", REQUIRED);
                today
            }
        };

        let results: Vec<ResultEntry> = (0..RESULT_SLOTS)
            .filter(|&slot| !is_blank_slot(data, slot))
            .map(|slot| parse_slot(data, slot, &mut errors))
            .collect();

        if results.is_empty() {
            errors.add("results", "At least one game result is required.");
        }

        errors.into_result(Self {
            game_date,
            win_condition: data.optional_text("win_condition"),
            comments: data.optional_text("comments"),
            results,
        })
    }
}

fn is_unset(data: &FormData, name: &str) -> bool {
    matches!(data.get(name), None | Some("0"))
}

fn is_blank_slot(data: &FormData, slot: usize) -> bool {
    is_unset(data, &ResultEntry::field(slot, "player_id"))
        && is_unset(data, &ResultEntry::field(slot, "deck_id"))
        && data.get(&ResultEntry::field(slot, "finish")).is_none()
}

fn parse_slot(data: &FormData, slot: usize, errors: &mut FieldErrors) -> ResultEntry {
    parse_entry(data, slot, |name| ResultEntry::field(slot, name), errors)
}

fn parse_entry(
    data: &FormData,
    slot: usize,
    field: impl Fn(&str) -> String,
    errors: &mut FieldErrors,
) -> ResultEntry {
    let player_id = data.required_id(&field("player_id"), errors);
    let deck_id = data.required_id(&field("deck_id"), errors);

    let finish_field = field("finish");
    let finish = match data.optional_int(&finish_field, errors) {
        Some(finish) if (MIN_FINISH..=MAX_FINISH).contains(&finish) => finish,
        Some(_) => {
            errors.add(
                finish_field,
                format!("Number must be between {MIN_FINISH} and {MAX_FINISH}."),
            );
            0
        }
        None => {
            if !errors.contains(&finish_field) {
                errors.add(finish_field, REQUIRED);
            }
            0
        }
    };

    let eliminated_by_id = data.optional_id(&field("eliminated_by_id"), errors);

    ResultEntry {
        slot,
        player_id,
        deck_id,
        finish,
        eliminated_by_id,
    }
}
