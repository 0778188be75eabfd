use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::dto::{GameResultResponse, GameSessionResponse};
use crate::entities::{deck, game_result, game_session, player};
use crate::error::AppError;
use crate::forms::{FieldErrors, GameEntryForm, INVALID_CHOICE, RESULT_SLOTS, ResultEntry};
use crate::stats::is_eligible;

pub struct GameService;

/// Display names for the players and decks referenced by a set of results.
#[derive(Default)]
struct Names {
    players: HashMap<i32, String>,
    decks: HashMap<i32, String>,
}

impl Names {
    async fn load<C: ConnectionTrait>(
        db: &C,
        results: &[game_result::Model],
    ) -> Result<Self, AppError> {
        let player_ids: HashSet<i32> = results
            .iter()
            .flat_map(|r| std::iter::once(r.player_id).chain(r.eliminated_by_id))
            .collect();
        let deck_ids: HashSet<i32> = results.iter().map(|r| r.deck_id).collect();

        if player_ids.is_empty() && deck_ids.is_empty() {
            return Ok(Self::default());
        }

        let players = player::Entity::find()
            .filter(player::Column::Id.is_in(player_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.player_name))
            .collect();
        let decks = deck::Entity::find()
            .filter(deck::Column::Id.is_in(deck_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|d| (d.id, d.deck_name))
            .collect();

        Ok(Self { players, decks })
    }

    fn player(&self, id: i32) -> String {
        self.players.get(&id).cloned().unwrap_or_default()
    }

    fn result(&self, r: &game_result::Model) -> GameResultResponse {
        GameResultResponse {
            id: r.id,
            finish: r.finish,
            player_id: r.player_id,
            player: self.player(r.player_id),
            deck_id: r.deck_id,
            deck: self.decks.get(&r.deck_id).cloned().unwrap_or_default(),
            eliminated_by_id: r.eliminated_by_id,
            eliminated_by: r.eliminated_by_id.map(|id| self.player(id)).unwrap_or_default(),
        }
    }

    fn session(
        &self,
        session: game_session::Model,
        mut results: Vec<&game_result::Model>,
    ) -> GameSessionResponse {
        results.sort_by_key(|r| (r.finish, r.id));
        GameSessionResponse {
            session_id: session.id,
            date: session.game_date.format("%Y-%m-%d").to_string(),
            wincon: session.win_condition.unwrap_or_default(),
            comments: session.comments.unwrap_or_default(),
            eligible: is_eligible(results.len()),
            results: results.into_iter().map(|r| self.result(r)).collect(),
        }
    }
}

impl GameService {
    /// Every session with its results, newest session first.
    ///
    /// Sessions without any recorded result are listed too.
    pub async fn list_sessions(
        db: &DatabaseConnection,
    ) -> Result<Vec<GameSessionResponse>, AppError> {
        let sessions = game_session::Entity::find()
            .order_by_desc(game_session::Column::Id)
            .all(db)
            .await?;
        let results = game_result::Entity::find().all(db).await?;
        let names = Names::load(db, &results).await?;

        let mut by_session: HashMap<i32, Vec<&game_result::Model>> = HashMap::new();
        for result in &results {
            by_session.entry(result.session_id).or_default().push(result);
        }

        Ok(sessions
            .into_iter()
            .map(|s| {
                let rows = by_session.remove(&s.id).unwrap_or_default();
                names.session(s, rows)
            })
            .collect())
    }

    pub async fn get_session(
        db: &DatabaseConnection,
        session_id: i32,
    ) -> Result<GameSessionResponse, AppError> {
        let session = Self::find(db, session_id).await?;
        let results = Self::results_of(db, session_id).await?;
        let names = Names::load(db, &results).await?;
        Ok(names.session(session, results.iter().collect()))
    }

    pub async fn find(
        db: &DatabaseConnection,
        session_id: i32,
    ) -> Result<game_session::Model, AppError> {
        game_session::Entity::find_by_id(session_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Game session not found.".to_string()))
    }

    /// Record a session and all of its results atomically.
    pub async fn create_session(
        db: &DatabaseConnection,
        form: GameEntryForm,
    ) -> Result<GameSessionResponse, AppError> {
        Self::validate_references(db, &form.results, |e, name| {
            ResultEntry::field(e.slot, name)
        })
        .await?;

        let txn = db.begin().await?;

        let session = game_session::ActiveModel {
            game_date: Set(form.game_date),
            win_condition: Set(form.win_condition),
            comments: Set(form.comments),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let rows = form.results.iter().map(|entry| new_result(session.id, entry));
        game_result::Entity::insert_many(rows).exec(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            session_id = session.id,
            results = form.results.len(),
            eligible = is_eligible(form.results.len()),
            "Game session recorded"
        );
        Self::get_session(db, session.id).await
    }

    /// Apply an edit form to a session.
    ///
    /// Existing results, ordered by finish, are matched to form slots by position. A
    /// filled slot overwrites the result at that position or adds a new one, and a
    /// blank slot removes the result at its position.
    pub async fn update_session(
        db: &DatabaseConnection,
        session_id: i32,
        form: GameEntryForm,
    ) -> Result<GameSessionResponse, AppError> {
        let session = Self::find(db, session_id).await?;
        Self::validate_references(db, &form.results, |e, name| {
            ResultEntry::field(e.slot, name)
        })
        .await?;
        let existing = Self::results_of(db, session_id).await?;

        let txn = db.begin().await?;

        let mut active: game_session::ActiveModel = session.into();
        active.game_date = Set(form.game_date);
        active.win_condition = Set(form.win_condition);
        active.comments = Set(form.comments);
        active.update(&txn).await?;

        let (mut updated, mut added, mut removed) = (0, 0, 0);
        for slot in 0..RESULT_SLOTS {
            let entry = form.results.iter().find(|e| e.slot == slot);
            match (existing.get(slot), entry) {
                (Some(row), Some(entry)) => {
                    let mut active: game_result::ActiveModel = row.clone().into();
                    active.player_id = Set(entry.player_id);
                    active.deck_id = Set(entry.deck_id);
                    active.finish = Set(entry.finish);
                    active.eliminated_by_id = Set(entry.eliminated_by_id);
                    active.update(&txn).await?;
                    updated += 1;
                }
                (Some(row), None) => {
                    game_result::Entity::delete_by_id(row.id).exec(&txn).await?;
                    removed += 1;
                }
                (None, Some(entry)) => {
                    new_result(session_id, entry).insert(&txn).await?;
                    added += 1;
                }
                (None, None) => {}
            }
        }

        txn.commit().await?;

        tracing::info!(session_id, updated, added, removed, "Game session updated");
        Self::get_session(db, session_id).await
    }

    /// Delete a session and every result recorded in it.
    pub async fn delete_session(db: &DatabaseConnection, session_id: i32) -> Result<(), AppError> {
        Self::find(db, session_id).await?;

        let txn = db.begin().await?;
        let removed = game_result::Entity::delete_many()
            .filter(game_result::Column::SessionId.eq(session_id))
            .exec(&txn)
            .await?
            .rows_affected;
        game_session::Entity::delete_by_id(session_id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(session_id, results = removed, "Game session deleted");
        Ok(())
    }

    /// Raw result rows for the admin surface, newest first.
    pub async fn list_results(
        db: &DatabaseConnection,
    ) -> Result<Vec<game_result::Model>, AppError> {
        Ok(game_result::Entity::find()
            .order_by_desc(game_result::Column::Id)
            .all(db)
            .await?)
    }

    /// Overwrite a single result row in place. The row keeps its session.
    pub async fn update_result(
        db: &DatabaseConnection,
        result_id: i32,
        entry: ResultEntry,
    ) -> Result<game_result::Model, AppError> {
        let result = Self::find_result(db, result_id).await?;
        Self::validate_references(db, std::slice::from_ref(&entry), |_, name| {
            name.to_string()
        })
        .await?;

        let mut active: game_result::ActiveModel = result.into();
        active.player_id = Set(entry.player_id);
        active.deck_id = Set(entry.deck_id);
        active.finish = Set(entry.finish);
        active.eliminated_by_id = Set(entry.eliminated_by_id);
        let result = active.update(db).await?;

        tracing::info!(result_id, session_id = result.session_id, "Game result updated");
        Ok(result)
    }

    /// Remove a single result row. The session stays and may drop below eligibility.
    pub async fn delete_result(db: &DatabaseConnection, result_id: i32) -> Result<(), AppError> {
        let result = Self::find_result(db, result_id).await?;

        game_result::Entity::delete_by_id(result.id).exec(db).await?;
        tracing::info!(result_id, session_id = result.session_id, "Game result deleted");
        Ok(())
    }

    async fn find_result(
        db: &DatabaseConnection,
        result_id: i32,
    ) -> Result<game_result::Model, AppError> {
        game_result::Entity::find_by_id(result_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Game result not found.".to_string()))
    }

    async fn results_of(
        db: &DatabaseConnection,
        session_id: i32,
    ) -> Result<Vec<game_result::Model>, AppError> {
        Ok(game_result::Entity::find()
            .filter(game_result::Column::SessionId.eq(session_id))
            .order_by_asc(game_result::Column::Finish)
            .order_by_asc(game_result::Column::Id)
            .all(db)
            .await?)
    }

    /// Every chosen player, deck and eliminator must exist. `field` names the form field
    /// an error is reported on.
    async fn validate_references(
        db: &DatabaseConnection,
        entries: &[ResultEntry],
        field: impl Fn(&ResultEntry, &str) -> String,
    ) -> Result<(), AppError> {
        let player_ids: HashSet<i32> = entries
            .iter()
            .flat_map(|e| std::iter::once(e.player_id).chain(e.eliminated_by_id))
            .collect();
        let deck_ids: HashSet<i32> = entries.iter().map(|e| e.deck_id).collect();

        let known_players: HashSet<i32> = player::Entity::find()
            .filter(player::Column::Id.is_in(player_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        let known_decks: HashSet<i32> = deck::Entity::find()
            .filter(deck::Column::Id.is_in(deck_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|d| d.id)
            .collect();

        let mut errors = FieldErrors::default();
        for entry in entries {
            if !known_players.contains(&entry.player_id) {
                errors.add(field(entry, "player_id"), INVALID_CHOICE);
            }
            if !known_decks.contains(&entry.deck_id) {
                errors.add(field(entry, "deck_id"), INVALID_CHOICE);
            }
            if entry
                .eliminated_by_id
                .is_some_and(|id| !known_players.contains(&id))
            {
                errors.add(field(entry, "eliminated_by_id"), INVALID_CHOICE);
            }
        }

        errors.into_result(()).map_err(AppError::Validation)
    }
}

fn new_result(session_id: i32, entry: &ResultEntry) -> game_result::ActiveModel {
    game_result::ActiveModel {
        session_id: Set(session_id),
        player_id: Set(entry.player_id),
        deck_id: Set(entry.deck_id),
        finish: Set(entry.finish),
        eliminated_by_id: Set(entry.eliminated_by_id),
        ..Default::default()
    }
}
