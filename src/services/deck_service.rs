use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::dto::DeckStatsResponse;
use crate::entities::{color_identity, deck, deck_color, game_result, player};
use crate::error::AppError;
use crate::forms::{DeckColorsForm, DeckForm, FieldErrors, INVALID_CHOICE};
use crate::stats::{ReportingThreshold, SessionSizes, WinRecord, aggregate};

use super::{SINGLE_COLORS, color_sort_key, session_sizes};

pub struct DeckService;

/// Lookups shared by every row of a deck listing.
struct DeckContext {
    identities: HashMap<String, String>,
    owners: HashMap<i32, String>,
    tags: HashMap<i32, Vec<String>>,
}

impl DeckContext {
    async fn load(db: &DatabaseConnection, deck_ids: Option<&[i32]>) -> Result<Self, AppError> {
        let identities = color_identity::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|c| (c.code, c.identity_name))
            .collect();

        let owners = player::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .map(|p| (p.id, p.player_name))
            .collect();

        let mut query = deck_color::Entity::find();
        if let Some(ids) = deck_ids {
            query = query.filter(deck_color::Column::DeckId.is_in(ids.iter().copied()));
        }
        let mut tags: HashMap<i32, Vec<String>> = HashMap::new();
        for row in query.all(db).await? {
            tags.entry(row.deck_id).or_default().push(row.color_id);
        }
        for colors in tags.values_mut() {
            colors.sort_by_key(|c| color_sort_key(c));
            colors.dedup();
        }

        Ok(Self {
            identities,
            owners,
            tags,
        })
    }

    fn row(&self, deck: deck::Model, stats: WinRecord) -> DeckStatsResponse {
        let colors = self.tags.get(&deck.id).cloned().unwrap_or_default();
        let color_identity = self
            .identities
            .get(&deck.color_identity_code)
            .cloned()
            .unwrap_or_else(|| deck.color_identity_code.clone());

        DeckStatsResponse {
            id: deck.id,
            color_count: colors.len(),
            colors,
            color_identity,
            deck_owner: deck.owner_id.and_then(|id| self.owners.get(&id).cloned()),
            owner_id: deck.owner_id,
            color_identity_code: deck.color_identity_code,
            deck_name: deck.deck_name,
            stats,
        }
    }
}

impl DeckService {
    /// Every deck with derived stats, ordered by name.
    pub async fn list_with_stats(
        db: &DatabaseConnection,
    ) -> Result<Vec<DeckStatsResponse>, AppError> {
        let decks = deck::Entity::find()
            .order_by_asc(deck::Column::DeckName)
            .all(db)
            .await?;
        let results = game_result::Entity::find().all(db).await?;
        let sizes = SessionSizes::from_results(&results);
        let context = DeckContext::load(db, None).await?;

        let mut by_deck: HashMap<i32, Vec<&game_result::Model>> = HashMap::new();
        for result in &results {
            by_deck.entry(result.deck_id).or_default().push(result);
        }

        Ok(decks
            .into_iter()
            .map(|d| {
                let rows = by_deck.get(&d.id).into_iter().flatten().copied();
                let stats = aggregate(rows, &sizes, ReportingThreshold::DECK);
                context.row(d, stats)
            })
            .collect())
    }

    pub async fn get_with_stats(
        db: &DatabaseConnection,
        deck_id: i32,
    ) -> Result<DeckStatsResponse, AppError> {
        let deck = Self::find(db, deck_id).await?;

        let results = game_result::Entity::find()
            .filter(game_result::Column::DeckId.eq(deck_id))
            .all(db)
            .await?;
        let session_ids: Vec<i32> = results.iter().map(|r| r.session_id).collect();
        let sizes = session_sizes(db, &session_ids).await?;
        let context = DeckContext::load(db, Some(std::slice::from_ref(&deck_id))).await?;

        let stats = aggregate(&results, &sizes, ReportingThreshold::DECK);
        Ok(context.row(deck, stats))
    }

    pub async fn find(db: &DatabaseConnection, deck_id: i32) -> Result<deck::Model, AppError> {
        deck::Entity::find_by_id(deck_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Deck not found.".to_string()))
    }

    pub async fn create(db: &DatabaseConnection, form: DeckForm) -> Result<deck::Model, AppError> {
        Self::validate(db, &form, None).await?;

        let created = deck::ActiveModel {
            deck_name: Set(form.deck_name),
            color_identity_code: Set(form.color_identity_code),
            owner_id: Set(Some(form.owner_id)),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(
            deck_id = created.id,
            name = %created.deck_name,
            identity = %created.color_identity_code,
            "Deck added"
        );
        Ok(created)
    }

    pub async fn update(
        db: &DatabaseConnection,
        deck_id: i32,
        form: DeckForm,
    ) -> Result<deck::Model, AppError> {
        let existing = Self::find(db, deck_id).await?;
        Self::validate(db, &form, Some(deck_id)).await?;

        let mut active: deck::ActiveModel = existing.into();
        active.deck_name = Set(form.deck_name);
        active.color_identity_code = Set(form.color_identity_code);
        active.owner_id = Set(Some(form.owner_id));
        let updated = active.update(db).await?;

        tracing::info!(deck_id, name = %updated.deck_name, "Deck updated");
        Ok(updated)
    }

    /// Replace the single-color tags of a deck in one transaction.
    ///
    /// Tags are independent of the commander identity and only accept the six
    /// single-color codes.
    pub async fn set_colors(
        db: &DatabaseConnection,
        deck_id: i32,
        form: DeckColorsForm,
    ) -> Result<DeckStatsResponse, AppError> {
        Self::find(db, deck_id).await?;

        if form.colors.iter().any(|c| !SINGLE_COLORS.contains(&c.as_str())) {
            return Err(AppError::field("colors", INVALID_CHOICE));
        }
        let known = color_identity::Entity::find()
            .filter(color_identity::Column::Code.is_in(form.colors.iter().cloned()))
            .count(db)
            .await?;
        if usize::try_from(known).unwrap_or(0) != form.colors.len() {
            return Err(AppError::field("colors", INVALID_CHOICE));
        }

        let txn = db.begin().await?;
        deck_color::Entity::delete_many()
            .filter(deck_color::Column::DeckId.eq(deck_id))
            .exec(&txn)
            .await?;
        if !form.colors.is_empty() {
            let rows = form.colors.iter().map(|code| deck_color::ActiveModel {
                deck_id: Set(deck_id),
                color_id: Set(code.clone()),
                ..Default::default()
            });
            deck_color::Entity::insert_many(rows).exec(&txn).await?;
        }
        txn.commit().await?;

        tracing::info!(deck_id, colors = ?form.colors, "Deck colors updated");
        Self::get_with_stats(db, deck_id).await
    }

    /// Delete a deck and its color tags. Refused while any game result uses it.
    pub async fn delete(db: &DatabaseConnection, deck_id: i32) -> Result<(), AppError> {
        Self::find(db, deck_id).await?;

        let played = game_result::Entity::find()
            .filter(game_result::Column::DeckId.eq(deck_id))
            .count(db)
            .await?;
        if played > 0 {
            tracing::warn!(deck_id, played, "Refusing to delete deck with game results");
            return Err(AppError::Conflict(format!(
                "Deck has {played} recorded game result(s); delete those sessions first."
            )));
        }

        let txn = db.begin().await?;
        deck_color::Entity::delete_many()
            .filter(deck_color::Column::DeckId.eq(deck_id))
            .exec(&txn)
            .await?;
        deck::Entity::delete_by_id(deck_id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(deck_id, "Deck deleted");
        Ok(())
    }

    async fn validate(
        db: &DatabaseConnection,
        form: &DeckForm,
        except: Option<i32>,
    ) -> Result<(), AppError> {
        let mut errors = FieldErrors::default();

        let mut same_name = deck::Entity::find().filter(deck::Column::DeckName.eq(&form.deck_name));
        if let Some(id) = except {
            same_name = same_name.filter(deck::Column::Id.ne(id));
        }
        if same_name.one(db).await?.is_some() {
            errors.add("deck_name", "Please use a different deck name.");
        }

        let identity = color_identity::Entity::find_by_id(form.color_identity_code.clone())
            .one(db)
            .await?;
        if identity.is_none() {
            errors.add("color_identity_code", INVALID_CHOICE);
        }

        if player::Entity::find_by_id(form.owner_id).one(db).await?.is_none() {
            errors.add("owner_id", INVALID_CHOICE);
        }

        errors.into_result(()).map_err(AppError::Validation)
    }
}
