use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::dto::{DeckOption, PlayerDetailResponse, PlayerStatsResponse};
use crate::entities::{deck, deck_color, game_result, player, user};
use crate::error::AppError;
use crate::forms::PlayerForm;
use crate::stats::{ReportingThreshold, SessionSizes, aggregate};

use super::session_sizes;

pub struct PlayerService;

impl PlayerService {
    /// Every player with derived stats, ordered by name.
    pub async fn list_with_stats(
        db: &DatabaseConnection,
    ) -> Result<Vec<PlayerStatsResponse>, AppError> {
        let players = player::Entity::find()
            .order_by_asc(player::Column::PlayerName)
            .all(db)
            .await?;
        let results = game_result::Entity::find().all(db).await?;
        let sizes = SessionSizes::from_results(&results);

        let mut by_player: HashMap<i32, Vec<&game_result::Model>> = HashMap::new();
        for result in &results {
            by_player.entry(result.player_id).or_default().push(result);
        }

        Ok(players
            .into_iter()
            .map(|p| {
                let rows = by_player.get(&p.id).into_iter().flatten().copied();
                PlayerStatsResponse {
                    id: p.id,
                    player_name: p.player_name,
                    stats: aggregate(rows, &sizes, ReportingThreshold::PLAYER),
                }
            })
            .collect())
    }

    /// One player with derived stats and owned decks.
    pub async fn get_with_stats(
        db: &DatabaseConnection,
        player_id: i32,
    ) -> Result<PlayerDetailResponse, AppError> {
        let player = Self::find(db, player_id).await?;

        let results = game_result::Entity::find()
            .filter(game_result::Column::PlayerId.eq(player_id))
            .all(db)
            .await?;
        let session_ids: Vec<i32> = results.iter().map(|r| r.session_id).collect();
        let sizes = session_sizes(db, &session_ids).await?;

        let decks = Self::decks_for_player(db, player_id).await?;

        Ok(PlayerDetailResponse {
            player: PlayerStatsResponse {
                id: player.id,
                player_name: player.player_name,
                stats: aggregate(&results, &sizes, ReportingThreshold::PLAYER),
            },
            decks,
        })
    }

    /// Decks owned by a player, for game entry pickers.
    pub async fn decks_for_player(
        db: &DatabaseConnection,
        player_id: i32,
    ) -> Result<Vec<DeckOption>, AppError> {
        let decks = deck::Entity::find()
            .filter(deck::Column::OwnerId.eq(player_id))
            .order_by_asc(deck::Column::DeckName)
            .all(db)
            .await?;

        Ok(decks
            .into_iter()
            .map(|d| DeckOption {
                id: d.id,
                name: d.deck_name,
            })
            .collect())
    }

    pub async fn find(db: &DatabaseConnection, player_id: i32) -> Result<player::Model, AppError> {
        player::Entity::find_by_id(player_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found.".to_string()))
    }

    pub async fn create(db: &DatabaseConnection, form: PlayerForm) -> Result<player::Model, AppError> {
        Self::ensure_name_available(db, &form.player_name, None).await?;

        let created = player::ActiveModel {
            player_name: Set(form.player_name),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(player_id = created.id, name = %created.player_name, "Player added");
        Ok(created)
    }

    pub async fn rename(
        db: &DatabaseConnection,
        player_id: i32,
        form: PlayerForm,
    ) -> Result<player::Model, AppError> {
        let existing = Self::find(db, player_id).await?;
        Self::ensure_name_available(db, &form.player_name, Some(player_id)).await?;

        let mut active: player::ActiveModel = existing.into();
        active.player_name = Set(form.player_name);
        let updated = active.update(db).await?;

        tracing::info!(player_id, name = %updated.player_name, "Player updated");
        Ok(updated)
    }

    /// Delete a player together with the decks they own.
    ///
    /// Refused while the player, or any of their decks, still appears in a game
    /// result. Results naming the player as eliminator are kept with the eliminator
    /// cleared, and a linked user account is unlinked.
    pub async fn delete(db: &DatabaseConnection, player_id: i32) -> Result<(), AppError> {
        Self::find(db, player_id).await?;

        let played = game_result::Entity::find()
            .filter(game_result::Column::PlayerId.eq(player_id))
            .count(db)
            .await?;
        if played > 0 {
            tracing::warn!(player_id, played, "Refusing to delete player with game results");
            return Err(AppError::Conflict(format!(
                "Player has {played} recorded game result(s); delete those sessions first."
            )));
        }

        let deck_ids: Vec<i32> = deck::Entity::find()
            .filter(deck::Column::OwnerId.eq(player_id))
            .all(db)
            .await?
            .into_iter()
            .map(|d| d.id)
            .collect();

        if !deck_ids.is_empty() {
            let deck_games = game_result::Entity::find()
                .filter(game_result::Column::DeckId.is_in(deck_ids.iter().copied()))
                .count(db)
                .await?;
            if deck_games > 0 {
                tracing::warn!(player_id, deck_games, "Refusing to delete player whose decks were played");
                return Err(AppError::Conflict(format!(
                    "Decks owned by this player appear in {deck_games} game result(s)."
                )));
            }
        }

        let txn = db.begin().await?;

        game_result::Entity::update_many()
            .col_expr(
                game_result::Column::EliminatedById,
                Expr::value(Option::<i32>::None),
            )
            .filter(game_result::Column::EliminatedById.eq(player_id))
            .exec(&txn)
            .await?;

        user::Entity::update_many()
            .col_expr(user::Column::PlayerId, Expr::value(Option::<i32>::None))
            .filter(user::Column::PlayerId.eq(player_id))
            .exec(&txn)
            .await?;

        if !deck_ids.is_empty() {
            deck_color::Entity::delete_many()
                .filter(deck_color::Column::DeckId.is_in(deck_ids.iter().copied()))
                .exec(&txn)
                .await?;
            deck::Entity::delete_many()
                .filter(deck::Column::Id.is_in(deck_ids.iter().copied()))
                .exec(&txn)
                .await?;
        }

        player::Entity::delete_by_id(player_id).exec(&txn).await?;
        txn.commit().await?;

        tracing::info!(player_id, decks = deck_ids.len(), "Player deleted");
        Ok(())
    }

    async fn ensure_name_available(
        db: &DatabaseConnection,
        name: &str,
        except: Option<i32>,
    ) -> Result<(), AppError> {
        let mut query = player::Entity::find().filter(player::Column::PlayerName.eq(name));
        if let Some(id) = except {
            query = query.filter(player::Column::Id.ne(id));
        }
        if query.one(db).await?.is_some() {
            return Err(AppError::field(
                "player_name",
                "Please use a different player name.",
            ));
        }
        Ok(())
    }
}
