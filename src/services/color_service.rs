use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::entities::{color_identity, deck};
use crate::error::AppError;
use crate::forms::ColorForm;

/// The single-color codes, in WUBRG order with colorless last.
pub const SINGLE_COLORS: [&str; 6] = ["W", "U", "B", "R", "G", "C"];

/// Sort key placing identities by color count, then in WUBRG order.
#[must_use]
pub fn color_sort_key(code: &str) -> (usize, Vec<usize>) {
    let ranks = code
        .chars()
        .map(|c| {
            SINGLE_COLORS
                .iter()
                .position(|s| s.starts_with(c))
                .unwrap_or(SINGLE_COLORS.len())
        })
        .collect();
    (code.chars().count(), ranks)
}

pub struct ColorService;

impl ColorService {
    /// The full color identity lookup.
    pub async fn list(db: &DatabaseConnection) -> Result<Vec<color_identity::Model>, AppError> {
        let mut colors = color_identity::Entity::find().all(db).await?;
        colors.sort_by_key(|c| color_sort_key(&c.code));
        Ok(colors)
    }

    pub async fn create(
        db: &DatabaseConnection,
        form: ColorForm,
    ) -> Result<color_identity::Model, AppError> {
        let existing = color_identity::Entity::find_by_id(form.code.clone())
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(format!(
                "Color identity {} already exists.",
                form.code
            )));
        }

        let color = color_identity::ActiveModel {
            code: Set(form.code),
            identity_name: Set(form.identity_name),
        }
        .insert(db)
        .await?;

        tracing::info!(code = %color.code, "Color identity created");
        Ok(color)
    }

    /// Remove a lookup entry that no deck uses as its commander identity.
    pub async fn delete(db: &DatabaseConnection, code: &str) -> Result<(), AppError> {
        let code = code.to_uppercase();
        let color = color_identity::Entity::find_by_id(code.clone())
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Color identity not found.".to_string()))?;

        let decks = deck::Entity::find()
            .filter(deck::Column::ColorIdentityCode.eq(&code))
            .count(db)
            .await?;
        if decks > 0 {
            tracing::warn!(%code, decks, "Refusing to delete color identity in use");
            return Err(AppError::Conflict(format!(
                "Color identity {code} is used by {decks} deck(s)."
            )));
        }

        color_identity::Entity::delete_by_id(color.code).exec(db).await?;
        tracing::info!(%code, "Color identity deleted");
        Ok(())
    }
}
