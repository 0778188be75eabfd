//! Repository-style query methods and transactional mutations, one service per aggregate.

mod color_service;
mod dashboard_service;
mod deck_service;
mod game_service;
mod player_service;
mod user_service;

pub use color_service::{ColorService, SINGLE_COLORS, color_sort_key};
pub use dashboard_service::DashboardService;
pub use deck_service::DeckService;
pub use game_service::GameService;
pub use player_service::PlayerService;
pub use user_service::UserService;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QuerySelect};

use crate::entities::game_result;
use crate::stats::SessionSizes;

/// Count every recorded result of the given sessions.
///
/// Eligibility depends on all results of a session, not only the rows of the player
/// or deck being aggregated, so this always reads the full result table.
pub(crate) async fn session_sizes<C>(db: &C, session_ids: &[i32]) -> Result<SessionSizes, DbErr>
where
    C: ConnectionTrait,
{
    if session_ids.is_empty() {
        return Ok(SessionSizes::default());
    }

    let ids: Vec<i32> = game_result::Entity::find()
        .select_only()
        .column(game_result::Column::SessionId)
        .filter(game_result::Column::SessionId.is_in(session_ids.iter().copied()))
        .into_tuple()
        .all(db)
        .await?;

    Ok(SessionSizes::from_session_ids(ids))
}
