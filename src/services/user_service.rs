use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::auth::{jwt, password};
use crate::config::Config;
use crate::entities::{player, user};
use crate::error::AppError;
use crate::forms::{
    FieldErrors, INVALID_CHOICE, LoginForm, RegistrationForm, ResetPasswordForm,
    ResetPasswordRequestForm, UserUpdateForm,
};

pub struct UserService;

impl UserService {
    /// Create an account. Emails listed in `ADMINS` are granted admin rights.
    pub async fn register(
        db: &DatabaseConnection,
        config: &Config,
        form: RegistrationForm,
    ) -> Result<user::Model, AppError> {
        let mut errors = FieldErrors::default();
        if Self::find_by_username(db, &form.username).await?.is_some() {
            errors.add("username", "Please use a different username.");
        }
        if Self::find_by_email(db, &form.email).await?.is_some() {
            errors.add("email", "Please use a different email address.");
        }
        errors.into_result(()).map_err(AppError::Validation)?;

        let is_admin = config.is_admin_email(&form.email);
        let created = user::ActiveModel {
            username: Set(form.username),
            email: Set(form.email),
            password_hash: Set(Some(password::hash_password(&form.password)?)),
            is_admin: Set(is_admin),
            player_id: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(user_id = created.id, username = %created.username, is_admin, "User registered");
        Ok(created)
    }

    /// Check credentials and issue an access token.
    pub async fn authenticate(
        db: &DatabaseConnection,
        config: &Config,
        form: LoginForm,
    ) -> Result<(user::Model, String), AppError> {
        let invalid = || AppError::Unauthorized("Invalid username or password.".to_string());

        let Some(found) = Self::find_by_username(db, &form.username).await? else {
            tracing::warn!(username = %form.username, "Login with unknown username");
            return Err(invalid());
        };
        let matches = match found.password_hash.as_deref() {
            Some(hash) => password::verify_password(&form.password, hash)?,
            None => false,
        };
        if !matches {
            tracing::warn!(user_id = found.id, "Login with wrong password");
            return Err(invalid());
        }

        let token =
            jwt::generate_access_token(found.id, &config.secret_key, config.jwt_expiration_secs)?;
        tracing::info!(user_id = found.id, "User logged in");
        Ok((found, token))
    }

    /// Issue a reset token for the account behind `email`, if there is one.
    ///
    /// The token is logged instead of mailed. Unknown emails get the same answer as
    /// known ones.
    pub async fn request_password_reset(
        db: &DatabaseConnection,
        config: &Config,
        form: ResetPasswordRequestForm,
    ) -> Result<Option<String>, AppError> {
        let Some(found) = Self::find_by_email(db, &form.email).await? else {
            tracing::info!("Password reset requested for unknown email");
            return Ok(None);
        };

        let token = jwt::generate_reset_token(
            found.id,
            &config.secret_key,
            jwt::RESET_TOKEN_EXPIRATION_SECS,
        )?;
        tracing::info!(user_id = found.id, reset_token = %token, "Password reset token issued");
        Ok(Some(token))
    }

    /// Set a new password for the user named by a valid reset token.
    pub async fn reset_password(
        db: &DatabaseConnection,
        config: &Config,
        token: &str,
        form: ResetPasswordForm,
    ) -> Result<user::Model, AppError> {
        let invalid = || AppError::BadRequest("Invalid or expired reset token.".to_string());

        let user_id = jwt::verify_reset_token(token, &config.secret_key).ok_or_else(invalid)?;
        let found = user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(invalid)?;

        let mut active: user::ActiveModel = found.into();
        active.password_hash = Set(Some(password::hash_password(&form.password)?));
        let updated = active.update(db).await?;

        tracing::info!(user_id, "Password reset");
        Ok(updated)
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<user::Model>, AppError> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Username)
            .all(db)
            .await?)
    }

    pub async fn find(db: &DatabaseConnection, user_id: i32) -> Result<user::Model, AppError> {
        user::Entity::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))
    }

    /// Toggle admin rights or change the linked player.
    ///
    /// A player can be linked to at most one user.
    pub async fn update(
        db: &DatabaseConnection,
        user_id: i32,
        form: UserUpdateForm,
    ) -> Result<user::Model, AppError> {
        let existing = Self::find(db, user_id).await?;

        if let Some(Some(player_id)) = form.player_id {
            if player::Entity::find_by_id(player_id).one(db).await?.is_none() {
                return Err(AppError::field("player_id", INVALID_CHOICE));
            }
            let linked = user::Entity::find()
                .filter(user::Column::PlayerId.eq(player_id))
                .filter(user::Column::Id.ne(user_id))
                .one(db)
                .await?;
            if linked.is_some() {
                return Err(AppError::field(
                    "player_id",
                    "This player is already linked to another user.",
                ));
            }
        }

        let mut active: user::ActiveModel = existing.into();
        if let Some(is_admin) = form.is_admin {
            active.is_admin = Set(is_admin);
        }
        if let Some(player_id) = form.player_id {
            active.player_id = Set(player_id);
        }
        let updated = active.update(db).await?;

        tracing::info!(
            user_id,
            is_admin = updated.is_admin,
            player_id = ?updated.player_id,
            "User updated"
        );
        Ok(updated)
    }

    /// Delete an account. Admins cannot delete themselves.
    pub async fn delete(
        db: &DatabaseConnection,
        acting_user_id: i32,
        user_id: i32,
    ) -> Result<(), AppError> {
        if acting_user_id == user_id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account.".to_string(),
            ));
        }
        let found = Self::find(db, user_id).await?;
        user::Entity::delete_by_id(found.id).exec(db).await?;
        tracing::info!(user_id, "User deleted");
        Ok(())
    }

    async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<user::Model>, AppError> {
        Ok(user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await?)
    }

    async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<user::Model>, AppError> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .one(db)
            .await?)
    }
}
