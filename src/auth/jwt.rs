use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Password-reset links stay valid for ten minutes.
pub const RESET_TOKEN_EXPIRATION_SECS: u64 = 600;

/// Claims of a bearer access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id.
    pub sub: i32,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
    /// Issued-at time (Unix timestamp).
    pub iat: i64,
}

/// Claims of a password-reset token.
#[derive(Debug, Serialize, Deserialize)]
struct ResetClaims {
    reset_password: i32,
    exp: i64,
}

#[allow(clippy::cast_possible_wrap)]
fn expires_at(expires_in: u64) -> i64 {
    Utc::now().timestamp() + expires_in as i64
}

/// Generate an access token for the given user.
///
/// # Errors
///
/// Returns an error if JWT encoding fails.
pub fn generate_access_token(user_id: i32, secret: &str, expires_in: u64) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        exp: expires_at(expires_in),
        iat: Utc::now().timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("Failed to encode access token: {e}"))
}

/// Validate an access token and return its claims.
///
/// # Errors
///
/// Returns an error if the token is invalid or expired.
pub fn validate_access_token(token: &str, secret: &str) -> anyhow::Result<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())
        .map_err(|e| anyhow::anyhow!("Invalid access token: {e}"))?;
    Ok(token_data.claims)
}

/// Generate a password-reset token for `user_id`, valid for `expires_in` seconds.
///
/// # Errors
///
/// Returns an error if JWT encoding fails.
pub fn generate_reset_token(user_id: i32, secret: &str, expires_in: u64) -> anyhow::Result<String> {
    let claims = ResetClaims {
        reset_password: user_id,
        exp: expires_at(expires_in),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| anyhow::anyhow!("Failed to encode reset token: {e}"))
}

/// The user id carried by a reset token.
///
/// Expired, malformed and wrongly signed tokens all yield `None`; no leeway is
/// granted on expiry.
#[must_use]
pub fn verify_reset_token(token: &str, secret: &str) -> Option<i32> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .ok()
    .map(|data| data.claims.reset_password)
}
