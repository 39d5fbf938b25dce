use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;

/// Issues an HS256 bearer token for the given user. The signing secret and
/// TTL come from the process configuration.
pub fn issue_token(user_id: Uuid, role: &str) -> Result<String> {
    let config = crate::config::get_config();
    let expires_at = Utc::now() + Duration::hours(config.token_ttl_hours);
    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp() as usize,
        role: Some(role.to_string()),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}
