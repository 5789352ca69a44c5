//! Bearer token verification.
//!
//! Tokens are issued by the external identity provider with the shared
//! `JWT_SECRET`; this service only checks them.

use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// JWT claims carried by identity-provider tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Validate and decode a JWT token.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        AppError::Unauthorized
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};
    use tokio_test::{assert_err, assert_ok};

    const SECRET: &str = "test-secret-key-for-unit-tests";

    fn token(role: &str, expires_in: Duration, secret: &str) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: "user-42".to_string(),
            role: role.to_string(),
            exp: (now + expires_in).timestamp(),
            iat: now.timestamp(),
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_decodes() {
        let claims = assert_ok!(validate_token(
            &token("Admin", Duration::minutes(15), SECRET),
            SECRET
        ));
        assert_eq!(claims.sub, "user-42");
        assert_eq!(claims.role, "Admin");
    }

    #[test]
    fn invalid_token_rejected() {
        let result = validate_token("invalid.token.here", SECRET);
        assert!(result.unwrap_err().is_unauthorized());
    }

    #[test]
    fn wrong_secret_rejected() {
        let t = token("Customer", Duration::minutes(15), "other-secret");
        assert_err!(validate_token(&t, SECRET));
    }

    #[test]
    fn expired_token_rejected() {
        let t = token("Customer", Duration::hours(-2), SECRET);
        assert_err!(validate_token(&t, SECRET));
    }
}
