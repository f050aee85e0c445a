//! Session token issue and decode (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use common::{config::JwtConfig, AppError, AppResult};
use domain::{User, BEARER_TOKEN_PREFIX};

/// JWT claims payload: the caller's identity and role tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub role: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_names: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies session tokens with a shared secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_hours: i64,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        // Expiry is exact: no clock-skew allowance
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_bytes()),
            validation,
            expiration_hours: config.expiration_hours,
        }
    }

    pub fn expiration_hours(&self) -> i64 {
        self.expiration_hours
    }

    /// Issue a token for `user`, returned as `"Bearer <token>"`.
    pub fn issue(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = Duration::try_hours(self.expiration_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| AppError::internal("Token lifetime out of range"))?;

        let claims = Claims {
            id: user.id,
            role: user.role,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_names: user.last_names.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(format!("{}{}", BEARER_TOKEN_PREFIX, token))
    }

    /// Verify signature and expiry. Any failure yields `None`.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(reason = %e, "Token rejected");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-at-least-32-characters";

    fn service() -> TokenService {
        TokenService::new(&JwtConfig::new(SECRET, 168))
    }

    fn user() -> User {
        User {
            id: 3,
            username: "jdoe".to_string(),
            email: "j@x.com".to_string(),
            password_hash: String::new(),
            first_name: "John".to_string(),
            last_names: "Doe".to_string(),
            address: None,
            role: 3,
            is_registered: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    fn strip(token: &str) -> &str {
        token.strip_prefix(BEARER_TOKEN_PREFIX).unwrap()
    }

    #[test]
    fn test_issue_then_decode() {
        let tokens = service();
        let token = tokens.issue(&user()).unwrap();

        assert!(token.starts_with("Bearer "));
        let claims = tokens.decode(strip(&token)).unwrap();
        assert_eq!(claims.id, 3);
        assert_eq!(claims.username, "jdoe");
        assert_eq!(claims.email, "j@x.com");
        assert_eq!(claims.role, 3);
        assert_eq!(claims.exp - claims.iat, 168 * 3600);
    }

    #[test]
    fn test_issue_with_unrepresentable_lifetime_fails() {
        let tokens = TokenService::new(&JwtConfig::new(SECRET, i64::MAX));
        assert!(matches!(tokens.issue(&user()), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_decode_is_pure() {
        let tokens = service();
        let token = tokens.issue(&user()).unwrap();

        let first = tokens.decode(strip(&token));
        let second = tokens.decode(strip(&token));
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(service().decode("not-a-token").is_none());
        assert!(service().decode("").is_none());
    }

    #[test]
    fn test_decode_rejects_other_secret() {
        let token = service().issue(&user()).unwrap();
        let other = TokenService::new(&JwtConfig::new(
            "another-secret-that-is-at-least-32-chars",
            168,
        ));

        assert!(other.decode(strip(&token)).is_none());
    }

    fn signed(iat: i64, exp: i64) -> String {
        let claims = Claims {
            id: 3,
            role: 3,
            username: "jdoe".to_string(),
            email: "j@x.com".to_string(),
            first_name: "John".to_string(),
            last_names: "Doe".to_string(),
            iat,
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_rejects_just_expired() {
        let now = Utc::now().timestamp();

        assert!(service().decode(&signed(now - 60, now - 1)).is_none());
        assert!(service().decode(&signed(now - 60, now - 30)).is_none());
        assert!(service().decode(&signed(now, now + 60)).is_some());
    }

    #[test]
    fn test_decode_rejects_expired() {
        let now = Utc::now().timestamp();
        let claims = Claims {
            id: 3,
            role: 3,
            username: "jdoe".to_string(),
            email: "j@x.com".to_string(),
            first_name: "John".to_string(),
            last_names: "Doe".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(service().decode(&token).is_none());
    }
}
