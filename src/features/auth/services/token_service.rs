use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::Claims;
use crate::features::users::models::User;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

/// An issued access token and its lifetime
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Issues HS256 access tokens for local-mirror sessions. Tokens carry the
/// same claims the hosted auth subsystem puts in its tokens, so one
/// validator serves both backends.
pub struct TokenService {
    encoding_key: EncodingKey,
    audience: String,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            audience: config.jwt_audience.clone(),
            ttl_secs: config.token_ttl_secs,
        }
    }

    pub fn issue(&self, user: &User) -> Result<IssuedToken> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: Some(user.email.clone()),
            aud: self.audience.clone(),
            iat: now as u64,
            exp: (now + self.ttl_secs) as u64,
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("Failed to sign access token: {:?}", e);
                AppError::Internal("Failed to issue access token".to_string())
            })?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.ttl_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::JwtValidator;
    use std::time::Duration;
    use uuid::Uuid;

    #[test]
    fn issued_tokens_pass_validation() {
        let config = AuthConfig {
            jwt_secret: "local-secret-for-tests".to_string(),
            jwt_audience: "authenticated".to_string(),
            jwt_leeway: Duration::from_secs(0),
            token_ttl_secs: 300,
        };
        let user = User {
            id: Uuid::now_v7(),
            email: "nina@example.org".to_string(),
            name: "Nina".to_string(),
            phone: String::new(),
            is_active: true,
            created_at: chrono::Utc::now(),
        };

        let token = TokenService::new(&config).issue(&user).unwrap();
        let validator = JwtValidator::new(
            &config.jwt_secret,
            config.jwt_audience.clone(),
            config.jwt_leeway,
        );
        let authenticated = validator.validate_token(&token.access_token).unwrap();

        assert_eq!(token.expires_in, 300);
        assert_eq!(authenticated.user_id, user.id);
        assert_eq!(authenticated.email.as_deref(), Some("nina@example.org"));
    }
}
