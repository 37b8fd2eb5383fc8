use super::model::{AuthenticatedUser, Claims};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use std::time::Duration;
use uuid::Uuid;

pub struct JwtValidator {
    decoding_key: DecodingKey,
    audience: String,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(secret: &str, audience: String, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::HS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only HS256 is allowed",
                header.alg
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);
        validation.leeway = self.leeway;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?
            .claims;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Auth("Token subject is not a user id".to_string()))?;

        // Roles are resolved by the auth middleware
        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
            roles: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-with-enough-length";

    fn token(sub: &str, aud: &str, exp_offset: i64, secret: &str) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: sub.to_string(),
            email: Some("ayu@example.org".to_string()),
            aud: aud.to_string(),
            iat: now as u64,
            exp: (now + exp_offset) as u64,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn validator() -> JwtValidator {
        JwtValidator::new(SECRET, "authenticated".to_string(), Duration::from_secs(0))
    }

    #[test]
    fn accepts_valid_token() {
        let id = Uuid::now_v7();
        let user = validator()
            .validate_token(&token(&id.to_string(), "authenticated", 600, SECRET))
            .unwrap();
        assert_eq!(user.user_id, id);
        assert_eq!(user.email.as_deref(), Some("ayu@example.org"));
        assert!(user.roles.is_empty());
    }

    #[test]
    fn rejects_wrong_secret() {
        let id = Uuid::now_v7().to_string();
        let result = validator().validate_token(&token(&id, "authenticated", 600, "other-secret"));
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn rejects_wrong_audience() {
        let id = Uuid::now_v7().to_string();
        let result = validator().validate_token(&token(&id, "anon", 600, SECRET));
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let id = Uuid::now_v7().to_string();
        let result = validator().validate_token(&token(&id, "authenticated", -120, SECRET));
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn rejects_non_uuid_subject() {
        let result = validator().validate_token(&token("service-role", "authenticated", 600, SECRET));
        assert!(matches!(result, Err(AppError::Auth(_))));
    }
}
