//! Stateless HS256 session tokens carrying `{sub, role, iat, exp}`.
//!
//! Verification walks the guard states in order: no token, bad or expired
//! token, incomplete claims, and finally an [`AuthContext`].

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::domain::{AuthContext, Role};
use crate::errors::AppError;

pub const MISSING_TOKEN: &str = "Missing token";
pub const INVALID_TOKEN: &str = "Invalid or expired token";
pub const INVALID_PAYLOAD: &str = "Invalid token payload";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    iat: i64,
    exp: i64,
}

pub struct SessionTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl SessionTokens {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    pub fn issue(&self, user_id: &str, role: Role) -> Result<String, AppError> {
        let exp = Utc::now().timestamp().saturating_add(self.ttl_secs);
        self.issue_with_expiry(user_id, role, exp)
    }

    /// Issue a token expiring at the unix timestamp `exp`.
    pub fn issue_with_expiry(&self, user_id: &str, role: Role, exp: i64) -> Result<String, AppError> {
        let claims = Claims {
            sub: Some(user_id.to_string()),
            role: Some(role.as_str().to_string()),
            iat: Utc::now().timestamp(),
            exp,
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::system(format!("token signing failed: {e}")))
    }

    pub fn verify(&self, token: Option<&str>) -> Result<AuthContext, AppError> {
        let token = match token.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AppError::authorization(MISSING_TOKEN)),
        };

        let claims = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::InvalidToken
                | JwtErrorKind::InvalidSignature
                | JwtErrorKind::ExpiredSignature
                | JwtErrorKind::ImmatureSignature
                | JwtErrorKind::InvalidAlgorithm
                | JwtErrorKind::MissingRequiredClaim(_)
                | JwtErrorKind::Base64(_)
                | JwtErrorKind::Utf8(_)
                | JwtErrorKind::Json(_) => AppError::authorization(INVALID_TOKEN),
                _ => AppError::system(format!("token verification failed: {e}")),
            })?
            .claims;

        let (Some(user_id), Some(role)) = (claims.sub.filter(|s| !s.is_empty()), claims.role) else {
            return Err(AppError::authorization(INVALID_PAYLOAD));
        };
        let user_role = role.parse::<Role>().map_err(|_| AppError::authorization(INVALID_PAYLOAD))?;
        Ok(AuthContext { user_id, user_role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn tokens() -> SessionTokens {
        SessionTokens::new("unit-test-secret", 3600)
    }

    #[test]
    fn issued_token_verifies() {
        let t = tokens();
        let token = t.issue("507f1f77bcf86cd799439011", Role::Admin).unwrap();
        let ctx = t.verify(Some(&token)).unwrap();
        assert_eq!(ctx.user_id, "507f1f77bcf86cd799439011");
        assert_eq!(ctx.user_role, Role::Admin);
    }

    #[test]
    fn missing_token() {
        for input in [None, Some(""), Some("   ")] {
            let err = tokens().verify(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Authorization);
            assert_eq!(err.message(), MISSING_TOKEN);
        }
    }

    #[test]
    fn expired_and_foreign_tokens_share_one_message() {
        let t = tokens();
        let expired = t.issue_with_expiry("u1", Role::Admin, Utc::now().timestamp() - 10).unwrap();
        let foreign = SessionTokens::new("another-secret", 3600).issue("u1", Role::Admin).unwrap();
        for token in [expired.as_str(), foreign.as_str(), "not.a.jwt", "garbage"] {
            let err = t.verify(Some(token)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Authorization, "{token}");
            assert_eq!(err.message(), INVALID_TOKEN, "{token}");
        }
    }

    #[test]
    fn incomplete_claims_are_rejected() {
        let t = tokens();
        let exp = Utc::now().timestamp() + 60;
        let no_role = Claims { sub: Some("u1".into()), role: None, iat: 0, exp };
        let no_sub = Claims { sub: None, role: Some("admin".into()), iat: 0, exp };
        let odd_role = Claims { sub: Some("u1".into()), role: Some("root".into()), iat: 0, exp };
        for claims in [no_role, no_sub, odd_role] {
            let token = encode(&Header::default(), &claims, &t.encoding).unwrap();
            let err = t.verify(Some(&token)).unwrap_err();
            assert_eq!(err.message(), INVALID_PAYLOAD);
        }
    }
}
