//! Server-side token issuance.
//!
//! Tokens are HS256 JWTs signed with the platform API secret. User tokens
//! carry the account id and an expiry; server tokens authenticate this
//! backend's own REST calls and carry the `server` claim instead.

use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::config::StreamConfig;
use crate::domain::UserId;

use super::error::ChatResult;

/// Clock-skew allowance subtracted from the issued-at claim.
const ISSUED_AT_LEEWAY_SECS: i64 = 60;

/// Claims of a user token.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserClaims {
    /// Account the token authenticates.
    pub user_id: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Claims of a server-to-server token.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerClaims {
    /// Marks the token as a backend credential.
    pub server: bool,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
}

/// Issue a signed token for one account, valid for the configured TTL.
///
/// # Errors
/// Returns an error if signing fails.
pub fn user_token(config: &StreamConfig, user_id: &UserId) -> ChatResult<String> {
    let now = Utc::now().timestamp();
    let ttl = i64::try_from(config.token_ttl.as_secs()).unwrap_or(3600);
    let claims = UserClaims {
        user_id: user_id.to_string(),
        iat: now - ISSUED_AT_LEEWAY_SECS,
        exp: now + ttl,
    };
    sign(config, &claims)
}

/// Issue the backend's own credential for platform REST calls.
///
/// # Errors
/// Returns an error if signing fails.
pub fn server_token(config: &StreamConfig) -> ChatResult<String> {
    let claims = ServerClaims {
        server: true,
        iat: Utc::now().timestamp() - ISSUED_AT_LEEWAY_SECS,
    };
    sign(config, &claims)
}

/// Sign any claim set with the configured secret.
fn sign<T: Serialize>(config: &StreamConfig, claims: &T) -> ChatResult<String> {
    let key = EncodingKey::from_secret(config.api_secret.as_bytes());
    encode(&Header::default(), claims, &key).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

    use super::*;

    #[test]
    fn test_user_token_claims() {
        let config = StreamConfig::new("key", "super-secret");
        let user = UserId::new("u1").ok();
        assert!(user.is_some());

        let token = user.and_then(|u| user_token(&config, &u).ok());
        assert!(token.is_some());

        let decoded = token.and_then(|t| {
            decode::<UserClaims>(
                &t,
                &DecodingKey::from_secret(b"super-secret"),
                &Validation::new(Algorithm::HS256),
            )
            .ok()
        });
        let now = Utc::now().timestamp();
        let claims = decoded.map(|d| d.claims);
        assert_eq!(claims.as_ref().map(|c| c.user_id.as_str()), Some("u1"));
        assert!(claims.as_ref().is_some_and(|c| c.iat <= now));
        assert!(claims.is_some_and(|c| c.exp > now));
    }

    #[test]
    fn test_server_token_carries_server_claim() {
        let config = StreamConfig::new("key", "super-secret");
        let token = server_token(&config).ok();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims::<&str>(&[]);

        let decoded = token.and_then(|t| {
            decode::<ServerClaims>(&t, &DecodingKey::from_secret(b"super-secret"), &validation).ok()
        });
        assert_eq!(decoded.map(|d| d.claims.server), Some(true));
    }

    #[test]
    fn test_wrong_secret_fails_verification() {
        let config = StreamConfig::new("key", "super-secret");
        let user = UserId::new("u1").ok();
        let token = user.and_then(|u| user_token(&config, &u).ok());

        let decoded = token.and_then(|t| {
            decode::<UserClaims>(
                &t,
                &DecodingKey::from_secret(b"other-secret"),
                &Validation::new(Algorithm::HS256),
            )
            .ok()
        });
        assert!(decoded.is_none());
    }
}
