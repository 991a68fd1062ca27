// Copyright (c) Ripple Social Team
// SPDX-License-Identifier: Apache-2.0

//! Identity context resolution.
//!
//! Requests carry an HS256 bearer token with `{sub, role, exp}` claims.
//! Token issuance (login, refresh) lives outside this service; this module
//! only turns a credential into an acting user, and exposes a signing
//! helper so operators and tests can mint tokens.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::AuthConfig;
use crate::error::Error;
use crate::models::user::Role;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    role: Role,
    exp: i64,
}

/// Signing and verification keys, built once from the configured secret.
#[derive(Clone)]
pub struct AuthKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    token_ttl: Duration,
}

impl AuthKeys {
    pub fn new(config: &AuthConfig) -> Self {
        AuthKeys {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            token_ttl: Duration::hours(config.token_ttl_hours),
        }
    }

    /// Mint a token for the given user.
    pub fn sign(&self, user_id: Uuid, role: Role) -> Result<String, Error> {
        let claims = Claims {
            sub: user_id,
            role,
            exp: (Utc::now() + self.token_ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| Error::Unauthenticated)
    }

    /// Verify a token and resolve the acting user. Expired or malformed
    /// tokens are indistinguishable to the caller.
    pub fn verify(&self, token: &str) -> Result<AuthUser, Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|_| Error::Unauthenticated)?;

        Ok(AuthUser {
            user_id: data.claims.sub,
            role: data.claims.role,
        })
    }
}

/// The acting user of a request.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), Error> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(Error::Forbidden("admin access required".to_string()))
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(Error::Unauthenticated)?;
        state.auth.verify(token)
    }
}

/// Optional variant for endpoints that serve anonymous viewers too; an
/// invalid credential degrades to no viewer rather than a rejection.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = bearer_token(parts).and_then(|token| state.auth.verify(token).ok());
        Ok(MaybeAuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(ttl_hours: i64) -> AuthKeys {
        AuthKeys::new(&AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_hours: ttl_hours,
        })
    }

    #[test]
    fn test_sign_verify_round_trip() {
        let keys = keys(1);
        let user_id = Uuid::new_v4();

        let token = keys.sign(user_id, Role::Admin).unwrap();
        let resolved = keys.verify(&token).unwrap();

        assert_eq!(resolved.user_id, user_id);
        assert_eq!(resolved.role, Role::Admin);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = keys(-1);
        let token = keys.sign(Uuid::new_v4(), Role::User).unwrap();

        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(keys(1).verify("not-a-token").is_err());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = keys(1).sign(Uuid::new_v4(), Role::User).unwrap();

        let other = AuthKeys::new(&AuthConfig {
            jwt_secret: "another-secret".to_string(),
            token_ttl_hours: 1,
        });

        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_require_admin() {
        let admin = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::Admin,
        };
        let user = AuthUser {
            user_id: Uuid::new_v4(),
            role: Role::User,
        };

        assert!(admin.require_admin().is_ok());
        assert!(user.require_admin().is_err());
    }
}
