//! Session token encoding.
//!
//! A token is the standard Base64 encoding of a JSON object
//! `{"id", "email", "role", "timestamp"}`, with `timestamp` in unix
//! milliseconds. There is no signature: anyone holding the store can mint a
//! token, so it identifies a session but proves nothing.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mediflux_core::{Email, Role, UserId};

use crate::models::User;

/// Errors decoding a session token.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: UserId,
    pub email: Email,
    pub role: Role,
    /// Issue time, unix milliseconds.
    pub timestamp: i64,
}

impl TokenClaims {
    /// Claims for `user`, issued at `issued_at`.
    #[must_use]
    pub fn for_user(user: &User, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            timestamp: issued_at.timestamp_millis(),
        }
    }

    /// Encode as a token string.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the claims cannot be serialized.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(self)?;
        Ok(STANDARD.encode(json))
    }

    /// Decode a token string. Performs no integrity or expiry check.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the token is not Base64-encoded claims JSON.
    pub fn decode(token: &str) -> Result<Self, TokenError> {
        let bytes = STANDARD.decode(token.trim())?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Whether the token is older than `max_age` at `now`.
    ///
    /// A token stamped in the future is not expired.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>, max_age: TimeDelta) -> bool {
        let age_millis = now.timestamp_millis().saturating_sub(self.timestamp);
        age_millis > max_age.num_milliseconds()
    }

    /// Whether these claims describe `user` in `role`.
    #[must_use]
    pub fn matches(&self, user: &User, role: Role) -> bool {
        self.id == user.id && self.role == role && user.role == role
    }
}
