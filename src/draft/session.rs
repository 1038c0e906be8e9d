//! Persisted guest session envelope.
//!
//! The JSON shape is shared with drafts written by earlier releases of the
//! site and must stay readable:
//!
//! ```json
//! {"guest_session_id":"guest_…","last_updated":"2024-05-01T09:30:00Z",
//!  "expires_at":1714570200000,"form_data":{…}}
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::storage::StorageError;
use crate::clock::epoch_millis;

/// A draft wrapped with its guest identity and expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session<T> {
    pub guest_session_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
    /// Expiry instant in epoch milliseconds.
    pub expires_at: i64,
    pub form_data: T,
}

impl<T> Session<T> {
    /// Stamp `form_data` at `now`, expiring `ttl` later. An expiry past the
    /// representable range saturates instead of overflowing.
    pub fn new(guest_session_id: String, form_data: T, now: OffsetDateTime, ttl: Duration) -> Self {
        let expires_at = match now.checked_add(ttl) {
            Some(at) => epoch_millis(at),
            None if ttl.is_negative() => i64::MIN,
            None => i64::MAX,
        };
        Self { guest_session_id, last_updated: now, expires_at, form_data }
    }

    /// A session is live up to and including its expiry instant.
    #[must_use]
    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        epoch_millis(now) > self.expires_at
    }
}

impl<T: Serialize> Session<T> {
    /// Serialize to the stored JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Encode`] when the draft cannot be serialized.
    pub fn encode(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|e| StorageError::Encode(e.to_string()))
    }
}

impl<T: DeserializeOwned> Session<T> {
    /// Parse a stored JSON blob.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Decode`] for malformed JSON or a shape mismatch.
    pub fn decode(raw: &str) -> Result<Self, StorageError> {
        serde_json::from_str(raw).map_err(|e| StorageError::Decode(e.to_string()))
    }
}

impl Session<serde_json::Value> {
    /// Convert the raw `form_data` of an envelope decoded without a form type.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Decode`] when `form_data` does not fit `T`.
    pub fn into_form<T: DeserializeOwned>(self) -> Result<Session<T>, StorageError> {
        let form_data = serde_json::from_value(self.form_data).map_err(|e| StorageError::Decode(e.to_string()))?;
        Ok(Session {
            guest_session_id: self.guest_session_id,
            last_updated: self.last_updated,
            expires_at: self.expires_at,
            form_data,
        })
    }
}

/// Generate a fresh opaque guest session id.
#[must_use]
pub fn generate_session_id() -> String {
    format!("guest_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
