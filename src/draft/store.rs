//! Draft session store — restore, write-through update, expiry, clear.
//!
//! DESIGN
//! ======
//! The store keeps an in-memory mirror of the current draft and writes the
//! whole session envelope through to storage on every update. Expiry is a
//! sliding window checked lazily on `restore`; nothing sweeps in the
//! background.
//!
//! ERROR HANDLING
//! ==============
//! Storage failures (unreadable, malformed, quota) are logged at `warn` and
//! treated as "no draft". A store built without storage keeps only the
//! in-memory mirror and never touches a backend.
//!
//! TRADE-OFFS
//! ==========
//! Two tabs editing the same draft race with last-write-wins. There is no
//! version stamp on the envelope.

use serde::Serialize;
use serde::de::DeserializeOwned;
use time::{Duration, OffsetDateTime};
use tracing::{debug, warn};

use super::session::{Session, generate_session_id};
use super::storage::{DraftStorage, StorageError};
use crate::clock::{Clock, SystemClock};
use crate::generation::types::GenerationRequest;

pub const DEFAULT_DRAFT_KEY: &str = "guest_form_draft";
pub const DEFAULT_SESSION_ID_KEY: &str = "guest_session_id";
pub const DEFAULT_DRAFT_TTL: Duration = Duration::hours(4);

/// Storage keys and expiry window for one draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftStoreConfig {
    /// Key holding the JSON session envelope.
    pub draft_key: String,
    /// Key holding the bare guest session id.
    pub session_id_key: String,
    /// Sliding expiry window, refreshed on every update.
    pub ttl: Duration,
}

impl Default for DraftStoreConfig {
    fn default() -> Self {
        Self {
            draft_key: DEFAULT_DRAFT_KEY.to_owned(),
            session_id_key: DEFAULT_SESSION_ID_KEY.to_owned(),
            ttl: DEFAULT_DRAFT_TTL,
        }
    }
}

/// Where the store sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorePhase {
    /// Built, `restore` not yet called.
    Uninitialized,
    /// Restored with no live draft (absent, expired, or unreadable).
    Empty,
    /// Holding a draft, either restored or written by `update`.
    WithDraft,
    /// Explicitly cleared; no draft and no session id.
    Cleared,
}

/// Outcome of [`DraftSessionStore::restore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Restored<T> {
    pub draft: T,
    /// `true` when `draft` came from a live persisted session.
    pub restored: bool,
    pub last_saved_at: Option<OffsetDateTime>,
}

/// Single named, expiring draft persisted through a [`DraftStorage`].
pub struct DraftSessionStore<T, S, C = SystemClock> {
    storage: Option<S>,
    clock: C,
    config: DraftStoreConfig,
    default_draft: T,
    draft: T,
    session_id: Option<String>,
    last_saved_at: Option<OffsetDateTime>,
    phase: StorePhase,
}

impl<T, S> DraftSessionStore<T, S, SystemClock>
where
    T: Serialize + DeserializeOwned + Clone,
    S: DraftStorage,
{
    /// Build a store with default keys and TTL on the system clock.
    ///
    /// Pass `None` for `storage` when no persistent storage is available
    /// (server rendering, storage disabled); every operation then stays
    /// in memory.
    pub fn new(storage: Option<S>, default_draft: T) -> Self {
        Self::with_clock(storage, default_draft, DraftStoreConfig::default(), SystemClock)
    }
}

impl<T, S, C> DraftSessionStore<T, S, C>
where
    T: Serialize + DeserializeOwned + Clone,
    S: DraftStorage,
    C: Clock,
{
    pub fn with_clock(storage: Option<S>, default_draft: T, config: DraftStoreConfig, clock: C) -> Self {
        Self {
            storage,
            clock,
            config,
            draft: default_draft.clone(),
            default_draft,
            session_id: None,
            last_saved_at: None,
            phase: StorePhase::Uninitialized,
        }
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    /// Load the persisted draft if one is live.
    ///
    /// An expired envelope is removed from storage. A malformed one is
    /// ignored and left for the next `update` to overwrite. Calling this
    /// again re-reads storage and yields the same answer.
    pub fn restore(&mut self) -> Restored<T> {
        let Some(storage) = &self.storage else {
            if self.phase == StorePhase::Uninitialized {
                self.phase = StorePhase::Empty;
            }
            return Restored { draft: self.draft.clone(), restored: false, last_saved_at: None };
        };

        if let Some(session) = load_live_session::<T, S>(storage, &self.config, self.clock.now()) {
            debug!(session_id = %session.guest_session_id, last_updated = %session.last_updated, "draft restored");
            self.draft = session.form_data;
            self.session_id = Some(session.guest_session_id);
            self.last_saved_at = Some(session.last_updated);
            self.phase = StorePhase::WithDraft;
            return Restored { draft: self.draft.clone(), restored: true, last_saved_at: self.last_saved_at };
        }

        self.draft = self.default_draft.clone();
        self.session_id = read_stable_session_id(storage, &self.config);
        self.last_saved_at = None;
        self.phase = StorePhase::Empty;
        Restored { draft: self.draft.clone(), restored: false, last_saved_at: None }
    }

    /// Replace the draft and write it through with a refreshed expiry.
    ///
    /// Never fails: storage errors are logged and the in-memory draft is
    /// kept regardless.
    pub fn update(&mut self, draft: T) {
        if self.phase == StorePhase::Uninitialized {
            warn!(key = %self.config.draft_key, "draft updated before restore; a live persisted draft may be overwritten");
        }
        self.draft = draft;
        self.phase = StorePhase::WithDraft;

        let Some(storage) = &self.storage else {
            return;
        };

        let session_id = self
            .session_id
            .take()
            .or_else(|| read_stable_session_id(storage, &self.config))
            .unwrap_or_else(generate_session_id);
        let now = self.clock.now();
        let session = Session::new(session_id, &self.draft, now, self.config.ttl);

        match write_draft(storage, &self.config, &session) {
            Ok(()) => self.last_saved_at = Some(now),
            Err(e) => {
                warn!(error = %e, code = e.error_code(), key = %self.config.draft_key, "draft persist failed");
            }
        }
        if let Err(e) = storage.set_item(&self.config.session_id_key, &session.guest_session_id) {
            warn!(error = %e, code = e.error_code(), key = %self.config.session_id_key, "session id persist failed");
        }
        self.session_id = Some(session.guest_session_id);
    }

    /// Drop the draft and the guest session id, in memory and in storage.
    pub fn clear(&mut self) {
        self.draft = self.default_draft.clone();
        self.session_id = None;
        self.last_saved_at = None;
        self.phase = StorePhase::Cleared;

        let Some(storage) = &self.storage else {
            return;
        };
        for key in [&self.config.draft_key, &self.config.session_id_key] {
            if let Err(e) = storage.remove_item(key) {
                warn!(error = %e, code = e.error_code(), %key, "draft clear failed");
            }
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    #[must_use]
    pub fn draft(&self) -> &T {
        &self.draft
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    #[must_use]
    pub fn last_saved_at(&self) -> Option<OffsetDateTime> {
        self.last_saved_at
    }

    #[must_use]
    pub fn phase(&self) -> StorePhase {
        self.phase
    }

    /// `false` when the store was built without a storage backend.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }

    #[must_use]
    pub fn config(&self) -> &DraftStoreConfig {
        &self.config
    }

    /// Bundle the current draft and guest session id for submission.
    #[must_use]
    pub fn generation_request(&self, user_id: Option<String>) -> GenerationRequest<T> {
        GenerationRequest { draft: self.draft.clone(), guest_session_id: self.session_id.clone(), user_id }
    }
}

// =============================================================================
// STORAGE HELPERS
// =============================================================================

fn load_live_session<T, S>(storage: &S, config: &DraftStoreConfig, now: OffsetDateTime) -> Option<Session<T>>
where
    T: DeserializeOwned,
    S: DraftStorage,
{
    let raw = match storage.get_item(&config.draft_key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, code = e.error_code(), key = %config.draft_key, "draft read failed");
            return None;
        }
    };

    // Expiry is judged on the envelope alone so a stale draft whose form
    // shape no longer matches `T` is still purged.
    let envelope = match Session::<serde_json::Value>::decode(&raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            warn!(error = %e, code = e.error_code(), key = %config.draft_key, "ignoring malformed draft");
            return None;
        }
    };

    if envelope.is_expired(now) {
        debug!(session_id = %envelope.guest_session_id, expires_at = envelope.expires_at, "draft expired; purging");
        if let Err(e) = storage.remove_item(&config.draft_key) {
            warn!(error = %e, code = e.error_code(), key = %config.draft_key, "expired draft purge failed");
        }
        return None;
    }

    match envelope.into_form::<T>() {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(error = %e, code = e.error_code(), key = %config.draft_key, "ignoring draft with unreadable form data");
            None
        }
    }
}

fn read_stable_session_id<S: DraftStorage>(storage: &S, config: &DraftStoreConfig) -> Option<String> {
    match storage.get_item(&config.session_id_key) {
        Ok(id) => id.filter(|id| !id.trim().is_empty()),
        Err(e) => {
            warn!(error = %e, code = e.error_code(), key = %config.session_id_key, "session id read failed");
            None
        }
    }
}

fn write_draft<T, S>(storage: &S, config: &DraftStoreConfig, session: &Session<&T>) -> Result<(), StorageError>
where
    T: Serialize,
    S: DraftStorage,
{
    let raw = session.encode()?;
    storage.set_item(&config.draft_key, &raw)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
