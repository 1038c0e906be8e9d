//! Guest draft sessions and remote document generation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Page code restores a guest's in-progress form through
//! [`DraftSessionStore`], writes every edit back through it, and finally hands
//! the draft to [`GenerationClient`], which posts it to the document
//! generation webhook.
//!
//! TRADE-OFFS
//! ==========
//! Drafts are a convenience: storage failures are logged and swallowed inside
//! the store, while network and configuration failures always reach the
//! caller so the UI can render them.

pub mod clock;
pub mod draft;
pub mod generation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use draft::form::AttestationDraft;
pub use draft::storage::{DraftStorage, MemoryStorage, StorageError};
pub use draft::store::{DraftSessionStore, DraftStoreConfig, Restored, StorePhase};
pub use generation::client::GenerationClient;
pub use generation::config::GenerationConfig;
pub use generation::types::{GenerationError, GenerationOutcome, GenerationRequest, GenerationResult, GenerationStatus};

#[cfg(feature = "hydrate")]
pub use draft::storage::LocalStorage;
