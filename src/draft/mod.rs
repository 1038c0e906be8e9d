//! Guest draft persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! `storage` is the key/value port over browser-local storage, `session`
//! defines the persisted envelope, `store` owns restore/update/clear, and
//! `form` is the attestation form shape the pages persist.

pub mod form;
pub mod session;
pub mod storage;
pub mod store;
