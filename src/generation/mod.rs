//! Document generation — posting a finished draft to the automation webhook.
//!
//! DESIGN
//! ======
//! `config` resolves the webhook URL from the environment, `types` holds the
//! request/response wire shapes and errors, and `client` performs the single
//! `POST`. The client keeps no state between calls.

pub mod client;
pub mod config;
pub mod types;
