//! Domain models for the note board.
//!
//! # Core Concepts
//!
//! ## Persisted
//!
//! - [`Note`]: An append-only author/text record. Notes are never updated or
//!   deleted once created; the listing endpoint returns the newest ones first.
//!
//! ## Transient
//!
//! - [`ChatRequest`]: A chat payload relayed to the external language-model
//!   provider. Lives only for one request/response cycle.

mod chat;
mod note;

pub use chat::*;
pub use note::*;
