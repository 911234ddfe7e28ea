//! Note submission contract: trim, validate, then persist.
//!
//! Validation always runs before the store is touched, so an invalid
//! submission never reaches SQLite.

use thiserror::Error;

use crate::db::Database;
use crate::models::Note;

/// Maximum author length in characters, after trimming.
pub const MAX_AUTHOR_LEN: usize = 50;
/// Maximum text length in characters, after trimming.
pub const MAX_TEXT_LEN: usize = 280;

/// Client-supplied data violates the presence/length rules.
/// The display strings are the exact bodies returned over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("author and text are required")]
    MissingField,
    #[error("author<=50, text<=280")]
    TooLong,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Trim both fields and check presence before length.
/// Returns the trimmed `(author, text)` pair on success.
pub fn validate<'a>(
    author_raw: &'a str,
    text_raw: &'a str,
) -> Result<(&'a str, &'a str), ValidationError> {
    let author = author_raw.trim();
    let text = text_raw.trim();

    if author.is_empty() || text.is_empty() {
        return Err(ValidationError::MissingField);
    }
    if author.chars().count() > MAX_AUTHOR_LEN || text.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong);
    }

    Ok((author, text))
}

/// Validate a submission and append it to the store.
pub fn submit(db: &Database, author_raw: &str, text_raw: &str) -> Result<Note, SubmitError> {
    let (author, text) = validate(author_raw, text_raw)?;
    Ok(db.insert_note(author, text)?)
}
