/// API route modules
pub mod health;
pub mod markers;
pub mod pages;
pub mod rukus;
pub mod search;
pub mod surahs;

use crate::error::{Result, ServerError};

/// Parse a numeric path or query parameter, answering 400 on garbage
pub(crate) fn parse_number(raw: Option<&str>, what: &str) -> Result<i64> {
    raw.map(str::trim)
        .and_then(|value| value.parse::<i64>().ok())
        .ok_or_else(|| ServerError::BadRequest(format!("Invalid {what}")))
}
