//! Helpers shared by the per-resource operations.

use models::slug::{slugify, truncate};

use crate::errors::{AppError, StoreError};

/// Slug for a display value, at most `max` characters; an explicit slug is
/// the fallback when the display value has no letters or digits.
pub(crate) fn derive_slug(
    field: &str,
    display: &str,
    explicit: Option<String>,
    max: usize,
) -> Result<String, AppError> {
    let derived = slugify(display);
    if !derived.is_empty() {
        return Ok(truncate(&derived, max).to_string());
    }
    explicit
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::invalid_field(field, "Must contain at least one letter or number"))
}

/// Write-path translation where a malformed id means "no such record".
pub(crate) fn absent_on_cast(err: StoreError, entity: &str, not_found: &str) -> AppError {
    match err {
        StoreError::Cast(_) => AppError::not_found(not_found),
        other => other.into_app_error(entity),
    }
}
