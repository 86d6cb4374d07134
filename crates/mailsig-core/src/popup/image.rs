//! Image URL validation for the insert-image action.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::{Error, Result};

#[allow(clippy::expect_used)] // Pattern is a literal
static IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^https?://.+\.(jpg|jpeg|png|gif|svg)$")
        .case_insensitive(true)
        .build()
        .expect("image URL pattern compiles")
});

/// Returns true for an http(s) URL ending in a supported picture extension.
#[must_use]
pub fn is_valid_image_url(url: &str) -> bool {
    IMAGE_URL.is_match(url)
}

/// Validates the answer to the image URL prompt.
///
/// A cancelled or empty prompt yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`Error::InvalidImageUrl`] for any other non-matching input.
pub fn validate_image_url(input: Option<&str>) -> Result<Option<&str>> {
    match input {
        None | Some("") => Ok(None),
        Some(url) if is_valid_image_url(url) => Ok(Some(url)),
        Some(url) => Err(Error::InvalidImageUrl(url.to_string())),
    }
}
