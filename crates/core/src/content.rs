//! Collection kinds, reorder payloads, and field validation rules shared by
//! the content handlers.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of short text fields (titles, names, labels).
pub const MAX_SHORT_TEXT_LEN: usize = 300;

/// Maximum length of long text fields (descriptions, bodies, quotes).
pub const MAX_LONG_TEXT_LEN: usize = 10_000;

/// Maximum length of a URL or site path.
pub const MAX_URL_LEN: usize = 2048;

/// Maximum number of rows accepted by a single reorder call.
pub const MAX_REORDER_ITEMS: usize = 500;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub const MIN_SKILL_LEVEL: i32 = 0;
pub const MAX_SKILL_LEVEL: i32 = 100;

// ---------------------------------------------------------------------------
// Collection kinds
// ---------------------------------------------------------------------------

/// The `type` query parameter of `/api/artworks`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArtworkKind {
    #[default]
    Gallery,
    Carousel,
    Scroll,
}

impl ArtworkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtworkKind::Gallery => "gallery",
            ArtworkKind::Carousel => "carousel",
            ArtworkKind::Scroll => "scroll",
        }
    }

    /// Parse an optional `type` parameter, defaulting to the gallery.
    pub fn from_param(param: Option<&str>) -> Result<Self, CoreError> {
        param.map_or(Ok(Self::default()), str::parse)
    }
}

impl FromStr for ArtworkKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gallery" => Ok(ArtworkKind::Gallery),
            "carousel" => Ok(ArtworkKind::Carousel),
            "scroll" => Ok(ArtworkKind::Scroll),
            other => Err(CoreError::InvalidInput(format!(
                "Invalid type '{other}'. Expected one of: gallery, carousel, scroll"
            ))),
        }
    }
}

/// The `type` query parameter of `/api/testimonials`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TestimonialKind {
    #[default]
    Testimonials,
    Skills,
}

impl TestimonialKind {
    pub fn from_param(param: Option<&str>) -> Result<Self, CoreError> {
        param.map_or(Ok(Self::default()), str::parse)
    }
}

impl FromStr for TestimonialKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "testimonials" => Ok(TestimonialKind::Testimonials),
            "skills" => Ok(TestimonialKind::Skills),
            other => Err(CoreError::InvalidInput(format!(
                "Invalid type '{other}'. Expected one of: testimonials, skills"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

/// One `{id, order}` pair of a reorder request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderItem {
    pub id: DbId,
    pub order: i32,
}

/// Body of a `PATCH` reorder request.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub items: Vec<ReorderItem>,
}

/// Reject empty, oversized, duplicate-id, or negative-order reorder payloads.
pub fn validate_reorder(items: &[ReorderItem]) -> Result<(), CoreError> {
    if items.is_empty() {
        return Err(CoreError::InvalidInput(
            "items must contain at least one entry".to_string(),
        ));
    }
    if items.len() > MAX_REORDER_ITEMS {
        return Err(CoreError::InvalidInput(format!(
            "items must contain at most {MAX_REORDER_ITEMS} entries, got {}",
            items.len()
        )));
    }
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id) {
            return Err(CoreError::InvalidInput(format!(
                "duplicate id {} in items",
                item.id
            )));
        }
        validate_order(item.order)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// A required text field must be non-blank and at most `max_len` bytes.
pub fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidInput(format!("{field} is required")));
    }
    check_len(field, value, max_len)
}

/// An optional text field, when present, must be at most `max_len` bytes.
pub fn optional_text(field: &str, value: Option<&str>, max_len: usize) -> Result<(), CoreError> {
    match value {
        Some(v) => check_len(field, v, max_len),
        None => Ok(()),
    }
}

fn check_len(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.len() > max_len {
        return Err(CoreError::InvalidInput(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// URL fields accept an absolute http(s) URL or a site-relative path
/// (`/images/a.png`).
///
/// Empty strings are accepted so optional fields can be blanked from the
/// dashboard; use [`require_text`] first for required URLs.
pub fn validate_url(field: &str, value: &str) -> Result<(), CoreError> {
    check_len(field, value, MAX_URL_LEN)?;
    if value.is_empty() {
        return Ok(());
    }
    let site_relative = value.starts_with('/') && !value.starts_with("//");
    let http = value.starts_with("http://") || value.starts_with("https://");
    if site_relative || (http && value.validate_url()) {
        return Ok(());
    }
    Err(CoreError::InvalidInput(format!(
        "{field} must be an absolute URL or a path starting with '/'"
    )))
}

/// Validate an optional URL field.
pub fn optional_url(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    value.map_or(Ok(()), |v| validate_url(field, v))
}

pub fn validate_email(value: &str) -> Result<(), CoreError> {
    if value.validate_email() {
        Ok(())
    } else {
        Err(CoreError::InvalidInput(format!(
            "'{value}' is not a valid email address"
        )))
    }
}

pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::InvalidInput(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

pub fn validate_skill_level(level: i32) -> Result<(), CoreError> {
    if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&level) {
        return Err(CoreError::InvalidInput(format!(
            "level must be between {MIN_SKILL_LEVEL} and {MAX_SKILL_LEVEL}, got {level}"
        )));
    }
    Ok(())
}

pub fn validate_order(order: i32) -> Result<(), CoreError> {
    if order < 0 {
        return Err(CoreError::InvalidInput(format!(
            "order must be >= 0, got {order}"
        )));
    }
    Ok(())
}

/// Visit paths are site-relative and bounded.
pub fn validate_visit_path(path: &str) -> Result<(), CoreError> {
    if !path.starts_with('/') {
        return Err(CoreError::InvalidInput(
            "path must start with '/'".to_string(),
        ));
    }
    check_len("path", path, MAX_URL_LEN)
}
