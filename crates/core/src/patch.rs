//! Tri-state deserialization for partial updates.
//!
//! Update DTOs use `Option<Option<T>>` for clearable fields:
//!
//! - field absent      -> `None` (leave the column untouched)
//! - field is `null`   -> `Some(None)` (clear the column)
//! - field has a value -> `Some(Some(value))`
//!
//! Plain serde collapses `null` and "absent" into the same outer `None`, so
//! clearable fields must be annotated with
//! `#[serde(default, deserialize_with = "atelier_core::patch::nullable")]`.
//!
//! Fields that may be omitted but never cleared (required columns) use
//! [`non_null`] instead, which turns an explicit `null` into an error.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Deserialize a present field (possibly `null`) into `Some(inner)`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize a present field, rejecting `null`.
pub fn non_null<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer)?
        .map(Some)
        .ok_or_else(|| D::Error::custom("field cannot be null"))
}

/// Split a tri-state field into the `(provided, value)` pair bound by
/// repository `CASE WHEN $n THEN $m ELSE column END` updates.
pub fn split<T>(field: &Option<Option<T>>) -> (bool, Option<&T>) {
    (field.is_some(), field.as_ref().and_then(|v| v.as_ref()))
}
