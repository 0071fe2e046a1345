//! Promotional banner models and DTOs.

use atelier_core::patch::{non_null, nullable};
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `ad_banners` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdBanner {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    pub is_active: bool,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a banner. `is_active` defaults to `true`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdBanner {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub button_text: Option<String>,
    pub is_active: Option<bool>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdBanner {
    #[serde(default, deserialize_with = "non_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub link_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub button_text: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub is_active: Option<bool>,
    #[serde(default, rename = "order", deserialize_with = "non_null")]
    pub sort_order: Option<i32>,
}
