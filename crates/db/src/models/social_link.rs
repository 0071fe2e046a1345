//! Social link models and DTOs.

use atelier_core::patch::{non_null, nullable};
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `social_links` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: DbId,
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSocialLink {
    pub platform: String,
    pub url: String,
    pub icon: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSocialLink {
    #[serde(default, deserialize_with = "non_null")]
    pub platform: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub icon: Option<Option<String>>,
    #[serde(default, rename = "order", deserialize_with = "non_null")]
    pub sort_order: Option<i32>,
}
