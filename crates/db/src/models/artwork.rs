//! Artwork models and DTOs: gallery pieces, carousel slides, and scroll
//! story sections. All three are ordered collections served by
//! `/api/artworks?type=...`.

use atelier_core::patch::{non_null, nullable};
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// A row from the `gallery_artworks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryArtwork {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: String,
    pub medium: Option<String>,
    pub dimensions: Option<String>,
    pub year: Option<i32>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a gallery artwork. A missing `order` appends.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryArtwork {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: String,
    pub medium: Option<String>,
    pub dimensions: Option<String>,
    pub year: Option<i32>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

/// DTO for partially updating a gallery artwork.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryArtwork {
    #[serde(default, deserialize_with = "non_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub medium: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub dimensions: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub year: Option<Option<i32>>,
    #[serde(default, rename = "order", deserialize_with = "non_null")]
    pub sort_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Carousel
// ---------------------------------------------------------------------------

/// A row from the `carousel_artworks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselArtwork {
    pub id: DbId,
    pub title: String,
    pub image_url: String,
    pub caption: Option<String>,
    pub link_url: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarouselArtwork {
    pub title: String,
    pub image_url: String,
    pub caption: Option<String>,
    pub link_url: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarouselArtwork {
    #[serde(default, deserialize_with = "non_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub caption: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub link_url: Option<Option<String>>,
    #[serde(default, rename = "order", deserialize_with = "non_null")]
    pub sort_order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Scroll content
// ---------------------------------------------------------------------------

/// A row from the `scroll_contents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollContent {
    pub id: DbId,
    pub title: String,
    pub subtitle: Option<String>,
    pub body: String,
    pub image_url: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScrollContent {
    pub title: String,
    pub subtitle: Option<String>,
    pub body: String,
    pub image_url: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScrollContent {
    #[serde(default, deserialize_with = "non_null")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub subtitle: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub image_url: Option<Option<String>>,
    #[serde(default, rename = "order", deserialize_with = "non_null")]
    pub sort_order: Option<i32>,
}
