//! Testimonial and skill models and DTOs.
//!
//! A testimonial can highlight any number of skills through the
//! `testimonial_skills` join table. Input carries `skillIds`; output embeds
//! `skillsHighlighted: [{id, name}]`.

use atelier_core::patch::{non_null, nullable};
use atelier_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

/// A row from the `skills` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: DbId,
    pub name: String,
    pub level: i32,
    pub category: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkill {
    pub name: String,
    pub level: i32,
    pub category: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSkill {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub level: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub category: Option<Option<String>>,
    #[serde(default, rename = "order", deserialize_with = "non_null")]
    pub sort_order: Option<i32>,
}

/// The `{id, name}` pair embedded in a testimonial's highlighted skills.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct SkillRef {
    pub id: DbId,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Testimonials
// ---------------------------------------------------------------------------

/// A row from the `testimonials` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: DbId,
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: String,
    pub rating: i32,
    pub avatar_url: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A testimonial together with the skills it highlights.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialWithSkills {
    #[serde(flatten)]
    pub testimonial: Testimonial,
    pub skills_highlighted: Vec<SkillRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonial {
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: String,
    pub rating: i32,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub skill_ids: Vec<DbId>,
    #[serde(rename = "order")]
    pub sort_order: Option<i32>,
}

/// DTO for partially updating a testimonial. A present `skillIds` replaces
/// the whole set of highlighted skills.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestimonial {
    #[serde(default, deserialize_with = "non_null")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub company: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub rating: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub avatar_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "non_null")]
    pub skill_ids: Option<Vec<DbId>>,
    #[serde(default, rename = "order", deserialize_with = "non_null")]
    pub sort_order: Option<i32>,
}
