//! Site-wide configuration documents (hero, about, art process, contact,
//! footer).
//!
//! Each kind is stored as one JSON document keyed by [`ConfigKind::key`]. The
//! `Default` impl of every document doubles as the fail-open payload served
//! when the database cannot be reached.
//!
//! Writes are partial: [`merge_document`] overlays the top-level fields of a
//! patch onto the stored document (`null` clears an optional field), then
//! [`ConfigKind::normalize`] validates the result against the typed schema.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::{
    optional_text, optional_url, require_text, validate_email, MAX_LONG_TEXT_LEN,
    MAX_SHORT_TEXT_LEN,
};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKind {
    Hero,
    About,
    ArtProcess,
    Contact,
    Footer,
}

impl ConfigKind {
    pub const ALL: [ConfigKind; 5] = [
        ConfigKind::Hero,
        ConfigKind::About,
        ConfigKind::ArtProcess,
        ConfigKind::Contact,
        ConfigKind::Footer,
    ];

    /// Primary key in `site_configs` and path segment under `/api`.
    pub fn key(self) -> &'static str {
        match self {
            ConfigKind::Hero => "hero",
            ConfigKind::About => "about",
            ConfigKind::ArtProcess => "art-process",
            ConfigKind::Contact => "contact",
            ConfigKind::Footer => "footer",
        }
    }

    /// The default document for this kind.
    pub fn default_document(self) -> Value {
        match self {
            ConfigKind::Hero => to_value(&HeroConfig::default()),
            ConfigKind::About => to_value(&AboutConfig::default()),
            ConfigKind::ArtProcess => to_value(&ArtProcessConfig::default()),
            ConfigKind::Contact => to_value(&ContactConfig::default()),
            ConfigKind::Footer => to_value(&FooterConfig::default()),
        }
    }

    /// Parse `doc` against this kind's schema, validate it, and return the
    /// canonical serialization (unknown keys dropped, missing keys defaulted).
    pub fn normalize(self, doc: Value) -> Result<Value, CoreError> {
        match self {
            ConfigKind::Hero => normalize_as::<HeroConfig>(self, doc),
            ConfigKind::About => normalize_as::<AboutConfig>(self, doc),
            ConfigKind::ArtProcess => normalize_as::<ArtProcessConfig>(self, doc),
            ConfigKind::Contact => normalize_as::<ContactConfig>(self, doc),
            ConfigKind::Footer => normalize_as::<FooterConfig>(self, doc),
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ConfigKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKind::ALL
            .into_iter()
            .find(|k| k.key() == s)
            .ok_or_else(|| CoreError::InvalidInput(format!("Unknown config kind '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Overlay the top-level fields of `patch` onto `base`.
///
/// Fields absent from `patch` keep their stored value; fields present
/// (including `null`) replace it. Both values must be JSON objects.
pub fn merge_document(base: &Value, patch: &Value) -> Result<Value, CoreError> {
    let patch = patch
        .as_object()
        .ok_or_else(|| CoreError::InvalidInput("request body must be a JSON object".into()))?;
    let mut merged = match base {
        Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }
    Ok(Value::Object(merged))
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// A typed config document with its own validation rules.
trait ConfigDocument: Serialize + DeserializeOwned + Default {
    fn validate(&self) -> Result<(), CoreError>;
}

fn normalize_as<T: ConfigDocument>(kind: ConfigKind, doc: Value) -> Result<Value, CoreError> {
    let typed: T = serde_json::from_value(doc)
        .map_err(|e| CoreError::InvalidInput(format!("{kind}: {e}")))?;
    typed.validate()?;
    serde_json::to_value(&typed).map_err(|e| CoreError::Internal(e.to_string()))
}

fn to_value<T: Serialize>(doc: &T) -> Value {
    // Plain structs of strings, bools and vecs always serialize.
    serde_json::to_value(doc).unwrap_or(Value::Null)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroConfig {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub cta_text: Option<String>,
    pub cta_link: Option<String>,
    pub background_image: Option<String>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            title: "Art that tells stories".to_string(),
            subtitle: Some("Illustration, concept art and digital painting".to_string()),
            description: None,
            cta_text: Some("View gallery".to_string()),
            cta_link: Some("/#gallery".to_string()),
            background_image: None,
        }
    }
}

impl ConfigDocument for HeroConfig {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title, MAX_SHORT_TEXT_LEN)?;
        optional_text("subtitle", self.subtitle.as_deref(), MAX_SHORT_TEXT_LEN)?;
        optional_text("description", self.description.as_deref(), MAX_LONG_TEXT_LEN)?;
        optional_text("ctaText", self.cta_text.as_deref(), MAX_SHORT_TEXT_LEN)?;
        optional_url("ctaLink", self.cta_link.as_deref())?;
        optional_url("backgroundImage", self.background_image.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AboutConfig {
    pub heading: String,
    pub bio: String,
    pub portrait_url: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub highlights: Vec<String>,
}

impl Default for AboutConfig {
    fn default() -> Self {
        Self {
            heading: "About me".to_string(),
            bio: "I am an illustrator working across traditional and digital media.".to_string(),
            portrait_url: None,
            highlights: Vec::new(),
        }
    }
}

impl ConfigDocument for AboutConfig {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("heading", &self.heading, MAX_SHORT_TEXT_LEN)?;
        require_text("bio", &self.bio, MAX_LONG_TEXT_LEN)?;
        optional_url("portraitUrl", self.portrait_url.as_deref())?;
        for highlight in &self.highlights {
            require_text("highlights[]", highlight, MAX_SHORT_TEXT_LEN)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStep {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtProcessConfig {
    pub heading: String,
    pub intro: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub steps: Vec<ProcessStep>,
}

impl Default for ArtProcessConfig {
    fn default() -> Self {
        let step = |title: &str, description: &str| ProcessStep {
            title: title.to_string(),
            description: description.to_string(),
            image_url: None,
        };
        Self {
            heading: "My process".to_string(),
            intro: None,
            steps: vec![
                step("Sketch", "Loose thumbnails to find the composition."),
                step("Refine", "Line work, values and colour studies."),
                step("Render", "Final painting and finishing touches."),
            ],
        }
    }
}

impl ConfigDocument for ArtProcessConfig {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("heading", &self.heading, MAX_SHORT_TEXT_LEN)?;
        optional_text("intro", self.intro.as_deref(), MAX_LONG_TEXT_LEN)?;
        for step in &self.steps {
            require_text("steps[].title", &step.title, MAX_SHORT_TEXT_LEN)?;
            require_text("steps[].description", &step.description, MAX_LONG_TEXT_LEN)?;
            optional_url("steps[].imageUrl", step.image_url.as_deref())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactConfig {
    pub heading: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub message: Option<String>,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            heading: "Get in touch".to_string(),
            email: "hello@example.com".to_string(),
            phone: None,
            location: None,
            message: Some("Open for commissions and collaborations.".to_string()),
        }
    }
}

impl ConfigDocument for ContactConfig {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("heading", &self.heading, MAX_SHORT_TEXT_LEN)?;
        require_text("email", &self.email, MAX_SHORT_TEXT_LEN)?;
        validate_email(&self.email)?;
        optional_text("phone", self.phone.as_deref(), MAX_SHORT_TEXT_LEN)?;
        optional_text("location", self.location.as_deref(), MAX_SHORT_TEXT_LEN)?;
        optional_text("message", self.message.as_deref(), MAX_LONG_TEXT_LEN)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FooterConfig {
    pub copyright: String,
    pub tagline: Option<String>,
    #[serde(deserialize_with = "null_as_true")]
    pub show_social_links: bool,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            copyright: "All artwork © the artist. All rights reserved.".to_string(),
            tagline: None,
            show_social_links: true,
        }
    }
}

impl ConfigDocument for FooterConfig {
    fn validate(&self) -> Result<(), CoreError> {
        require_text("copyright", &self.copyright, MAX_SHORT_TEXT_LEN)?;
        optional_text("tagline", self.tagline.as_deref(), MAX_SHORT_TEXT_LEN)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// ---------------------------------------------------------------------------
// Null handling for non-text fields
// ---------------------------------------------------------------------------

/// `null` on a list clears it.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `null` on a flag that defaults to on turns it back on.
fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}
