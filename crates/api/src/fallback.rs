//! Built-in content served when the database cannot answer a public read.
//!
//! Handlers wrap these payloads in a `ContentResponse` with
//! `source: "fallback"` so the site keeps rendering during an outage. Ids
//! are stable so by-id reads can still resolve against them.

use atelier_core::content::{ArtworkKind, TestimonialKind};
use atelier_core::site_config::ConfigKind;
use atelier_core::types::DbId;
use serde_json::{json, Value};

pub fn config(kind: ConfigKind) -> Value {
    kind.default_document()
}

pub fn artworks(kind: ArtworkKind) -> Vec<Value> {
    match kind {
        ArtworkKind::Gallery => vec![
            json!({
                "id": 1,
                "title": "Digital Dreams",
                "description": "A study in color and light.",
                "imageUrl": "/images/gallery/digital-dreams.jpg",
                "category": "illustrations",
                "medium": "Digital",
                "dimensions": null,
                "year": null,
                "order": 0
            }),
            json!({
                "id": 2,
                "title": "Quiet Harbor",
                "description": null,
                "imageUrl": "/images/gallery/quiet-harbor.jpg",
                "category": "paintings",
                "medium": "Oil on canvas",
                "dimensions": null,
                "year": null,
                "order": 1
            }),
        ],
        ArtworkKind::Carousel => vec![json!({
            "id": 1,
            "title": "Featured work",
            "imageUrl": "/images/carousel/featured.jpg",
            "caption": null,
            "linkUrl": "/gallery",
            "order": 0
        })],
        ArtworkKind::Scroll => vec![json!({
            "id": 1,
            "title": "The studio",
            "subtitle": null,
            "body": "Every piece starts as a sketch.",
            "imageUrl": null,
            "order": 0
        })],
    }
}

pub fn testimonials(kind: TestimonialKind) -> Vec<Value> {
    match kind {
        TestimonialKind::Testimonials => vec![json!({
            "id": 1,
            "name": "A happy client",
            "role": null,
            "company": null,
            "content": "Wonderful to work with.",
            "rating": 5,
            "avatarUrl": null,
            "order": 0,
            "skillsHighlighted": []
        })],
        TestimonialKind::Skills => vec![
            json!({ "id": 1, "name": "Illustration", "level": 90, "category": "Art", "order": 0 }),
            json!({ "id": 2, "name": "Painting", "level": 80, "category": "Art", "order": 1 }),
        ],
    }
}

pub fn social_links() -> Vec<Value> {
    vec![json!({
        "id": 1,
        "platform": "instagram",
        "url": "https://instagram.com/",
        "icon": "instagram",
        "order": 0
    })]
}

pub fn ad_banners() -> Vec<Value> {
    Vec::new()
}

/// Find the fallback item with the given id.
pub fn find(items: Vec<Value>, id: DbId) -> Option<Value> {
    items
        .into_iter()
        .find(|item| item.get("id").and_then(Value::as_i64) == Some(id))
}
