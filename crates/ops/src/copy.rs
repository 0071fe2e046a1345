//! `atelier-ops copy`: one-shot transfer of every entity between databases.
//!
//! Natural-keyed rows (users by email, configs by kind) are upserted.
//! Collection rows are inserted without their ids so the destination assigns
//! new ones; references between rows are re-linked by name or email. A
//! failing entity is logged and skipped; there is no retry or resume.

use std::collections::HashMap;

use anyhow::Context;
use atelier_core::types::DbId;
use atelier_db::models::ad_banner::CreateAdBanner;
use atelier_db::models::artwork::{CreateCarouselArtwork, CreateGalleryArtwork, CreateScrollContent};
use atelier_db::models::login_history::CreateLoginAttempt;
use atelier_db::models::social_link::CreateSocialLink;
use atelier_db::models::testimonial::{CreateSkill, CreateTestimonial};
use atelier_db::models::user::CreateUser;
use atelier_db::models::visit::CreateVisit;
use atelier_db::repositories::{
    AdBannerRepo, CarouselArtworkRepo, GalleryArtworkRepo, LoginHistoryRepo, ScrollContentRepo,
    SiteConfigRepo, SkillRepo, SocialLinkRepo, TestimonialRepo, UserRepo, VisitRepo,
};
use atelier_db::DbPool;

/// Source and destination pools for one copy run.
pub struct Databases {
    pub source: DbPool,
    pub dest: DbPool,
}

/// Per-entity outcome: rows copied, or `None` when that entity failed.
pub type CopySummary = Vec<(&'static str, Option<usize>)>;

pub async fn run(source_url: &str, dest_url: &str) -> anyhow::Result<()> {
    let db = Databases {
        source: atelier_db::create_pool(source_url, 2)
            .await
            .context("connecting to source database")?,
        dest: atelier_db::create_pool(dest_url, 2)
            .await
            .context("connecting to destination database")?,
    };
    atelier_db::run_migrations(&db.dest)
        .await
        .context("running migrations on destination")?;
    tracing::info!("Destination migrations applied");

    let summary = copy_all(&db).await;

    let failed = summary.iter().filter(|(_, count)| count.is_none()).count();
    for (entity, count) in &summary {
        match count {
            Some(count) => tracing::info!(entity, count, "Summary"),
            None => tracing::warn!(entity, "Summary: failed"),
        }
    }
    tracing::info!(entities = summary.len(), failed, "Copy finished");

    db.source.close().await;
    db.dest.close().await;
    Ok(())
}

/// Copy every entity into an already migrated destination. A failing entity
/// is logged and the remaining ones still run.
pub async fn copy_all(db: &Databases) -> CopySummary {
    let mut summary = CopySummary::new();
    let mut record = |entity: &'static str, result: anyhow::Result<usize>| {
        match &result {
            Ok(count) => tracing::info!(entity, count, "Copied"),
            Err(e) => tracing::error!(entity, error = %format!("{e:#}"), "Copy failed, continuing"),
        }
        summary.push((entity, result.ok()));
    };

    record("users", copy_users(db).await);
    record("site_configs", copy_configs(db).await);
    record("gallery_artworks", copy_gallery(db).await);
    record("carousel_artworks", copy_carousel(db).await);
    record("scroll_contents", copy_scroll(db).await);
    record("skills", copy_skills(db).await);
    record("testimonials", copy_testimonials(db).await);
    record("social_links", copy_social_links(db).await);
    record("ad_banners", copy_ad_banners(db).await);
    record("login_history", copy_login_history(db).await);
    record("visits", copy_visits(db).await);

    summary
}

// ---------------------------------------------------------------------------
// Natural-keyed entities
// ---------------------------------------------------------------------------

async fn copy_users(db: &Databases) -> anyhow::Result<usize> {
    let users = UserRepo::list(&db.source).await?;
    for user in &users {
        UserRepo::upsert_by_email(
            &db.dest,
            &CreateUser {
                email: user.email.clone(),
                password_hash: user.password_hash.clone(),
                name: user.name.clone(),
                role: user.role.clone(),
            },
        )
        .await
        .with_context(|| format!("user {}", user.email))?;
    }
    Ok(users.len())
}

async fn copy_configs(db: &Databases) -> anyhow::Result<usize> {
    let configs = SiteConfigRepo::list(&db.source).await?;
    for config in &configs {
        SiteConfigRepo::upsert(&db.dest, &config.key, &config.content)
            .await
            .with_context(|| format!("config {}", config.key))?;
    }
    Ok(configs.len())
}

// ---------------------------------------------------------------------------
// Ordered collections
// ---------------------------------------------------------------------------

async fn copy_gallery(db: &Databases) -> anyhow::Result<usize> {
    let rows = GalleryArtworkRepo::list(&db.source).await?;
    for row in &rows {
        GalleryArtworkRepo::create(
            &db.dest,
            &CreateGalleryArtwork {
                title: row.title.clone(),
                description: row.description.clone(),
                image_url: row.image_url.clone(),
                category: row.category.clone(),
                medium: row.medium.clone(),
                dimensions: row.dimensions.clone(),
                year: row.year,
                sort_order: Some(row.sort_order),
            },
        )
        .await?;
    }
    Ok(rows.len())
}

async fn copy_carousel(db: &Databases) -> anyhow::Result<usize> {
    let rows = CarouselArtworkRepo::list(&db.source).await?;
    for row in &rows {
        CarouselArtworkRepo::create(
            &db.dest,
            &CreateCarouselArtwork {
                title: row.title.clone(),
                image_url: row.image_url.clone(),
                caption: row.caption.clone(),
                link_url: row.link_url.clone(),
                sort_order: Some(row.sort_order),
            },
        )
        .await?;
    }
    Ok(rows.len())
}

async fn copy_scroll(db: &Databases) -> anyhow::Result<usize> {
    let rows = ScrollContentRepo::list(&db.source).await?;
    for row in &rows {
        ScrollContentRepo::create(
            &db.dest,
            &CreateScrollContent {
                title: row.title.clone(),
                subtitle: row.subtitle.clone(),
                body: row.body.clone(),
                image_url: row.image_url.clone(),
                sort_order: Some(row.sort_order),
            },
        )
        .await?;
    }
    Ok(rows.len())
}

/// Skills are unique by name, so ones already present are left alone.
async fn copy_skills(db: &Databases) -> anyhow::Result<usize> {
    let rows = SkillRepo::list(&db.source).await?;
    let mut copied = 0;
    for row in &rows {
        if SkillRepo::find_by_name(&db.dest, &row.name).await?.is_some() {
            tracing::debug!(name = %row.name, "Skill already present");
            continue;
        }
        SkillRepo::create(
            &db.dest,
            &CreateSkill {
                name: row.name.clone(),
                level: row.level,
                category: row.category.clone(),
                sort_order: Some(row.sort_order),
            },
        )
        .await
        .with_context(|| format!("skill {}", row.name))?;
        copied += 1;
    }
    Ok(copied)
}

async fn copy_testimonials(db: &Databases) -> anyhow::Result<usize> {
    let skill_ids: HashMap<String, DbId> = SkillRepo::list(&db.dest)
        .await?
        .into_iter()
        .map(|s| (s.name, s.id))
        .collect();

    let rows = TestimonialRepo::list(&db.source).await?;
    for row in &rows {
        let mut linked = Vec::with_capacity(row.skills_highlighted.len());
        for skill in &row.skills_highlighted {
            match skill_ids.get(&skill.name) {
                Some(id) => linked.push(*id),
                None => tracing::warn!(skill = %skill.name, "Skill missing on destination, link dropped"),
            }
        }

        let t = &row.testimonial;
        TestimonialRepo::create(
            &db.dest,
            &CreateTestimonial {
                name: t.name.clone(),
                role: t.role.clone(),
                company: t.company.clone(),
                content: t.content.clone(),
                rating: t.rating,
                avatar_url: t.avatar_url.clone(),
                skill_ids: linked,
                sort_order: Some(t.sort_order),
            },
        )
        .await?;
    }
    Ok(rows.len())
}

async fn copy_social_links(db: &Databases) -> anyhow::Result<usize> {
    let rows = SocialLinkRepo::list(&db.source).await?;
    for row in &rows {
        SocialLinkRepo::create(
            &db.dest,
            &CreateSocialLink {
                platform: row.platform.clone(),
                url: row.url.clone(),
                icon: row.icon.clone(),
                sort_order: Some(row.sort_order),
            },
        )
        .await?;
    }
    Ok(rows.len())
}

async fn copy_ad_banners(db: &Databases) -> anyhow::Result<usize> {
    let rows = AdBannerRepo::list(&db.source).await?;
    for row in &rows {
        AdBannerRepo::create(
            &db.dest,
            &CreateAdBanner {
                title: row.title.clone(),
                description: row.description.clone(),
                image_url: row.image_url.clone(),
                link_url: row.link_url.clone(),
                button_text: row.button_text.clone(),
                is_active: Some(row.is_active),
                sort_order: Some(row.sort_order),
            },
        )
        .await?;
    }
    Ok(rows.len())
}

// ---------------------------------------------------------------------------
// Append-only logs
// ---------------------------------------------------------------------------

/// Attempts are re-linked to destination users by email; attempts for
/// emails with no destination account keep a null user.
async fn copy_login_history(db: &Databases) -> anyhow::Result<usize> {
    let users: HashMap<String, DbId> = UserRepo::list(&db.dest)
        .await?
        .into_iter()
        .map(|u| (u.email, u.id))
        .collect();

    let rows = LoginHistoryRepo::list_all(&db.source).await?;
    for row in &rows {
        LoginHistoryRepo::record(
            &db.dest,
            &CreateLoginAttempt {
                user_id: users.get(&row.email).copied(),
                email: row.email.clone(),
                ip_address: row.ip_address.clone(),
                user_agent: row.user_agent.clone(),
                success: row.success,
                created_at: Some(row.created_at),
            },
        )
        .await?;
    }
    Ok(rows.len())
}

async fn copy_visits(db: &Databases) -> anyhow::Result<usize> {
    let rows = VisitRepo::list_since(&db.source, None).await?;
    for row in &rows {
        VisitRepo::create(
            &db.dest,
            &CreateVisit {
                ip_address: row.ip_address.clone(),
                user_agent: row.user_agent.clone(),
                path: row.path.clone(),
                referrer: row.referrer.clone(),
                country: row.country.clone(),
                region: row.region.clone(),
                city: row.city.clone(),
                created_at: Some(row.created_at),
            },
        )
        .await?;
    }
    Ok(rows.len())
}
