//! `atelier-ops seed`: bring a database to a usable first-run state.
//!
//! Safe to run repeatedly. The admin and config documents are upserted;
//! demo content only lands in tables that are still empty.

use anyhow::{anyhow, Context};
use atelier_api::auth::password::hash_password;
use atelier_api::config::AdminCredentials;
use atelier_core::roles::ROLE_ADMIN;
use atelier_core::site_config::ConfigKind;
use atelier_db::models::artwork::CreateGalleryArtwork;
use atelier_db::models::social_link::CreateSocialLink;
use atelier_db::models::testimonial::{CreateSkill, CreateTestimonial};
use atelier_db::models::user::CreateUser;
use atelier_db::repositories::{
    GalleryArtworkRepo, SiteConfigRepo, SkillRepo, SocialLinkRepo, TestimonialRepo, UserRepo,
};
use atelier_db::DbPool;

pub async fn run(database_url: &str) -> anyhow::Result<()> {
    let pool = atelier_db::create_pool(database_url, 2)
        .await
        .context("connecting to database")?;
    atelier_db::run_migrations(&pool)
        .await
        .context("running migrations")?;
    tracing::info!("Migrations applied");

    seed(&pool, AdminCredentials::from_env().as_ref()).await?;

    pool.close().await;
    tracing::info!("Seed complete");
    Ok(())
}

/// Seed an already migrated database.
pub async fn seed(pool: &DbPool, admin: Option<&AdminCredentials>) -> anyhow::Result<()> {
    seed_admin(pool, admin).await?;
    seed_configs(pool).await?;
    seed_gallery(pool).await?;
    seed_testimonials(pool).await?;
    seed_social_links(pool).await
}

async fn seed_admin(pool: &DbPool, admin: Option<&AdminCredentials>) -> anyhow::Result<()> {
    let Some(admin) = admin else {
        tracing::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set, skipping admin user");
        return Ok(());
    };
    let password_hash =
        hash_password(&admin.password).map_err(|e| anyhow!("hashing admin password: {e}"))?;

    let user = UserRepo::upsert_by_email(
        pool,
        &CreateUser {
            email: admin.email.clone(),
            password_hash,
            name: admin.name.clone(),
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await
    .context("upserting admin user")?;

    tracing::info!(user_id = user.id, email = %user.email, "Admin user upserted");
    Ok(())
}

async fn seed_configs(pool: &DbPool) -> anyhow::Result<()> {
    for kind in ConfigKind::ALL {
        SiteConfigRepo::upsert(pool, kind.key(), &kind.default_document())
            .await
            .with_context(|| format!("upserting {kind} config"))?;
    }
    tracing::info!(count = ConfigKind::ALL.len(), "Site configs upserted");
    Ok(())
}

async fn seed_gallery(pool: &DbPool) -> anyhow::Result<()> {
    if GalleryArtworkRepo::count(pool).await? > 0 {
        tracing::info!("Gallery not empty, skipping demo artwork");
        return Ok(());
    }

    let artwork = GalleryArtworkRepo::create(
        pool,
        &CreateGalleryArtwork {
            title: "Digital Dreams".into(),
            description: Some("A surreal landscape painted entirely on a tablet.".into()),
            image_url: "/images/gallery/digital-dreams.jpg".into(),
            category: "illustrations".into(),
            medium: Some("Digital painting".into()),
            dimensions: Some("4000 x 3000 px".into()),
            year: Some(2024),
            sort_order: None,
        },
    )
    .await
    .context("inserting demo artwork")?;

    tracing::info!(artwork_id = artwork.id, "Demo artwork inserted");
    Ok(())
}

async fn seed_testimonials(pool: &DbPool) -> anyhow::Result<()> {
    let mut skill_ids = Vec::new();
    if SkillRepo::count(pool).await? == 0 {
        for (name, level, category) in [
            ("Illustration", 95, "Art"),
            ("Character Design", 85, "Art"),
            ("Digital Painting", 90, "Technique"),
        ] {
            let skill = SkillRepo::create(
                pool,
                &CreateSkill {
                    name: name.into(),
                    level,
                    category: Some(category.into()),
                    sort_order: None,
                },
            )
            .await
            .with_context(|| format!("inserting skill {name}"))?;
            skill_ids.push(skill.id);
        }
        tracing::info!(count = skill_ids.len(), "Demo skills inserted");
    }

    if TestimonialRepo::count(pool).await? > 0 {
        tracing::info!("Testimonials not empty, skipping demo testimonial");
        return Ok(());
    }

    // Skills were already present, so highlight existing ones.
    if skill_ids.is_empty() {
        skill_ids = SkillRepo::list(pool).await?.into_iter().map(|s| s.id).collect();
    }

    let testimonial = TestimonialRepo::create(
        pool,
        &CreateTestimonial {
            name: "Jane Cooper".into(),
            role: Some("Art Director".into()),
            company: Some("Northlight Studio".into()),
            content: "Every commission arrived on time and beyond what we imagined.".into(),
            rating: 5,
            avatar_url: None,
            skill_ids: skill_ids.into_iter().take(2).collect(),
            sort_order: None,
        },
    )
    .await
    .context("inserting demo testimonial")?;

    tracing::info!(
        testimonial_id = testimonial.testimonial.id,
        skills = testimonial.skills_highlighted.len(),
        "Demo testimonial inserted",
    );
    Ok(())
}

async fn seed_social_links(pool: &DbPool) -> anyhow::Result<()> {
    if SocialLinkRepo::count(pool).await? > 0 {
        tracing::info!("Social links not empty, skipping demo links");
        return Ok(());
    }

    let links = [
        ("instagram", "https://instagram.com/atelier", "instagram"),
        ("behance", "https://behance.net/atelier", "behance"),
    ];
    for (platform, url, icon) in links {
        SocialLinkRepo::create(
            pool,
            &CreateSocialLink {
                platform: platform.into(),
                url: url.into(),
                icon: Some(icon.into()),
                sort_order: None,
            },
        )
        .await
        .with_context(|| format!("inserting {platform} link"))?;
    }

    tracing::info!(count = links.len(), "Demo social links inserted");
    Ok(())
}
