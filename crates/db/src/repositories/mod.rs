//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod ad_banner_repo;
pub mod carousel_artwork_repo;
pub mod gallery_artwork_repo;
pub mod login_history_repo;
pub mod ordering;
pub mod scroll_content_repo;
pub mod site_config_repo;
pub mod skill_repo;
pub mod social_link_repo;
pub mod testimonial_repo;
pub mod user_repo;
pub mod visit_repo;

pub use ad_banner_repo::AdBannerRepo;
pub use carousel_artwork_repo::CarouselArtworkRepo;
pub use gallery_artwork_repo::GalleryArtworkRepo;
pub use login_history_repo::LoginHistoryRepo;
pub use ordering::ReorderOutcome;
pub use scroll_content_repo::ScrollContentRepo;
pub use site_config_repo::SiteConfigRepo;
pub use skill_repo::SkillRepo;
pub use social_link_repo::SocialLinkRepo;
pub use testimonial_repo::TestimonialRepo;
pub use user_repo::UserRepo;
pub use visit_repo::VisitRepo;
