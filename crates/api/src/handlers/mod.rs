//! HTTP handlers, one module per resource.

pub mod ad_banners;
pub mod artworks;
pub mod auth;
pub mod common;
pub mod init;
pub mod site_config;
pub mod social_links;
pub mod testimonials;
pub mod visits;
