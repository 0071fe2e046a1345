//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Wire names are camelCase; the `sort_order` column travels as `order`.

pub mod ad_banner;
pub mod artwork;
pub mod login_history;
pub mod site_config;
pub mod social_link;
pub mod testimonial;
pub mod user;
pub mod visit;
