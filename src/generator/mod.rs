//! Output artifacts generated from the posts collection.

pub mod rss;
pub mod sitemap;

pub use self::rss::build_rss;
pub use sitemap::build_sitemap;
