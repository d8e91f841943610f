//! Links Module
//!
//! Short-link management on top of the store: the key is the slug, the
//! value is the destination URL as a JSON string.
//!
//! ## Responsibilities
//! - Validate slugs and destination URLs before they reach the store
//! - Generate random slugs
//! - Keep a static redirect page per slug on disk

mod slug;
mod pages;
mod shortener;

pub use slug::{generate_slug, validate_slug, validate_url};
pub use pages::RedirectPages;
pub use shortener::{Link, Shortener};
