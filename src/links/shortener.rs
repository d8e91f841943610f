//! Shortener
//!
//! Slug → URL bookkeeping over a [`Store`] and [`RedirectPages`].

use serde::Serialize;

use crate::config::Config;
use crate::error::{Result, SlateError};
use crate::index::Value;
use crate::store::{Store, VacuumReport};
use super::{generate_slug, validate_slug, validate_url, RedirectPages};

/// Short-link prefix used when no base URL is configured
const DEFAULT_BASE: &str = "/r";

/// Attempts at finding an unused random slug
const GENERATE_ATTEMPTS: usize = 8;

/// A live short link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub slug: String,
    pub short: String,
    pub long: String,
}

/// Manages short links
pub struct Shortener {
    store: Store,
    pages: RedirectPages,
    base_url: String,
}

impl Shortener {
    /// Open the store and page directory named by `config`
    pub fn open(config: Config) -> Result<Self> {
        let pages = RedirectPages::new(config.redirect_dir.clone());
        let base_url = config.base_url.clone();
        std::fs::create_dir_all(pages.dir())?;

        let store = Store::open(config)?;
        Ok(Self::new(store, pages, base_url))
    }

    pub fn new(store: Store, pages: RedirectPages, base_url: Option<String>) -> Self {
        Self {
            store,
            pages,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE.to_string()),
        }
    }

    /// Create a short link for `url`
    ///
    /// Without a slug (or with an empty one) a random one is generated. A
    /// slug that is already live fails with `DuplicateKey` and leaves its
    /// redirect page untouched.
    pub fn shorten(&mut self, url: &str, slug: Option<&str>) -> Result<Link> {
        validate_url(url)?;

        let slug = match slug.filter(|s| !s.is_empty()) {
            Some(slug) => slug.to_string(),
            None => self.unused_slug()?,
        };
        validate_slug(&slug)?;

        if self.store.contains(&slug) {
            return Err(SlateError::DuplicateKey(slug));
        }

        self.pages.write(&slug, url)?;
        self.store
            .put(&slug, Some(Value::String(url.to_string())), false)?;

        tracing::info!(slug = %slug, url, "link created");
        Ok(self.make_link(slug, url.to_string()))
    }

    fn unused_slug(&self) -> Result<String> {
        for _ in 0..GENERATE_ATTEMPTS {
            let slug = generate_slug();
            if !self.store.contains(&slug) {
                return Ok(slug);
            }
        }
        Err(SlateError::DuplicateKey(
            "no free random slug found".to_string(),
        ))
    }

    /// Remove a short link and its redirect page
    pub fn remove(&mut self, slug: &str) -> Result<()> {
        validate_slug(slug)?;

        self.pages.remove(slug)?;
        self.store.del(slug)?;

        tracing::info!(slug, "link removed");
        Ok(())
    }

    /// The destination of a live slug
    pub fn resolve(&self, slug: &str) -> Option<String> {
        self.store
            .get(slug, false)
            .and_then(|entry| entry.value.as_ref())
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// A single live link
    pub fn link(&self, slug: &str) -> Option<Link> {
        self.resolve(slug)
            .map(|long| self.make_link(slug.to_string(), long))
    }

    /// All live links, sorted by slug
    pub fn links(&self) -> Vec<Link> {
        let mut links: Vec<Link> = self
            .store
            .list(false)
            .into_iter()
            .filter_map(|(slug, entry)| {
                let long = entry.value.as_ref()?.as_str()?.to_string();
                Some(self.make_link(slug, long))
            })
            .collect();

        links.sort_by(|a, b| a.slug.cmp(&b.slug));
        links
    }

    /// Compact the underlying store
    pub fn vacuum(&mut self) -> Result<VacuumReport> {
        self.store.vacuum()
    }

    fn make_link(&self, slug: String, long: String) -> Link {
        Link {
            short: format!("{}/{}", self.base_url, slug),
            slug,
            long,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn pages(&self) -> &RedirectPages {
        &self.pages
    }

    pub fn into_store(self) -> Store {
        self.store
    }
}
