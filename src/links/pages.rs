//! Redirect Pages
//!
//! Static `index.html` per slug so a plain file server can redirect
//! without consulting the store.
//!
//! ```text
//! {dir}/
//!   ├── abc123/index.html
//!   └── docs/index.html
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

const PAGE_FILE: &str = "index.html";

/// Writes and removes per-slug redirect pages under one directory
#[derive(Debug, Clone)]
pub struct RedirectPages {
    dir: PathBuf,
}

impl RedirectPages {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of all pages
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the page for `slug` lives
    pub fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(slug).join(PAGE_FILE)
    }

    /// Write (or overwrite) the page for `slug`
    pub fn write(&self, slug: &str, destination: &str) -> Result<PathBuf> {
        let slug_dir = self.dir.join(slug);
        fs::create_dir_all(&slug_dir)?;

        let path = slug_dir.join(PAGE_FILE);
        fs::write(&path, render(destination))?;

        tracing::debug!(slug, path = %path.display(), "wrote redirect page");
        Ok(path)
    }

    /// Remove the page for `slug` and its directory
    ///
    /// Returns false if there was no page to remove.
    pub fn remove(&self, slug: &str) -> Result<bool> {
        let slug_dir = self.dir.join(slug);

        let existed = match fs::remove_file(slug_dir.join(PAGE_FILE)) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(slug, "no redirect page to remove");
                false
            }
            Err(e) => return Err(e.into()),
        };

        match fs::remove_dir(&slug_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        Ok(existed)
    }
}

/// Render the redirect page for `destination`
fn render(destination: &str) -> String {
    let url = escape_html(destination);
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta http-equiv=\"refresh\" content=\"0; url={url}\">\n\
         <link rel=\"canonical\" href=\"{url}\">\n\
         <title>Redirecting</title>\n\
         </head>\n\
         <body>\n\
         <p>Redirecting to <a href=\"{url}\">{url}</a></p>\n\
         </body>\n\
         </html>\n"
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
