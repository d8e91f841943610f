//! Slug and URL validation

use rand::RngCore;

use crate::error::{Result, SlateError};

/// Random bytes behind a generated slug (two hex chars each)
const SLUG_BYTES: usize = 3;

/// Accept only `[0-9a-z_-]+`
pub fn validate_slug(slug: &str) -> Result<()> {
    let valid = !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase() || b == b'-' || b == b'_');

    if valid {
        Ok(())
    } else {
        Err(SlateError::InvalidSlug(slug.to_string()))
    }
}

/// Accept only URLs starting with `http://` or `https://`
pub fn validate_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(SlateError::InvalidUrl(url.to_string()))
    }
}

/// A random six-character lowercase hex slug
pub fn generate_slug() -> String {
    let mut bytes = [0u8; SLUG_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
