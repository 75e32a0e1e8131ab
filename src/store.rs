// src/store.rs
// On-disk cache of per-entity XML documents: `<cache_dir>/<entity>.xml`.
// No expiry; delete a file to refetch it. Each entity owns its file, so
// concurrent readers and writers never share a path.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::config::consts::CACHE_EXT;
use crate::error::{Result, ScrapeError};

/// Entity names come from scraped pages; only `[A-Za-z0-9._-]` without a
/// leading dot may reach the file system.
pub fn check_entity_name(entity: &str) -> Result<()> {
    let plain = !entity.is_empty()
        && !entity.starts_with('.')
        && !entity.contains("..")
        && entity.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if plain { Ok(()) } else { Err(ScrapeError::EntityName(s!(entity))) }
}

pub fn cache_path(dir: &Path, entity: &str) -> Result<PathBuf> {
    check_entity_name(entity)?;
    Ok(dir.join(join!(entity, ".", CACHE_EXT)))
}

/// Cached body, or `None` on any read failure (missing, permissions, bad UTF-8).
pub async fn read_cached(path: &Path) -> Option<String> {
    match fs::read_to_string(path).await {
        Ok(body) => {
            logd!(path = %path.display(), "cache hit");
            Some(body)
        }
        Err(e) => {
            logd!(path = %path.display(), "cache miss: {e}");
            None
        }
    }
}

/// Persist a fetched body, creating the cache directory on first use.
pub async fn write_cached(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ScrapeError::io(parent, e))?;
        }
    }
    fs::write(path, body).await.map_err(|e| ScrapeError::io(path, e))
}
