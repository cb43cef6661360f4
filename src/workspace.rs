//! Working directory resolution for inspections.
//!
//! Order: an explicit directory from the caller, then the first `file://`
//! root the host declares, then the fallback captured at start-up. Root
//! lookup is best-effort; every failure lands on the fallback.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// A workspace root declared by the host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Root {
    pub uri: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Errors from asking the host for its roots.
#[derive(Error, Debug)]
pub enum RootsError {
    #[error("host did not answer roots/list within {0} ms")]
    Timeout(u64),

    #[error("host returned an error for roots/list: {0}")]
    Host(String),

    #[error("malformed roots/list result: {0}")]
    Malformed(String),

    #[error("connection closed while waiting for roots/list")]
    Closed,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Source of host-declared workspace roots.
#[async_trait]
pub trait RootsProvider: Send {
    async fn list_roots(&mut self) -> Result<Vec<Root>, RootsError>;
}

/// Pick the directory an inspection runs in. Never fails.
pub async fn resolve_working_dir(
    explicit: Option<PathBuf>,
    roots: Option<&mut (dyn RootsProvider + '_)>,
    fallback: &Path,
) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }

    let Some(provider) = roots else {
        return fallback.to_path_buf();
    };

    match provider.list_roots().await {
        Ok(roots) => match roots
            .iter()
            .find_map(|r| root_path(&r.uri).map(|dir| (r, dir)))
        {
            Some((root, dir)) => {
                tracing::debug!(
                    root = root.name.as_deref().unwrap_or(root.uri.as_str()),
                    "inspecting host root {}",
                    dir.display()
                );
                dir
            }
            None => {
                tracing::debug!("no file:// root among {} declared root(s)", roots.len());
                fallback.to_path_buf()
            }
        },
        Err(e) => {
            tracing::debug!("roots lookup failed, using {}: {e}", fallback.display());
            fallback.to_path_buf()
        }
    }
}

/// Filesystem path of a `file://` URI, percent-decoded.
pub fn root_path(uri: &str) -> Option<PathBuf> {
    let url = url::Url::parse(uri).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    url.to_file_path().ok()
}
