//! PR description templates: the fixed catalog, category mapping, and the
//! advisor that picks one for a classified change.
//!
//! The set of templates is closed. [`TemplateKind`] enumerates it in
//! listing order, and the category synonyms map onto it, so a synonym can
//! never point at a file outside the set.

pub mod advisor;
pub mod builtin;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use indexmap::IndexMap;
use strum::{EnumIter, IntoEnumIterator};
use thiserror::Error;

use crate::models::TemplateRecord;

pub use advisor::TemplateAdvisor;

/// Errors from the template store.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write template {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template store {0} is empty")]
    Empty(PathBuf),
}

/// One of the fixed templates, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum TemplateKind {
    Bug,
    Feature,
    Docs,
    Refactor,
    Test,
    Performance,
    Security,
}

impl TemplateKind {
    /// Used for unknown change categories.
    pub const DEFAULT: TemplateKind = TemplateKind::Feature;

    pub fn filename(self) -> &'static str {
        match self {
            TemplateKind::Bug => "bug.md",
            TemplateKind::Feature => "feature.md",
            TemplateKind::Docs => "docs.md",
            TemplateKind::Refactor => "refactor.md",
            TemplateKind::Test => "test.md",
            TemplateKind::Performance => "performance.md",
            TemplateKind::Security => "security.md",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TemplateKind::Bug => "Bug Fix",
            TemplateKind::Feature => "Feature",
            TemplateKind::Docs => "Documentation",
            TemplateKind::Refactor => "Refactor",
            TemplateKind::Test => "Test",
            TemplateKind::Performance => "Performance",
            TemplateKind::Security => "Security",
        }
    }

    /// Resolve a free-text change category. Case-insensitive; anything
    /// unrecognised maps to [`TemplateKind::DEFAULT`].
    pub fn for_category(change_type: &str) -> TemplateKind {
        CATEGORY_MAPPING
            .get(change_type.to_lowercase().as_str())
            .copied()
            .unwrap_or(TemplateKind::DEFAULT)
    }
}

/// Lowercase category synonyms and the template each one selects.
pub static CATEGORY_MAPPING: LazyLock<IndexMap<&'static str, TemplateKind>> =
    LazyLock::new(|| {
        IndexMap::from([
            ("bug", TemplateKind::Bug),
            ("fix", TemplateKind::Bug),
            ("feature", TemplateKind::Feature),
            ("enhancement", TemplateKind::Feature),
            ("docs", TemplateKind::Docs),
            ("documentation", TemplateKind::Docs),
            ("refactor", TemplateKind::Refactor),
            ("cleanup", TemplateKind::Refactor),
            ("test", TemplateKind::Test),
            ("testing", TemplateKind::Test),
            ("performance", TemplateKind::Performance),
            ("optimization", TemplateKind::Performance),
            ("security", TemplateKind::Security),
        ])
    });

/// Reads the fixed template set from a directory.
///
/// Nothing is cached: every listing re-reads the files.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    dir: PathBuf,
}

impl TemplateCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// One record per template, in catalog order.
    ///
    /// A missing or unreadable file fails the whole listing.
    pub async fn list_templates(&self) -> Result<Vec<TemplateRecord>, TemplateError> {
        let mut records = Vec::new();
        for kind in TemplateKind::iter() {
            let path = self.dir.join(kind.filename());
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| TemplateError::Read {
                    path: path.clone(),
                    source: e,
                })?;
            records.push(TemplateRecord {
                filename: kind.filename().to_string(),
                category_label: kind.label().to_string(),
                content,
            });
        }
        Ok(records)
    }
}
