//! Built-in template documents.
//!
//! Embedded via `include_str!` so a fresh machine can provision its
//! template store with `pr-agent templates init`.

use std::path::{Path, PathBuf};

use strum::IntoEnumIterator;

use super::{TemplateError, TemplateKind};

const BUG_MD: &str = include_str!("bug.md");
const FEATURE_MD: &str = include_str!("feature.md");
const DOCS_MD: &str = include_str!("docs.md");
const REFACTOR_MD: &str = include_str!("refactor.md");
const TEST_MD: &str = include_str!("test.md");
const PERFORMANCE_MD: &str = include_str!("performance.md");
const SECURITY_MD: &str = include_str!("security.md");

/// The shipped document for a template.
pub fn content(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::Bug => BUG_MD,
        TemplateKind::Feature => FEATURE_MD,
        TemplateKind::Docs => DOCS_MD,
        TemplateKind::Refactor => REFACTOR_MD,
        TemplateKind::Test => TEST_MD,
        TemplateKind::Performance => PERFORMANCE_MD,
        TemplateKind::Security => SECURITY_MD,
    }
}

/// What [`install`] did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Write the built-in templates into `dir`, creating it if needed.
///
/// Existing files are left alone unless `force` is set.
pub async fn install(dir: &Path, force: bool) -> Result<InstallReport, TemplateError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| TemplateError::Write {
            path: dir.to_path_buf(),
            source: e,
        })?;

    let mut report = InstallReport::default();
    for kind in TemplateKind::iter() {
        let path = dir.join(kind.filename());
        let exists = tokio::fs::try_exists(&path)
            .await
            .map_err(|e| TemplateError::Write {
                path: path.clone(),
                source: e,
            })?;
        if !force && exists {
            report.skipped.push(path);
            continue;
        }
        tokio::fs::write(&path, content(kind))
            .await
            .map_err(|e| TemplateError::Write {
                path: path.clone(),
                source: e,
            })?;
        report.written.push(path);
    }

    Ok(report)
}
