//! Picks a template for a change the caller has already classified.

use crate::constants::USAGE_HINT;
use crate::models::{Recommendation, TemplateRecord};

use super::{TemplateCatalog, TemplateError, TemplateKind};

/// Recommends a template from the current catalog contents.
#[derive(Debug, Clone)]
pub struct TemplateAdvisor {
    catalog: TemplateCatalog,
}

impl TemplateAdvisor {
    pub fn new(catalog: TemplateCatalog) -> Self {
        Self { catalog }
    }

    /// Recommend a template for `change_type`, explaining the choice with
    /// the caller's own `changes_summary`.
    pub async fn suggest(
        &self,
        changes_summary: &str,
        change_type: &str,
    ) -> Result<Recommendation, TemplateError> {
        let templates = self.catalog.list_templates().await?;
        let wanted = TemplateKind::for_category(change_type).filename();

        let selected = select(&templates, wanted)
            .cloned()
            .ok_or_else(|| TemplateError::Empty(self.catalog.dir().to_path_buf()))?;
        tracing::debug!(change_type, template = %selected.filename, "selected template");

        Ok(Recommendation {
            reasoning: format!(
                "Based on your analysis: '{changes_summary}', this appears to be a {change_type} change."
            ),
            template_content: selected.content.clone(),
            recommended_template: selected,
            usage_hint: USAGE_HINT.to_string(),
        })
    }
}

/// The record named `filename`, else the first record.
fn select<'a>(templates: &'a [TemplateRecord], filename: &str) -> Option<&'a TemplateRecord> {
    templates
        .iter()
        .find(|t| t.filename == filename)
        .or_else(|| templates.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn advisor_with_store() -> (tempfile::TempDir, TemplateAdvisor) {
        let dir = tempfile::tempdir().unwrap();
        for kind in TemplateKind::iter() {
            std::fs::write(
                dir.path().join(kind.filename()),
                format!("## {} template\n", kind.label()),
            )
            .unwrap();
        }
        let advisor = TemplateAdvisor::new(TemplateCatalog::new(dir.path()));
        (dir, advisor)
    }

    fn record(filename: &str) -> TemplateRecord {
        TemplateRecord {
            filename: filename.to_string(),
            category_label: String::new(),
            content: String::new(),
        }
    }

    #[tokio::test]
    async fn fix_and_bug_recommend_the_same_file() {
        let (_dir, advisor) = advisor_with_store();
        let fix = advisor.suggest("Handles null input", "fix").await.unwrap();
        let bug = advisor.suggest("Handles null input", "bug").await.unwrap();
        assert_eq!(fix.recommended_template.filename, "bug.md");
        assert_eq!(fix.recommended_template, bug.recommended_template);
    }

    #[tokio::test]
    async fn unknown_type_recommends_feature() {
        let (_dir, advisor) = advisor_with_store();
        let rec = advisor.suggest("Something", "unknown-xyz").await.unwrap();
        assert_eq!(rec.recommended_template.filename, "feature.md");
        assert_eq!(rec.recommended_template.category_label, "Feature");
    }

    #[tokio::test]
    async fn reasoning_quotes_inputs_verbatim() {
        let (_dir, advisor) = advisor_with_store();
        let rec = advisor
            .suggest("Speeds up 'diff' parsing by 2x", "Optimization")
            .await
            .unwrap();
        assert_eq!(
            rec.reasoning,
            "Based on your analysis: 'Speeds up 'diff' parsing by 2x', this appears to be a Optimization change."
        );
        assert_eq!(rec.recommended_template.filename, "performance.md");
    }

    #[tokio::test]
    async fn template_content_matches_record() {
        let (_dir, advisor) = advisor_with_store();
        let rec = advisor.suggest("Docs for the CLI", "docs").await.unwrap();
        assert_eq!(rec.template_content, rec.recommended_template.content);
        assert_eq!(rec.template_content, "## Documentation template\n");
        assert_eq!(rec.usage_hint, USAGE_HINT);
    }

    #[tokio::test]
    async fn store_read_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let advisor = TemplateAdvisor::new(TemplateCatalog::new(dir.path().join("absent")));
        let err = advisor.suggest("x", "bug").await.unwrap_err();
        assert!(matches!(err, TemplateError::Read { .. }));
    }

    #[test]
    fn select_falls_back_to_first_record() {
        let templates = vec![record("a.md"), record("b.md")];
        assert_eq!(select(&templates, "b.md").unwrap().filename, "b.md");
        assert_eq!(select(&templates, "bug.md").unwrap().filename, "a.md");
        assert!(select(&[], "bug.md").is_none());
    }
}
