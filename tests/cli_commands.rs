//! Integration tests for the `templates` and `suggest` commands.
//!
//! These tests exercise the library functions that back each command,
//! using the public API from the pr-agent crate.

use pr_agent::templates::{TemplateAdvisor, TemplateCatalog, TemplateKind, builtin};
use pretty_assertions::assert_eq;

// ---------------------------------------------------------------------------
// templates init / list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn init_then_list_returns_builtins() {
    let dir = tempfile::tempdir().unwrap();
    let store = dir.path().join("templates");

    let report = builtin::install(&store, false).await.unwrap();
    assert_eq!(report.written.len(), 7);
    assert!(report.skipped.is_empty());

    let records = TemplateCatalog::new(&store).list_templates().await.unwrap();
    assert_eq!(records.len(), 7);
    for record in &records {
        assert!(record.content.starts_with("## "), "{}", record.filename);
    }
}

#[tokio::test]
async fn init_keeps_customised_templates() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bug.md"), "## Our bug template\n").unwrap();

    let report = builtin::install(dir.path(), false).await.unwrap();
    assert_eq!(report.skipped, vec![dir.path().join("bug.md")]);

    let records = TemplateCatalog::new(dir.path()).list_templates().await.unwrap();
    assert_eq!(records[0].content, "## Our bug template\n");

    builtin::install(dir.path(), true).await.unwrap();
    let records = TemplateCatalog::new(dir.path()).list_templates().await.unwrap();
    assert_eq!(records[0].content, builtin::content(TemplateKind::Bug));
}

#[tokio::test]
async fn list_fails_when_one_template_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    builtin::install(dir.path(), false).await.unwrap();
    std::fs::remove_file(dir.path().join("security.md")).unwrap();

    let err = TemplateCatalog::new(dir.path())
        .list_templates()
        .await
        .unwrap_err();
    assert!(err.to_string().contains("security.md"));
}

// ---------------------------------------------------------------------------
// suggest
// ---------------------------------------------------------------------------

#[tokio::test]
async fn suggest_maps_synonyms_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    builtin::install(dir.path(), false).await.unwrap();
    let advisor = TemplateAdvisor::new(TemplateCatalog::new(dir.path()));

    for (change_type, expected) in [
        ("Documentation", "docs.md"),
        ("OPTIMIZATION", "performance.md"),
        ("cleanup", "refactor.md"),
        ("testing", "test.md"),
        ("enhancement", "feature.md"),
        ("", "feature.md"),
    ] {
        let rec = advisor.suggest("summary", change_type).await.unwrap();
        assert_eq!(rec.recommended_template.filename, expected, "{change_type:?}");
    }
}

#[tokio::test]
async fn suggest_echoes_the_summary_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    builtin::install(dir.path(), false).await.unwrap();
    let advisor = TemplateAdvisor::new(TemplateCatalog::new(dir.path()));

    let rec = advisor.suggest("", "security").await.unwrap();
    assert_eq!(
        rec.reasoning,
        "Based on your analysis: '', this appears to be a security change."
    );
}
