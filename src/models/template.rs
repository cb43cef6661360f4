//! Template records and recommendations.

use serde::Serialize;

/// One template document read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateRecord {
    pub filename: String,
    pub category_label: String,
    pub content: String,
}

/// The advisor's answer for a classified change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub recommended_template: TemplateRecord,
    pub reasoning: String,
    pub template_content: String,
    pub usage_hint: String,
}
