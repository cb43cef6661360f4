//! The three tools the server exposes, their schemas, and dispatch.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

use super::protocol::CallToolResult;
use crate::config::InspectConfig;
use crate::inspect::{ChangeInspector, InspectRequest};
use crate::models::{InspectOutcome, Recommendation, TemplateRecord};
use crate::templates::{TemplateAdvisor, TemplateCatalog, TemplateError};
use crate::workspace::{RootsProvider, resolve_working_dir};

/// Registered tool names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ToolName {
    AnalyzeFileChanges,
    GetPrTemplates,
    SuggestTemplate,
}

/// Arguments of `analyze_file_changes`. Omitted fields take the configured
/// defaults.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct AnalyzeFileChangesArgs {
    /// Base branch to compare against (default: main).
    #[serde(default)]
    pub base_branch: Option<String>,
    /// Include the full diff content (default: true).
    #[serde(default)]
    pub include_diff: Option<bool>,
    /// Maximum number of diff lines to return (default: 500).
    #[serde(default)]
    pub max_diff_lines: Option<usize>,
    /// Directory to run git commands in (default: the host's first workspace
    /// root, else the server's working directory).
    #[serde(default)]
    pub working_dir: Option<String>,
}

/// `get_pr_templates` takes no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetPrTemplatesArgs {}

/// Arguments of `suggest_template`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SuggestTemplateArgs {
    /// Your analysis of what the changes do.
    pub changes_summary: String,
    /// The type of change you've identified (bug, feature, docs, refactor,
    /// test, performance, security, ...).
    pub change_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Failures that make a `tools/call` request itself invalid.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}

impl ToolName {
    pub fn description(self) -> &'static str {
        match self {
            ToolName::AnalyzeFileChanges => {
                "Get the diff and list of changed files in the current git repository \
                 with smart output limiting."
            }
            ToolName::GetPrTemplates => "List available PR templates with their content.",
            ToolName::SuggestTemplate => {
                "Analyze the changes and suggest the most appropriate PR template. \
                 Pass your own summary of the changes and the type of change you identified."
            }
        }
    }

    fn input_schema(self) -> Value {
        let schema = match self {
            ToolName::AnalyzeFileChanges => schemars::schema_for!(AnalyzeFileChangesArgs),
            ToolName::GetPrTemplates => schemars::schema_for!(GetPrTemplatesArgs),
            ToolName::SuggestTemplate => schemars::schema_for!(SuggestTemplateArgs),
        };
        serde_json::to_value(schema).unwrap_or_else(|_| json!({ "type": "object" }))
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.into(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

/// Everything the tools need, resolved once at start-up.
#[derive(Clone)]
pub struct Toolbox {
    inspector: ChangeInspector,
    catalog: TemplateCatalog,
    advisor: TemplateAdvisor,
    defaults: InspectConfig,
    fallback_dir: PathBuf,
}

impl Toolbox {
    pub fn new(
        inspector: ChangeInspector,
        catalog: TemplateCatalog,
        defaults: InspectConfig,
        fallback_dir: PathBuf,
    ) -> Self {
        Self {
            inspector,
            advisor: TemplateAdvisor::new(catalog.clone()),
            catalog,
            defaults,
            fallback_dir,
        }
    }

    pub fn definitions() -> Vec<ToolDefinition> {
        ToolName::iter().map(ToolName::definition).collect()
    }

    /// Run a tool by name and wrap its JSON output for the host.
    ///
    /// Template store failures come back as an error result rather than a
    /// JSON document, unlike git failures which are part of the
    /// inspection output.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Value>,
        roots: Option<&mut (dyn RootsProvider + '_)>,
    ) -> Result<CallToolResult, ToolError> {
        let tool: ToolName = name
            .parse()
            .map_err(|_| ToolError::UnknownTool(name.to_string()))?;
        tracing::debug!(tool = tool.as_ref(), "tool call");

        let result = match tool {
            ToolName::AnalyzeFileChanges => {
                let args = parse_args(tool, arguments)?;
                json_result(&self.analyze_file_changes(args, roots).await)
            }
            ToolName::GetPrTemplates => {
                let _: GetPrTemplatesArgs = parse_args(tool, arguments)?;
                match self.get_pr_templates().await {
                    Ok(records) => json_result(&records),
                    Err(e) => CallToolResult::error(e.to_string()),
                }
            }
            ToolName::SuggestTemplate => {
                let args = parse_args(tool, arguments)?;
                match self.suggest_template(args).await {
                    Ok(rec) => json_result(&rec),
                    Err(e) => CallToolResult::error(e.to_string()),
                }
            }
        };
        Ok(result)
    }

    pub async fn analyze_file_changes(
        &self,
        args: AnalyzeFileChangesArgs,
        roots: Option<&mut (dyn RootsProvider + '_)>,
    ) -> InspectOutcome {
        let request = InspectRequest {
            base_branch: args
                .base_branch
                .unwrap_or_else(|| self.defaults.base_branch.clone()),
            include_diff: args.include_diff.unwrap_or(self.defaults.include_diff),
            max_diff_lines: args.max_diff_lines.unwrap_or(self.defaults.max_diff_lines),
        };
        let explicit = args.working_dir.map(PathBuf::from);
        let working_dir = resolve_working_dir(explicit, roots, &self.fallback_dir).await;

        self.inspector.inspect(&request, &working_dir).await
    }

    pub async fn get_pr_templates(&self) -> Result<Vec<TemplateRecord>, TemplateError> {
        self.catalog.list_templates().await
    }

    pub async fn suggest_template(
        &self,
        args: SuggestTemplateArgs,
    ) -> Result<Recommendation, TemplateError> {
        self.advisor
            .suggest(&args.changes_summary, &args.change_type)
            .await
    }
}

fn parse_args<T: DeserializeOwned>(tool: ToolName, arguments: Option<Value>) -> Result<T, ToolError> {
    let value = match arguments {
        None | Some(Value::Null) => json!({}),
        Some(v) => v,
    };
    serde_json::from_value(value).map_err(|e| ToolError::InvalidArguments {
        tool: tool.as_ref().to_string(),
        message: e.to_string(),
    })
}

/// Pretty-printed (2-space) JSON as the tool's text content.
pub fn json_result<T: Serialize>(value: &T) -> CallToolResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => CallToolResult::text(text),
        Err(e) => CallToolResult::error(format!("failed to encode tool output: {e}")),
    }
}
