//! App-wide constants.
//!
//! Centralises the server name, config paths, environment variable names,
//! and the fixed strings that appear in tool output.

/// Display name of the tool (lowercase). Also the MCP `serverInfo.name`.
pub const APP_NAME: &str = "pr-agent";

/// Crate version, reported in `serverInfo.version` and `pr-agent version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compilation target triple, injected by `build.rs`.
pub const TARGET: &str = env!("TARGET");

/// Local config filename (e.g. `.pr-agent.toml` in the start-up directory).
pub const CONFIG_FILENAME: &str = ".pr-agent.toml";

/// Directory name under `~/.config/` for global config and templates.
pub const CONFIG_DIR: &str = "pr-agent";

/// Subdirectory of [`CONFIG_DIR`] holding the default template store.
pub const TEMPLATES_SUBDIR: &str = "templates";

// ── Inspection defaults ─────────────────────────────────────────────

pub const DEFAULT_BASE_BRANCH: &str = "main";
pub const DEFAULT_MAX_DIFF_LINES: usize = 500;

/// Appended after the kept lines of an over-long diff.
pub const TRUNCATION_MARKER: &str = "\n... (truncated)";

/// Sole value of the `message` key when the diff is empty.
pub const NO_CHANGES_MESSAGE: &str = "No changes detected.";

/// Stands in for the diff body when the caller asked to leave it out.
pub const DIFF_SUPPRESSED_HINT: &str = "Use include_diff=True to see the diff.";

/// Attached to every template recommendation.
pub const USAGE_HINT: &str =
    "The assistant can help you fill out this template based on the specific changes in your PR.";

/// How long to wait for the host to answer a `roots/list` request.
pub const DEFAULT_ROOTS_TIMEOUT_MS: u64 = 5_000;

// ── Environment variable names ──────────────────────────────────────

pub const ENV_TEMPLATES_DIR: &str = "PR_AGENT_TEMPLATES_DIR";
pub const ENV_BASE_BRANCH: &str = "PR_AGENT_BASE_BRANCH";
pub const ENV_MAX_DIFF_LINES: &str = "PR_AGENT_MAX_DIFF_LINES";
pub const ENV_ROOTS_TIMEOUT_MS: &str = "PR_AGENT_ROOTS_TIMEOUT_MS";
pub const ENV_LOG: &str = "PR_AGENT_LOG";
