//! Clap argument types.

use clap::Parser;
use std::path::PathBuf;

/// Summarize pending git changes and recommend PR description templates.
///
/// Without a subcommand, runs the MCP server on stdio.
#[derive(Parser, Debug)]
#[command(name = "pr-agent", version = pr_agent::constants::VERSION)]
pub struct Cli {
    /// Template store directory (overrides config and PR_AGENT_TEMPLATES_DIR).
    #[arg(long, global = true)]
    pub templates_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Run the MCP server on stdin/stdout.
    Serve,

    /// Inspect the changes on the current branch and print the report.
    Analyze(AnalyzeArgs),

    /// Work with the template store.
    Templates {
        #[command(subcommand)]
        action: TemplatesAction,
    },

    /// Recommend a template for a change you have classified.
    Suggest(SuggestArgs),

    /// Print version and build information.
    Version,
}

/// Arguments for the `analyze` subcommand.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Base branch to compare against (default from config: main).
    #[arg(long)]
    pub base: Option<String>,

    /// Leave the full diff out of the report.
    #[arg(long, default_value_t = false)]
    pub no_diff: bool,

    /// Maximum number of diff lines in the truncated form.
    #[arg(long)]
    pub max_diff_lines: Option<usize>,

    /// Repository directory (default: current directory).
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Template store subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum TemplatesAction {
    /// Print every template with its content.
    List,
    /// Write the built-in templates into the store.
    Init {
        /// Overwrite templates that already exist.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print the template store directory.
    Path,
}

/// Arguments for the `suggest` subcommand.
#[derive(Parser, Debug)]
pub struct SuggestArgs {
    /// Kind of change: bug, fix, feature, docs, refactor, test, performance, security, ...
    #[arg(long = "type", short = 't')]
    pub change_type: String,

    /// Your summary of what the changes do.
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["pr-agent"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn analyze_flags() {
        let cli = Cli::try_parse_from([
            "pr-agent",
            "analyze",
            "--base",
            "develop",
            "--no-diff",
            "--max-diff-lines",
            "50",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Analyze(args)) => {
                assert_eq!(args.base.as_deref(), Some("develop"));
                assert!(args.no_diff);
                assert_eq!(args.max_diff_lines, Some(50));
                assert!(args.path.is_none());
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn suggest_requires_type() {
        assert!(Cli::try_parse_from(["pr-agent", "suggest", "Fix crash"]).is_err());
        let cli = Cli::try_parse_from(["pr-agent", "suggest", "-t", "bug", "Fix crash"]).unwrap();
        match cli.command {
            Some(Command::Suggest(args)) => {
                assert_eq!(args.change_type, "bug");
                assert_eq!(args.summary, "Fix crash");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn global_templates_dir_after_subcommand() {
        let cli = Cli::try_parse_from([
            "pr-agent",
            "templates",
            "list",
            "--templates-dir",
            "/tmp/tpl",
        ])
        .unwrap();
        assert_eq!(cli.templates_dir, Some(PathBuf::from("/tmp/tpl")));
    }
}
