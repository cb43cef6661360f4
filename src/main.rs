//! pr-agent: MCP server and CLI for PR preparation.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;

use cli::args::{AnalyzeArgs, Cli, Command, SuggestArgs, TemplatesAction};
use pr_agent::config::Config;
use pr_agent::constants;
use pr_agent::env::Env;
use pr_agent::git::GitCli;
use pr_agent::inspect::ChangeInspector;
use pr_agent::logging;
use pr_agent::models::InspectOutcome;
use pr_agent::server::McpServer;
use pr_agent::server::tools::{AnalyzeFileChangesArgs, SuggestTemplateArgs, Toolbox};
use pr_agent::templates::{TemplateCatalog, builtin};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let start_dir = std::env::current_dir().context("could not determine current directory")?;
    let env = Env::real();
    let mut config =
        Config::load(Some(&start_dir), &env).context("failed to load configuration")?;
    if let Some(dir) = cli.templates_dir {
        config.templates.dir = Some(dir);
    }
    logging::init(&env, config.log.level.as_deref());
    config.log_warnings();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_serve(&config, start_dir).await,
        Command::Analyze(args) => run_analyze(&config, start_dir, args).await,
        Command::Templates { action } => run_templates(&config, action).await,
        Command::Suggest(args) => run_suggest(&config, start_dir, args).await,
        Command::Version => run_version(),
    }
}

/// Wire the tools to the real git executable and the configured store.
fn build_toolbox(config: &Config, fallback_dir: PathBuf) -> Toolbox {
    Toolbox::new(
        ChangeInspector::new(Arc::new(GitCli::new())),
        TemplateCatalog::new(config.templates_dir()),
        config.inspect.clone(),
        fallback_dir,
    )
}

async fn run_serve(config: &Config, start_dir: PathBuf) -> Result<()> {
    let toolbox = build_toolbox(config, start_dir);
    let roots_timeout = Duration::from_millis(config.server.roots_timeout_ms);
    tracing::debug!(templates = %config.templates_dir().display(), "starting server");

    McpServer::new(toolbox, roots_timeout)
        .run_stdio()
        .await
        .context("MCP server failed")
}

/// Run one inspection and print the JSON report.
async fn run_analyze(config: &Config, start_dir: PathBuf, args: AnalyzeArgs) -> Result<()> {
    let repo_dir = match args.path {
        Some(path) => std::fs::canonicalize(&path)
            .with_context(|| format!("--path directory not found: {}", path.display()))?,
        None => start_dir,
    };
    let toolbox = build_toolbox(config, repo_dir);

    let outcome = toolbox
        .analyze_file_changes(
            AnalyzeFileChangesArgs {
                base_branch: args.base,
                include_diff: args.no_diff.then_some(false),
                max_diff_lines: args.max_diff_lines,
                working_dir: None,
            },
            None,
        )
        .await;

    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if let InspectOutcome::Error { error } = &outcome {
        bail!("inspection failed: {error}");
    }
    Ok(())
}

async fn run_templates(config: &Config, action: TemplatesAction) -> Result<()> {
    let dir = config.templates_dir();

    match action {
        TemplatesAction::List => {
            let records = TemplateCatalog::new(&dir)
                .list_templates()
                .await
                .with_context(|| {
                    format!(
                        "failed to read template store (run `pr-agent templates init` to create it at {})",
                        dir.display()
                    )
                })?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        TemplatesAction::Init { force } => {
            let report = builtin::install(&dir, force)
                .await
                .context("failed to install built-in templates")?;
            cli::print_install_report(&report);
            eprintln!(
                "Installed {} template(s) into {} ({} kept).",
                report.written.len(),
                dir.display(),
                report.skipped.len(),
            );
        }
        TemplatesAction::Path => println!("{}", dir.display()),
    }

    Ok(())
}

async fn run_suggest(config: &Config, start_dir: PathBuf, args: SuggestArgs) -> Result<()> {
    let toolbox = build_toolbox(config, start_dir);
    let recommendation = toolbox
        .suggest_template(SuggestTemplateArgs {
            changes_summary: args.summary,
            change_type: args.change_type,
        })
        .await
        .context("failed to read template store")?;

    println!("{}", serde_json::to_string_pretty(&recommendation)?);
    Ok(())
}

/// Print version and build information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!(
        "{} {}",
        constants::APP_NAME.bold(),
        constants::VERSION.green().bold()
    );
    println!("{}     {}", "target:".dimmed(), constants::TARGET);
    Ok(())
}
