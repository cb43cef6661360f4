//! CLI command definitions and human-facing output.
//!
//! Uses clap derive macros for argument definitions.

pub mod args;

use pr_agent::templates::builtin::InstallReport;

/// Print what `templates init` did to stderr.
pub fn print_install_report(report: &InstallReport) {
    use colored::Colorize;

    for path in &report.written {
        eprintln!("  {} {}", "✔".green().bold(), path.display());
    }
    for path in &report.skipped {
        eprintln!(
            "  {} {} {}",
            "·".dimmed(),
            path.display(),
            "(exists, use --force to overwrite)".dimmed()
        );
    }
}
