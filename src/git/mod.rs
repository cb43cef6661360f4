//! Git access: the command seam and its CLI implementation.

pub mod cli;

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

pub use cli::GitCli;

/// Errors from running a git query.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    /// Non-zero exit. Displays as `Git error: <stderr>`.
    #[error("Git error: {stderr}")]
    Failed { stderr: String },

    #[error("git output is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Runs one read-only git query in a working directory and returns stdout.
///
/// The inspector only talks to git through this trait so tests can script
/// the answers and count the queries.
#[async_trait]
pub trait VcsCommand: Send + Sync {
    async fn run(&self, working_dir: &Path, args: &[&str]) -> Result<String, GitError>;
}
