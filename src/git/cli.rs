//! Git CLI wrapper.
//!
//! Shells out to `git` via `tokio::process::Command`.

use std::path::Path;

use async_trait::async_trait;

use super::{GitError, VcsCommand};

/// [`VcsCommand`] backed by the `git` executable on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a specific executable instead of `git` from `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VcsCommand for GitCli {
    async fn run(&self, working_dir: &Path, args: &[&str]) -> Result<String, GitError> {
        tracing::debug!(cwd = %working_dir.display(), "git {}", args.join(" "));

        let output = tokio::process::Command::new(&self.program)
            .args(args)
            .current_dir(working_dir)
            .output()
            .await
            .map_err(GitError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::debug!(status = %output.status, "git {} failed: {stderr}", args.join(" "));
            return Err(GitError::Failed { stderr });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_in_non_git_dir_fails_with_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitCli::new()
            .run(dir.path(), &["diff", "main..HEAD"])
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Git error: "), "got: {msg}");
        assert!(matches!(err, GitError::Failed { .. }));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GitCli::with_program("pr-agent-no-such-git")
            .run(dir.path(), &["status"])
            .await
            .unwrap_err();
        assert!(matches!(err, GitError::Spawn(_)));
        assert!(err.to_string().contains("failed to run git"));
    }

    #[tokio::test]
    async fn run_returns_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out = GitCli::new().run(dir.path(), &["--version"]).await.unwrap();
        assert!(out.starts_with("git version"), "got: {out}");
    }
}
