//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Run a git command inside `repo_dir` and panic on failure.
pub async fn run_git(repo_dir: &Path, args: &[&str]) {
    let output = tokio::process::Command::new("git")
        .args(args)
        .current_dir(repo_dir)
        .output()
        .await
        .unwrap_or_else(|e| panic!("failed to run git {}: {e}", args.join(" ")));

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit {}): {stderr}",
            args.join(" "),
            output.status
        );
    }
}

/// Create a repo whose `main` holds one committed file, then check out
/// `feature`. The tempdir handle must outlive the test.
pub async fn setup_repo() -> (PathBuf, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let repo = tmp.path().to_path_buf();

    run_git(&repo, &["init", "-b", "main"]).await;
    run_git(&repo, &["config", "user.email", "test@pr-agent.dev"]).await;
    run_git(&repo, &["config", "user.name", "PR Agent Test"]).await;
    run_git(&repo, &["config", "commit.gpgsign", "false"]).await;

    std::fs::write(repo.join("README.md"), "# Demo\n").unwrap();
    run_git(&repo, &["add", "."]).await;
    run_git(&repo, &["commit", "-m", "initial commit"]).await;
    run_git(&repo, &["checkout", "-b", "feature"]).await;

    (repo, tmp)
}

pub async fn commit_file(repo: &Path, name: &str, content: &str, message: &str) {
    std::fs::write(repo.join(name), content).unwrap();
    run_git(repo, &["add", name]).await;
    run_git(repo, &["commit", "-m", message]).await;
}
