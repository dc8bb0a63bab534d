use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;
use tempfile::TempDir;

/// Bare git origin plus an empty workspace directory.
///
/// The origin has `master`, `develop` (default), `0.1` and `feature/login`
/// branches and the tags `v0.0.1`, `v0.0.2` and `v0.1.0`.
pub struct TestRepo {
    temp_dir: TempDir,
    source_path: PathBuf,
    origin_path: PathBuf,
    workspace_path: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source_path = temp_dir.path().join("source");
        let origin_path = temp_dir.path().join("origin.git");
        let workspace_path = temp_dir.path().join("ws");
        fs::create_dir_all(&source_path).expect("Failed to create source directory");

        run_git(&source_path, &["init", "-q"]);
        run_git(&source_path, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        run_git(&source_path, &["config", "user.email", "test@example.com"]);
        run_git(&source_path, &["config", "user.name", "Test User"]);

        let repo = Self {
            temp_dir,
            source_path,
            origin_path,
            workspace_path,
        };

        repo.commit_file("README.md", "# Test Repository\n", "Initial commit");
        run_git(&repo.source_path, &["tag", "v0.0.1"]);

        run_git(&repo.source_path, &["checkout", "-q", "-b", "develop"]);
        repo.commit_file("CHANGELOG.md", "0.0.2\n", "Release 0.0.2");
        run_git(&repo.source_path, &["tag", "v0.0.2"]);

        run_git(&repo.source_path, &["checkout", "-q", "-b", "0.1"]);
        repo.commit_file("CHANGELOG.md", "0.0.2\n0.1.0\n", "Release 0.1.0");
        run_git(&repo.source_path, &["tag", "v0.1.0"]);

        run_git(&repo.source_path, &["checkout", "-q", "-b", "feature/login", "develop"]);
        repo.commit_file("login.txt", "login\n", "Add login");
        run_git(&repo.source_path, &["checkout", "-q", "develop"]);

        let origin = repo.origin_path.to_string_lossy().to_string();
        run_git(repo.temp_dir.path(), &["clone", "-q", "--bare", "source", &origin]);
        run_git(&repo.origin_path, &["symbolic-ref", "HEAD", "refs/heads/develop"]);
        run_git(&repo.source_path, &["remote", "add", "origin", &origin]);

        repo
    }

    /// Create a repository whose workspace is already configured.
    pub fn configured() -> Self {
        let repo = Self::new();
        repo.scmws()
            .args(["configure", &repo.origin_url()])
            .assert()
            .success();
        repo
    }

    /// URL of the bare origin. Ends in `.git`, so it is classified as git.
    pub fn origin_url(&self) -> String {
        self.origin_path.to_string_lossy().to_string()
    }

    /// Get a scmws Command bound to this workspace
    pub fn scmws(&self) -> Command {
        let mut cmd = Command::cargo_bin("scmws").expect("Failed to find scmws binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.arg("-C").arg(&self.workspace_path);
        // Keep the user's config and environment out of the tests
        cmd.env("XDG_CONFIG_HOME", self.temp_dir.path().join("config"));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SCMWS_VERBOSE");
        cmd.env_remove("SCMWS_BRANCH_PREFIX");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Workspace directory driven by scmws
    pub fn workspace(&self) -> &Path {
        &self.workspace_path
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Commit a file on the current source branch
    pub fn commit_file(&self, path: &str, content: &str, message: &str) {
        let file_path = self.source_path.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write file");
        run_git(&self.source_path, &["add", path]);
        run_git(&self.source_path, &["commit", "-q", "-m", message]);
    }

    /// Add `count` commits to `branch` and push them to origin
    pub fn push_commits(&self, branch: &str, count: usize) {
        run_git(&self.source_path, &["checkout", "-q", branch]);
        for i in 0..count {
            let name = format!("upstream-{i}.txt");
            self.commit_file(&name, "upstream\n", &format!("Upstream change {i}"));
        }
        run_git(&self.source_path, &["push", "-q", "origin", branch]);
    }

    /// Resolve a revision in the origin repository
    pub fn origin_rev(&self, rev: &str) -> String {
        git_stdout(&self.origin_path, &["rev-parse", &format!("{rev}^{{commit}}")])
    }

    /// Resolve a revision in the workspace
    pub fn workspace_rev(&self, rev: &str) -> String {
        git_stdout(&self.workspace_path, &["rev-parse", rev])
    }
}

pub(crate) fn git_stdout(dir: &Path, args: &[&str]) -> String {
    let output = StdCommand::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run git {:?}: {}", args, e));
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub(crate) fn run_git(dir: &Path, args: &[&str]) {
    let output = StdCommand::new("git")
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run git {:?}: {}", args, e));

    if !output.status.success() {
        panic!(
            "git {:?} failed:\nstdout: {}\nstderr: {}",
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
