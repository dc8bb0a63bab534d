use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as StdCommand;
use tempfile::TempDir;

/// Check if svn, svnadmin and git-svn are all available
pub fn svn_available() -> bool {
    let works = |program: &str, args: &[&str]| {
        StdCommand::new(program)
            .args(args)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    };
    works("svnadmin", &["--version"])
        && works("svn", &["--version"])
        && works("git", &["svn", "--version"])
}

/// Local Subversion repository with a standard trunk/branches/tags layout.
pub struct SvnRepo {
    temp_dir: TempDir,
    repo_path: PathBuf,
    workspace_path: PathBuf,
}

impl SvnRepo {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let repo_path = temp_dir.path().join("svnrepo");
        let workspace_path = temp_dir.path().join("ws");
        run(temp_dir.path(), "svnadmin", &["create", &repo_path.to_string_lossy()]);

        let repo = Self {
            temp_dir,
            repo_path,
            workspace_path,
        };

        let import_dir = repo.temp_dir.path().join("import");
        fs::create_dir_all(import_dir.join("trunk")).expect("Failed to create trunk");
        fs::create_dir_all(import_dir.join("branches/1.0")).expect("Failed to create branches");
        fs::create_dir_all(import_dir.join("tags")).expect("Failed to create tags");
        fs::write(import_dir.join("trunk/README.txt"), "trunk\n").expect("Failed to write file");
        fs::write(import_dir.join("branches/1.0/README.txt"), "1.0\n")
            .expect("Failed to write file");
        run(
            repo.temp_dir.path(),
            "svn",
            &["import", "-q", "-m", "Initial import", "import", &repo.url()],
        );

        repo
    }

    /// `file://` URL of the repository. The path contains `svn`.
    pub fn url(&self) -> String {
        format!("file://{}", self.repo_path.to_string_lossy())
    }

    /// Get a scmws Command bound to this workspace
    pub fn scmws(&self) -> Command {
        let mut cmd = Command::cargo_bin("scmws").expect("Failed to find scmws binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.arg("-C").arg(&self.workspace_path);
        cmd.env("XDG_CONFIG_HOME", self.temp_dir.path().join("config"));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("SCMWS_VERBOSE");
        cmd.env_remove("SCMWS_BRANCH_PREFIX");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace_path
    }

    /// Commit a new trunk README through an svn working copy. Each call
    /// creates one svn revision.
    pub fn commit_to_trunk(&self, content: &str, message: &str) {
        let wc = self.temp_dir.path().join("wc");
        if !wc.exists() {
            run(
                self.temp_dir.path(),
                "svn",
                &["checkout", "-q", &format!("{}/trunk", self.url()), "wc"],
            );
        }
        fs::write(wc.join("README.txt"), content).expect("Failed to write file");
        run(&wc, "svn", &["commit", "-q", "-m", message]);
    }

    /// Run git inside the workspace
    pub fn git(&self, args: &[&str]) {
        run(&self.workspace_path, "git", args);
    }
}

fn run(dir: &Path, program: &str, args: &[&str]) {
    let output = StdCommand::new(program)
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run {} {:?}: {}", program, args, e));

    if !output.status.success() {
        panic!(
            "{} {:?} failed:\nstdout: {}\nstderr: {}",
            program,
            args,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}
