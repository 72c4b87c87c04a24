//! TestRepo helper for integration tests.
//!
//! Provides a temporary hg repository for testing hgcomb operations.

use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Whether an `hg` binary can be run.
pub fn hg_available() -> bool {
    Command::new("hg")
        .arg("--version")
        .env("HGPLAIN", "1")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// A temporary hg repository for testing.
///
/// The repository is automatically cleaned up when the TestRepo is dropped.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new hg repository in a temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");

        let output = Command::new("hg")
            .arg("init")
            .current_dir(dir.path())
            .output()
            .expect("Failed to execute hg init");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!("hg init failed: {}", stderr);
        }

        Self { dir }
    }

    /// Get the path to the repository root.
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Execute an hg command in this repository.
    ///
    /// # Panics
    ///
    /// Panics if the command fails to execute or returns a non-zero exit code.
    pub fn hg(&self, args: &[&str]) -> String {
        let output = Command::new("hg")
            .args(args)
            .current_dir(self.path())
            .env("HGPLAIN", "1")
            .env("HGUSER", "Test User <test@example.com>")
            .output()
            .expect("Failed to execute hg command");

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            panic!(
                "hg {:?} failed with exit code {:?}:\n{}",
                args,
                output.status.code(),
                stderr
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    /// Write a file in the repository.
    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    /// Write `name` and commit it as `user`.
    pub fn commit_file(&self, name: &str, content: &str, user: &str, message: &str) {
        self.write_file(name, content);
        self.hg(&["commit", "-A", "-u", user, "-m", message, name]);
    }

    /// Absolute path of a file in the repository.
    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    /// Number of changesets in the repository.
    pub fn count_changesets(&self) -> usize {
        self.hg(&["log", "--template", "x"]).matches('x').count()
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}
