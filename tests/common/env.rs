//! Isolated environment for running the dirwatch binary

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use tempfile::TempDir;

/// Result of running a dirwatch CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Temp directory for file system fixtures plus an isolated config home
pub struct TestEnv {
    pub root: TempDir,
    config_home: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
            config_home: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        std::fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write `$XDG_CONFIG_HOME/dirwatch/config.toml`
    pub fn write_user_config(&self, content: &str) -> PathBuf {
        let dir = self.config_home.path().join("dirwatch");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dirwatch"));
        cmd.args(args)
            .current_dir(self.root.path())
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env_remove("DIRWATCH_EVENTS")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = self.command(args).output().unwrap();
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Start a long-running command with piped stdout
    pub fn spawn(&self, args: &[&str]) -> Child {
        self.command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap()
    }
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}
