//! Common utilities for Cachet CLI tests.
//!
//! `TestEnv` owns an isolated working directory and home directory and runs
//! the `cachet` binary inside them, with every `CACHET_*` variable cleared.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

const CACHET_VARS: &[&str] = &[
    "CACHET_ENTRY_FILENAME",
    "CACHET_BUCKET",
    "CACHET_DISTRIBUTION_ID",
    "CACHET_LOG_LEVEL",
    "CACHET_LOG_FORMAT",
    "RUST_LOG",
];

/// Result of running a Cachet CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Parse stdout as NDJSON
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).unwrap_or_else(|e| panic!("bad NDJSON {l:?}: {e}")))
            .collect()
    }

    /// First event with the given name
    pub fn event(&self, name: &str) -> serde_json::Value {
        self.events()
            .into_iter()
            .find(|e| e["event"] == name)
            .unwrap_or_else(|| panic!("no {name} event in:\n{}", self.stdout))
    }
}

/// Isolated project and home directories
pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().unwrap(),
            home_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// A project with a small built site under `dist/`
    pub fn with_site() -> Self {
        let env = Self::new();
        env.write("dist/index.html", "<html>home</html>");
        env.write("dist/about.html", "<html>about</html>");
        env.write("dist/assets/app.3f9a2c1b.js", "console.log(1)");
        env.write("dist/assets/site.8e7d6c5b.css", "body{}");
        env.write("dist/img/logo.png", "png");
        env.write("dist/robots.txt", "User-agent: *");
        env
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let full = self.path(relative);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full, content).unwrap();
    }

    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.path(relative)).unwrap();
    }

    /// Write `cachet.toml` in the project root
    pub fn write_config(&self, content: &str) {
        self.write("cachet.toml", content);
    }

    /// Configure local-directory storage at `<project>/bucket`
    pub fn use_local_bucket(&self) -> PathBuf {
        let bucket = self.path("bucket");
        self.write_config(&format!(
            "[storage]\nkind = \"local\"\ndirectory = {:?}\n",
            bucket.display().to_string()
        ));
        bucket
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], vars: &[(&str, &str)]) -> TestResult {
        run_in(self.project_root.path(), self.home_dir.path(), args, vars)
    }
}

fn run_in(cwd: &Path, home: &Path, args: &[&str], vars: &[(&str, &str)]) -> TestResult {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cachet"));
    cmd.current_dir(cwd)
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .stdin(Stdio::null());
    for var in CACHET_VARS {
        cmd.env_remove(var);
    }
    for (key, value) in vars {
        cmd.env(key, value);
    }

    let output = cmd.output().expect("failed to execute cachet");
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
