//! AWS CLI runner
//!
//! Both AWS adapters shell out to the `aws` binary instead of linking an
//! SDK. Credentials, regions and retries are whatever the user's CLI
//! profile says.

use std::process::{Command, Stdio};

use tracing::debug;

/// Builder for `aws` invocations sharing one profile
#[derive(Debug, Clone, Default)]
pub struct AwsCli {
    profile: Option<String>,
}

impl AwsCli {
    pub fn new(profile: Option<String>) -> Self {
        Self { profile }
    }

    /// Check if the `aws` binary is installed
    pub fn check_available() -> bool {
        Command::new("aws")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// `aws <args…> [--profile P]` with captured output
    pub fn command<I, S>(&self, args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        let mut cmd = Command::new("aws");
        cmd.args(args);
        if let Some(profile) = &self.profile {
            cmd.arg("--profile").arg(profile);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Run to completion, returning stdout or a message built from stderr
    pub fn run(&self, mut cmd: Command) -> Result<String, String> {
        debug!(command = ?cmd, "running aws");
        let output = cmd
            .output()
            .map_err(|e| format!("failed to run aws: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!(
                "aws exited with {:?}: {}",
                output.status.code(),
                stderr.trim()
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
