//! Common test utilities for CLI integration tests.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables the fixtures' keys map to; removed so the host environment
/// cannot override them.
const FIXTURE_VARIABLES: &[&str] = &[
    "SPEED",
    "AXIS",
    "AXIS_NAME",
    "AXIS_X",
    "ENABLED",
    "MOTION_MAX_SPEED",
];

/// Isolated test environment with its own temporary directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// The mcs-cli binary with logging left at its default level and no
    /// inherited overrides for fixture keys.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("mcs-cli").expect("Failed to find mcs-cli binary");
        cmd.env_remove("MCS_LOG_MODE");
        for name in FIXTURE_VARIABLES {
            cmd.env_remove(name);
        }
        cmd
    }

    /// The mcs-cli binary pointed at an explicit config file.
    pub fn command_with_config(&self, config: &Path) -> Command {
        let mut cmd = self.command();
        cmd.arg("--config").arg(config);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temporary directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Copy the mcs-cli binary into the temporary directory so that default
    /// discovery looks there.
    pub fn install_binary(&self) -> PathBuf {
        let source = assert_cmd::cargo::cargo_bin("mcs-cli");
        let target = self
            .temp_path
            .join(source.file_name().expect("binary has a file name"));
        std::fs::copy(&source, &target).expect("Failed to copy mcs-cli binary");
        target
    }
}

/// Parse stdout of a successful `config` run as JSON.
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}
