//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Fluent wrapper around `assert_cmd::Command` for the `notepress` binary.
///
/// Provides a builder-style API for constructing and executing CLI commands.
pub struct NotepressCommand {
    args: Vec<String>,
}

impl NotepressCommand {
    /// Creates a new command for the `notepress` binary.
    pub fn new() -> Self {
        Self { args: Vec::new() }
    }

    /// Sets the `--config` option to an isolated config file.
    pub fn config(mut self, path: &Path) -> Self {
        self.args.push("--config".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("notepress").expect("Failed to find notepress binary");
        cmd.args(&self.args);
        cmd.env_remove("RUST_LOG");
        cmd.env("LANG", "en_US.UTF-8");
        cmd.env_remove("LC_ALL");
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `export` command with a note path.
    pub fn export(self, note: &Path) -> Self {
        self.args(["export".to_string(), note.to_string_lossy().to_string()])
    }

    /// Configures for the `config` command.
    pub fn config_cmd(self) -> Self {
        self.args(["config"])
    }

    /// Adds `--root <path>`.
    pub fn with_root(self, root: &Path) -> Self {
        self.args(["--root".to_string(), root.to_string_lossy().to_string()])
    }

    /// Adds `--vault <path>`.
    pub fn with_vault(self, vault: &Path) -> Self {
        self.args(["--vault".to_string(), vault.to_string_lossy().to_string()])
    }

    /// Adds `--format json`.
    pub fn with_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for NotepressCommand {
    fn default() -> Self {
        Self::new()
    }
}
