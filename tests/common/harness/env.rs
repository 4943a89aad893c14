//! Isolated test environment with temp directories.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use super::NotepressCommand;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a vault, a site root and a config file.
///
/// Everything lives in one temp directory that is removed on drop.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    vault: PathBuf,
    site: PathBuf,
    config: PathBuf,
}

impl TestEnv {
    /// Creates empty `vault/` and `site/` directories.
    ///
    /// The config file path is reserved but not created.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let vault = temp_dir.path().join("vault");
        let site = temp_dir.path().join("site");
        std::fs::create_dir_all(&vault).expect("Failed to create vault");
        std::fs::create_dir_all(&site).expect("Failed to create site");
        let config = temp_dir.path().join("config").join("config.toml");
        Self {
            _temp_dir: temp_dir,
            vault,
            site,
            config,
        }
    }

    pub fn vault(&self) -> &Path {
        &self.vault
    }

    pub fn site(&self) -> &Path {
        &self.site
    }

    pub fn config_path(&self) -> &Path {
        &self.config
    }

    /// Writes a note into the vault and returns its path.
    pub fn add_note(&self, name: &str, content: &str) -> PathBuf {
        self.write_file(name, content.as_bytes())
    }

    /// Writes a file (note or attachment) relative to the vault.
    pub fn write_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.vault.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, bytes).expect("Failed to write file");
        path
    }

    /// Path of the bundle directory for a note under the default content path.
    pub fn bundle(&self, basename: &str) -> PathBuf {
        self.site.join("content").join("posts").join(basename)
    }

    /// Reads the exported `index.md` for a note.
    pub fn read_index(&self, basename: &str) -> String {
        std::fs::read_to_string(self.bundle(basename).join("index.md"))
            .expect("Failed to read exported index.md")
    }

    /// Creates a command wired to this environment's config file.
    pub fn cmd(&self) -> NotepressCommand {
        NotepressCommand::new().config(&self.config)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
