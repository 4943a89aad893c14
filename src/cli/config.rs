//! Configuration file support.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cli::ExportArgs;
use crate::export::{DEFAULT_CONTENT_PATH, ExportSettings};
use crate::infra::LinkPolicy;

/// Setting names accepted by `notepress config`.
pub const KEYS: &[&str] = &["root", "content_path", "vault", "link_policy", "lang"];

/// Application configuration loaded from config file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Site root directory
    pub root: Option<PathBuf>,

    /// Content directory relative to the site root
    pub content_path: Option<PathBuf>,

    /// Vault directory searched for attachments
    pub vault: Option<PathBuf>,

    /// Naming policy for document links
    pub link_policy: Option<LinkPolicy>,

    /// Message language
    pub lang: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Write configuration to a file, creating parent directories.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("failed to serialize config")?;
        std::fs::write(config_path, contents)
            .with_context(|| format!("failed to write config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/notepress/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("notepress")
            .join("config.toml")
    }

    /// Resolve export settings, with CLI arguments taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI argument
    /// 2. Config file setting
    /// 3. Built-in default (no root, `content/posts`, encoded links)
    pub fn export_settings(&self, args: &ExportArgs) -> ExportSettings {
        ExportSettings {
            root: args.root.clone().or_else(|| self.root.clone()),
            content_path: args
                .content_path
                .clone()
                .or_else(|| self.content_path.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_PATH)),
            link_policy: args.link_policy.or(self.link_policy).unwrap_or_default(),
        }
    }

    /// Resolve the vault directory used for attachment lookup.
    ///
    /// Precedence order:
    /// 1. CLI `--vault` argument
    /// 2. Config file `vault` setting
    /// 3. The note's own directory
    pub fn vault_dir(&self, cli_vault: Option<&PathBuf>, note: &Path) -> PathBuf {
        cli_vault
            .cloned()
            .or_else(|| self.vault.clone())
            .unwrap_or_else(|| {
                note.parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."))
            })
    }

    /// Returns a setting's value as text, if set.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let value = match key {
            "root" => self.root.as_ref().map(|p| p.display().to_string()),
            "content_path" => self.content_path.as_ref().map(|p| p.display().to_string()),
            "vault" => self.vault.as_ref().map(|p| p.display().to_string()),
            "link_policy" => self.link_policy.map(|p| p.to_string()),
            "lang" => self.lang.clone(),
            other => bail!("unknown setting '{}' (expected one of: {})", other, KEYS.join(", ")),
        };
        Ok(value)
    }

    /// Sets a setting from text, or clears it when `value` is `None`.
    pub fn set(&mut self, key: &str, value: Option<&str>) -> Result<()> {
        match key {
            "root" => self.root = value.map(PathBuf::from),
            "content_path" => self.content_path = value.map(PathBuf::from),
            "vault" => self.vault = value.map(PathBuf::from),
            "link_policy" => {
                self.link_policy = value
                    .map(str::parse::<LinkPolicy>)
                    .transpose()
                    .map_err(anyhow::Error::msg)?;
            }
            "lang" => self.lang = value.map(str::to_string),
            other => bail!("unknown setting '{}' (expected one of: {})", other, KEYS.join(", ")),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::OutputFormat;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn export_args() -> ExportArgs {
        ExportArgs {
            note: None,
            root: None,
            content_path: None,
            vault: None,
            link_policy: None,
            dry_run: false,
            format: OutputFormat::Human,
        }
    }

    #[test]
    fn default_config_has_no_root() {
        let config = Config::default();
        assert!(config.root.is_none());
    }

    #[test]
    fn export_settings_defaults() {
        let settings = Config::default().export_settings(&export_args());
        assert_eq!(settings, ExportSettings::default());
        assert_eq!(settings.content_path, PathBuf::from("content/posts"));
    }

    #[test]
    fn export_settings_prefers_cli_args() {
        let config = Config {
            root: Some(PathBuf::from("/config/site")),
            content_path: Some(PathBuf::from("content/blog")),
            link_policy: Some(LinkPolicy::Slug),
            ..Config::default()
        };
        let args = ExportArgs {
            root: Some(PathBuf::from("/cli/site")),
            link_policy: Some(LinkPolicy::Encoded),
            ..export_args()
        };

        let settings = config.export_settings(&args);

        assert_eq!(settings.root, Some(PathBuf::from("/cli/site")));
        assert_eq!(settings.content_path, PathBuf::from("content/blog"));
        assert_eq!(settings.link_policy, LinkPolicy::Encoded);
    }

    #[test]
    fn vault_dir_falls_back_to_note_dir() {
        let config = Config::default();
        assert_eq!(
            config.vault_dir(None, Path::new("/vault/notes/post.md")),
            PathBuf::from("/vault/notes")
        );
        assert_eq!(config.vault_dir(None, Path::new("post.md")), PathBuf::from("."));
    }

    #[test]
    fn vault_dir_prefers_cli_then_config() {
        let config = Config {
            vault: Some(PathBuf::from("/config/vault")),
            ..Config::default()
        };
        let cli = PathBuf::from("/cli/vault");
        let note = Path::new("/x/post.md");

        assert_eq!(config.vault_dir(Some(&cli), note), cli);
        assert_eq!(config.vault_dir(None, note), PathBuf::from("/config/vault"));
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut config = Config::default();
        config.set("root", Some("/site")).unwrap();
        config.set("link_policy", Some("slug")).unwrap();

        assert_eq!(config.get("root").unwrap(), Some("/site".to_string()));
        assert_eq!(config.get("link_policy").unwrap(), Some("slug".to_string()));

        config.set("root", None).unwrap();
        assert_eq!(config.get("root").unwrap(), None);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_policy() {
        let mut config = Config::default();
        assert!(config.set("theme", Some("dark")).is_err());
        assert!(config.set("link_policy", Some("kebab")).is_err());
        assert!(config.get("theme").is_err());
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");
        let config = Config {
            root: Some(PathBuf::from("/site")),
            link_policy: Some(LinkPolicy::Slug),
            lang: Some("zh".to_string()),
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&dir.path().join("none.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn load_rejects_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "root = [unclosed").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("notepress/config.toml"));
    }
}
