//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod messages;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::infra::LinkPolicy;
use output::OutputFormat;

/// notepress - publish wiki-style notes as static site page bundles
#[derive(Parser, Debug)]
#[command(name = "notepress", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/notepress/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Language for messages (en, zh)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export a note as a page bundle
    Export(ExportArgs),

    /// Show or change saved settings
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Note file to export
    pub note: Option<PathBuf>,

    /// Site root directory (overrides config)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Content directory under the site root (default: content/posts)
    #[arg(long)]
    pub content_path: Option<PathBuf>,

    /// Vault directory used to find attachments (default: the note's directory)
    #[arg(long)]
    pub vault: Option<PathBuf>,

    /// How document links name their target bundle
    #[arg(long, value_enum)]
    pub link_policy: Option<LinkPolicy>,

    /// Print the generated page instead of writing the bundle
    #[arg(long)]
    pub dry_run: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `config` command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Setting to show or change (root, content_path, vault, link_policy, lang)
    pub key: Option<String>,

    /// New value for the setting
    #[arg(requires = "key")]
    pub value: Option<String>,

    /// Remove the setting instead of changing it
    #[arg(long, requires = "key", conflicts_with = "value")]
    pub unset: bool,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn export_args_parse() {
        let cli = Cli::parse_from([
            "notepress",
            "-vv",
            "export",
            "post.md",
            "--root",
            "/site",
            "--link-policy",
            "slug",
            "--dry-run",
        ]);

        assert_eq!(cli.verbose, 2);
        let Command::Export(args) = cli.command else {
            panic!("expected export command");
        };
        assert_eq!(args.note, Some(PathBuf::from("post.md")));
        assert_eq!(args.root, Some(PathBuf::from("/site")));
        assert_eq!(args.link_policy, Some(LinkPolicy::Slug));
        assert!(args.dry_run);
    }

    #[test]
    fn config_value_requires_key() {
        assert!(Cli::try_parse_from(["notepress", "config", "--unset"]).is_err());
        assert!(Cli::try_parse_from(["notepress", "config", "root", "/x", "--unset"]).is_err());
        assert!(Cli::try_parse_from(["notepress", "config", "root", "--unset"]).is_ok());
    }
}
