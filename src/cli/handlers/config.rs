//! Handler for the `config` command.

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::cli::ConfigArgs;
use crate::cli::config::{Config, KEYS};
use crate::cli::messages::{MessageKey, Messages};

/// Handle the `config` command.
///
/// - no key: list every setting
/// - key only: print that setting
/// - key and value (or `--unset`): change it and save the file
pub fn handle_config(
    args: &ConfigArgs,
    config_path: &Path,
    config: &Config,
    messages: &Messages,
) -> Result<()> {
    let Some(key) = args.key.as_deref() else {
        println!("# {}", config_path.display());
        for key in KEYS {
            match config.get(key)? {
                Some(value) => println!("{} = {}", key, value),
                None => println!("{} = (unset)", key),
            }
        }
        return Ok(());
    };

    if args.value.is_none() && !args.unset {
        if let Some(value) = config.get(key)? {
            println!("{}", value);
        }
        return Ok(());
    }

    let mut updated = config.clone();
    updated.set(key, args.value.as_deref())?;
    updated.save_to(config_path)?;
    info!(key, path = %config_path.display(), "saved configuration");

    let message = if args.unset {
        MessageKey::SettingUnset
    } else {
        MessageKey::SettingSaved
    };
    println!("{}: {}", messages.get(message), key);
    Ok(())
}
