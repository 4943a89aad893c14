//! Handler for the `export` command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, error, warn};

use crate::cli::ExportArgs;
use crate::cli::config::Config;
use crate::cli::messages::{MessageKey, Messages};
use crate::cli::output::{ExportSummary, Output, OutputFormat};
use crate::domain::{AttachmentFailureKind, SourceDocument};
use crate::export::{
    AttachmentResolver, ExportError, ExportSettings, LinkTargetResolver, VaultResolver,
    export_note, render_note,
};
use crate::infra::read_source;

/// Handle the `export` command.
///
/// Whole-export failures are shown as a short notification, logged in
/// full, and returned. Attachment failures are shown per item and do not
/// fail the command.
pub fn handle_export(args: &ExportArgs, config: &Config, messages: &Messages) -> Result<()> {
    let settings = config.export_settings(args);

    let doc = match load_note(args, &settings) {
        Ok(doc) => doc,
        Err(err) => return Err(report_failure(err, messages)),
    };

    let vault = config.vault_dir(args.vault.as_ref(), doc.path());
    let resolver = open_vault(&vault, messages);

    let summary = if args.dry_run {
        let rendered = match render_note(&doc, None, settings.link_policy) {
            Ok(rendered) => rendered,
            Err(err) => return Err(report_failure(err, messages)),
        };
        let plan = AttachmentResolver::new(resolver.as_ref()).plan(&doc);
        ExportSummary::from_dry_run(&rendered, &plan)
    } else {
        match export_note(&doc, None, &settings, resolver.as_ref()) {
            Ok(report) => ExportSummary::from_report(&report),
            Err(err) => return Err(report_failure(err, messages)),
        }
    };

    let failed = summary.failed_attachments();
    if failed > 0 {
        warn!(failed, "some attachments were not copied");
    }

    print_summary(args.format, &summary, messages)
}

/// Checks settings, then reads the note. No I/O happens without a root.
fn load_note(args: &ExportArgs, settings: &ExportSettings) -> Result<SourceDocument, ExportError> {
    settings.root()?;

    let path: PathBuf = args
        .note
        .clone()
        .ok_or(ExportError::NoActiveDocument { path: None })?;
    if !path.is_file() {
        return Err(ExportError::NoActiveDocument { path: Some(path) });
    }

    read_source(&path).map_err(ExportError::Read)
}

/// Indexes the vault used for attachment lookup.
///
/// A vault that cannot be read does not stop the export: the note is still
/// written and every image embed is reported as not found.
fn open_vault(vault: &Path, messages: &Messages) -> Box<dyn LinkTargetResolver> {
    match VaultResolver::new(vault) {
        Ok(resolver) => {
            debug!(vault = %resolver.root().display(), "resolving attachments");
            Box::new(resolver)
        }
        Err(err) => {
            eprintln!("{}: {}", messages.get(MessageKey::VaultUnavailable), vault.display());
            warn!(vault = %vault.display(), error = %err, "vault could not be indexed");
            Box::new(HashMap::<String, PathBuf>::new())
        }
    }
}

/// Shows the notification for a fatal error and logs the detail.
fn report_failure(err: ExportError, messages: &Messages) -> anyhow::Error {
    let key = match &err {
        ExportError::Configuration => MessageKey::RootNotConfigured,
        ExportError::NoActiveDocument { .. } => MessageKey::NoActiveNote,
        ExportError::Read(_) => MessageKey::ReadFailed,
        ExportError::MetadataParse(_) => MessageKey::InvalidFrontMatter,
        ExportError::Write(_) => MessageKey::WriteFailed,
    };

    eprintln!("{}", messages.get(key));
    match &err {
        ExportError::NoActiveDocument { path: Some(path) } => {
            error!(path = %path.display(), "note file does not exist");
        }
        _ => error!(error = %err, "export failed"),
    }

    err.into()
}

/// Print the result in the requested format.
fn print_summary(format: OutputFormat, summary: &ExportSummary, messages: &Messages) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for attachment in &summary.attachments {
                let key = match attachment.failure {
                    Some(AttachmentFailureKind::Resolution) => MessageKey::AttachmentNotFound,
                    Some(AttachmentFailureKind::Copy) => MessageKey::AttachmentCopyFailed,
                    None => continue,
                };
                eprintln!("{}: {}", messages.get(key), attachment.link);
            }

            match (&summary.content, &summary.index_path) {
                (Some(content), _) => {
                    print!("{}", content);
                    eprintln!("{}", messages.get(MessageKey::DryRun));
                }
                (None, Some(index_path)) => {
                    println!("{}: {}", messages.get(MessageKey::Exported), index_path);
                }
                (None, None) => {}
            }

            let copied = summary
                .attachments
                .iter()
                .filter(|a| a.destination.is_some())
                .count();
            if copied > 0 {
                println!("{}: {}", messages.get(MessageKey::AttachmentsCopied), copied);
            }
        }
        OutputFormat::Json => {
            let output = Output::new(summary);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
