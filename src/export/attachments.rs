//! Attachment resolution and copying.
//!
//! Every image embed in a note is resolved to a file and copied into the
//! bundle directory. Failures are collected per item; one bad attachment
//! never stops the rest of the batch.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::{AttachmentEntry, AttachmentError, AttachmentOutcome, SourceDocument};
use crate::export::links::scan;
use crate::infra::{FsError, copy_into, scan_vault};

/// Resolves a link target, as written in a note, to an existing file.
pub trait LinkTargetResolver {
    /// Returns the file `link` refers to when written in the note at `from`.
    fn resolve(&self, link: &str, from: &Path) -> Option<PathBuf>;
}

/// Fixed link-to-file table, for hosts that resolve links themselves.
impl LinkTargetResolver for HashMap<String, PathBuf> {
    fn resolve(&self, link: &str, _from: &Path) -> Option<PathBuf> {
        self.get(link).cloned()
    }
}

/// Resolves links against the files of a vault directory.
///
/// Lookup order:
/// 1. relative to the note's own directory
/// 2. relative to the vault root
/// 3. by file name anywhere in the vault, shallowest path first
#[derive(Debug, Clone)]
pub struct VaultResolver {
    root: PathBuf,
    by_name: HashMap<String, Vec<PathBuf>>,
}

impl VaultResolver {
    /// Indexes every non-hidden file under `root`.
    ///
    /// # Errors
    ///
    /// Returns `FsError` if `root` is missing or not a directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, FsError> {
        let root = root.into();
        let mut by_name: HashMap<String, Vec<PathBuf>> = HashMap::new();

        for path in scan_vault(&root)? {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                by_name.entry(name.to_string()).or_default().push(path);
            }
        }

        for candidates in by_name.values_mut() {
            candidates.sort_by(|a, b| {
                a.components()
                    .count()
                    .cmp(&b.components().count())
                    .then_with(|| a.cmp(b))
            });
        }

        debug!(root = %root.display(), names = by_name.len(), "indexed vault");
        Ok(Self { root, by_name })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl LinkTargetResolver for VaultResolver {
    fn resolve(&self, link: &str, from: &Path) -> Option<PathBuf> {
        let link = link.trim();
        if link.is_empty() {
            return None;
        }

        let relative = from.parent().map(|dir| dir.join(link));
        let candidates = relative.into_iter().chain(Some(self.root.join(link)));
        for candidate in candidates {
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        let name = Path::new(link).file_name()?.to_str()?;
        self.by_name.get(name).and_then(|paths| paths.first().cloned())
    }
}

/// Finds and copies the image attachments of a note.
pub struct AttachmentResolver<'a, R: LinkTargetResolver + ?Sized> {
    resolver: &'a R,
}

impl<'a, R: LinkTargetResolver + ?Sized> AttachmentResolver<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self { resolver }
    }

    /// Lists the note's image embeds with their resolved sources.
    ///
    /// Each distinct target appears once, at its first occurrence. Entries
    /// whose target cannot be resolved have no source.
    pub fn plan(&self, doc: &SourceDocument) -> Vec<AttachmentEntry> {
        let mut seen = HashSet::new();

        scan(doc.content())
            .into_iter()
            .filter(|reference| reference.is_image())
            .filter(|reference| seen.insert(reference.target().to_string()))
            .map(|reference| {
                let mut entry = AttachmentEntry::new(reference.target());
                entry.source = self.resolver.resolve(reference.target(), doc.path());
                entry
            })
            .collect()
    }

    /// Copies every image embed of `doc` into `dest_dir`.
    ///
    /// Files keep their own name, which may differ from the link text.
    /// Returns one outcome per entry, successful or not.
    pub fn copy_embedded_images(&self, doc: &SourceDocument, dest_dir: &Path) -> Vec<AttachmentOutcome> {
        self.plan(doc)
            .into_iter()
            .map(|entry| copy_entry(entry, dest_dir))
            .collect()
    }
}

fn copy_entry(entry: AttachmentEntry, dest_dir: &Path) -> AttachmentOutcome {
    let result = match &entry.source {
        None => {
            warn!(link = %entry.link, "attachment could not be resolved");
            Err(AttachmentError::Unresolved {
                link: entry.link.clone(),
            })
        }
        Some(source) => match copy_into(source, dest_dir) {
            Ok(destination) => {
                info!(
                    link = %entry.link,
                    source = %source.display(),
                    destination = %destination.display(),
                    "copied attachment"
                );
                Ok(destination)
            }
            Err(err) => {
                warn!(link = %entry.link, error = %err, "attachment copy failed");
                Err(err)
            }
        },
    };

    AttachmentOutcome { entry, result }
}
