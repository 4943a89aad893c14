//! Source note and the optional structural hint that accompanies it.

use chrono::{DateTime, Utc};
use serde_yaml::Mapping;
use std::path::{Path, PathBuf};

/// A note as handed to the exporter: identity plus full text.
///
/// Owned for the duration of a single export call.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    path: PathBuf,
    basename: String,
    modified: DateTime<Utc>,
    content: String,
}

impl SourceDocument {
    /// Creates a document, deriving the basename from the path's file stem.
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, modified: DateTime<Utc>) -> Self {
        let path = path.into();
        let basename = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path,
            basename,
            modified,
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Structural information about the metadata block supplied by a host that
/// has already parsed the note.
///
/// Either field may be present on its own. When `end_offset` is set it is
/// trusted over delimiter scanning; when `front_matter` is set it is used
/// instead of re-parsing the block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataHint {
    /// Byte offset just past the closing `---` of the metadata block.
    pub end_offset: Option<usize>,
    /// Pre-parsed metadata, possibly carrying the host's `position` field.
    pub front_matter: Option<Mapping>,
}

impl MetadataHint {
    pub fn with_end_offset(end_offset: usize) -> Self {
        Self {
            end_offset: Some(end_offset),
            front_matter: None,
        }
    }

    pub fn front_matter(mut self, front_matter: Mapping) -> Self {
        self.front_matter = Some(front_matter);
        self
    }
}
