//! Attachment entries and the per-item outcome of copying them.

use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One image embed to be copied, as written in the note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentEntry {
    /// Link target exactly as written (`assets/pic.png`).
    pub link: String,
    /// Resolved source file, once resolution has run.
    pub source: Option<PathBuf>,
}

impl AttachmentEntry {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            source: None,
        }
    }
}

/// Why a single attachment could not be copied.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("attachment not found: {link}")]
    Unresolved { link: String },

    #[error("failed to read attachment {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write attachment {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AttachmentError {
    pub fn kind(&self) -> AttachmentFailureKind {
        match self {
            AttachmentError::Unresolved { .. } => AttachmentFailureKind::Resolution,
            AttachmentError::Read { .. } | AttachmentError::Write { .. } => {
                AttachmentFailureKind::Copy
            }
        }
    }
}

/// Coarse failure class reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentFailureKind {
    Resolution,
    Copy,
}

/// Result of processing one attachment entry.
#[derive(Debug)]
pub struct AttachmentOutcome {
    pub entry: AttachmentEntry,
    /// Destination path on success.
    pub result: Result<PathBuf, AttachmentError>,
}

impl AttachmentOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn failure_kind(&self) -> Option<AttachmentFailureKind> {
        self.result.as_ref().err().map(AttachmentError::kind)
    }

    pub fn destination(&self) -> Option<&Path> {
        self.result.as_ref().ok().map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_is_resolution_failure() {
        let err = AttachmentError::Unresolved {
            link: "missing.png".into(),
        };
        assert_eq!(err.kind(), AttachmentFailureKind::Resolution);
        assert!(err.to_string().contains("missing.png"));
    }

    #[test]
    fn read_and_write_are_copy_failures() {
        let read = AttachmentError::Read {
            path: "a.png".into(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        let write = AttachmentError::Write {
            path: "b.png".into(),
            source: io::Error::from(io::ErrorKind::Other),
        };
        assert_eq!(read.kind(), AttachmentFailureKind::Copy);
        assert_eq!(write.kind(), AttachmentFailureKind::Copy);
    }

    #[test]
    fn outcome_exposes_destination_on_success() {
        let outcome = AttachmentOutcome {
            entry: AttachmentEntry::new("pic.png"),
            result: Ok(PathBuf::from("/site/pic.png")),
        };
        assert!(outcome.is_success());
        assert_eq!(outcome.failure_kind(), None);
        assert_eq!(outcome.destination(), Some(Path::new("/site/pic.png")));
    }
}
