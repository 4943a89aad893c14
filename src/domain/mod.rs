//! Core types: SourceDocument, LinkReference, AttachmentEntry

mod attachment;
mod document;
mod link;

pub use attachment::{AttachmentEntry, AttachmentError, AttachmentFailureKind, AttachmentOutcome};
pub use document::{MetadataHint, SourceDocument};
pub use link::{IMAGE_EXTENSIONS, LinkReference, is_image_target};
