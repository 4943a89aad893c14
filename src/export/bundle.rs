//! Page bundle export: one note becomes `<root>/<content>/<name>/index.md`
//! plus its image attachments.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{AttachmentOutcome, MetadataHint, SourceDocument};
use crate::export::attachments::{AttachmentResolver, LinkTargetResolver};
use crate::export::links::{LinkRewrite, LinkRewriter};
use crate::infra::{
    EffectiveFrontMatter, FrontMatterDefaults, FrontMatterError, FsError, LinkPolicy,
    create_bundle_dir, merge, separate, serialize, write_atomic,
};

/// Default content directory under the site root.
pub const DEFAULT_CONTENT_PATH: &str = "content/posts";

/// File name of the bundle's page.
pub const INDEX_FILE: &str = "index.md";

/// Errors that abort an export as a whole.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("site root path is not configured")]
    Configuration,

    #[error("no note to export")]
    NoActiveDocument { path: Option<PathBuf> },

    #[error("failed to read note: {0}")]
    Read(#[source] FsError),

    #[error("failed to parse front matter: {0}")]
    MetadataParse(#[from] FrontMatterError),

    #[error("failed to write bundle: {0}")]
    Write(#[source] FsError),
}

/// Destination settings, read-only for the duration of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSettings {
    /// Site root; exporting without one is a configuration error.
    pub root: Option<PathBuf>,
    /// Content directory relative to the root.
    pub content_path: PathBuf,
    pub link_policy: LinkPolicy,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            root: None,
            content_path: PathBuf::from(DEFAULT_CONTENT_PATH),
            link_policy: LinkPolicy::default(),
        }
    }
}

impl ExportSettings {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /// The configured site root.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Configuration` if no root is set or it is empty.
    pub fn root(&self) -> Result<&Path, ExportError> {
        self.root
            .as_deref()
            .filter(|r| !r.as_os_str().is_empty())
            .ok_or(ExportError::Configuration)
    }

    /// Directory that receives the bundle for a note named `basename`.
    pub fn bundle_dir(&self, basename: &str) -> Result<PathBuf, ExportError> {
        Ok(self.root()?.join(&self.content_path).join(basename))
    }
}

/// A note converted to the destination format, not yet written.
#[derive(Debug, Clone)]
pub struct RenderedNote {
    pub front_matter: EffectiveFrontMatter,
    pub links: LinkRewrite,
    /// Serialized metadata, a blank line, then the rewritten body.
    pub content: String,
}

/// Summary of a completed export.
#[derive(Debug)]
pub struct ExportReport {
    pub bundle_dir: PathBuf,
    pub index_path: PathBuf,
    pub rendered: RenderedNote,
    pub attachments: Vec<AttachmentOutcome>,
}

impl ExportReport {
    pub fn attachment_failures(&self) -> impl Iterator<Item = &AttachmentOutcome> {
        self.attachments.iter().filter(|o| !o.is_success())
    }
}

/// Converts a note without touching the file system.
///
/// # Errors
///
/// Returns `ExportError::MetadataParse` if the metadata block is invalid.
pub fn render_note(
    doc: &SourceDocument,
    hint: Option<&MetadataHint>,
    policy: LinkPolicy,
) -> Result<RenderedNote, ExportError> {
    let (front_matter, body) = separate(doc.content(), hint)?;
    let front_matter = merge(front_matter, &FrontMatterDefaults::for_document(doc));
    let rewriter = LinkRewriter::new(policy);
    let links = rewriter.rewrite(body);

    debug!(
        policy = %rewriter.policy(),
        documents = links.documents,
        images = links.images,
        passed_through = links.passed_through,
        "rewrote links"
    );

    let content = format!("{}\n{}", serialize(&front_matter)?, links.content);

    Ok(RenderedNote {
        front_matter,
        links,
        content,
    })
}

/// Exports a note as a page bundle.
///
/// Steps run strictly in order: settings check, front matter, link rewrite,
/// `index.md` write, then the attachment copy loop. Nothing is written if
/// the settings or the metadata are invalid. Attachment failures are
/// reported in the returned outcomes and do not fail the export.
///
/// # Errors
///
/// Returns `ExportError` for configuration, metadata or bundle write
/// failures. A failed write may leave created directories behind.
pub fn export_note<R: LinkTargetResolver + ?Sized>(
    doc: &SourceDocument,
    hint: Option<&MetadataHint>,
    settings: &ExportSettings,
    resolver: &R,
) -> Result<ExportReport, ExportError> {
    let bundle_dir = settings.bundle_dir(doc.basename())?;
    let rendered = render_note(doc, hint, settings.link_policy)?;

    create_bundle_dir(&bundle_dir).map_err(ExportError::Write)?;
    let index_path = bundle_dir.join(INDEX_FILE);
    write_atomic(&index_path, &rendered.content).map_err(ExportError::Write)?;
    info!(note = %doc.path().display(), index = %index_path.display(), "wrote bundle page");

    let attachments = AttachmentResolver::new(resolver).copy_embedded_images(doc, &bundle_dir);

    Ok(ExportReport {
        bundle_dir,
        index_path,
        rendered,
        attachments,
    })
}
