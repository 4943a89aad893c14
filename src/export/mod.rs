//! Export of a single note to a static site page bundle.
//!
//! Converts front matter, rewrites wiki links and copies image attachments
//! next to the generated `index.md`.

pub mod attachments;
mod bundle;
pub mod links;

pub use attachments::{AttachmentResolver, LinkTargetResolver, VaultResolver};
pub use bundle::{
    DEFAULT_CONTENT_PATH, ExportError, ExportReport, ExportSettings, INDEX_FILE, RenderedNote,
    export_note, render_note,
};
pub use links::{LinkRewrite, LinkRewriter, scan};
