//! File I/O, front matter, naming policy

pub mod frontmatter;
mod fs;
mod slug;

pub use frontmatter::{
    EffectiveFrontMatter, FrontMatter, FrontMatterDefaults, FrontMatterError, merge, separate,
    serialize,
};
pub use fs::{FsError, copy_into, create_bundle_dir, read_source, scan_vault, write_atomic};
pub use slug::{LinkPolicy, encode_component, slugify};
