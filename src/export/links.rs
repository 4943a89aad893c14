//! Wiki-link rewriting for exported bundles.
//!
//! Rewrites `[[Target|Alias]]` references into relative links to sibling
//! bundles and `![[image.png]]` embeds into inline images pointing at the
//! copy placed next to `index.md`.

use std::cell::Cell;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::LinkReference;
use crate::infra::{LinkPolicy, encode_component};

/// `!?[[target]]` or `!?[[target|alias]]` on a single line.
static WIKI_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[\[([^|\]\r\n]+)(?:\|([^\]\r\n]*))?\]\]").unwrap()
});

/// Result of rewriting a note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRewrite {
    /// The body with references rewritten.
    pub content: String,
    /// Number of document links rewritten.
    pub documents: usize,
    /// Number of image embeds rewritten.
    pub images: usize,
    /// Number of references left as written (non-image embeds, blank targets).
    pub passed_through: usize,
}

/// Rewrites wiki references using a fixed [`LinkPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkRewriter {
    policy: LinkPolicy,
}

impl LinkRewriter {
    pub fn new(policy: LinkPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> LinkPolicy {
        self.policy
    }

    /// Rewrites every reference in a single left-to-right pass.
    ///
    /// Matches never overlap and rewritten text is not scanned again, so
    /// bracket syntax inside an alias stays literal.
    pub fn rewrite(&self, body: &str) -> LinkRewrite {
        let documents = Cell::new(0usize);
        let images = Cell::new(0usize);
        let passed_through = Cell::new(0usize);

        let content = WIKI_LINK_RE.replace_all(body, |caps: &Captures| match classify(caps) {
            Some(reference) => {
                let counter = if reference.is_image() { &images } else { &documents };
                counter.set(counter.get() + 1);
                self.render(&reference)
            }
            None => {
                passed_through.set(passed_through.get() + 1);
                caps[0].to_string()
            }
        });

        LinkRewrite {
            content: content.into_owned(),
            documents: documents.get(),
            images: images.get(),
            passed_through: passed_through.get(),
        }
    }

    /// Renders one reference in the destination format.
    ///
    /// - Document link: `[text](../segment/)`, a sibling bundle
    /// - Image embed: `![alias](file.png)`, the copy inside this bundle
    pub fn render(&self, reference: &LinkReference) -> String {
        match reference {
            LinkReference::DocumentLink { .. } => {
                let text = reference.display_text();
                format!("[{}](../{}/)", text, self.policy.segment(text))
            }
            LinkReference::ImageEmbed { .. } => {
                format!(
                    "![{}]({})",
                    reference.display_text(),
                    encode_component(reference.file_name())
                )
            }
        }
    }
}

/// Lists the classified references in a body, in order of appearance.
///
/// Unclassifiable matches (non-image embeds, blank targets) are skipped.
pub fn scan(body: &str) -> Vec<LinkReference> {
    WIKI_LINK_RE.captures_iter(body).filter_map(|caps| classify(&caps)).collect()
}

fn classify(caps: &Captures) -> Option<LinkReference> {
    let embed = !caps[1].is_empty();
    let alias = caps.get(3).map(|m| m.as_str());
    LinkReference::classify(embed, &caps[2], alias)
}
