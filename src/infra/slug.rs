//! Naming policy for rewritten link destinations.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Characters escaped when text is used as a single URI component.
///
/// Everything except ASCII alphanumerics and `-_.!~*'`. Parentheses are
/// escaped so they cannot close a markdown link destination early.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'');

/// How a document link's display text becomes a bundle directory name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Display text, percent-encoded: `Other Note` -> `Other%20Note`.
    #[default]
    Encoded,
    /// Lower-case hyphenated slug: `Other Note` -> `other-note`.
    Slug,
}

impl LinkPolicy {
    /// Path segment for a sibling bundle named after `text`.
    pub fn segment(self, text: &str) -> String {
        match self {
            LinkPolicy::Encoded => encode_component(text),
            LinkPolicy::Slug => slugify(text),
        }
    }
}

impl fmt::Display for LinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkPolicy::Encoded => write!(f, "encoded"),
            LinkPolicy::Slug => write!(f, "slug"),
        }
    }
}

impl FromStr for LinkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "encoded" => Ok(LinkPolicy::Encoded),
            "slug" => Ok(LinkPolicy::Slug),
            other => Err(format!(
                "unknown link policy '{}': expected 'encoded' or 'slug'",
                other
            )),
        }
    }
}

/// Percent-encodes text for use as one URI path segment.
///
/// # Examples
///
/// ```
/// use notepress::infra::encode_component;
///
/// assert_eq!(encode_component("Other Note"), "Other%20Note");
/// assert_eq!(encode_component("a/b?c"), "a%2Fb%3Fc");
/// assert_eq!(encode_component("pic.jpg"), "pic.jpg");
/// ```
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, COMPONENT).to_string()
}

/// Converts text to a URL-friendly slug.
///
/// - Converts to lowercase and trims surrounding whitespace
/// - Drops everything except ASCII letters, digits, `_`, `-` and whitespace
/// - Collapses runs of whitespace, underscores and hyphens into one hyphen
/// - Trims leading/trailing hyphens
/// - Returns "untitled" for empty results
///
/// # Examples
///
/// ```
/// use notepress::infra::slugify;
///
/// assert_eq!(slugify("API Design"), "api-design");
/// assert_eq!(slugify("Hello World!"), "hello-world");
/// assert_eq!(slugify("snake_case  name"), "snake-case-name");
/// assert_eq!(slugify(""), "untitled");
/// ```
pub fn slugify(text: &str) -> String {
    let lower = text.trim().to_lowercase();

    let mut slug = String::with_capacity(lower.len());
    let mut pending_separator = false;
    for c in lower.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_separator = true;
        }
        // Skip all other characters
    }

    if slug.is_empty() {
        return "untitled".to_string();
    }
    slug
}
