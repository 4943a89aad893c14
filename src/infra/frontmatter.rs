//! Front matter extraction, merging and re-serialization.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde_yaml::{Mapping, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{MetadataHint, SourceDocument};

/// User-authored metadata, in document order.
pub type FrontMatter = Mapping;

/// Key some hosts add to pre-parsed metadata to record the block's location.
const POSITION_KEY: &str = "position";

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Errors while reading or writing a metadata block.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("invalid YAML in front matter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("failed to serialize front matter: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// Front matter after the computed defaults have been overlaid.
///
/// Always contains `title`, `date` and `draft`; user keys keep their
/// position and win over the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveFrontMatter(Mapping);

impl EffectiveFrontMatter {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    pub fn into_mapping(self) -> Mapping {
        self.0
    }
}

/// Values used for keys the user did not set.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatterDefaults {
    pub title: String,
    pub date: DateTime<Utc>,
    pub draft: bool,
}

impl FrontMatterDefaults {
    /// Title from the basename, date from the last-modified time, not a draft.
    pub fn for_document(doc: &SourceDocument) -> Self {
        Self {
            title: doc.basename().to_string(),
            date: doc.modified(),
            draft: false,
        }
    }
}

/// Splits raw note text into its metadata block and body.
///
/// A [`MetadataHint`] is used first when it carries a usable end offset or a
/// pre-parsed mapping. Otherwise the text is scanned for a leading block
/// fenced by lines containing only `---`. Text without such a block is all
/// body.
///
/// # Errors
///
/// Returns `FrontMatterError` if a metadata block is present but is not a
/// valid YAML mapping.
pub fn separate<'a>(
    raw: &'a str,
    hint: Option<&MetadataHint>,
) -> Result<(Option<FrontMatter>, &'a str), FrontMatterError> {
    let provided = hint
        .and_then(|h| h.front_matter.clone())
        .map(strip_position);

    if let Some(end) = hint.and_then(|h| h.end_offset) {
        match split_at_offset(raw, end) {
            Some((block, body)) => {
                debug!(end, "using host offset for front matter");
                let front_matter = match provided {
                    Some(map) => map,
                    None => parse_block(block)?,
                };
                return Ok((Some(front_matter), body));
            }
            None => warn!(end, "ignoring unusable front matter offset"),
        }
    }

    match split_fenced(raw) {
        Some((block, body)) => {
            let front_matter = match provided {
                Some(map) => map,
                None => parse_block(block)?,
            };
            Ok((Some(front_matter), body))
        }
        None => Ok((provided, raw)),
    }
}

/// Overlays user front matter onto the defaults.
///
/// Default keys come first, in `title`, `date`, `draft` order; user keys
/// replace them in place or are appended in their original order. A user
/// `date` that parses as a timestamp is rewritten in canonical form; one
/// that does not parse is kept verbatim.
pub fn merge(front_matter: Option<FrontMatter>, defaults: &FrontMatterDefaults) -> EffectiveFrontMatter {
    let mut merged = Mapping::new();
    merged.insert("title".into(), defaults.title.clone().into());
    merged.insert("date".into(), format_date(&defaults.date.fixed_offset()).into());
    merged.insert("draft".into(), defaults.draft.into());

    for (key, value) in front_matter.unwrap_or_default() {
        let value = if key.as_str() == Some("date") {
            match value.as_str().and_then(parse_date) {
                Some(date) => format_date(&date).into(),
                None => value,
            }
        } else {
            value
        };
        merged.insert(key, value);
    }

    EffectiveFrontMatter(merged)
}

/// Emits the metadata as a `---` fenced block ending in a newline.
///
/// Output depends only on the mapping's contents and order, so identical
/// input always produces identical text.
pub fn serialize(front_matter: &EffectiveFrontMatter) -> Result<String, FrontMatterError> {
    let yaml = serde_yaml::to_string(&front_matter.0).map_err(FrontMatterError::Serialize)?;
    Ok(format!("---\n{}---\n", yaml))
}

/// Parses the front matter date formats that are accepted.
///
/// Naive timestamps and bare dates are taken as UTC.
pub fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(s) {
        return Some(date);
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

/// Canonical timestamp form: RFC 3339, whole seconds, `Z` for UTC.
pub fn format_date(date: &DateTime<FixedOffset>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn strip_position(mut map: Mapping) -> Mapping {
    if map.remove(POSITION_KEY).is_some() {
        debug!("stripped host position field from front matter");
    }
    map
}

fn parse_block(yaml: &str) -> Result<FrontMatter, FrontMatterError> {
    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        Value::Bool(_) => Err(FrontMatterError::NotAMapping("a boolean")),
        Value::Number(_) => Err(FrontMatterError::NotAMapping("a number")),
        Value::String(_) => Err(FrontMatterError::NotAMapping("a string")),
        Value::Sequence(_) => Err(FrontMatterError::NotAMapping("a sequence")),
        Value::Tagged(_) => Err(FrontMatterError::NotAMapping("a tagged value")),
    }
}

/// Splits at a host-supplied offset just past the closing fence.
///
/// Returns the YAML between the fences and the body with the closing
/// fence's line break removed.
fn split_at_offset(raw: &str, end: usize) -> Option<(&str, &str)> {
    if end > raw.len() || !raw.is_char_boundary(end) {
        return None;
    }

    let opening = fence_len(raw)?;
    if end < opening {
        return None;
    }

    let block = raw[opening..end].trim_end_matches([' ', '\t', '\r', '\n']);
    let block = block.strip_suffix("---").unwrap_or(block);

    let rest = &raw[end..];
    let body = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))
        .unwrap_or(rest);

    Some((block, body))
}

/// Finds a leading block fenced by `---` lines.
///
/// Returns the text between the fences and everything after the closing
/// fence line, or `None` if the text does not open with a fence or the
/// fence is never closed.
fn split_fenced(raw: &str) -> Option<(&str, &str)> {
    let opening = fence_len(raw)?;

    let mut pos = opening;
    while pos < raw.len() {
        if let Some(len) = fence_len(&raw[pos..]) {
            return Some((&raw[opening..pos], &raw[pos + len..]));
        }

        match raw[pos..].find('\n') {
            Some(newline_offset) => pos += newline_offset + 1,
            None => break,
        }
    }

    None
}

/// Length of the fence line at the start of `text`, including its line
/// break, if that line is `---` with optional trailing whitespace.
fn fence_len(text: &str) -> Option<usize> {
    let (line, consumed) = match text.find('\n') {
        Some(i) => (&text[..i], i + 1),
        None => (text, text.len()),
    };

    (line.trim_end_matches([' ', '\t', '\r']) == "---").then_some(consumed)
}
