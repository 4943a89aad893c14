//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{AttachmentEntry, AttachmentFailureKind, AttachmentOutcome};
use crate::export::{ExportReport, LinkRewrite, RenderedNote};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Result of an export, as printed.
#[derive(Debug, Serialize)]
pub struct ExportSummary {
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_path: Option<String>,
    pub dry_run: bool,
    pub links: LinkCounts,
    pub attachments: Vec<AttachmentSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ExportSummary {
    pub fn from_report(report: &ExportReport) -> Self {
        Self {
            title: report.rendered.front_matter.title().map(str::to_string),
            bundle_dir: Some(report.bundle_dir.display().to_string()),
            index_path: Some(report.index_path.display().to_string()),
            dry_run: false,
            links: LinkCounts::from(&report.rendered.links),
            attachments: report.attachments.iter().map(AttachmentSummary::from_outcome).collect(),
            content: None,
        }
    }

    pub fn from_dry_run(rendered: &RenderedNote, plan: &[AttachmentEntry]) -> Self {
        Self {
            title: rendered.front_matter.title().map(str::to_string),
            bundle_dir: None,
            index_path: None,
            dry_run: true,
            links: LinkCounts::from(&rendered.links),
            attachments: plan.iter().map(AttachmentSummary::from_entry).collect(),
            content: Some(rendered.content.clone()),
        }
    }

    pub fn failed_attachments(&self) -> usize {
        self.attachments.iter().filter(|a| a.failure.is_some()).count()
    }
}

/// Counts of rewritten references.
#[derive(Debug, Serialize)]
pub struct LinkCounts {
    pub documents: usize,
    pub images: usize,
    pub passed_through: usize,
}

impl From<&LinkRewrite> for LinkCounts {
    fn from(rewrite: &LinkRewrite) -> Self {
        Self {
            documents: rewrite.documents,
            images: rewrite.images,
            passed_through: rewrite.passed_through,
        }
    }
}

/// One attachment in the output.
#[derive(Debug, Serialize)]
pub struct AttachmentSummary {
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<AttachmentFailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AttachmentSummary {
    pub fn from_outcome(outcome: &AttachmentOutcome) -> Self {
        Self {
            link: outcome.entry.link.clone(),
            source: outcome.entry.source.as_ref().map(|p| p.display().to_string()),
            destination: outcome.destination().map(|p| p.display().to_string()),
            failure: outcome.failure_kind(),
            error: outcome.result.as_ref().err().map(ToString::to_string),
        }
    }

    /// An attachment that was only resolved, not copied.
    pub fn from_entry(entry: &AttachmentEntry) -> Self {
        let unresolved = entry.source.is_none();
        Self {
            link: entry.link.clone(),
            source: entry.source.as_ref().map(|p| p.display().to_string()),
            destination: None,
            failure: unresolved.then_some(AttachmentFailureKind::Resolution),
            error: unresolved.then(|| format!("attachment not found: {}", entry.link)),
        }
    }
}
