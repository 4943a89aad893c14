//! Bracketed wiki references found in a note body.

/// File extensions (lower-case) treated as image attachments.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "svg", "webp"];

/// A classified `[[...]]` occurrence.
///
/// The variant is decided once when the reference is scanned:
/// - `[[target]]` / `[[target|alias]]` is a [`LinkReference::DocumentLink`]
/// - `![[image.png]]` / `![[image.png|alias]]` is a [`LinkReference::ImageEmbed`]
///
/// Embeds of non-image files have no variant; they are passed through by the
/// rewriter untouched.
///
/// # Examples
///
/// ```
/// use notepress::domain::LinkReference;
///
/// let link = LinkReference::classify(false, "Other Note", Some("see here")).unwrap();
/// assert_eq!(link.display_text(), "see here");
///
/// let image = LinkReference::classify(true, "assets/photo.PNG", None).unwrap();
/// assert_eq!(image.file_name(), "photo.PNG");
///
/// assert!(LinkReference::classify(true, "paper.pdf", None).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkReference {
    DocumentLink {
        target: String,
        alias: Option<String>,
    },
    ImageEmbed {
        target: String,
        alias: Option<String>,
    },
}

impl LinkReference {
    /// Classifies a scanned reference.
    ///
    /// Returns `None` for an empty target or for an embed whose target is not
    /// an image. An empty alias counts as no alias.
    pub fn classify(embed: bool, target: &str, alias: Option<&str>) -> Option<Self> {
        if target.trim().is_empty() {
            return None;
        }

        let target = target.to_string();
        let alias = alias.filter(|a| !a.is_empty()).map(str::to_string);

        if !embed {
            return Some(Self::DocumentLink { target, alias });
        }

        is_image_target(&target).then_some(Self::ImageEmbed { target, alias })
    }

    /// The target exactly as written between the brackets.
    pub fn target(&self) -> &str {
        match self {
            Self::DocumentLink { target, .. } | Self::ImageEmbed { target, .. } => target,
        }
    }

    pub fn alias(&self) -> Option<&str> {
        match self {
            Self::DocumentLink { alias, .. } | Self::ImageEmbed { alias, .. } => alias.as_deref(),
        }
    }

    /// Visible text of the rewritten reference.
    ///
    /// Document links fall back to the raw target; image embeds fall back to
    /// an empty string.
    pub fn display_text(&self) -> &str {
        match self {
            Self::DocumentLink { target, alias } => alias.as_deref().unwrap_or(target),
            Self::ImageEmbed { alias, .. } => alias.as_deref().unwrap_or(""),
        }
    }

    /// Last path component of the target.
    pub fn file_name(&self) -> &str {
        file_name(self.target())
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::ImageEmbed { .. })
    }
}

/// Returns true if the target's extension is a supported image type.
///
/// The check is case-insensitive and only looks at the final path component.
pub fn is_image_target(target: &str) -> bool {
    file_name(target)
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| {
            !stem.is_empty() && IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        })
}

/// Strips directory components, accepting both `/` and `\` separators.
fn file_name(target: &str) -> &str {
    target
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(target)
}
