//! Localized user-facing notifications.
//!
//! Only the CLI layer produces text for people. The export engine reports
//! error kinds and outcomes; they are turned into messages here.

/// Language of user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// Parses a language tag such as `zh`, `zh-CN` or `zh_TW.UTF-8`.
    ///
    /// Any Chinese variant maps to `Zh`; unknown languages return `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let lang = tag
            .trim()
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match lang.as_str() {
            "en" | "c" | "posix" => Some(Locale::En),
            "zh" => Some(Locale::Zh),
            _ => None,
        }
    }

    /// Picks a locale from an explicit setting, then `LC_ALL` / `LANG`.
    ///
    /// Falls back to English.
    pub fn detect(explicit: Option<&str>) -> Self {
        let from_env = || {
            ["LC_ALL", "LANG"]
                .iter()
                .filter_map(|var| std::env::var(var).ok())
                .find_map(|tag| Self::from_tag(&tag))
        };

        explicit
            .and_then(Self::from_tag)
            .or_else(from_env)
            .unwrap_or_default()
    }
}

/// Keys for every notification the CLI shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    RootNotConfigured,
    NoActiveNote,
    ReadFailed,
    InvalidFrontMatter,
    WriteFailed,
    Exported,
    DryRun,
    VaultUnavailable,
    AttachmentNotFound,
    AttachmentCopyFailed,
    AttachmentsCopied,
    SettingSaved,
    SettingUnset,
}

/// Message lookup bound to one locale.
///
/// Keys missing from a translation fall back to English.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    locale: Locale,
    lookup: fn(MessageKey) -> Option<&'static str>,
}

impl Messages {
    pub fn new(locale: Locale) -> Self {
        let lookup = match locale {
            Locale::En => english as fn(MessageKey) -> Option<&'static str>,
            Locale::Zh => chinese,
        };
        Self { locale, lookup }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn get(&self, key: MessageKey) -> &'static str {
        (self.lookup)(key)
            .or_else(|| english(key))
            .unwrap_or("")
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

fn english(key: MessageKey) -> Option<&'static str> {
    let text = match key {
        MessageKey::RootNotConfigured => "Set the site root path first (notepress config root <PATH>)",
        MessageKey::NoActiveNote => "No note to export",
        MessageKey::ReadFailed => "Could not read the note",
        MessageKey::InvalidFrontMatter => "Front matter is not valid YAML; nothing was exported",
        MessageKey::WriteFailed => "Could not write the page bundle",
        MessageKey::Exported => "Exported",
        MessageKey::DryRun => "Dry run, nothing written",
        MessageKey::VaultUnavailable => "Vault directory could not be read",
        MessageKey::AttachmentNotFound => "Attachment not found",
        MessageKey::AttachmentCopyFailed => "Attachment copy failed",
        MessageKey::AttachmentsCopied => "Attachments copied",
        MessageKey::SettingSaved => "Setting saved",
        MessageKey::SettingUnset => "Setting removed",
    };
    Some(text)
}

fn chinese(key: MessageKey) -> Option<&'static str> {
    let text = match key {
        MessageKey::RootNotConfigured => "请先配置 Hugo 站点路径 (notepress config root <路径>)",
        MessageKey::NoActiveNote => "没有要导出的笔记",
        MessageKey::ReadFailed => "无法读取笔记",
        MessageKey::InvalidFrontMatter => "YAML Frontmatter 格式错误，无法解析",
        MessageKey::WriteFailed => "无法写入文章目录",
        MessageKey::Exported => "同步成功",
        MessageKey::DryRun => "试运行，未写入任何文件",
        MessageKey::VaultUnavailable => "无法读取笔记库目录",
        MessageKey::AttachmentNotFound => "找不到附件",
        MessageKey::AttachmentCopyFailed => "附件复制失败",
        MessageKey::AttachmentsCopied => "已复制附件",
        MessageKey::SettingSaved => "设置已保存",
        MessageKey::SettingUnset => "设置已移除",
    };
    Some(text)
}
