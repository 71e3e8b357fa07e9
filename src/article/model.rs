use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{ShortsError, ShortsResult};

/// Author sentinel used when the extractor could not find one.
pub const UNKNOWN_AUTHOR: &str = "unknown";

/// Title used when the extractor could not find one.
pub const UNTITLED: &str = "Untitled";

/// Normalized article handed to the pipeline by an [`crate::ArticleExtractor`].
///
/// Every field is optional on the wire. Missing values are filled in locally, so a sparse
/// document never fails to load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleRecord {
    /// Article title.
    pub title: String,
    /// Author name, or [`UNKNOWN_AUTHOR`].
    pub author: String,
    /// Optional summary; may be empty.
    pub summary: String,
    /// Content blocks in reading order.
    pub content: Vec<ContentBlock>,
    /// Canonical article URL.
    pub url: String,
}

impl Default for ArticleRecord {
    fn default() -> Self {
        Self {
            title: UNTITLED.to_string(),
            author: UNKNOWN_AUTHOR.to_string(),
            summary: String::new(),
            content: Vec::new(),
            url: String::new(),
        }
    }
}

impl ArticleRecord {
    /// Parse an article from a JSON string.
    pub fn from_json_str(s: &str) -> ShortsResult<Self> {
        let mut rec: Self = serde_json::from_str(s)
            .map_err(|e| ShortsError::serde(format!("article json parse failed: {e}")))?;
        rec.normalize();
        Ok(rec)
    }

    /// Read and parse an article JSON document from `path`.
    pub fn from_path(path: &Path) -> ShortsResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read article json '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Replace blank title/author values with their defaults.
    pub fn normalize(&mut self) {
        if self.title.trim().is_empty() {
            self.title = UNTITLED.to_string();
        }
        if self.author.trim().is_empty() {
            self.author = UNKNOWN_AUTHOR.to_string();
        }
    }

    /// Whether an author other than the sentinel is known.
    pub fn has_known_author(&self) -> bool {
        let a = self.author.trim();
        !a.is_empty() && !a.eq_ignore_ascii_case(UNKNOWN_AUTHOR)
    }

    /// `true` when the record carries no text at all.
    pub fn is_blank(&self) -> bool {
        self.summary.trim().is_empty() && self.content.iter().all(|b| b.text.trim().is_empty())
    }

    /// Write the record as pretty JSON to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ShortsResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ShortsError::serde(format!("article json encode failed: {e}")))?;
        crate::naming::ensure_parent_dir(path)?;
        std::fs::write(path, json)
            .with_context(|| format!("write article json '{}'", path.display()))?;
        Ok(())
    }
}

/// One block of article content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Block tag (`H1`..`H4`, `P`, or any passthrough tag).
    #[serde(rename = "type", default)]
    pub kind: BlockKind,
    /// Plain text of the block.
    #[serde(default)]
    pub text: String,
}

impl ContentBlock {
    /// Convenience constructor.
    pub fn new(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Content block tag.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockKind {
    /// Level-1 heading.
    H1,
    /// Level-2 heading.
    H2,
    /// Level-3 heading.
    H3,
    /// Level-4 heading.
    H4,
    /// Paragraph.
    #[default]
    P,
    /// Any other tag, kept verbatim.
    Other(String),
}

impl BlockKind {
    /// `true` for `H1`..`H4`.
    pub fn is_heading(&self) -> bool {
        matches!(self, Self::H1 | Self::H2 | Self::H3 | Self::H4)
    }

    /// `true` for paragraphs.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Self::P)
    }
}

impl From<String> for BlockKind {
    fn from(tag: String) -> Self {
        match tag.trim().to_ascii_uppercase().as_str() {
            "H1" => Self::H1,
            "H2" => Self::H2,
            "H3" => Self::H3,
            "H4" => Self::H4,
            "P" => Self::P,
            _ => Self::Other(tag),
        }
    }
}

impl From<BlockKind> for String {
    fn from(kind: BlockKind) -> Self {
        match kind {
            BlockKind::H1 => "H1".to_string(),
            BlockKind::H2 => "H2".to_string(),
            BlockKind::H3 => "H3".to_string(),
            BlockKind::H4 => "H4".to_string(),
            BlockKind::P => "P".to_string(),
            BlockKind::Other(tag) => tag,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/article/model.rs"]
mod tests;
