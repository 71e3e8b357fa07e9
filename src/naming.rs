//! Output file naming and directory layout.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::ShortsResult;

/// Slug used when a title has no usable characters.
pub const FALLBACK_SLUG: &str = "short";

/// File-name slug for a title.
///
/// Characters other than alphanumerics, `_`, `-` and whitespace are dropped; the rest is trimmed,
/// lowercased, and runs of `-`/whitespace become a single `-`.
pub fn slugify(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(kept.len());
    let mut pending_dash = false;
    for c in kept.trim().to_lowercase().chars() {
        if c == '-' || c.is_whitespace() {
            pending_dash = true;
            continue;
        }
        if pending_dash {
            out.push('-');
            pending_dash = false;
        }
        out.push(c);
    }
    if pending_dash {
        out.push('-');
    }

    if out.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        out
    }
}

/// `<root>/{articles,scripts,videos,audio,final}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn articles_dir(&self) -> PathBuf {
        self.root.join("articles")
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join("scripts")
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.root.join("videos")
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.root.join("audio")
    }

    pub fn final_dir(&self) -> PathBuf {
        self.root.join("final")
    }

    /// Create every directory of the layout.
    pub fn create_all(&self) -> ShortsResult<()> {
        for dir in [
            self.articles_dir(),
            self.scripts_dir(),
            self.videos_dir(),
            self.audio_dir(),
            self.final_dir(),
        ] {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
        }
        Ok(())
    }

    pub fn article_path(&self, slug: &str) -> PathBuf {
        self.articles_dir().join(format!("{slug}.json"))
    }

    pub fn script_path(&self, slug: &str) -> PathBuf {
        self.scripts_dir().join(script_file_name(slug))
    }

    pub fn video_path(&self, slug: &str) -> PathBuf {
        self.videos_dir().join(format!("{slug}.mp4"))
    }

    pub fn audio_path(&self, slug: &str) -> PathBuf {
        self.audio_dir().join(format!("{slug}.wav"))
    }

    pub fn final_path(&self, slug: &str) -> PathBuf {
        self.final_dir().join(format!("{slug}-with-voice.mp4"))
    }
}

/// `<slug>-script.json`.
pub fn script_file_name(slug: &str) -> String {
    format!("{slug}-script.json")
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent_dir(path: &Path) -> ShortsResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/naming.rs"]
mod tests;
