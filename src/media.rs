use std::path::{Path, PathBuf};

use crate::foundation::error::{ShortsError, ShortsResult};

/// What a [`MediaAsset`] path points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// Silent video file.
    Video,
    /// Narration audio file.
    Audio,
    /// Video file with the narration muxed in.
    Merged,
    /// Directory of inputs and instructions for finishing the merge by hand.
    Bundle,
}

/// A file or directory produced by a stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaAsset {
    pub kind: MediaKind,
    pub path: PathBuf,
}

impl MediaAsset {
    pub fn new(kind: MediaKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }

    pub fn video(path: impl Into<PathBuf>) -> Self {
        Self::new(MediaKind::Video, path)
    }

    pub fn audio(path: impl Into<PathBuf>) -> Self {
        Self::new(MediaKind::Audio, path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Fail unless `path` is an existing regular file.
pub fn require_file(path: &Path, what: &str) -> ShortsResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ShortsError::validation(format!(
            "{what} file '{}' does not exist",
            path.display()
        )))
    }
}

/// `true` when `path` is a regular file with at least one byte.
pub fn is_nonempty_file(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// `true` when both paths exist and name the same file after resolving links.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// `true` when `path` exists somewhere below the existing directory `dir`.
pub fn is_within(path: &Path, dir: &Path) -> bool {
    match (std::fs::canonicalize(path), std::fs::canonicalize(dir)) {
        (Ok(p), Ok(d)) => p != d && p.starts_with(d),
        _ => false,
    }
}
