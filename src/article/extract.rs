use std::path::{Path, PathBuf};

use crate::{
    article::model::ArticleRecord,
    foundation::error::{ShortsError, ShortsResult},
};

/// Collaborator that turns a source reference (URL, path, ...) into an [`ArticleRecord`].
///
/// Scraping real web sources lives outside this crate; implementors plug in here.
pub trait ArticleExtractor {
    /// Produce a normalized article, or [`ShortsError::Extraction`].
    fn extract(&self, source: &str) -> ShortsResult<ArticleRecord>;
}

/// Extractor that reads a previously saved article JSON document.
///
/// `source` may be a plain path or a `file://` URL. Relative paths resolve against `root`.
#[derive(Clone, Debug, Default)]
pub struct JsonFileExtractor {
    root: Option<PathBuf>,
}

impl JsonFileExtractor {
    /// Resolve relative sources against the process working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative sources against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let raw = source.strip_prefix("file://").unwrap_or(source);
        let path = Path::new(raw);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ArticleExtractor for JsonFileExtractor {
    fn extract(&self, source: &str) -> ShortsResult<ArticleRecord> {
        if source.starts_with("http://") || source.starts_with("https://") {
            return Err(ShortsError::extraction(format!(
                "'{source}' is a web URL; this extractor only reads saved article JSON"
            )));
        }

        let path = self.resolve(source);
        if !path.is_file() {
            return Err(ShortsError::extraction(format!(
                "article file '{}' does not exist",
                path.display()
            )));
        }

        ArticleRecord::from_path(&path).map_err(|e| {
            ShortsError::extraction(format!("could not load '{}': {e}", path.display()))
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/article/extract.rs"]
mod tests;
