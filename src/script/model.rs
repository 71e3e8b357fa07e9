use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::article::model::ArticleRecord;
use crate::config::ScriptConfig;
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::naming::{ensure_parent_dir, slugify};
use crate::script::budget::{self, BudgetPolicy};
use crate::script::compose::{self, TemplateSet};
use crate::script::duration;

/// Narration script for one article.
///
/// `word_count` and `estimated_duration` always describe `full_script` as stored, after any
/// truncation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRecord {
    pub title: String,
    pub intro: String,
    pub body: String,
    pub conclusion: String,
    pub full_script: String,
    pub word_count: usize,
    pub estimated_duration: u32,
    #[serde(default)]
    pub article_url: String,
    /// Template language the record was composed in; empty for records saved without one.
    #[serde(default)]
    pub language: String,
}

impl ScriptRecord {
    /// Slug used to name every artifact derived from this script.
    pub fn slug(&self) -> String {
        slugify(&self.title)
    }

    pub fn to_json_pretty(&self) -> ShortsResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ShortsError::serde(format!("script json encode failed: {e}")))
    }

    pub fn from_json_str(s: &str) -> ShortsResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| ShortsError::serde(format!("script json parse failed: {e}")))
    }

    pub fn from_path(path: &Path) -> ShortsResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read script json '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Write the record as pretty JSON to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ShortsResult<()> {
        ensure_parent_dir(path)?;
        std::fs::write(path, self.to_json_pretty()?)
            .with_context(|| format!("write script json '{}'", path.display()))?;
        Ok(())
    }
}

/// Turns articles into budgeted [`ScriptRecord`]s.
#[derive(Clone, Debug)]
pub struct ScriptBudgeter {
    max_words: usize,
    max_duration: u32,
    language: String,
    templates: &'static TemplateSet,
}

impl ScriptBudgeter {
    pub fn new(cfg: &ScriptConfig) -> Self {
        Self {
            max_words: cfg.max_words,
            max_duration: cfg.max_duration,
            language: cfg.language.clone(),
            templates: TemplateSet::for_language(&cfg.language),
        }
    }

    pub fn templates(&self) -> &'static TemplateSet {
        self.templates
    }

    /// Compose intro, body and conclusion for `article`, then budget them.
    #[tracing::instrument(skip_all, fields(title = %article.title))]
    pub fn generate(&self, article: &ArticleRecord) -> ScriptRecord {
        let intro = compose::compose_intro(article, self.templates);
        let body = compose::select_body(&article.summary, &article.content, self.templates);
        let conclusion = compose::compose_conclusion(&article.title, self.templates);
        self.build_record(&article.title, &intro, &body, &conclusion, &article.url)
    }

    /// Join and budget the three sections into a record.
    pub fn build_record(
        &self,
        title: &str,
        intro: &str,
        body: &str,
        conclusion: &str,
        article_url: &str,
    ) -> ScriptRecord {
        let out = budget::build(intro, body, conclusion, self.max_words);
        let body = match (out.policy, out.body) {
            (BudgetPolicy::BodyTruncated, Some(b)) => b,
            _ => body.to_string(),
        };
        if out.policy != BudgetPolicy::Unchanged {
            tracing::debug!(policy = ?out.policy, max_words = self.max_words, "script truncated");
        }

        let word_count = duration::word_count(&out.full_script);
        ScriptRecord {
            title: title.to_string(),
            intro: intro.to_string(),
            body,
            conclusion: conclusion.to_string(),
            estimated_duration: duration::estimate_words(word_count, self.max_duration),
            word_count,
            full_script: out.full_script,
            article_url: article_url.to_string(),
            language: self.language.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/model.rs"]
mod tests;
