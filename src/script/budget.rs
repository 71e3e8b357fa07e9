//! Word-budget enforcement for the assembled narration.

use crate::script::duration::word_count;

/// Separator placed between intro, body and conclusion.
pub const SECTION_SEPARATOR: &str = "\n\n";

/// Which truncation policy produced a [`Budgeted`] script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetPolicy {
    /// The script fit; nothing changed.
    Unchanged,
    /// Intro and conclusion kept verbatim, body cut at a word boundary.
    BodyTruncated,
    /// The whole script cut to the first `max_words` words.
    WholeTruncated,
}

/// Result of applying the word budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Budgeted {
    /// Final narration text.
    pub full_script: String,
    /// Policy that was applied.
    pub policy: BudgetPolicy,
    /// The truncated body, set only for [`BudgetPolicy::BodyTruncated`].
    pub body: Option<String>,
}

/// `intro + "\n\n" + body + "\n\n" + conclusion`.
pub fn join_sections(intro: &str, body: &str, conclusion: &str) -> String {
    format!("{intro}{SECTION_SEPARATOR}{body}{SECTION_SEPARATOR}{conclusion}")
}

/// Assemble the three sections and enforce `max_words`.
pub fn build(intro: &str, body: &str, conclusion: &str, max_words: usize) -> Budgeted {
    apply(&join_sections(intro, body, conclusion), max_words)
}

/// Enforce `max_words` on an already joined script.
///
/// When the script splits into at least three blank-line separated parts, the first is treated
/// as the intro, the last as the conclusion, and everything in between as body. Intro and
/// conclusion survive verbatim as long as they leave a positive body budget; otherwise the whole
/// text is cut and the section boundaries are lost.
pub fn apply(script: &str, max_words: usize) -> Budgeted {
    if word_count(script) <= max_words {
        return Budgeted {
            full_script: script.to_string(),
            policy: BudgetPolicy::Unchanged,
            body: None,
        };
    }

    let parts: Vec<&str> = script.split(SECTION_SEPARATOR).collect();
    if parts.len() >= 3 {
        let intro = parts[0];
        let conclusion = parts[parts.len() - 1];
        let reserved = word_count(intro) + word_count(conclusion);

        if max_words > reserved {
            let budget = max_words - reserved;
            let body = parts[1..parts.len() - 1]
                .iter()
                .flat_map(|p| p.split_whitespace())
                .take(budget)
                .collect::<Vec<_>>()
                .join(" ");
            return Budgeted {
                full_script: join_sections(intro, &body, conclusion),
                policy: BudgetPolicy::BodyTruncated,
                body: Some(body),
            };
        }
    }

    Budgeted {
        full_script: script
            .split_whitespace()
            .take(max_words)
            .collect::<Vec<_>>()
            .join(" "),
        policy: BudgetPolicy::WholeTruncated,
        body: None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/budget.rs"]
mod tests;
