//! Narration length estimate.
//!
//! Both the budgeter and the segment planner derive durations from here, so the two can never
//! disagree about how long a script runs.

/// Assumed speaking rate, in words per second.
pub const WORDS_PER_SECOND: f64 = 2.5;

/// Whitespace-delimited word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `floor(word_count / 2.5)`, clamped to `max_duration` seconds.
///
/// Computed as `floor(2 * words / 5)` so the result is exact for any word count.
pub fn estimate_words(word_count: usize, max_duration: u32) -> u32 {
    let secs = (word_count as u64).saturating_mul(2) / 5;
    secs.min(u64::from(max_duration)) as u32
}

/// Estimated narration duration of `script_text`, in whole seconds.
pub fn estimate(script_text: &str, max_duration: u32) -> u32 {
    estimate_words(word_count(script_text), max_duration)
}

#[cfg(test)]
#[path = "../../tests/unit/script/duration.rs"]
mod tests;
