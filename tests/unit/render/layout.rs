use super::*;

#[test]
fn wrap_fills_greedily_and_collapses_whitespace() {
    let lines = wrap_text("the  quick\nbrown fox   jumps over the lazy dog", 15);
    assert_eq!(lines, vec!["the quick brown", "fox jumps over", "the lazy dog"]);
    for l in &lines {
        assert!(l.chars().count() <= 15);
    }
}

#[test]
fn wrap_breaks_words_longer_than_width() {
    let lines = wrap_text("ab abcdefghijkl xy", 5);
    assert_eq!(lines, vec!["ab", "abcde", "fghij", "kl xy"]);
}

#[test]
fn wrap_counts_chars_not_bytes() {
    let lines = wrap_text("ééééé ééééé", 5);
    assert_eq!(lines, vec!["ééééé", "ééééé"]);
}

#[test]
fn wrap_of_blank_text_is_empty() {
    assert!(wrap_text("   \n ", 40).is_empty());
    assert!(wrap_text("", 40).is_empty());
}

#[test]
fn block_height_spans_all_lines() {
    assert_eq!(block_height(0, 60.0), 0.0);
    assert_eq!(block_height(1, 60.0), 60.0);
    assert_eq!(block_height(3, 50.0), 2.0 * 50.0 * LINE_SPACING + 50.0);
}

#[test]
fn centered_x_splits_remaining_space() {
    assert_eq!(centered_x(1080, 80.0), 500.0);
    assert_eq!(centered_x(100, 101.0), -1.0);
}
