use super::*;

#[test]
fn sparse_json_is_filled_with_defaults() {
    let rec = ArticleRecord::from_json_str(r#"{"url": "https://example.com/a"}"#).unwrap();
    assert_eq!(rec.title, UNTITLED);
    assert_eq!(rec.author, UNKNOWN_AUTHOR);
    assert!(rec.summary.is_empty());
    assert!(rec.content.is_empty());
    assert_eq!(rec.url, "https://example.com/a");
    assert!(!rec.has_known_author());
    assert!(rec.is_blank());
}

#[test]
fn blank_title_and_author_are_normalized() {
    let rec = ArticleRecord::from_json_str(r#"{"title": "  ", "author": ""}"#).unwrap();
    assert_eq!(rec.title, UNTITLED);
    assert_eq!(rec.author, UNKNOWN_AUTHOR);
}

#[test]
fn block_tags_are_case_insensitive_and_passthrough_is_kept() {
    let rec = ArticleRecord::from_json_str(
        r#"{
            "title": "T",
            "author": "Ada",
            "content": [
                {"type": "h2", "text": "Heading"},
                {"type": "p", "text": "Para"},
                {"type": "blockquote", "text": "Quote"},
                {"text": "untagged"}
            ]
        }"#,
    )
    .unwrap();

    let kinds: Vec<_> = rec.content.iter().map(|b| b.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::H2,
            BlockKind::P,
            BlockKind::Other("blockquote".to_string()),
            BlockKind::P,
        ]
    );
    assert!(rec.has_known_author());
    assert!(!rec.is_blank());
}

#[test]
fn block_kind_serializes_back_to_tag() {
    let block = ContentBlock::new(BlockKind::H3, "x");
    let json = serde_json::to_string(&block).unwrap();
    assert_eq!(json, r#"{"type":"H3","text":"x"}"#);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = ArticleRecord::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, ShortsError::Serde(_)));
}

#[test]
fn saved_article_loads_back() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("articles/a.json");
    let rec = ArticleRecord {
        title: "Saved".into(),
        content: vec![ContentBlock::new(BlockKind::H2, "Head")],
        ..ArticleRecord::default()
    };
    rec.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains(r#""type": "H2""#));
    assert_eq!(ArticleRecord::from_path(&path).unwrap(), rec);
}
