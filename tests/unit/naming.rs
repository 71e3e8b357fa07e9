use super::*;

#[test]
fn slugify_drops_punctuation_and_collapses_separators() {
    assert_eq!(slugify("Hello, World!"), "hello-world");
    assert_eq!(slugify("  Rust -- 2024   Edition  "), "rust-2024-edition");
    assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    assert_eq!(slugify("Café Crème"), "café-crème");
}

#[test]
fn slugify_falls_back_for_empty_results() {
    assert_eq!(slugify(""), FALLBACK_SLUG);
    assert_eq!(slugify("?!*"), FALLBACK_SLUG);
}

#[test]
fn slugify_keeps_edge_dashes_like_the_regex_rule() {
    assert_eq!(slugify("-abc"), "-abc");
    assert_eq!(slugify("abc -"), "abc-");
}

#[test]
fn layout_paths_follow_naming_convention() {
    let layout = OutputLayout::new("/out");
    assert_eq!(layout.script_path("x"), Path::new("/out/scripts/x-script.json"));
    assert_eq!(layout.video_path("x"), Path::new("/out/videos/x.mp4"));
    assert_eq!(layout.audio_path("x"), Path::new("/out/audio/x.wav"));
    assert_eq!(layout.final_path("x"), Path::new("/out/final/x-with-voice.mp4"));
    assert_eq!(layout.article_path("x"), Path::new("/out/articles/x.json"));
}

#[test]
fn create_all_makes_every_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = OutputLayout::new(tmp.path().join("run"));
    layout.create_all().unwrap();
    for d in ["articles", "scripts", "videos", "audio", "final"] {
        assert!(layout.root().join(d).is_dir(), "{d}");
    }
}
