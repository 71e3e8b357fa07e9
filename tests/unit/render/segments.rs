use super::*;

fn script(estimated_duration: u32) -> ScriptRecord {
    ScriptRecord {
        title: "Title".into(),
        intro: "intro".into(),
        body: "body".into(),
        conclusion: "outro".into(),
        full_script: "intro\n\nbody\n\noutro".into(),
        word_count: 3,
        estimated_duration,
        article_url: "https://example.com".into(),
        language: "en".into(),
    }
}

#[test]
fn body_gets_estimate_minus_fixed_sections() {
    assert_eq!(body_seconds(60, 1), 50);
    assert_eq!(body_seconds(11, 1), 1);
}

#[test]
fn short_scripts_floor_the_body() {
    assert_eq!(body_seconds(4, 1), 1);
    assert_eq!(body_seconds(10, 3), 3);
    assert_eq!(body_seconds(0, 0), 0);
}

#[test]
fn plan_assigns_overlays() {
    let [intro, body, outro] = plan(&script(30), 1);
    assert_eq!(intro.kind, SegmentKind::Intro);
    assert_eq!(intro.duration_seconds, 5);
    assert_eq!(intro.overlay_title.as_deref(), Some("Title"));
    assert!(intro.overlay_url.is_none());

    assert_eq!(body.duration_seconds, 20);
    assert!(body.overlay_title.is_none());

    assert_eq!(outro.duration_seconds, 5);
    let req = outro.request(30, 1080, 1920);
    assert!(req.show_url);
    assert_eq!(req.frame_count(), 150);
    assert_eq!(req.url, Some("https://example.com"));
}

#[test]
fn kind_names_are_stable() {
    let names: Vec<_> = SegmentKind::ALL.iter().map(|k| k.to_string()).collect();
    assert_eq!(names, ["intro", "body", "conclusion"]);
}
