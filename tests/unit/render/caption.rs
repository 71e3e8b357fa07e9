use super::*;
use crate::render::fonts::FontResolver as _;

const W: u32 = 540;
const H: u32 = 960;

fn req<'a>(text: &'a str, secs: f64) -> RenderRequest<'a> {
    RenderRequest {
        text,
        duration_seconds: secs,
        fps: 10,
        width: W,
        height: H,
        title: None,
        show_url: false,
        url: None,
    }
}

fn renderer() -> CaptionRenderer {
    CaptionRenderer::new(CaptionFont::Builtin, "See link in description")
}

fn lit_rows(frame: &Frame) -> Vec<u32> {
    (0..frame.height)
        .filter(|&y| (0..frame.width).any(|x| frame.pixel(x, y) == Some([255, 255, 255, 255])))
        .collect()
}

#[test]
fn frame_count_is_floor_of_duration_times_fps() {
    assert_eq!(req("x", 2.0).frame_count(), 20);
    assert_eq!(req("x", 0.25).frame_count(), 2);
    assert_eq!(req("x", 0.0).frame_count(), 0);
    assert_eq!(req("x", -3.0).frame_count(), 0);
}

#[test]
fn non_positive_duration_yields_empty_sequence() {
    assert!(renderer().render(&req("x", 0.0)).unwrap().is_empty());
    assert!(renderer().render(&req("x", -5.0)).unwrap().is_empty());
}

#[test]
fn all_frames_share_one_raster() {
    let frames = renderer().render(&req("Hello", 1.0)).unwrap();
    assert_eq!(frames.len(), 10);
    assert!(frames.iter().all(|f| Arc::ptr_eq(f, &frames[0])));
    assert_eq!((frames[0].width, frames[0].height), (W, H));
    assert_eq!(frames[0].data.len(), (W * H * 4) as usize);
}

#[test]
fn background_is_midnight_blue() {
    let f = renderer().render_still(&req("", 1.0)).unwrap();
    assert_eq!(f.pixel(0, 0), Some([25, 25, 112, 255]));
    assert_eq!(f.pixel(W - 1, H - 1), Some([25, 25, 112, 255]));
    assert!(lit_rows(&f).is_empty());
}

#[test]
fn body_without_title_starts_at_200() {
    let f = renderer().render_still(&req("HELLO", 1.0)).unwrap();
    let rows = lit_rows(&f);
    assert_eq!(rows.first().copied(), Some(200));
    assert!(rows.iter().all(|&y| y < 200 + 7 * 4));
}

#[test]
fn title_pushes_body_below_it() {
    let mut r = req("BODY", 1.0);
    r.title = Some("TITLE");
    let f = renderer().render_still(&r).unwrap();
    let rows = lit_rows(&f);
    assert_eq!(rows.first().copied(), Some(100));
    // One title line: 100 + 60 + 50.
    assert!(rows.contains(&210));
    assert!(!rows.iter().any(|&y| (100 + 7 * 5..210).contains(&y)));
}

#[test]
fn lines_are_centered() {
    let f = renderer().render_still(&req("I", 1.0)).unwrap();
    let lit: Vec<u32> = (0..W).filter(|&x| f.pixel(x, 200) == Some([255; 4])).collect();
    let scale = builtin_font::scale_for(BODY_FONT_SIZE);
    let left = layout::centered_x(W, builtin_font::line_width("I", scale) as f32) as u32;
    // Top row of 'I' lights columns 1..=3.
    assert_eq!(lit.first().copied(), Some(left + scale));
    assert_eq!(lit.last().copied(), Some(left + 4 * scale - 1));
}

#[test]
fn link_caption_needs_flag_and_url() {
    let bottom = |f: &Frame| lit_rows(f).into_iter().filter(|&y| y >= H - 200).count();

    let mut r = req("", 1.0);
    r.show_url = true;
    r.url = Some("https://example.com");
    assert!(bottom(&renderer().render_still(&r).unwrap()) > 0);

    r.url = None;
    assert_eq!(bottom(&renderer().render_still(&r).unwrap()), 0);

    r.url = Some("https://example.com");
    r.show_url = false;
    assert_eq!(bottom(&renderer().render_still(&r).unwrap()), 0);
}

#[test]
fn zero_dimensions_are_rejected() {
    let mut r = req("x", 1.0);
    r.width = 0;
    assert!(matches!(
        renderer().render(&r).unwrap_err(),
        ShortsError::Validation(_)
    ));
}

#[test]
fn outline_font_renders_when_available() {
    let Some(CaptionFont::Outline(font)) =
        crate::render::fonts::SystemPath::default().resolve()
    else {
        return;
    };
    let r = CaptionRenderer::new(CaptionFont::Outline(font), "See link in description");
    let f = r.render_still(&req("Hello world", 1.0)).unwrap();
    let rows = lit_rows(&f);
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|&y| (190..300).contains(&y)));
}

#[test]
fn glyphless_outline_lines_fall_back_to_builtin() {
    let empty = OutlineFont {
        fontdb: Arc::new(usvg::fontdb::Database::new()),
        family: "Nowhere Sans".into(),
        source: "nowhere.ttf".into(),
    };
    let r = CaptionRenderer::new(CaptionFont::Outline(empty), "See link in description");

    let mut request = req("HELLO", 1.0);
    request.title = Some("TITLE");
    let f = r.render_still(&request).unwrap();
    assert!(!lit_rows(&f).is_empty());
    assert_eq!(f.data, renderer().render_still(&request).unwrap().data);
}

#[test]
fn xml_escape_handles_markup() {
    assert_eq!(xml_escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
}
