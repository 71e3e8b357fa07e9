use std::sync::Arc;

use anyhow::Context as _;
use resvg::tiny_skia::{Color, Pixmap, Transform};

use crate::foundation::error::{ShortsError, ShortsResult};
use crate::render::builtin_font;
use crate::render::fonts::{CaptionFont, OutlineFont, single_face_resolver};
use crate::render::frame::{Frame, FrameSequence};
use crate::render::layout::{
    self, BACKGROUND_RGB, BODY_FONT_SIZE, BODY_TOP_WITHOUT_TITLE, BODY_WRAP_COLUMNS,
    CAPTION_BOTTOM_OFFSET, CAPTION_FONT_SIZE, LINE_SPACING, TEXT_RGB, TITLE_BODY_GAP,
    TITLE_FONT_SIZE, TITLE_TOP, TITLE_WRAP_COLUMNS,
};

/// Baseline offset of an outline line, as a fraction of the font size.
const BASELINE_RATIO: f32 = 0.8;
const MAX_FRAME_DIM: u32 = 8192;

/// Inputs of one segment render.
#[derive(Clone, Copy, Debug)]
pub struct RenderRequest<'a> {
    pub text: &'a str,
    pub duration_seconds: f64,
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub title: Option<&'a str>,
    pub show_url: bool,
    pub url: Option<&'a str>,
}

impl RenderRequest<'_> {
    /// `floor(duration_seconds * fps)`, or 0 when that is not positive.
    pub fn frame_count(&self) -> usize {
        let n = (self.duration_seconds * f64::from(self.fps)).floor();
        if n.is_finite() && n > 0.0 { n as usize } else { 0 }
    }

    fn draws_link_caption(&self) -> bool {
        self.show_url && self.url.is_some_and(|u| !u.trim().is_empty())
    }
}

/// Draws static caption frames.
#[derive(Clone, Debug)]
pub struct CaptionRenderer {
    font: CaptionFont,
    link_caption: String,
}

impl CaptionRenderer {
    pub fn new(font: CaptionFont, link_caption: impl Into<String>) -> Self {
        Self {
            font,
            link_caption: link_caption.into(),
        }
    }

    pub fn font(&self) -> &CaptionFont {
        &self.font
    }

    /// Render `req` into `frame_count()` frames sharing one raster.
    ///
    /// A non-positive frame count yields an empty sequence.
    #[tracing::instrument(skip_all, fields(frames = req.frame_count()))]
    pub fn render(&self, req: &RenderRequest<'_>) -> ShortsResult<FrameSequence> {
        let n = req.frame_count();
        if n == 0 {
            tracing::debug!("segment has no frames");
            return Ok(Vec::new());
        }
        let frame = Arc::new(self.render_still(req)?);
        Ok(vec![frame; n])
    }

    /// Render the single raster of `req`, regardless of its duration.
    pub fn render_still(&self, req: &RenderRequest<'_>) -> ShortsResult<Frame> {
        if req.width == 0 || req.height == 0 {
            return Err(ShortsError::validation(
                "frame width/height must be non-zero",
            ));
        }
        if req.width > MAX_FRAME_DIM || req.height > MAX_FRAME_DIM {
            return Err(ShortsError::validation(format!(
                "frame size too large: {}x{} (max {MAX_FRAME_DIM}x{MAX_FRAME_DIM})",
                req.width, req.height
            )));
        }

        let mut pixmap = Pixmap::new(req.width, req.height)
            .ok_or_else(|| ShortsError::validation("failed to allocate frame pixmap"))?;
        let [r, g, b] = BACKGROUND_RGB;
        pixmap.fill(Color::from_rgba8(r, g, b, 255));

        let body_top = match req.title.filter(|t| !t.trim().is_empty()) {
            Some(title) => {
                let lines = layout::wrap_text(title, TITLE_WRAP_COLUMNS);
                self.draw_block(&mut pixmap, &lines, TITLE_FONT_SIZE, TITLE_TOP)?;
                TITLE_TOP + layout::block_height(lines.len(), TITLE_FONT_SIZE) + TITLE_BODY_GAP
            }
            None => BODY_TOP_WITHOUT_TITLE,
        };

        let body = layout::wrap_text(req.text, BODY_WRAP_COLUMNS);
        self.draw_block(&mut pixmap, &body, BODY_FONT_SIZE, body_top)?;

        if req.draws_link_caption() {
            let top = req.height as f32 - CAPTION_BOTTOM_OFFSET;
            self.draw_block(
                &mut pixmap,
                std::slice::from_ref(&self.link_caption),
                CAPTION_FONT_SIZE,
                top,
            )?;
        }

        Ok(Frame::from_opaque_pixmap(pixmap))
    }

    fn draw_block(
        &self,
        pixmap: &mut Pixmap,
        lines: &[String],
        font_size: f32,
        top: f32,
    ) -> ShortsResult<()> {
        for (i, line) in lines.iter().enumerate() {
            let y = top + i as f32 * font_size * LINE_SPACING;
            let drawn = match &self.font {
                CaptionFont::Outline(font) => draw_outline_line(pixmap, font, line, font_size, y)?,
                CaptionFont::Builtin => false,
            };
            if !drawn {
                if matches!(self.font, CaptionFont::Outline(_)) && !line.trim().is_empty() {
                    tracing::debug!(%line, "outline font drew nothing; using the built-in font");
                }
                draw_builtin_line(pixmap, line, font_size, y);
            }
        }
        Ok(())
    }
}

fn draw_builtin_line(pixmap: &mut Pixmap, line: &str, font_size: f32, top: f32) {
    let scale = builtin_font::scale_for(font_size);
    let w = builtin_font::line_width(line, scale) as f32;
    let x = layout::centered_x(pixmap.width(), w);
    builtin_font::draw_line(pixmap, line, x, top, scale, TEXT_RGB);
}

/// Draw `line` with `font`; `false` when the font produced no glyphs for it.
fn draw_outline_line(
    pixmap: &mut Pixmap,
    font: &OutlineFont,
    line: &str,
    font_size: f32,
    top: f32,
) -> ShortsResult<bool> {
    let [r, g, b] = TEXT_RGB;
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}"><text x="0" y="{baseline}" font-family="{family}" font-size="{font_size}" fill="#{r:02x}{g:02x}{b:02x}">{text}</text></svg>"##,
        w = pixmap.width().saturating_mul(4),
        h = (font_size * 3.0).ceil(),
        baseline = font_size * BASELINE_RATIO,
        family = xml_escape(&font.family),
        text = xml_escape(line),
    );

    let opts = usvg::Options {
        fontdb: font.fontdb.clone(),
        font_resolver: single_face_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts).context("parse caption svg")?;
    if !tree.root().has_children() {
        return Ok(false);
    }

    let bbox = tree.root().abs_bounding_box();
    let x = layout::centered_x(pixmap.width(), bbox.width()) - bbox.x();
    resvg::render(&tree, Transform::from_translate(x, top), &mut pixmap.as_mut());
    Ok(true)
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if c.is_control() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/caption.rs"]
mod tests;
