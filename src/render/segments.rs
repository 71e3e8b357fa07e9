//! Timed sections of a script.

use crate::render::caption::RenderRequest;
use crate::script::model::ScriptRecord;

/// Fixed length of the opening section.
pub const INTRO_SECONDS: u32 = 5;
/// Fixed length of the closing section.
pub const CONCLUSION_SECONDS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Intro,
    Body,
    Conclusion,
}

impl SegmentKind {
    pub const ALL: [SegmentKind; 3] = [Self::Intro, Self::Body, Self::Conclusion];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Body => "body",
            Self::Conclusion => "conclusion",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
    pub duration_seconds: u32,
    /// Drawn above the text (intro only).
    pub overlay_title: Option<String>,
    /// Link caption target (conclusion only).
    pub overlay_url: Option<String>,
}

impl Segment {
    pub fn request(&self, fps: u32, width: u32, height: u32) -> RenderRequest<'_> {
        RenderRequest {
            text: &self.text,
            duration_seconds: f64::from(self.duration_seconds),
            fps,
            width,
            height,
            title: self.overlay_title.as_deref(),
            show_url: self.overlay_url.is_some(),
            url: self.overlay_url.as_deref(),
        }
    }
}

/// Body length: the estimate minus both fixed sections, never below `min_body_seconds`.
pub fn body_seconds(estimated_duration: u32, min_body_seconds: u32) -> u32 {
    estimated_duration
        .saturating_sub(INTRO_SECONDS + CONCLUSION_SECONDS)
        .max(min_body_seconds)
}

/// Intro, body and conclusion segments for `script`.
pub fn plan(script: &ScriptRecord, min_body_seconds: u32) -> [Segment; 3] {
    [
        Segment {
            kind: SegmentKind::Intro,
            text: script.intro.clone(),
            duration_seconds: INTRO_SECONDS,
            overlay_title: Some(script.title.clone()),
            overlay_url: None,
        },
        Segment {
            kind: SegmentKind::Body,
            text: script.body.clone(),
            duration_seconds: body_seconds(script.estimated_duration, min_body_seconds),
            overlay_title: None,
            overlay_url: None,
        },
        Segment {
            kind: SegmentKind::Conclusion,
            text: script.conclusion.clone(),
            duration_seconds: CONCLUSION_SECONDS,
            overlay_title: None,
            overlay_url: Some(script.article_url.clone()),
        },
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/segments.rs"]
mod tests;
