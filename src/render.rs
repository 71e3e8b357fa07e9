pub mod builtin_font;
pub mod caption;
pub mod fonts;
pub mod frame;
pub mod layout;
pub mod segments;

use crate::foundation::error::ShortsResult;
pub use caption::{CaptionRenderer, RenderRequest};
pub use fonts::{CaptionFont, FontChain, FontResolver};
pub use frame::{Frame, FrameSequence};
pub use segments::{Segment, SegmentKind};

/// Render each segment into its own frame sequence, in order.
pub fn render_segments(
    renderer: &CaptionRenderer,
    segments: &[Segment],
    fps: u32,
    width: u32,
    height: u32,
) -> ShortsResult<Vec<FrameSequence>> {
    segments
        .iter()
        .map(|s| {
            let frames = renderer.render(&s.request(fps, width, height))?;
            tracing::debug!(segment = %s.kind, frames = frames.len(), "segment rendered");
            Ok(frames)
        })
        .collect()
}
