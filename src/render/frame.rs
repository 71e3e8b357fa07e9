use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::error::{ShortsError, ShortsResult};
use crate::naming::ensure_parent_dir;

/// One opaque RGBA8 raster, row-major, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Frames of one segment. Static captions share a single raster.
pub type FrameSequence = Vec<Arc<Frame>>;

impl Frame {
    /// Wrap raw RGBA8 bytes, checking the length against the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> ShortsResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(ShortsError::validation(format!(
                "frame data size mismatch: got {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Take ownership of a fully opaque pixmap.
    ///
    /// Opaque premultiplied pixels equal their straight-alpha form, so no conversion is needed.
    pub(crate) fn from_opaque_pixmap(pixmap: resvg::tiny_skia::Pixmap) -> Self {
        let width = pixmap.width();
        let height = pixmap.height();
        Self {
            width,
            height,
            data: pixmap.take(),
        }
    }

    /// RGBA of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn save_png(&self, path: &Path) -> ShortsResult<()> {
        ensure_parent_dir(path)?;
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Total number of frames across sequences.
pub fn total_frames(sequences: &[FrameSequence]) -> usize {
    sequences.iter().map(Vec::len).sum()
}
