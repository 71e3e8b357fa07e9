//! Minimal single-stream AVI (RIFF) writer.
//!
//! Layout: `RIFF AVI ` → `LIST hdrl` (`avih`, `LIST strl` with `strh` + `strf`) → `LIST movi`
//! with one chunk per frame → `idx1`. The header has a fixed size and is rewritten in
//! [`AviWriter::finish`] once frame count and sizes are known.

use std::io::{Seek, SeekFrom, Write};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ShortsError, ShortsResult};

/// Byte length of everything before the first `movi` chunk.
pub const HEADER_LEN: u64 = 224;
/// Offset of the `movi` fourcc; `idx1` offsets are relative to it.
pub const MOVI_FOURCC_OFFSET: u64 = 220;
/// RIFF sizes are 32-bit.
pub const MAX_RIFF_BYTES: u64 = u32::MAX as u64;

const AVIF_HASINDEX: u32 = 0x10;
const AVIIF_KEYFRAME: u32 = 0x10;
const IDX1_ENTRY_LEN: u64 = 16;
const CHUNK_HEADER_LEN: u64 = 8;

/// Frame codec of the intermediate file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameCodec {
    /// Motion JPEG, one JPEG per frame.
    #[default]
    Mjpeg,
    /// Uncompressed bottom-up BGR24.
    Dib,
}

impl FrameCodec {
    fn chunk_id(self) -> &'static [u8; 4] {
        match self {
            Self::Mjpeg => b"00dc",
            Self::Dib => b"00db",
        }
    }

    fn handler(self) -> &'static [u8; 4] {
        match self {
            Self::Mjpeg => b"MJPG",
            Self::Dib => b"DIB ",
        }
    }

    fn compression(self) -> u32 {
        match self {
            Self::Mjpeg => u32::from_le_bytes(*b"MJPG"),
            Self::Dib => 0,
        }
    }
}

/// Row stride of a BGR24 DIB (rows padded to 4 bytes).
pub fn dib_stride(width: u32) -> usize {
    ((width as usize) * 3 + 3) & !3
}

/// Payload size of one DIB frame.
pub fn dib_frame_len(width: u32, height: u32) -> usize {
    dib_stride(width) * height as usize
}

/// Projected file size for `frames` chunks of `payload_len` bytes each.
pub fn projected_file_len(frames: u64, payload_len: u64) -> u64 {
    let padded = payload_len + (payload_len & 1);
    HEADER_LEN + frames * (CHUNK_HEADER_LEN + padded) + CHUNK_HEADER_LEN + frames * IDX1_ENTRY_LEN
}

/// Convert top-down RGBA8 to a bottom-up, row-padded BGR24 DIB.
pub fn rgba_to_dib(rgba: &[u8], width: u32, height: u32, out: &mut Vec<u8>) {
    let stride = dib_stride(width);
    let row_len = width as usize * 4;
    out.clear();
    out.resize(stride * height as usize, 0);
    for (dst_row, src_row) in out
        .chunks_exact_mut(stride)
        .zip(rgba.chunks_exact(row_len).rev())
    {
        for (d, s) in dst_row.chunks_exact_mut(3).zip(src_row.chunks_exact(4)) {
            d[0] = s[2];
            d[1] = s[1];
            d[2] = s[0];
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct IndexEntry {
    offset: u32,
    size: u32,
}

/// Streaming AVI writer.
pub struct AviWriter<W: Write + Seek> {
    out: W,
    codec: FrameCodec,
    width: u32,
    height: u32,
    fps: u32,
    index: Vec<IndexEntry>,
    movi_payload: u64,
    max_chunk: u32,
}

impl<W: Write + Seek> AviWriter<W> {
    /// Start a file; `out` should be positioned at its beginning.
    pub fn new(
        mut out: W,
        codec: FrameCodec,
        width: u32,
        height: u32,
        fps: u32,
    ) -> ShortsResult<Self> {
        if width == 0 || height == 0 || fps == 0 {
            return Err(ShortsError::validation(
                "avi width/height/fps must be non-zero",
            ));
        }
        if width > i16::MAX as u32 || height > i16::MAX as u32 {
            return Err(ShortsError::validation("avi frame dimensions too large"));
        }
        out.write_all(&[0u8; HEADER_LEN as usize])?;
        Ok(Self {
            out,
            codec,
            width,
            height,
            fps,
            index: Vec::new(),
            movi_payload: 0,
            max_chunk: 0,
        })
    }

    /// Append one encoded frame.
    pub fn write_frame(&mut self, payload: &[u8]) -> ShortsResult<()> {
        let len = payload.len() as u64;
        let padded = len + (len & 1);
        let frames = self.index.len() as u64 + 1;
        let projected = HEADER_LEN
            + self.movi_payload
            + CHUNK_HEADER_LEN
            + padded
            + CHUNK_HEADER_LEN
            + frames * IDX1_ENTRY_LEN;
        if projected - 8 > MAX_RIFF_BYTES {
            return Err(ShortsError::validation(format!(
                "avi would exceed the 4 GiB RIFF limit after {frames} frames"
            )));
        }

        let offset = u32::try_from(4 + self.movi_payload)
            .map_err(|_| ShortsError::validation("avi chunk offset overflow"))?;
        let size = payload.len() as u32;

        self.out.write_all(self.codec.chunk_id())?;
        self.out.write_all(&size.to_le_bytes())?;
        self.out.write_all(payload)?;
        if len & 1 == 1 {
            self.out.write_all(&[0])?;
        }

        self.index.push(IndexEntry { offset, size });
        self.movi_payload += CHUNK_HEADER_LEN + padded;
        self.max_chunk = self.max_chunk.max(size);
        Ok(())
    }

    /// Write the index, patch the header and return the underlying writer.
    pub fn finish(mut self) -> ShortsResult<W> {
        let idx_len = self.index.len() as u64 * IDX1_ENTRY_LEN;
        let mut idx = Vec::with_capacity(idx_len as usize + 8);
        idx.extend_from_slice(b"idx1");
        idx.extend_from_slice(&(idx_len as u32).to_le_bytes());
        for e in &self.index {
            idx.extend_from_slice(self.codec.chunk_id());
            idx.extend_from_slice(&AVIIF_KEYFRAME.to_le_bytes());
            idx.extend_from_slice(&e.offset.to_le_bytes());
            idx.extend_from_slice(&e.size.to_le_bytes());
        }
        self.out.write_all(&idx)?;

        let file_len = HEADER_LEN + self.movi_payload + 8 + idx_len;
        let header = self.header(file_len);
        self.out.seek(SeekFrom::Start(0))?;
        self.out.write_all(&header)?;
        self.out.flush()?;
        Ok(self.out)
    }

    fn header(&self, file_len: u64) -> Vec<u8> {
        let frames = self.index.len() as u32;
        let suggested = self.max_chunk;
        let image_size = match self.codec {
            FrameCodec::Dib => dib_frame_len(self.width, self.height) as u32,
            FrameCodec::Mjpeg => self.width.saturating_mul(self.height).saturating_mul(3),
        };

        let mut h = Vec::with_capacity(HEADER_LEN as usize);
        h.extend_from_slice(b"RIFF");
        put_u32(&mut h, (file_len - 8) as u32);
        h.extend_from_slice(b"AVI ");

        h.extend_from_slice(b"LIST");
        put_u32(&mut h, 192);
        h.extend_from_slice(b"hdrl");

        h.extend_from_slice(b"avih");
        put_u32(&mut h, 56);
        put_u32(&mut h, 1_000_000 / self.fps);
        put_u32(&mut h, suggested.saturating_mul(self.fps));
        put_u32(&mut h, 0);
        put_u32(&mut h, AVIF_HASINDEX);
        put_u32(&mut h, frames);
        put_u32(&mut h, 0);
        put_u32(&mut h, 1);
        put_u32(&mut h, suggested);
        put_u32(&mut h, self.width);
        put_u32(&mut h, self.height);
        h.extend_from_slice(&[0u8; 16]);

        h.extend_from_slice(b"LIST");
        put_u32(&mut h, 116);
        h.extend_from_slice(b"strl");

        h.extend_from_slice(b"strh");
        put_u32(&mut h, 56);
        h.extend_from_slice(b"vids");
        h.extend_from_slice(self.codec.handler());
        put_u32(&mut h, 0);
        h.extend_from_slice(&0u16.to_le_bytes());
        h.extend_from_slice(&0u16.to_le_bytes());
        put_u32(&mut h, 0);
        put_u32(&mut h, 1);
        put_u32(&mut h, self.fps);
        put_u32(&mut h, 0);
        put_u32(&mut h, frames);
        put_u32(&mut h, suggested);
        put_u32(&mut h, u32::MAX);
        put_u32(&mut h, 0);
        for v in [0i16, 0, self.width as i16, self.height as i16] {
            h.extend_from_slice(&v.to_le_bytes());
        }

        h.extend_from_slice(b"strf");
        put_u32(&mut h, 40);
        put_u32(&mut h, 40);
        h.extend_from_slice(&(self.width as i32).to_le_bytes());
        h.extend_from_slice(&(self.height as i32).to_le_bytes());
        h.extend_from_slice(&1u16.to_le_bytes());
        h.extend_from_slice(&24u16.to_le_bytes());
        put_u32(&mut h, self.codec.compression());
        put_u32(&mut h, image_size);
        for _ in 0..4 {
            put_u32(&mut h, 0);
        }

        h.extend_from_slice(b"LIST");
        put_u32(&mut h, (4 + self.movi_payload) as u32);
        h.extend_from_slice(b"movi");

        debug_assert_eq!(h.len() as u64, HEADER_LEN);
        h
    }
}

fn put_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

#[cfg(test)]
#[path = "../../tests/unit/encode/avi.rs"]
mod tests;
