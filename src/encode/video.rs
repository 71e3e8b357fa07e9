use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use image::ExtendedColorType;
use image::codecs::jpeg::JpegEncoder;

use crate::config::VideoConfig;
use crate::encode::avi::{self, AviWriter, FrameCodec};
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::media::{MediaAsset, is_nonempty_file};
use crate::naming::ensure_parent_dir;
use crate::render::frame::{Frame, FrameSequence, total_frames};
use crate::tool;

/// Encoder parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeSettings {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub codec: FrameCodec,
    pub jpeg_quality: u8,
    /// Program run for the compression pass.
    pub compressor: String,
}

impl EncodeSettings {
    pub fn from_config(cfg: &VideoConfig) -> Self {
        Self {
            width: cfg.width,
            height: cfg.height,
            fps: cfg.fps,
            codec: cfg.raw_codec,
            jpeg_quality: cfg.jpeg_quality,
            compressor: cfg.compressor.clone(),
        }
    }

    pub fn validate(&self) -> ShortsResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ShortsError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(ShortsError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            // The compression pass targets yuv420p.
            return Err(ShortsError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ShortsError::validation("jpeg quality must be in 1..=100"));
        }
        Ok(())
    }
}

/// `<dir>/<stem>.raw.avi` next to `output`.
pub fn raw_path_for(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string());
    output.with_file_name(format!("{stem}.raw.avi"))
}

/// Turns frame sequences into a video file.
#[derive(Clone, Debug)]
pub struct VideoEncoder {
    settings: EncodeSettings,
}

impl VideoEncoder {
    pub fn new(settings: EncodeSettings) -> ShortsResult<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &EncodeSettings {
        &self.settings
    }

    /// Write all sequences, in order, to `output_path`.
    ///
    /// Frames first go to a raw AVI beside the output. When the compression pass succeeds the raw
    /// file is removed and the asset is `output_path`; otherwise the raw AVI itself is returned.
    #[tracing::instrument(skip_all, fields(out = %output_path.display()))]
    pub fn encode(
        &self,
        sequences: &[FrameSequence],
        output_path: &Path,
    ) -> ShortsResult<MediaAsset> {
        let frames = total_frames(sequences);
        if frames == 0 {
            return Err(ShortsError::empty_input("no frames to encode"));
        }

        let raw = raw_path_for(output_path);
        self.write_raw(sequences, &raw)?;
        tracing::debug!(frames, raw = %raw.display(), "raw video written");

        match self.compress(&raw, output_path) {
            Ok(()) => {
                if let Err(e) = std::fs::remove_file(&raw) {
                    tracing::warn!(raw = %raw.display(), error = %e, "failed to remove raw video");
                }
                tracing::info!(frames, "video encoded");
                Ok(MediaAsset::video(output_path))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    raw = %raw.display(),
                    "compression pass failed; keeping raw video"
                );
                if output_path.exists() {
                    let _ = std::fs::remove_file(output_path);
                }
                Ok(MediaAsset::video(raw))
            }
        }
    }

    /// Write the intermediate AVI.
    pub fn write_raw(&self, sequences: &[FrameSequence], raw_path: &Path) -> ShortsResult<()> {
        let s = &self.settings;
        for frame in sequences.iter().flatten() {
            if frame.width != s.width || frame.height != s.height {
                return Err(ShortsError::validation(format!(
                    "frame size mismatch: got {}x{}, expected {}x{}",
                    frame.width, frame.height, s.width, s.height
                )));
            }
        }
        if s.codec == FrameCodec::Dib {
            let frames = total_frames(sequences) as u64;
            let projected =
                avi::projected_file_len(frames, avi::dib_frame_len(s.width, s.height) as u64);
            if projected - 8 > avi::MAX_RIFF_BYTES {
                return Err(ShortsError::validation(format!(
                    "{frames} uncompressed {}x{} frames exceed the 4 GiB AVI limit; use the mjpeg codec",
                    s.width, s.height
                )));
            }
        }

        ensure_parent_dir(raw_path)?;
        let file = File::create(raw_path)
            .with_context(|| format!("create raw video '{}'", raw_path.display()))?;
        let mut writer = AviWriter::new(BufWriter::new(file), s.codec, s.width, s.height, s.fps)?;

        let mut scratch = Vec::new();
        let mut last: Option<(&Arc<Frame>, Vec<u8>)> = None;
        for frame in sequences.iter().flatten() {
            match s.codec {
                FrameCodec::Mjpeg => {
                    let reuse = last.as_ref().is_some_and(|(prev, _)| Arc::ptr_eq(prev, frame));
                    if !reuse {
                        let jpeg = encode_jpeg(frame, s.jpeg_quality, &mut scratch)?;
                        last = Some((frame, jpeg));
                    }
                    if let Some((_, jpeg)) = &last {
                        writer.write_frame(jpeg)?;
                    }
                }
                FrameCodec::Dib => {
                    avi::rgba_to_dib(&frame.data, frame.width, frame.height, &mut scratch);
                    writer.write_frame(&scratch)?;
                }
            }
        }
        writer.finish()?;
        Ok(())
    }

    fn compress(&self, raw: &Path, output: &Path) -> ShortsResult<()> {
        let program = self.settings.compressor.as_str();
        if !tool::is_available(program) {
            return Err(ShortsError::external_tool(format!(
                "{program} was not found on PATH"
            )));
        }
        if output.exists() {
            std::fs::remove_file(output)
                .with_context(|| format!("remove stale output '{}'", output.display()))?;
        }

        let mut args: Vec<OsString> = ["-y", "-loglevel", "error", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(raw.as_os_str().to_owned());
        args.extend(
            [
                "-c:v",
                "libx264",
                "-preset",
                "medium",
                "-crf",
                "23",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ]
            .into_iter()
            .map(OsString::from),
        );
        args.push(output.as_os_str().to_owned());
        tool::run(program, &args)?;

        if !is_nonempty_file(output) {
            return Err(ShortsError::external_tool(format!(
                "{program} produced no output at '{}'",
                output.display()
            )));
        }
        Ok(())
    }
}

fn encode_jpeg(frame: &Frame, quality: u8, rgb: &mut Vec<u8>) -> ShortsResult<Vec<u8>> {
    rgb.clear();
    rgb.extend(frame.data.chunks_exact(4).flat_map(|p| [p[0], p[1], p[2]]));
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality)
        .encode(rgb, frame.width, frame.height, ExtendedColorType::Rgb8)
        .context("jpeg encode frame")?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/video.rs"]
mod tests;
