//! Tool-backed integration tiers.

use std::ffi::OsString;
use std::path::Path;

use crate::foundation::error::{ShortsError, ShortsResult};
use crate::integrate::{CapabilityTier, IntegrateRequest, TierOutcome};
use crate::media::{MediaAsset, MediaKind, is_nonempty_file, same_file};
use crate::tool;

pub(super) fn os_args(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

pub(super) fn prepare_output(out_path: &Path, inputs: &[&Path]) -> ShortsResult<()> {
    if inputs.iter().any(|input| same_file(out_path, input)) {
        return Err(ShortsError::validation(format!(
            "refusing to replace input '{}'",
            out_path.display()
        )));
    }
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ShortsError::external_tool(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    if out_path.is_file() {
        std::fs::remove_file(out_path).map_err(|e| {
            ShortsError::external_tool(format!(
                "failed to remove stale output '{}': {e}",
                out_path.display()
            ))
        })?;
    }
    Ok(())
}

pub(super) fn merged_output(program: &str, out_path: &Path) -> ShortsResult<TierOutcome> {
    if !is_nonempty_file(out_path) {
        return Err(ShortsError::external_tool(format!(
            "{program} produced no output at '{}'",
            out_path.display()
        )));
    }
    Ok(TierOutcome::Integrated(MediaAsset::new(
        MediaKind::Merged,
        out_path,
    )))
}

/// Stream-copy the video and encode the narration to AAC in one muxer call.
#[derive(Clone, Debug)]
pub struct ExternalMux {
    program: String,
}

impl ExternalMux {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl CapabilityTier for ExternalMux {
    fn name(&self) -> &'static str {
        "external-mux"
    }

    fn try_integrate(&self, req: &IntegrateRequest<'_>) -> ShortsResult<TierOutcome> {
        if !tool::is_available(&self.program) {
            return Ok(TierOutcome::Unavailable(format!(
                "{} was not found on PATH",
                self.program
            )));
        }
        prepare_output(req.out_path, &[req.video, req.audio])?;

        let mut args = os_args(&["-y", "-loglevel", "error", "-i"]);
        args.push(req.video.as_os_str().to_owned());
        args.push("-i".into());
        args.push(req.audio.as_os_str().to_owned());
        args.extend(os_args(&[
            "-c:v", "copy", "-c:a", "aac", "-map", "0:v:0", "-map", "1:a:0", "-shortest",
        ]));
        args.push(req.out_path.as_os_str().to_owned());
        tool::run(&self.program, &args)?;

        merged_output(&self.program, req.out_path)
    }
}

/// Re-encode with a second toolchain, trimming the video to the narration when it runs longer.
#[derive(Clone, Debug)]
pub struct ClipReencode {
    encoder: String,
    prober: String,
}

impl ClipReencode {
    pub fn new(encoder: impl Into<String>, prober: impl Into<String>) -> Self {
        Self {
            encoder: encoder.into(),
            prober: prober.into(),
        }
    }

    /// Container duration of `path` in seconds.
    pub fn probe_duration(&self, path: &Path) -> ShortsResult<f64> {
        let mut args = os_args(&[
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ]);
        args.push(path.as_os_str().to_owned());
        let out = tool::run(&self.prober, &args)?;

        out.lines()
            .find_map(|l| l.trim().parse::<f64>().ok())
            .filter(|d| d.is_finite() && *d > 0.0)
            .ok_or_else(|| {
                ShortsError::external_tool(format!(
                    "{} reported no duration for '{}'",
                    self.prober,
                    path.display()
                ))
            })
    }

    /// `-t <audio>` when the video is longer, nothing when it is not, `-shortest` when unknown.
    fn length_args(&self, req: &IntegrateRequest<'_>) -> Vec<OsString> {
        match (
            self.probe_duration(req.video),
            self.probe_duration(req.audio),
        ) {
            (Ok(video), Ok(audio)) if video > audio => {
                tracing::debug!(video, audio, "trimming video to narration length");
                vec!["-t".into(), format!("{audio:.3}").into()]
            }
            (Ok(_), Ok(_)) => Vec::new(),
            (v, a) => {
                tracing::debug!(
                    video_probe_ok = v.is_ok(),
                    audio_probe_ok = a.is_ok(),
                    "duration probe failed; using -shortest"
                );
                vec!["-shortest".into()]
            }
        }
    }
}

impl CapabilityTier for ClipReencode {
    fn name(&self) -> &'static str {
        "clip-reencode"
    }

    fn try_integrate(&self, req: &IntegrateRequest<'_>) -> ShortsResult<TierOutcome> {
        if !tool::is_available(&self.encoder) {
            return Ok(TierOutcome::Unavailable(format!(
                "{} was not found on PATH",
                self.encoder
            )));
        }
        prepare_output(req.out_path, &[req.video, req.audio])?;

        let mut args = os_args(&["-y", "-loglevel", "error", "-i"]);
        args.push(req.video.as_os_str().to_owned());
        args.push("-i".into());
        args.push(req.audio.as_os_str().to_owned());
        args.extend(self.length_args(req));
        args.extend(os_args(&[
            "-map", "0:v:0", "-map", "1:a:0", "-c:v", "libx264", "-c:a", "aac",
        ]));
        args.push(req.out_path.as_os_str().to_owned());
        tool::run(&self.encoder, &args)?;

        merged_output(&self.encoder, req.out_path)
    }
}
