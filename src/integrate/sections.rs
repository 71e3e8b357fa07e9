//! Section-aligned narration: each section's audio starts where its segment starts on screen.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::foundation::error::ShortsResult;
use crate::integrate::tiers::{merged_output, os_args, prepare_output};
use crate::integrate::TierOutcome;
use crate::render::segments::{Segment, SegmentKind};
use crate::tool;
use crate::voice::SectionAudio;

/// One section's audio placed on the video timeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionTrack {
    pub kind: SegmentKind,
    pub audio: PathBuf,
    pub start_seconds: u32,
    /// Audio past this many seconds is cut so it never runs into the next section.
    pub span_seconds: u32,
}

/// Pair section audio with the segment timing of `plan`.
///
/// Sections without audio are skipped; their screen time stays silent.
pub fn align(plan: &[Segment], audio: &[SectionAudio]) -> Vec<SectionTrack> {
    let mut start = 0;
    let mut tracks = Vec::new();
    for segment in plan {
        if let Some(a) = audio.iter().find(|a| a.kind == segment.kind) {
            tracks.push(SectionTrack {
                kind: segment.kind,
                audio: a.asset.path.clone(),
                start_seconds: start,
                span_seconds: segment.duration_seconds,
            });
        }
        start += segment.duration_seconds;
    }
    tracks
}

/// `-filter_complex` graph trimming, delaying and mixing the tracks into `[aout]`.
///
/// Input 0 is the video; track `i` is input `i + 1`.
pub fn filter_graph(tracks: &[SectionTrack]) -> String {
    let mut graph = String::new();
    for (i, t) in tracks.iter().enumerate() {
        let _ = write!(
            graph,
            "[{input}:a]atrim=0:{span},adelay={delay}:all=1[s{i}];",
            input = i + 1,
            span = t.span_seconds,
            delay = u64::from(t.start_seconds) * 1000,
        );
    }
    for i in 0..tracks.len() {
        let _ = write!(graph, "[s{i}]");
    }
    let _ = write!(
        graph,
        "amix=inputs={}:duration=longest:normalize=0[aout]",
        tracks.len()
    );
    graph
}

/// Muxes the video with every section track in one call.
#[derive(Clone, Debug)]
pub struct SectionMux {
    program: String,
}

impl SectionMux {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    #[tracing::instrument(skip_all, fields(program = %self.program, sections = tracks.len()))]
    pub fn try_mux(
        &self,
        video: &Path,
        tracks: &[SectionTrack],
        out_path: &Path,
    ) -> ShortsResult<TierOutcome> {
        if tracks.is_empty() {
            return Ok(TierOutcome::Unavailable("no section audio".to_string()));
        }
        if !tool::is_available(&self.program) {
            return Ok(TierOutcome::Unavailable(format!(
                "{} was not found on PATH",
                self.program
            )));
        }
        let mut inputs = vec![video];
        inputs.extend(tracks.iter().map(|t| t.audio.as_path()));
        prepare_output(out_path, &inputs)?;

        let mut args = os_args(&["-y", "-loglevel", "error", "-i"]);
        args.push(video.as_os_str().to_owned());
        for t in tracks {
            args.push("-i".into());
            args.push(t.audio.as_os_str().to_owned());
        }
        args.push("-filter_complex".into());
        args.push(filter_graph(tracks).into());
        args.extend(os_args(&[
            "-map", "0:v:0", "-map", "[aout]", "-c:v", "copy", "-c:a", "aac", "-shortest",
        ]));
        args.push(out_path.as_os_str().to_owned());
        tool::run(&self.program, &args)?;

        merged_output(&self.program, out_path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/integrate/sections.rs"]
mod tests;
