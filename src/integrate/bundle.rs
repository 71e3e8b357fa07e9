//! Last-resort tier: hand the user everything needed to finish the merge.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{ShortsError, ShortsResult};
use crate::integrate::{CapabilityTier, IntegrateRequest, TierOutcome};
use crate::media::{MediaAsset, MediaKind, is_within};

pub const COMBINE_SCRIPT: &str = "combine.sh";
pub const README: &str = "README.txt";
/// Written next to the inputs when `combine.sh` runs.
pub const COMBINED: &str = "combined.mp4";

const MAX_BUNDLE_NAMES: u32 = 1000;

/// Writes `<out stem>/`, or the next free `-bundle` name, with copies of both inputs, a shell
/// script and instructions.
#[derive(Clone, Debug)]
pub struct ManualBundle {
    /// Muxer named in the generated script.
    muxer: String,
}

impl ManualBundle {
    pub fn new(muxer: impl Into<String>) -> Self {
        Self {
            muxer: muxer.into(),
        }
    }

    /// Preferred bundle directory for `out_path`: the path without its extension.
    pub fn preferred_dir(out_path: &Path) -> PathBuf {
        out_path.with_extension("")
    }

    /// First usable directory among `<stem>`, `<stem>-bundle`, `<stem>-bundle-2`, ...
    ///
    /// A directory is usable when it does not exist, or holds nothing but files of an earlier
    /// bundle and neither input.
    pub fn bundle_dir(req: &IntegrateRequest<'_>) -> ShortsResult<PathBuf> {
        let base = Self::preferred_dir(req.out_path);
        let stem = base
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "short".to_string());

        for n in 0..MAX_BUNDLE_NAMES {
            let dir = match n {
                0 => base.clone(),
                1 => base.with_file_name(format!("{stem}-bundle")),
                n => base.with_file_name(format!("{stem}-bundle-{n}")),
            };
            if is_reusable(&dir, req) {
                return Ok(dir);
            }
            tracing::debug!(dir = %dir.display(), "bundle path taken; trying the next name");
        }
        Err(ShortsError::validation(format!(
            "no free bundle directory next to '{}'",
            base.display()
        )))
    }

    fn combine_script(&self, video: &str, audio: &str) -> String {
        format!(
            "#!/bin/sh\n\
             # Combine the video with its narration. Requires {muxer}.\n\
             cd \"$(dirname \"$0\")\" || exit 1\n\
             {muxer} -y -i {video} -i {audio} -c:v copy -c:a aac -map 0:v:0 -map 1:a:0 -shortest {COMBINED}\n",
            muxer = self.muxer,
        )
    }

    fn readme(&self, video: &str, audio: &str) -> String {
        format!(
            "HOW TO COMBINE THE VIDEO AND THE NARRATION\n\
             \n\
             Option 1: run the shell script (requires {muxer})\n\
             1. Open a terminal in this directory\n\
             2. Run ./{COMBINE_SCRIPT}\n\
             3. The result is written to {COMBINED}\n\
             \n\
             Option 2: play them together\n\
             1. Open the video ({video}) in a video player\n\
             2. Start the audio ({audio}) at the same time\n\
             \n\
             Option 3: use a video editor\n\
             1. Import {video} and {audio} into any video editor or online editing service\n\
             2. Place the audio on the video's timeline, starting at zero\n\
             3. Export the combined video\n",
            muxer = self.muxer,
        )
    }
}

fn is_bundle_artifact(name: &str) -> bool {
    name == COMBINE_SCRIPT
        || name == README
        || name == COMBINED
        || name.starts_with("video.")
        || name.starts_with("audio.")
}

fn is_reusable(dir: &Path, req: &IntegrateRequest<'_>) -> bool {
    if !dir.exists() {
        return true;
    }
    if !dir.is_dir() || is_within(req.video, dir) || is_within(req.audio, dir) {
        return false;
    }
    let Ok(mut entries) = std::fs::read_dir(dir) else {
        return false;
    };
    entries.all(|entry| {
        entry.is_ok_and(|e| {
            e.file_type().is_ok_and(|t| t.is_file())
                && is_bundle_artifact(&e.file_name().to_string_lossy())
        })
    })
}

fn file_name_with_ext(base: &str, src: &Path, default_ext: &str) -> String {
    let ext = src
        .extension()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(default_ext);
    format!("{base}.{ext}")
}

impl CapabilityTier for ManualBundle {
    fn name(&self) -> &'static str {
        "manual-bundle"
    }

    fn try_integrate(&self, req: &IntegrateRequest<'_>) -> ShortsResult<TierOutcome> {
        let dir = Self::bundle_dir(req)?;
        if dir.is_dir() {
            std::fs::remove_dir_all(&dir)
                .with_context(|| format!("clear earlier bundle '{}'", dir.display()))?;
        }
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("create bundle directory '{}'", dir.display()))?;

        let video_name = file_name_with_ext("video", req.video, "mp4");
        let audio_name = file_name_with_ext("audio", req.audio, "wav");
        std::fs::copy(req.video, dir.join(&video_name))
            .with_context(|| format!("copy video '{}' into bundle", req.video.display()))?;
        std::fs::copy(req.audio, dir.join(&audio_name))
            .with_context(|| format!("copy audio '{}' into bundle", req.audio.display()))?;

        let script = dir.join(COMBINE_SCRIPT);
        std::fs::write(&script, self.combine_script(&video_name, &audio_name))
            .with_context(|| format!("write '{}'", script.display()))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
                .with_context(|| format!("make '{}' executable", script.display()))?;
        }

        let readme = dir.join(README);
        std::fs::write(&readme, self.readme(&video_name, &audio_name))
            .with_context(|| format!("write '{}'", readme.display()))?;

        Ok(TierOutcome::Integrated(MediaAsset::new(MediaKind::Bundle, dir)))
    }
}
