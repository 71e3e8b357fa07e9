use std::ffi::OsString;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::VoiceConfig;
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::media::{MediaAsset, is_nonempty_file};
use crate::naming::ensure_parent_dir;
use crate::render::segments::SegmentKind;
use crate::script::budget::join_sections;
use crate::script::model::ScriptRecord;

const LANGUAGE_PLACEHOLDER: &str = "{language}";
const OUTPUT_PLACEHOLDER: &str = "{output}";

/// Text-to-speech collaborator.
pub trait NarrationSynthesizer {
    /// Speak `text` in `language` into `out_path`.
    fn synthesize(&self, text: &str, language: &str, out_path: &Path) -> ShortsResult<MediaAsset>;
}

/// Runs a speech program with the text on stdin.
#[derive(Clone, Debug)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(cfg: &VoiceConfig) -> Self {
        Self::new(cfg.program.clone(), cfg.args.clone())
    }

    fn expand_args(&self, language: &str, out_path: &Path) -> Vec<OsString> {
        self.args
            .iter()
            .map(|a| {
                if a == OUTPUT_PLACEHOLDER {
                    return out_path.as_os_str().to_owned();
                }
                OsString::from(
                    a.replace(LANGUAGE_PLACEHOLDER, language)
                        .replace(OUTPUT_PLACEHOLDER, &out_path.to_string_lossy()),
                )
            })
            .collect()
    }
}

impl NarrationSynthesizer for CommandSynthesizer {
    #[tracing::instrument(
        skip(self, text),
        fields(program = %self.program, out = %out_path.display())
    )]
    fn synthesize(&self, text: &str, language: &str, out_path: &Path) -> ShortsResult<MediaAsset> {
        if text.trim().is_empty() {
            return Err(ShortsError::empty_input("narration text is empty"));
        }
        ensure_parent_dir(out_path)?;
        if out_path.exists() {
            let _ = std::fs::remove_file(out_path);
        }

        let mut child = Command::new(&self.program)
            .args(self.expand_args(language, out_path))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ShortsError::synthesis(format!(
                    "failed to spawn {} (is it installed and on PATH?): {e}",
                    self.program
                ))
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(text.as_bytes()) {
                Ok(()) => {}
                // The program may exit without reading stdin; its status decides.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Err(e) => {
                    return Err(ShortsError::synthesis(format!(
                        "failed to write narration text to {}: {e}",
                        self.program
                    )));
                }
            }
        }

        let output = child.wait_with_output().map_err(|e| {
            ShortsError::synthesis(format!("failed to wait for {}: {e}", self.program))
        })?;
        if !output.status.success() {
            return Err(ShortsError::synthesis(format!(
                "{} exited with status {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        if !is_nonempty_file(out_path) {
            return Err(ShortsError::synthesis(format!(
                "{} produced no audio at '{}'",
                self.program,
                out_path.display()
            )));
        }

        tracing::info!(words = text.split_whitespace().count(), "narration synthesized");
        Ok(MediaAsset::audio(out_path))
    }
}

/// Text spoken for a whole script: `full_script`, or the joined sections when it is blank.
pub fn narration_text(script: &ScriptRecord) -> String {
    if script.full_script.trim().is_empty() {
        join_sections(&script.intro, &script.body, &script.conclusion)
    } else {
        script.full_script.clone()
    }
}

/// One narrated section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionAudio {
    pub kind: SegmentKind,
    pub asset: MediaAsset,
}

/// `<dir>/<stem>-<section>.wav` for every non-empty section, in reading order.
pub fn synthesize_sections(
    synth: &dyn NarrationSynthesizer,
    script: &ScriptRecord,
    language: &str,
    dir: &Path,
    stem: &str,
) -> ShortsResult<Vec<SectionAudio>> {
    let sections = [
        (SegmentKind::Intro, &script.intro),
        (SegmentKind::Body, &script.body),
        (SegmentKind::Conclusion, &script.conclusion),
    ];

    let mut out = Vec::new();
    for (kind, text) in sections {
        if text.trim().is_empty() {
            continue;
        }
        let path: PathBuf = dir.join(format!("{stem}-{kind}.wav"));
        let asset = synth.synthesize(text, language, &path)?;
        out.push(SectionAudio { kind, asset });
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/voice/synth.rs"]
mod tests;
