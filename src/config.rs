//! Run configuration.
//!
//! Loaded from an optional TOML file; every section and field has a default so an empty file is
//! a valid configuration. The CLI applies its flags on top before calling
//! [`ShortsConfig::validate`].

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::encode::avi::FrameCodec;
use crate::foundation::error::{ShortsError, ShortsResult};

/// Root configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortsConfig {
    pub script: ScriptConfig,
    pub video: VideoConfig,
    pub voice: VoiceConfig,
    pub integrate: IntegrateConfig,
}

impl ShortsConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(s: &str) -> ShortsResult<Self> {
        toml::from_str(s).map_err(|e| ShortsError::validation(format!("config parse failed: {e}")))
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: &Path) -> ShortsResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_toml_str(&s)
    }

    /// Check cross-field invariants.
    pub fn validate(&self) -> ShortsResult<()> {
        self.script.validate()?;
        self.video.validate()?;
        self.voice.validate()?;
        self.integrate.validate()
    }

    /// Narration language: the voice override, or the script language.
    pub fn voice_language(&self) -> &str {
        self.voice
            .language
            .as_deref()
            .unwrap_or(self.script.language.as_str())
    }
}

/// Script generation limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Cap on the estimated narration duration (seconds).
    pub max_duration: u32,
    /// Cap on the number of words in the full script.
    pub max_words: usize,
    /// Template language (`en`, `fr`).
    pub language: String,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            max_duration: 60,
            max_words: 150,
            language: "en".to_string(),
        }
    }
}

impl ScriptConfig {
    pub fn validate(&self) -> ShortsResult<()> {
        if self.max_words == 0 {
            return Err(ShortsError::validation("script.max_words must be non-zero"));
        }
        if self.language.trim().is_empty() {
            return Err(ShortsError::validation("script.language must not be empty"));
        }
        Ok(())
    }
}

/// Frame rendering and encoding settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Preferred caption font; the system fonts and the built-in font are tried after it.
    pub font_path: Option<PathBuf>,
    /// Frame codec of the intermediate AVI.
    pub raw_codec: FrameCodec,
    /// JPEG quality for [`FrameCodec::Mjpeg`] (1..=100).
    pub jpeg_quality: u8,
    /// Program used for the compression pass.
    pub compressor: String,
    /// Lower bound for the body segment duration (seconds).
    pub min_body_seconds: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: 30,
            font_path: None,
            raw_codec: FrameCodec::Mjpeg,
            jpeg_quality: 90,
            compressor: "ffmpeg".to_string(),
            min_body_seconds: 1,
        }
    }
}

impl VideoConfig {
    pub fn validate(&self) -> ShortsResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ShortsError::validation(
                "video width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(ShortsError::validation("video fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(ShortsError::validation(
                "video width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ShortsError::validation(
                "video.jpeg_quality must be in 1..=100",
            ));
        }
        if self.compressor.trim().is_empty() {
            return Err(ShortsError::validation("video.compressor must not be empty"));
        }
        Ok(())
    }
}

/// Narration command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Synthesizer program.
    pub program: String,
    /// Argument template; `{language}` and `{output}` are substituted.
    pub args: Vec<String>,
    /// Narration language; inherits `script.language` when unset.
    pub language: Option<String>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".to_string(),
            args: ["-v", "{language}", "-w", "{output}", "--stdin"]
                .into_iter()
                .map(String::from)
                .collect(),
            language: None,
        }
    }
}

impl VoiceConfig {
    pub fn validate(&self) -> ShortsResult<()> {
        if self.program.trim().is_empty() {
            return Err(ShortsError::validation("voice.program must not be empty"));
        }
        if !self.args.iter().any(|a| a.contains("{output}")) {
            return Err(ShortsError::validation(
                "voice.args must contain an {output} placeholder",
            ));
        }
        Ok(())
    }
}

/// Programs used by the integration tiers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrateConfig {
    pub muxer: String,
    pub reencoder: String,
    pub prober: String,
}

impl Default for IntegrateConfig {
    fn default() -> Self {
        Self {
            muxer: "ffmpeg".to_string(),
            reencoder: "avconv".to_string(),
            prober: "avprobe".to_string(),
        }
    }
}

impl IntegrateConfig {
    pub fn validate(&self) -> ShortsResult<()> {
        for (name, v) in [
            ("integrate.muxer", &self.muxer),
            ("integrate.reencoder", &self.reencoder),
            ("integrate.prober", &self.prober),
        ] {
            if v.trim().is_empty() {
                return Err(ShortsError::validation(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
