//! End-to-end orchestration: article → script → video + narration → final asset.
//!
//! Stages run strictly in order and each one materializes its output on disk before the next
//! starts. The first unrecoverable stage error aborts the run as [`ShortsError::Pipeline`].

use std::path::{Path, PathBuf};

use crate::article::extract::{ArticleExtractor, JsonFileExtractor};
use crate::article::model::ArticleRecord;
use crate::config::ShortsConfig;
use crate::encode::{EncodeSettings, VideoEncoder};
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::integrate::{IntegrateRequest, Integrator, sections};
use crate::media::MediaAsset;
use crate::naming::OutputLayout;
use crate::render::frame::total_frames;
use crate::render::segments::{self, SegmentKind};
use crate::render::{CaptionRenderer, FontChain, Frame, render_segments};
use crate::script::compose::TemplateSet;
use crate::script::model::{ScriptBudgeter, ScriptRecord};
use crate::voice::synth::{
    CommandSynthesizer, NarrationSynthesizer, SectionAudio, narration_text, synthesize_sections,
};

/// Everything one run produced.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub slug: String,
    pub article_path: PathBuf,
    pub script_path: PathBuf,
    pub script: ScriptRecord,
    pub video: MediaAsset,
    pub audio: MediaAsset,
    /// Per-section narration; empty unless section narration is enabled.
    pub section_audio: Vec<SectionAudio>,
    /// Merged file, or the manual bundle directory.
    pub final_asset: MediaAsset,
}

pub struct Pipeline {
    config: ShortsConfig,
    layout: OutputLayout,
    budgeter: ScriptBudgeter,
    extractor: Box<dyn ArticleExtractor>,
    synthesizer: Box<dyn NarrationSynthesizer>,
    integrator: Integrator,
    section_narration: bool,
}

impl Pipeline {
    /// Validate `config` and wire the default collaborators, writing under `out_root`.
    pub fn new(config: ShortsConfig, out_root: impl Into<PathBuf>) -> ShortsResult<Self> {
        config.validate()?;
        Ok(Self {
            layout: OutputLayout::new(out_root),
            budgeter: ScriptBudgeter::new(&config.script),
            extractor: Box::new(JsonFileExtractor::new()),
            synthesizer: Box::new(CommandSynthesizer::from_config(&config.voice)),
            integrator: Integrator::from_config(&config.integrate),
            section_narration: false,
            config,
        })
    }

    pub fn with_extractor(mut self, extractor: Box<dyn ArticleExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: Box<dyn NarrationSynthesizer>) -> Self {
        self.synthesizer = synthesizer;
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    /// Also narrate each section and line it up with its segment in the final video.
    pub fn with_section_narration(mut self, enabled: bool) -> Self {
        self.section_narration = enabled;
        self
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Run every stage for `source`.
    #[tracing::instrument(skip(self), fields(out = %self.layout.root().display()))]
    pub fn run(&self, source: &str) -> ShortsResult<PipelineOutput> {
        self.layout
            .create_all()
            .map_err(|e| ShortsError::pipeline("layout", e))?;

        let article = self
            .extractor
            .extract(source)
            .map_err(|e| ShortsError::pipeline("article", e))?;
        if article.is_blank() {
            tracing::warn!(title = %article.title, "article has no text; using the fallback body");
        }

        let script = self.build_script(&article);
        let slug = script.slug();
        tracing::info!(
            %slug,
            words = script.word_count,
            seconds = script.estimated_duration,
            "script ready"
        );

        let article_path = self.layout.article_path(&slug);
        article
            .save(&article_path)
            .map_err(|e| ShortsError::pipeline("article", e))?;
        let script_path = self.layout.script_path(&slug);
        script
            .save(&script_path)
            .map_err(|e| ShortsError::pipeline("script", e))?;

        let video = self
            .render_video(&script, &self.layout.video_path(&slug))
            .map_err(|e| ShortsError::pipeline("video", e))?;
        let audio = self
            .narrate(&script, &self.layout.audio_path(&slug))
            .map_err(|e| ShortsError::pipeline("voice", e))?;

        let section_audio = if self.section_narration {
            self.narrate_sections(&script, &slug)
                .map_err(|e| ShortsError::pipeline("voice", e))?
        } else {
            Vec::new()
        };

        let final_path = self.layout.final_path(&slug);
        let (video_path, audio_path) = (video.path(), audio.path());
        let final_asset = if section_audio.is_empty() {
            self.integrate(video_path, audio_path, &final_path)
        } else {
            self.integrate_sections(&script, video_path, audio_path, &section_audio, &final_path)
        }
        .map_err(|e| ShortsError::pipeline("integrate", e))?;
        tracing::info!(
            kind = ?final_asset.kind,
            path = %final_asset.path.display(),
            "short ready"
        );

        Ok(PipelineOutput {
            slug,
            article_path,
            script_path,
            script,
            video,
            audio,
            section_audio,
            final_asset,
        })
    }

    pub fn build_script(&self, article: &ArticleRecord) -> ScriptRecord {
        self.budgeter.generate(article)
    }

    /// Resolve the caption font and build a renderer whose link caption is in the script's
    /// language.
    pub fn caption_renderer(&self, script: &ScriptRecord) -> CaptionRenderer {
        let font = FontChain::standard(self.config.video.font_path.as_deref()).resolve();
        let templates = if script.language.trim().is_empty() {
            self.budgeter.templates()
        } else {
            TemplateSet::for_language(&script.language)
        };
        CaptionRenderer::new(font, templates.url_caption)
    }

    /// Narration language: the voice override, then the script's language, then the configured
    /// script language.
    pub fn voice_language<'a>(&'a self, script: &'a ScriptRecord) -> &'a str {
        if self.config.voice.language.is_none() && !script.language.trim().is_empty() {
            &script.language
        } else {
            self.config.voice_language()
        }
    }

    /// Render the three segments of `script` and encode them to `out_path`.
    #[tracing::instrument(skip_all, fields(title = %script.title))]
    pub fn render_video(
        &self,
        script: &ScriptRecord,
        out_path: &Path,
    ) -> ShortsResult<MediaAsset> {
        let v = &self.config.video;
        let encoder = VideoEncoder::new(EncodeSettings::from_config(v))?;
        let renderer = self.caption_renderer(script);

        let plan = segments::plan(script, v.min_body_seconds);
        let sequences = render_segments(&renderer, &plan, v.fps, v.width, v.height)?;
        tracing::debug!(frames = total_frames(&sequences), "frames rendered");

        crate::naming::ensure_parent_dir(out_path)?;
        encoder.encode(&sequences, out_path)
    }

    /// One still frame of `kind`, as it appears in the video.
    pub fn preview_frame(&self, script: &ScriptRecord, kind: SegmentKind) -> ShortsResult<Frame> {
        let v = &self.config.video;
        let plan = segments::plan(script, v.min_body_seconds);
        let segment = plan
            .iter()
            .find(|s| s.kind == kind)
            .ok_or_else(|| ShortsError::validation(format!("no {kind} segment in plan")))?;
        self.caption_renderer(script)
            .render_still(&segment.request(v.fps, v.width, v.height))
    }

    /// Speak the whole script into `out_path`.
    pub fn narrate(&self, script: &ScriptRecord, out_path: &Path) -> ShortsResult<MediaAsset> {
        let text = narration_text(script);
        self.synthesizer
            .synthesize(&text, self.voice_language(script), out_path)
    }

    /// Speak each non-empty section into `audio/<slug>-<section>.wav`.
    pub fn narrate_sections(
        &self,
        script: &ScriptRecord,
        slug: &str,
    ) -> ShortsResult<Vec<SectionAudio>> {
        synthesize_sections(
            self.synthesizer.as_ref(),
            script,
            self.voice_language(script),
            &self.layout.audio_dir(),
            slug,
        )
    }

    pub fn integrate(
        &self,
        video: &Path,
        audio: &Path,
        out_path: &Path,
    ) -> ShortsResult<MediaAsset> {
        self.integrator.integrate(&IntegrateRequest {
            video,
            audio,
            out_path,
        })
    }

    /// Integrate with each section's narration under its segment, falling back to `audio`.
    pub fn integrate_sections(
        &self,
        script: &ScriptRecord,
        video: &Path,
        audio: &Path,
        section_audio: &[SectionAudio],
        out_path: &Path,
    ) -> ShortsResult<MediaAsset> {
        let plan = segments::plan(script, self.config.video.min_body_seconds);
        let tracks = sections::align(&plan, section_audio);
        self.integrator.integrate_sections(
            &IntegrateRequest {
                video,
                audio,
                out_path,
            },
            &tracks,
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
