//! shortsmith turns long-form articles into captioned, narrated vertical short videos.
//!
//! The pipeline is strictly sequential:
//!
//! 1. an [`ArticleExtractor`] supplies an [`ArticleRecord`]
//! 2. the [`ScriptBudgeter`] condenses it into a timed [`ScriptRecord`]
//! 3. the [`CaptionRenderer`] draws one frame sequence per segment
//! 4. the [`VideoEncoder`] writes a raw AVI and compresses it with an external encoder
//! 5. a [`NarrationSynthesizer`] voices the script
//! 6. the [`Integrator`] combines video and narration, degrading to a manual bundle when no
//!    muxing tool is available
//!
//! [`Pipeline`] wires the stages together under an [`OutputLayout`].

#![forbid(unsafe_code)]

pub mod article;
pub mod config;
pub mod encode;
pub mod foundation;
pub mod integrate;
pub mod media;
pub mod naming;
pub mod pipeline;
pub mod render;
pub mod script;
pub mod tool;
pub mod voice;


pub use article::extract::{ArticleExtractor, JsonFileExtractor};
pub use article::model::{ArticleRecord, BlockKind, ContentBlock};
pub use config::{IntegrateConfig, ScriptConfig, ShortsConfig, VideoConfig, VoiceConfig};
pub use encode::{EncodeSettings, FrameCodec, VideoEncoder};
pub use foundation::error::{ShortsError, ShortsResult};
pub use integrate::{CapabilityTier, IntegrateRequest, Integrator, TierOutcome};
pub use media::{MediaAsset, MediaKind};
pub use naming::{OutputLayout, slugify};
pub use pipeline::{Pipeline, PipelineOutput};
pub use render::{CaptionRenderer, Frame, FrameSequence, RenderRequest, Segment, SegmentKind};
pub use script::model::{ScriptBudgeter, ScriptRecord};
pub use voice::{CommandSynthesizer, NarrationSynthesizer};
