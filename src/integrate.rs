//! Audio/video integration with graceful degradation.
//!
//! Tiers are tried strictly in order. A tier that is unavailable, or whose tool fails at
//! runtime, hands over to the next one; the last tier needs no tools at all, so integration only
//! fails on unusable inputs or when the filesystem refuses the bundle.

pub mod bundle;
pub mod sections;
pub mod tiers;

use std::path::Path;

use crate::config::IntegrateConfig;
use crate::foundation::error::{ShortsError, ShortsResult};
use crate::media::{MediaAsset, require_file, same_file};

pub use bundle::ManualBundle;
pub use sections::{SectionMux, SectionTrack};
pub use tiers::{ClipReencode, ExternalMux};

/// Inputs and target of one integration.
#[derive(Clone, Copy, Debug)]
pub struct IntegrateRequest<'a> {
    pub video: &'a Path,
    pub audio: &'a Path,
    pub out_path: &'a Path,
}

/// Result of asking one tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TierOutcome {
    Integrated(MediaAsset),
    /// The tier cannot run here; the reason is logged.
    Unavailable(String),
}

/// One way of combining video and narration.
pub trait CapabilityTier {
    fn name(&self) -> &'static str;
    fn try_integrate(&self, req: &IntegrateRequest<'_>) -> ShortsResult<TierOutcome>;
}

/// Ordered tier chain, plus the optional section-aligned mux tried ahead of it.
pub struct Integrator {
    tiers: Vec<Box<dyn CapabilityTier>>,
    section_mux: Option<SectionMux>,
}

impl Integrator {
    /// External mux, clip re-encode, manual bundle.
    pub fn from_config(cfg: &IntegrateConfig) -> Self {
        Self::with_tiers(vec![
            Box::new(ExternalMux::new(cfg.muxer.clone())),
            Box::new(ClipReencode::new(cfg.reencoder.clone(), cfg.prober.clone())),
            Box::new(ManualBundle::new(cfg.muxer.clone())),
        ])
        .with_section_mux(SectionMux::new(cfg.muxer.clone()))
    }

    pub fn with_tiers(tiers: Vec<Box<dyn CapabilityTier>>) -> Self {
        Self {
            tiers,
            section_mux: None,
        }
    }

    pub fn with_section_mux(mut self, mux: SectionMux) -> Self {
        self.section_mux = Some(mux);
        self
    }

    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|t| t.name()).collect()
    }

    #[tracing::instrument(skip_all, fields(out = %req.out_path.display()))]
    pub fn integrate(&self, req: &IntegrateRequest<'_>) -> ShortsResult<MediaAsset> {
        check_inputs(req)?;

        for tier in &self.tiers {
            match tier.try_integrate(req) {
                Ok(TierOutcome::Integrated(asset)) => {
                    tracing::info!(
                        tier = tier.name(),
                        path = %asset.path.display(),
                        "audio and video integrated"
                    );
                    return Ok(asset);
                }
                Ok(TierOutcome::Unavailable(reason)) => {
                    tracing::info!(tier = tier.name(), %reason, "integration tier unavailable");
                }
                Err(e @ ShortsError::ExternalTool(_)) => {
                    tracing::warn!(tier = tier.name(), error = %e, "integration tier failed");
                }
                Err(e) => return Err(e),
            }
        }

        Err(ShortsError::external_tool(
            "no integration tier could combine the video and audio",
        ))
    }

    /// Place each section's narration under its own segment.
    ///
    /// Falls back to the tier chain with the whole narration in `req.audio` when the section
    /// mux is unavailable or fails.
    #[tracing::instrument(
        skip_all,
        fields(out = %req.out_path.display(), sections = tracks.len())
    )]
    pub fn integrate_sections(
        &self,
        req: &IntegrateRequest<'_>,
        tracks: &[SectionTrack],
    ) -> ShortsResult<MediaAsset> {
        check_inputs(req)?;
        for t in tracks {
            require_file(&t.audio, "section audio")?;
        }

        if let Some(mux) = &self.section_mux {
            match mux.try_mux(req.video, tracks, req.out_path) {
                Ok(TierOutcome::Integrated(asset)) => {
                    tracing::info!(path = %asset.path.display(), "section narration integrated");
                    return Ok(asset);
                }
                Ok(TierOutcome::Unavailable(reason)) => {
                    tracing::info!(%reason, "section mux unavailable; using the whole narration");
                }
                Err(e @ ShortsError::ExternalTool(_)) => {
                    tracing::warn!(error = %e, "section mux failed; using the whole narration");
                }
                Err(e) => return Err(e),
            }
        }
        self.integrate(req)
    }
}

fn check_inputs(req: &IntegrateRequest<'_>) -> ShortsResult<()> {
    require_file(req.video, "video")?;
    require_file(req.audio, "audio")?;
    for (input, what) in [(req.video, "video"), (req.audio, "audio")] {
        if same_file(req.out_path, input) {
            return Err(ShortsError::validation(format!(
                "output '{}' is the {what} input",
                req.out_path.display()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/integrate.rs"]
mod tests;
