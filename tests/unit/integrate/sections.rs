use super::*;

use crate::config::IntegrateConfig;
use crate::integrate::{CapabilityTier, ExternalMux, IntegrateRequest, Integrator};
use crate::media::{MediaAsset, MediaKind};

fn segment(kind: SegmentKind, duration_seconds: u32) -> Segment {
    Segment {
        kind,
        text: kind.to_string(),
        duration_seconds,
        overlay_title: None,
        overlay_url: None,
    }
}

fn plan() -> [Segment; 3] {
    [
        segment(SegmentKind::Intro, 5),
        segment(SegmentKind::Body, 20),
        segment(SegmentKind::Conclusion, 5),
    ]
}

fn section(kind: SegmentKind, path: &Path) -> SectionAudio {
    SectionAudio {
        kind,
        asset: MediaAsset::audio(path),
    }
}

#[test]
fn tracks_start_where_their_segment_starts() {
    let audio = [
        section(SegmentKind::Conclusion, Path::new("c.wav")),
        section(SegmentKind::Intro, Path::new("i.wav")),
    ];
    let tracks = align(&plan(), &audio);

    assert_eq!(
        tracks,
        [
            SectionTrack {
                kind: SegmentKind::Intro,
                audio: "i.wav".into(),
                start_seconds: 0,
                span_seconds: 5,
            },
            SectionTrack {
                kind: SegmentKind::Conclusion,
                audio: "c.wav".into(),
                start_seconds: 25,
                span_seconds: 5,
            },
        ]
    );
}

#[test]
fn graph_trims_delays_and_mixes() {
    let audio = [
        section(SegmentKind::Intro, Path::new("i.wav")),
        section(SegmentKind::Body, Path::new("b.wav")),
    ];
    let graph = filter_graph(&align(&plan(), &audio));
    assert_eq!(
        graph,
        "[1:a]atrim=0:5,adelay=0:all=1[s0];\
         [2:a]atrim=0:20,adelay=5000:all=1[s1];\
         [s0][s1]amix=inputs=2:duration=longest:normalize=0[aout]"
    );
}

#[test]
fn no_tracks_is_unavailable() {
    let out = SectionMux::new("ffmpeg")
        .try_mux(Path::new("v.mp4"), &[], Path::new("o.mp4"))
        .unwrap();
    assert!(matches!(out, TierOutcome::Unavailable(_)));
}

#[cfg(unix)]
mod with_fake_tools {
    use super::*;
    use crate::testutil::{VERSION_ONLY, WRITES_LAST_ARG, fake_tool, tool_arg};

    struct Inputs {
        video: PathBuf,
        full: PathBuf,
        sections: Vec<SectionAudio>,
    }

    fn inputs(dir: &Path) -> Inputs {
        let video = dir.join("clip.mp4");
        let full = dir.join("all.wav");
        std::fs::write(&video, b"video").unwrap();
        std::fs::write(&full, b"all").unwrap();
        let sections = SegmentKind::ALL
            .iter()
            .map(|&kind| {
                let path = dir.join(format!("clip-{kind}.wav"));
                std::fs::write(&path, kind.as_str()).unwrap();
                section(kind, &path)
            })
            .collect();
        Inputs {
            video,
            full,
            sections,
        }
    }

    fn logging_tool(dir: &Path, name: &str) -> (PathBuf, PathBuf) {
        let log = dir.join(format!("{name}.args"));
        let body = format!(
            "if [ \"$1\" = \"-version\" ]; then exit 0; fi\necho \"$@\" > '{}'\n{WRITES_LAST_ARG}",
            log.display()
        );
        (fake_tool(dir, name, &body), log)
    }

    fn integrate(integrator: &Integrator, inputs: &Inputs, out: &Path) -> MediaAsset {
        integrator
            .integrate_sections(
                &IntegrateRequest {
                    video: &inputs.video,
                    audio: &inputs.full,
                    out_path: out,
                },
                &align(&plan(), &inputs.sections),
            )
            .unwrap()
    }

    #[test]
    fn sections_are_mixed_at_their_offsets() {
        let tmp = tempfile::tempdir().unwrap();
        let input = inputs(tmp.path());
        let (mux, log) = logging_tool(tmp.path(), "ffmpeg");
        let cfg = IntegrateConfig {
            muxer: tool_arg(&mux),
            ..IntegrateConfig::default()
        };

        let out = tmp.path().join("final/clip-with-voice.mp4");
        let asset = integrate(&Integrator::from_config(&cfg), &input, &out);
        assert_eq!(asset, MediaAsset::new(MediaKind::Merged, &out));

        let args = std::fs::read_to_string(log).unwrap();
        assert!(args.contains("-filter_complex"), "{args}");
        assert!(args.contains("adelay=5000:all=1"));
        assert!(args.contains("adelay=25000:all=1"));
        assert!(args.contains("amix=inputs=3"));
        assert!(args.contains("-map [aout]"));
        assert!(!args.contains("all.wav"));
    }

    #[test]
    fn failing_section_mux_falls_back_to_whole_narration() {
        let tmp = tempfile::tempdir().unwrap();
        let input = inputs(tmp.path());
        let broken = fake_tool(tmp.path(), "broken", VERSION_ONLY);
        let (mux, log) = logging_tool(tmp.path(), "ffmpeg");
        let tiers: Vec<Box<dyn CapabilityTier>> = vec![Box::new(ExternalMux::new(tool_arg(&mux)))];
        let integrator =
            Integrator::with_tiers(tiers).with_section_mux(SectionMux::new(tool_arg(&broken)));

        let out = tmp.path().join("out.mp4");
        let asset = integrate(&integrator, &input, &out);
        assert_eq!(asset.kind, MediaKind::Merged);

        let args = std::fs::read_to_string(log).unwrap();
        assert!(args.contains("all.wav"), "{args}");
        assert!(!args.contains("-filter_complex"));
    }

    #[test]
    fn no_muxer_ends_in_a_bundle_of_the_whole_narration() {
        let tmp = tempfile::tempdir().unwrap();
        let input = inputs(tmp.path());
        let cfg = IntegrateConfig {
            muxer: "shortsmith-no-such-muxer-s1".into(),
            reencoder: "shortsmith-no-such-reencoder-s1".into(),
            prober: "shortsmith-no-such-prober-s1".into(),
        };

        let asset = integrate(
            &Integrator::from_config(&cfg),
            &input,
            &tmp.path().join("final/x.mp4"),
        );
        assert_eq!(asset.kind, MediaKind::Bundle);
        assert_eq!(std::fs::read(asset.path.join("audio.wav")).unwrap(), b"all");
    }
}
