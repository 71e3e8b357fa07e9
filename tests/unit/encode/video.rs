use super::*;

const MISSING_TOOL: &str = "shortsmith-no-such-compressor-91c2";

fn settings(codec: FrameCodec, compressor: &str) -> EncodeSettings {
    EncodeSettings {
        width: 16,
        height: 8,
        fps: 10,
        codec,
        jpeg_quality: 80,
        compressor: compressor.to_string(),
    }
}

fn solid(rgb: [u8; 3]) -> Arc<Frame> {
    let data = [rgb[0], rgb[1], rgb[2], 255].repeat(16 * 8);
    Arc::new(Frame::from_rgba8(16, 8, data).unwrap())
}

fn sequences() -> Vec<FrameSequence> {
    let a = solid([25, 25, 112]);
    let b = solid([200, 10, 10]);
    vec![vec![a.clone(); 5], Vec::new(), vec![b; 3]]
}

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(b[off..off + 4].try_into().unwrap())
}

#[test]
fn zero_frames_is_empty_input() {
    let tmp = tempfile::tempdir().unwrap();
    let enc = VideoEncoder::new(settings(FrameCodec::Mjpeg, MISSING_TOOL)).unwrap();
    let err = enc
        .encode(&[Vec::new(), Vec::new()], &tmp.path().join("v.mp4"))
        .unwrap_err();
    assert!(err.is_empty_input());
    assert!(!tmp.path().join("v.raw.avi").exists());
}

#[test]
fn missing_compressor_returns_readable_raw_avi() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("videos/clip.mp4");
    let enc = VideoEncoder::new(settings(FrameCodec::Mjpeg, MISSING_TOOL)).unwrap();

    let asset = enc.encode(&sequences(), &out).unwrap();
    assert_eq!(asset.kind, crate::media::MediaKind::Video);
    assert_eq!(asset.path, tmp.path().join("videos/clip.raw.avi"));
    assert!(!out.exists());

    let bytes = std::fs::read(&asset.path).unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"AVI ");
    assert_eq!(u32_at(&bytes, 48), 8);
    assert_eq!(&bytes[224..228], b"00dc");
    // JPEG SOI marker.
    assert_eq!(&bytes[232..234], &[0xFF, 0xD8]);
}

#[test]
fn identical_frames_share_one_jpeg_payload() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = tmp.path().join("r.avi");
    let enc = VideoEncoder::new(settings(FrameCodec::Mjpeg, MISSING_TOOL)).unwrap();
    enc.write_raw(&sequences(), &raw).unwrap();

    let bytes = std::fs::read(&raw).unwrap();
    let movi_len = u32_at(&bytes, 216) as usize;
    let idx = 220 + movi_len;
    assert_eq!(&bytes[idx..idx + 4], b"idx1");
    let sizes: Vec<u32> = (0..8).map(|i| u32_at(&bytes, idx + 8 + i * 16 + 12)).collect();
    assert!(sizes[..5].iter().all(|&s| s == sizes[0]));
    assert!(sizes[5..].iter().all(|&s| s == sizes[5]));
}

#[test]
fn dib_codec_writes_bgr_rows() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = tmp.path().join("r.avi");
    let enc = VideoEncoder::new(settings(FrameCodec::Dib, MISSING_TOOL)).unwrap();
    enc.write_raw(&[vec![solid([1, 2, 3])]], &raw).unwrap();

    let bytes = std::fs::read(&raw).unwrap();
    assert_eq!(&bytes[224..228], b"00db");
    assert_eq!(u32_at(&bytes, 228), 16 * 3 * 8);
    assert_eq!(&bytes[232..235], &[3, 2, 1]);
}

#[test]
fn mismatched_frames_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let enc = VideoEncoder::new(EncodeSettings {
        width: 32,
        ..settings(FrameCodec::Mjpeg, MISSING_TOOL)
    })
    .unwrap();
    let err = enc.encode(&sequences(), &tmp.path().join("v.mp4")).unwrap_err();
    assert!(matches!(err, ShortsError::Validation(_)));
}

#[test]
fn settings_validation_matches_yuv420p_needs() {
    assert!(settings(FrameCodec::Mjpeg, "x").validate().is_ok());
    let odd = EncodeSettings {
        width: 15,
        ..settings(FrameCodec::Mjpeg, "x")
    };
    assert!(odd.validate().is_err());
    let no_fps = EncodeSettings {
        fps: 0,
        ..settings(FrameCodec::Mjpeg, "x")
    };
    assert!(VideoEncoder::new(no_fps).is_err());
}

#[test]
fn raw_path_sits_beside_output() {
    assert_eq!(
        raw_path_for(Path::new("/o/videos/a-b.mp4")),
        PathBuf::from("/o/videos/a-b.raw.avi")
    );
}

#[cfg(unix)]
#[test]
fn successful_compression_removes_raw_file() {
    use crate::testutil::{WRITES_LAST_ARG, fake_tool, tool_arg};

    let tmp = tempfile::tempdir().unwrap();
    let ff = fake_tool(tmp.path(), "ffmpeg", WRITES_LAST_ARG);
    let out = tmp.path().join("v.mp4");
    let enc = VideoEncoder::new(settings(FrameCodec::Mjpeg, &tool_arg(&ff))).unwrap();

    let asset = enc.encode(&sequences(), &out).unwrap();
    assert_eq!(asset.path, out);
    assert!(out.is_file());
    assert!(!tmp.path().join("v.raw.avi").exists());
}

#[cfg(unix)]
#[test]
fn failing_compression_falls_back_to_raw() {
    use crate::testutil::{VERSION_ONLY, fake_tool, tool_arg};

    let tmp = tempfile::tempdir().unwrap();
    let ff = fake_tool(tmp.path(), "ffmpeg", VERSION_ONLY);
    let out = tmp.path().join("v.mp4");
    let enc = VideoEncoder::new(settings(FrameCodec::Mjpeg, &tool_arg(&ff))).unwrap();

    let asset = enc.encode(&sequences(), &out).unwrap();
    assert_eq!(asset.path, tmp.path().join("v.raw.avi"));
    assert!(asset.path.is_file());
    assert!(!out.exists());
}
