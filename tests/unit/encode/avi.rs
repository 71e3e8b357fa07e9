use super::*;

use std::io::Cursor;

fn u32_at(b: &[u8], off: usize) -> u32 {
    u32::from_le_bytes(b[off..off + 4].try_into().unwrap())
}

fn write(codec: FrameCodec, payloads: &[&[u8]]) -> Vec<u8> {
    let mut w = AviWriter::new(Cursor::new(Vec::new()), codec, 4, 2, 25).unwrap();
    for p in payloads {
        w.write_frame(p).unwrap();
    }
    w.finish().unwrap().into_inner()
}

#[test]
fn header_structure_is_well_formed() {
    let bytes = write(FrameCodec::Mjpeg, &[&b"abc"[..], &b"defg"[..]]);

    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(u32_at(&bytes, 4) as usize, bytes.len() - 8);
    assert_eq!(&bytes[8..12], b"AVI ");
    assert_eq!(&bytes[12..16], b"LIST");
    assert_eq!(u32_at(&bytes, 16), 192);
    assert_eq!(&bytes[20..28], b"hdrlavih");
    assert_eq!(u32_at(&bytes, 32), 40_000);
    assert_eq!(u32_at(&bytes, 44), 0x10);
    assert_eq!(u32_at(&bytes, 48), 2);
    assert_eq!((u32_at(&bytes, 64), u32_at(&bytes, 68)), (4, 2));
    assert_eq!(&bytes[88..92], b"LIST");
    assert_eq!(u32_at(&bytes, 92), 116);
    assert_eq!(&bytes[96..104], b"strlstrh");
    assert_eq!(&bytes[108..116], b"vidsMJPG");
    assert_eq!(&bytes[164..168], b"strf");
    assert_eq!(&bytes[212..216], b"LIST");
    assert_eq!(&bytes[MOVI_FOURCC_OFFSET as usize..HEADER_LEN as usize], b"movi");
}

#[test]
fn chunks_are_padded_and_indexed_relative_to_movi() {
    let bytes = write(FrameCodec::Mjpeg, &[&b"abc"[..], &b"defg"[..]]);
    let h = HEADER_LEN as usize;

    assert_eq!(&bytes[h..h + 4], b"00dc");
    assert_eq!(u32_at(&bytes, h + 4), 3);
    assert_eq!(&bytes[h + 8..h + 11], b"abc");
    assert_eq!(bytes[h + 11], 0);
    assert_eq!(&bytes[h + 12..h + 16], b"00dc");
    assert_eq!(u32_at(&bytes, h + 16), 4);

    // movi list: fourcc + two chunks (8+4, 8+4)
    assert_eq!(u32_at(&bytes, 216), 4 + 12 + 12);

    let idx = h + 24;
    assert_eq!(&bytes[idx..idx + 4], b"idx1");
    assert_eq!(u32_at(&bytes, idx + 4), 32);
    assert_eq!(&bytes[idx + 8..idx + 12], b"00dc");
    assert_eq!(u32_at(&bytes, idx + 12), 0x10);
    assert_eq!(u32_at(&bytes, idx + 16), 4);
    assert_eq!(u32_at(&bytes, idx + 20), 3);
    assert_eq!(u32_at(&bytes, idx + 32), 16);
    assert_eq!(bytes.len(), idx + 8 + 32);

    let first = MOVI_FOURCC_OFFSET as usize + u32_at(&bytes, idx + 16) as usize;
    assert_eq!(&bytes[first..first + 4], b"00dc");
}

#[test]
fn dib_streams_use_uncompressed_ids() {
    let frame = vec![0u8; dib_frame_len(4, 2)];
    let bytes = write(FrameCodec::Dib, &[frame.as_slice()]);
    assert_eq!(&bytes[112..116], b"DIB ");
    assert_eq!(u32_at(&bytes, 172 + 16), 0);
    assert_eq!(u32_at(&bytes, 172 + 20) as usize, frame.len());
    assert_eq!(&bytes[224..228], b"00db");
}

#[test]
fn rgba_to_dib_flips_rows_and_swaps_channels() {
    // 2x2: top row red, green; bottom row blue, white.
    let rgba = [
        255, 0, 0, 255, 0, 255, 0, 255, //
        0, 0, 255, 255, 255, 255, 255, 255,
    ];
    let mut out = Vec::new();
    rgba_to_dib(&rgba, 2, 2, &mut out);
    assert_eq!(dib_stride(2), 8);
    assert_eq!(
        out,
        vec![
            255, 0, 0, 255, 255, 255, 0, 0, //
            0, 0, 255, 0, 255, 0, 0, 0,
        ]
    );
}

#[test]
fn zero_dimensions_are_rejected() {
    assert!(AviWriter::new(Cursor::new(Vec::new()), FrameCodec::Dib, 0, 2, 25).is_err());
    assert!(AviWriter::new(Cursor::new(Vec::new()), FrameCodec::Dib, 2, 2, 0).is_err());
}

#[test]
fn projected_length_tracks_layout() {
    let bytes = write(FrameCodec::Mjpeg, &[&b"abcd"[..], &b"efgh"[..]]);
    assert_eq!(projected_file_len(2, 4), bytes.len() as u64);
    assert!(projected_file_len(600, 1080 * 1920 * 3) < MAX_RIFF_BYTES);
    assert!(projected_file_len(700, 1080 * 1920 * 3) > MAX_RIFF_BYTES);
}

#[test]
fn codec_names_deserialize_lowercase() {
    #[derive(serde::Deserialize)]
    struct W {
        c: FrameCodec,
    }
    let w: W = toml::from_str("c = \"dib\"").unwrap();
    assert_eq!(w.c, FrameCodec::Dib);
    assert_eq!(FrameCodec::default(), FrameCodec::Mjpeg);
}
