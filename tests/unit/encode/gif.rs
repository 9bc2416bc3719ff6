use std::io::Cursor;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use super::*;

fn solid(px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(8, 8, image::Rgba(px))
}

fn netscape_loop_count(bytes: &[u8]) -> Option<u16> {
    let tag = b"NETSCAPE2.0";
    let at = bytes.windows(tag.len()).position(|w| w == tag)?;
    let ext = &bytes[at + tag.len()..];
    // sub-block: len=3, id=1, little-endian count
    (ext[0] == 3 && ext[1] == 1).then(|| u16::from_le_bytes([ext[2], ext[3]]))
}

#[test]
fn empty_animation_is_rejected() {
    assert!(matches!(
        Animation::assemble(vec![], 500, 0),
        Err(RadarError::EmptyFrameSet(_))
    ));
}

#[test]
fn encoded_gif_preserves_count_order_and_delay() {
    let frames = vec![
        solid([255, 0, 0, 255]),
        solid([0, 255, 0, 255]),
        solid([0, 0, 255, 255]),
    ];
    let anim = Animation::assemble(frames, 500, 0).unwrap();
    assert_eq!(anim.len(), 3);

    let bytes = anim.encode_gif().unwrap();
    let decoded = GifDecoder::new(Cursor::new(&bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    assert_eq!(decoded.len(), 3);

    let dominant: Vec<usize> = decoded
        .iter()
        .map(|f| {
            let px = f.buffer().get_pixel(4, 4).0;
            (0..3).max_by_key(|&i| px[i]).unwrap()
        })
        .collect();
    assert_eq!(dominant, vec![0, 1, 2]);

    for frame in &decoded {
        let (num, den) = frame.delay().numer_denom_ms();
        assert_eq!(num / den, 500);
    }
}

#[test]
fn loop_zero_is_infinite() {
    let anim = Animation::assemble(vec![solid([1, 2, 3, 255])], 100, 0).unwrap();
    assert!(matches!(anim.repeat(), Repeat::Infinite));
    assert_eq!(netscape_loop_count(&anim.encode_gif().unwrap()), Some(0));
}

#[test]
fn finite_loop_count_is_written() {
    let anim = Animation::assemble(vec![solid([1, 2, 3, 255]); 2], 100, 3).unwrap();
    assert!(matches!(anim.repeat(), Repeat::Finite(3)));
    assert_eq!(netscape_loop_count(&anim.encode_gif().unwrap()), Some(3));
}
