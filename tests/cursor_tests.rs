//! Tests for the frame cursor over a scripted forward-only decode session.

use std::cell::RefCell;
use std::rc::Rc;

use zenwebp_frames::{
    AnimDecodeSession, ChunkKind, DecodedFrame, DecoderInfo, FrameCursor, FrameError, LoopCount,
    PixelLayout,
};

/// Counters shared between a test and the session it hands to the cursor.
#[derive(Debug, Default)]
struct Stats {
    advances: u32,
    resets: u32,
}

/// A decode session that replays a fixed list of end timestamps.
///
/// Frame k's pixels are a 4x4 RGBA canvas filled with the byte `k`, so
/// tests can tell frames apart. `fail_at` makes the advance onto that
/// physical frame return `None`, as a desynchronized decoder would.
struct ScriptedDecoder {
    end_times: Vec<u32>,
    pos: usize,
    fail_at: Option<usize>,
    icc: Option<Vec<u8>>,
    exif: Option<Vec<u8>>,
    xmp: Option<Vec<u8>>,
    background: u32,
    stats: Rc<RefCell<Stats>>,
}

impl ScriptedDecoder {
    fn new(end_times: &[u32]) -> (Self, Rc<RefCell<Stats>>) {
        let stats = Rc::new(RefCell::new(Stats::default()));
        (
            Self {
                end_times: end_times.to_vec(),
                pos: 0,
                fail_at: None,
                icc: None,
                exif: None,
                xmp: None,
                background: 0,
                stats: Rc::clone(&stats),
            },
            stats,
        )
    }
}

impl AnimDecodeSession for ScriptedDecoder {
    fn info(&self) -> DecoderInfo {
        DecoderInfo {
            width: 4,
            height: 4,
            loop_count: LoopCount::Forever,
            background: self.background,
            frame_count: self.end_times.len() as u32,
            layout: PixelLayout::Rgba8,
        }
    }

    fn chunk(&mut self, kind: ChunkKind) -> Option<Vec<u8>> {
        match kind {
            ChunkKind::IccProfile => self.icc.clone(),
            ChunkKind::Exif => self.exif.clone(),
            ChunkKind::Xmp => self.xmp.clone(),
        }
    }

    fn reset(&mut self) {
        self.stats.borrow_mut().resets += 1;
        self.pos = 0;
    }

    fn advance(&mut self) -> Option<DecodedFrame> {
        self.stats.borrow_mut().advances += 1;
        if self.fail_at == Some(self.pos) {
            return None;
        }
        let end_timestamp_ms = *self.end_times.get(self.pos)?;
        let pixels = vec![self.pos as u8; 4 * 4 * 4];
        self.pos += 1;
        Some(DecodedFrame {
            pixels,
            end_timestamp_ms,
        })
    }
}

#[test]
fn seek_then_tell_reports_the_requested_frame() {
    let (decoder, _) = ScriptedDecoder::new(&[10, 20, 30]);
    let mut cursor = FrameCursor::open(decoder).unwrap();

    for n in 0..3 {
        cursor.seek(n).unwrap();
        assert_eq!(cursor.tell(), n);
    }
}

#[test]
fn seek_past_end_fails_and_leaves_position_untouched() {
    let (decoder, stats) = ScriptedDecoder::new(&[10, 20, 30]);
    let mut cursor = FrameCursor::open(decoder).unwrap();

    cursor.seek(1).unwrap();
    let err = cursor.seek(3).unwrap_err();
    assert!(matches!(
        err,
        FrameError::EndOfSequence { index: 3, total: 3 }
    ));
    assert_eq!(cursor.tell(), 1);
    // Pure index check: the decode session was never touched.
    assert_eq!(stats.borrow().advances, 0);
    assert_eq!(stats.borrow().resets, 0);
}

#[test]
fn end_times_convert_to_start_and_duration() {
    let (decoder, _) = ScriptedDecoder::new(&[10, 25, 40]);
    let mut cursor = FrameCursor::open(decoder).unwrap();

    let expected = [(0, 10), (10, 15), (25, 15)];
    for (n, (start, duration)) in expected.iter().enumerate() {
        cursor.seek(n as u32).unwrap();
        let frame = cursor.load().unwrap();
        assert_eq!(frame.start_ms, *start, "frame {n} start");
        assert_eq!(frame.duration_ms, *duration, "frame {n} duration");
    }
}

#[test]
fn reloading_the_same_frame_is_a_no_op() {
    let (decoder, stats) = ScriptedDecoder::new(&[10, 25, 40]);
    let mut cursor = FrameCursor::open(decoder).unwrap();

    cursor.seek(1).unwrap();
    let (pixels, start, duration) = {
        let frame = cursor.load().unwrap();
        (frame.pixels.to_vec(), frame.start_ms, frame.duration_ms)
    };
    let after_first = stats.borrow().advances;

    // Repeat seek + load: cached frame, no decoder work.
    cursor.seek(1).unwrap();
    let frame = cursor.load().unwrap();
    assert_eq!(frame.pixels, &pixels[..]);
    assert_eq!(frame.start_ms, start);
    assert_eq!(frame.duration_ms, duration);
    assert_eq!(stats.borrow().advances, after_first);
    assert_eq!(stats.borrow().resets, 0);
}

#[test]
fn forward_walk_costs_one_advance_per_frame() {
    let (decoder, stats) = ScriptedDecoder::new(&[10, 25, 40]);
    let mut cursor = FrameCursor::open(decoder).unwrap();

    for n in 0..3 {
        cursor.seek(n).unwrap();
        cursor.load().unwrap();
    }
    assert_eq!(stats.borrow().advances, 3);
    assert_eq!(stats.borrow().resets, 0);
}

#[test]
fn backward_seek_rewinds_once_and_replays_to_target() {
    let (decoder, stats) = ScriptedDecoder::new(&[10, 25, 40]);
    let mut cursor = FrameCursor::open(decoder).unwrap();

    cursor.seek(2).unwrap();
    cursor.load().unwrap();
    assert_eq!(stats.borrow().advances, 3);

    cursor.seek(0).unwrap();
    let frame = cursor.load().unwrap();
    assert_eq!(frame.pixels[0], 0);
    assert_eq!(frame.start_ms, 0);
    assert_eq!(frame.duration_ms, 10);

    // One rewind plus a single replayed advance, not a fresh walk to 2.
    assert_eq!(stats.borrow().resets, 1);
    assert_eq!(stats.borrow().advances, 4);
}

#[test]
fn timing_survives_a_rewind_and_replay() {
    let (decoder, _) = ScriptedDecoder::new(&[10, 25, 40]);
    let mut cursor = FrameCursor::open(decoder).unwrap();

    cursor.seek(2).unwrap();
    cursor.load().unwrap();

    // Replaying forward must rebuild the cumulative clock from zero.
    cursor.seek(1).unwrap();
    let frame = cursor.load().unwrap();
    assert_eq!(frame.start_ms, 10);
    assert_eq!(frame.duration_ms, 15);
}

#[test]
fn failed_advance_parks_the_cursor_at_frame_zero() {
    let (mut decoder, stats) = ScriptedDecoder::new(&[10, 25, 40]);
    decoder.fail_at = Some(1);
    let mut cursor = FrameCursor::open(decoder).unwrap();

    cursor.seek(2).unwrap();
    let err = cursor.load().unwrap_err();
    assert!(matches!(err, FrameError::EndOfSequence { .. }));
    assert_eq!(stats.borrow().resets, 1);

    // Recoverable, not wedged: the cursor sits at frame 0 and frame 0
    // still loads.
    assert_eq!(cursor.tell(), 0);
    let frame = cursor.load().unwrap();
    assert_eq!(frame.start_ms, 0);
    assert_eq!(frame.duration_ms, 10);
}

#[test]
fn background_is_decomposed_into_rgba_channels() {
    let (mut decoder, _) = ScriptedDecoder::new(&[10]);
    decoder.background = 0x1122_3344; // a=0x11 r=0x22 g=0x33 b=0x44
    let cursor = FrameCursor::open(decoder).unwrap();

    assert_eq!(cursor.info().background, [0x22, 0x33, 0x44, 0x11]);
    assert_eq!(cursor.background(), [0x22, 0x33, 0x44, 0x11]);
    assert_eq!(cursor.loop_count(), LoopCount::Forever);
}

#[test]
fn metadata_chunks_are_optional() {
    let (mut decoder, _) = ScriptedDecoder::new(&[10]);
    decoder.icc = Some(vec![1, 2, 3]);
    decoder.xmp = Some(vec![9]);
    let cursor = FrameCursor::open(decoder).unwrap();

    assert_eq!(cursor.icc_profile(), Some(&[1, 2, 3][..]));
    assert_eq!(cursor.exif(), None);
    assert_eq!(cursor.xmp(), Some(&[9][..]));
}

#[test]
fn single_frame_container_is_not_animated() {
    let (decoder, _) = ScriptedDecoder::new(&[100]);
    let cursor = FrameCursor::open(decoder).unwrap();
    assert!(!cursor.is_animated());
    assert_eq!(cursor.frame_count(), 1);

    let (decoder, _) = ScriptedDecoder::new(&[50, 100]);
    let cursor = FrameCursor::open(decoder).unwrap();
    assert!(cursor.is_animated());
}

#[test]
fn zero_frame_container_is_rejected_at_open() {
    let (decoder, _) = ScriptedDecoder::new(&[]);
    assert!(matches!(
        FrameCursor::open(decoder),
        Err(FrameError::InvalidFormat(_))
    ));
}
