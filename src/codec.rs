//! Traits describing the external codec collaborator.
//!
//! The bitstream-level encode and decode of frame pixels is owned by an
//! opaque codec library. These traits capture the exact surface this crate
//! consumes from it: a forward-only animation decode session, an append-only
//! animation encode session, and single-shot whole-buffer entry points used
//! by the fallback paths when the animation API is unavailable.
//!
//! A session handle is exclusively owned by its [`FrameCursor`] or by one
//! assembly call for that object's lifetime; nothing shares a handle across
//! two cursors or two assembly sessions. Dropping the owner releases it.
//!
//! [`FrameCursor`]: crate::FrameCursor

use alloc::vec::Vec;
use core::num::NonZeroU16;

use crate::error::FrameError;
use crate::metadata::{AssemblyMetadata, ChunkKind};
use crate::pixel::PixelLayout;

/// How many times an animation repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    /// The animation loops forever (stored as 0 in the container).
    Forever,
    /// The animation plays the given number of times.
    Times(NonZeroU16),
}

impl LoopCount {
    /// The value stored in the container. 0 means forever.
    pub fn to_wire(self) -> u16 {
        match self {
            LoopCount::Forever => 0,
            LoopCount::Times(n) => n.get(),
        }
    }

    /// Parse the container representation. 0 means forever.
    pub fn from_wire(raw: u16) -> Self {
        match NonZeroU16::new(raw) {
            Some(n) => LoopCount::Times(n),
            None => LoopCount::Forever,
        }
    }
}

impl core::fmt::Display for LoopCount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoopCount::Forever => write!(f, "forever"),
            LoopCount::Times(n) => write!(f, "{n} time(s)"),
        }
    }
}

/// Container-level facts a decode session reports once, at open.
#[derive(Debug, Clone, Copy)]
pub struct DecoderInfo {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// How many times the animation repeats.
    pub loop_count: LoopCount,
    /// Packed background color: `alpha << 24 | red << 16 | green << 8 | blue`.
    pub background: u32,
    /// Total number of frames in the container.
    pub frame_count: u32,
    /// Byte layout of decoded frame pixels.
    pub layout: PixelLayout,
}

/// One decoded frame handed back by [`AnimDecodeSession::advance`].
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Pixel bytes in the session's reported layout.
    pub pixels: Vec<u8>,
    /// Cumulative presentation time at which this frame *ends*, in
    /// milliseconds. Frame start times and durations are derived from
    /// consecutive end times by the cursor layer.
    pub end_timestamp_ms: u32,
}

/// Forward-only animation decode session.
///
/// The session can only rewind to frame zero or advance by one frame. The
/// [`FrameCursor`](crate::FrameCursor) layer owns the only logic that turns
/// that into addressable access; no higher layer should call `reset` or
/// `advance` directly.
pub trait AnimDecodeSession {
    /// Container-level info, fixed for the session's lifetime.
    fn info(&self) -> DecoderInfo;

    /// Fetch a named metadata chunk, or `None` when the container lacks it.
    fn chunk(&mut self, kind: ChunkKind) -> Option<Vec<u8>>;

    /// Rewind to the position before the first frame.
    fn reset(&mut self);

    /// Decode the next frame.
    ///
    /// `None` means the sequence is exhausted or decoding failed; the
    /// session itself makes no distinction.
    fn advance(&mut self) -> Option<DecodedFrame>;
}

/// Parameters for constructing an animation encode session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncoderSetup {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Packed background color: `alpha << 24 | red << 16 | green << 8 | blue`.
    pub background: u32,
    /// How many times the animation repeats.
    pub loop_count: LoopCount,
    /// Spend extra effort minimizing output size.
    pub minimize_size: bool,
    /// Minimum keyframe interval.
    pub kmin: u32,
    /// Maximum keyframe interval.
    pub kmax: u32,
    /// Allow mixing lossy and lossless frames.
    pub allow_mixed: bool,
}

/// One frame handed to [`AnimEncodeSession::append`] or to the still-image
/// encode entry point.
#[derive(Debug, Clone, Copy)]
pub struct FramePayload<'a> {
    /// Interleaved pixel bytes in `layout`.
    pub pixels: &'a [u8],
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Byte layout of `pixels`.
    pub layout: PixelLayout,
    /// Encode this frame losslessly.
    pub lossless: bool,
    /// Quality factor, 0-100.
    pub quality: f32,
    /// Quality/speed effort, 0 (fast) to 6 (slow).
    pub method: u8,
}

/// Append-only animation encode session.
pub trait AnimEncodeSession {
    /// Append one frame at the given presentation timestamp.
    ///
    /// A `None` payload is the terminating sentinel: it tells the encoder
    /// there are no more frames, which is the only way the last real
    /// frame's duration gets committed. Every finished animation must end
    /// with exactly one sentinel append.
    fn append(
        &mut self,
        frame: Option<FramePayload<'_>>,
        timestamp_ms: u32,
    ) -> Result<(), FrameError>;

    /// Assemble the final container bytes, embedding the given metadata.
    ///
    /// `None` means the encoder could not produce output.
    fn assemble(&mut self, metadata: &AssemblyMetadata<'_>) -> Option<Vec<u8>>;
}

/// A flat single-frame decode from the fallback path.
///
/// Carries no timing metadata; the whole file is treated as one frame.
#[derive(Debug, Clone)]
pub struct StillImage {
    /// Interleaved pixel bytes in `layout`.
    pub pixels: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Byte layout of `pixels`.
    pub layout: PixelLayout,
}

/// Factory surface of the external codec.
pub trait WebpCodec {
    /// Animation decode session type.
    type Decoder: AnimDecodeSession;
    /// Animation encode session type.
    type Encoder: AnimEncodeSession;

    /// Whether the animation-capable API is available.
    ///
    /// When `false`, the cursor layer is bypassed entirely: containers are
    /// decoded as exactly one static frame and encoding goes through the
    /// single-shot still path.
    fn supports_animation(&self) -> bool {
        true
    }

    /// Open an animation decode session over raw container bytes.
    fn open_decoder(&self, data: &[u8]) -> Result<Self::Decoder, FrameError>;

    /// Construct an animation encode session.
    fn open_encoder(&self, setup: &EncoderSetup) -> Result<Self::Encoder, FrameError>;

    /// Single-shot whole-buffer decode for the fallback path.
    ///
    /// `None` means the data could not be decoded.
    fn decode_still(&self, data: &[u8]) -> Option<StillImage>;

    /// Single-shot whole-buffer encode for the fallback path.
    ///
    /// `None` means the encoder could not produce output.
    fn encode_still(
        &self,
        frame: FramePayload<'_>,
        metadata: &AssemblyMetadata<'_>,
    ) -> Option<Vec<u8>>;
}
