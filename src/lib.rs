//! Frame-level access to animated WebP containers.
//!
//! The pixel codec itself lives elsewhere: this crate consumes it as an
//! opaque collaborator through the traits in [`codec`], and layers two
//! things on top of it:
//!
//! - **Random-access reads** ([`FrameCursor`]): the underlying animation
//!   decode session can only rewind to frame zero or advance by one frame.
//!   The cursor reconciles an arbitrary requested frame index against that,
//!   replaying from the start on backward seeks and caching exactly one
//!   decoded frame at a time.
//! - **Incremental writes** ([`assemble_animation`]): a primary source image
//!   plus any number of additional sources (each possibly animated itself)
//!   are walked frame by frame, normalized to an encodable pixel layout, and
//!   fed to one encode session with a running global timestamp, ending with
//!   the null-payload flush the encoder needs to commit the final frame's
//!   duration.
//!
//! # Example
//!
//! Wiring a decode session and reading frames out of order:
//!
//! ```rust
//! use zenwebp_frames::{
//!     AnimDecodeSession, ChunkKind, DecodedFrame, DecoderInfo, FrameCursor, LoopCount,
//!     PixelLayout,
//! };
//!
//! // A scripted stand-in for a real decode session: three 1-pixel frames
//! // ending at 10ms, 25ms, and 40ms.
//! struct Scripted {
//!     pos: usize,
//! }
//!
//! impl AnimDecodeSession for Scripted {
//!     fn info(&self) -> DecoderInfo {
//!         DecoderInfo {
//!             width: 1,
//!             height: 1,
//!             loop_count: LoopCount::Forever,
//!             background: 0,
//!             frame_count: 3,
//!             layout: PixelLayout::Rgba8,
//!         }
//!     }
//!     fn chunk(&mut self, _kind: ChunkKind) -> Option<Vec<u8>> {
//!         None
//!     }
//!     fn reset(&mut self) {
//!         self.pos = 0;
//!     }
//!     fn advance(&mut self) -> Option<DecodedFrame> {
//!         let end_timestamp_ms = *[10u32, 25, 40].get(self.pos)?;
//!         self.pos += 1;
//!         Some(DecodedFrame { pixels: vec![0; 4], end_timestamp_ms })
//!     }
//! }
//!
//! let mut cursor = FrameCursor::open(Scripted { pos: 0 })?;
//! cursor.seek(2)?;
//! assert_eq!(cursor.load()?.start_ms, 25);
//! cursor.seek(0)?; // backward: rewinds and replays
//! assert_eq!(cursor.load()?.duration_ms, 10);
//! # Ok::<(), zenwebp_frames::FrameError>(())
//! ```
//!
//! # no_std Support
//!
//! The whole crate works in `no_std` environments (requires `alloc`):
//! ```toml
//! [dependencies]
//! zenwebp-frames = { version = "...", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

extern crate alloc;

pub mod assemble;
pub mod codec;
pub mod cursor;
pub mod metadata;
pub mod options;
pub mod probe;
pub mod source;
pub mod still;

mod container;
mod error;
mod pixel;

pub use assemble::assemble_animation;
pub use codec::{
    AnimDecodeSession, AnimEncodeSession, DecodedFrame, DecoderInfo, EncoderSetup, FramePayload,
    LoopCount, StillImage, WebpCodec,
};
pub use container::{WebpImage, open};
pub use cursor::{ContainerInfo, FrameCursor, FrameRef};
pub use error::FrameError;
pub use metadata::{AssemblyMetadata, ChunkKind, MetadataTable};
pub use options::{AnimOptions, Background, FrameDuration, StillOptions};
pub use pixel::PixelLayout;
pub use source::{FrameSource, SourceFrame, StillSource};
pub use still::{decode_still, encode_still};
