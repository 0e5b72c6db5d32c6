//! Random-access frame cursor over a forward-only decode session.
//!
//! The decode session exposes two primitives: rewind to frame zero and
//! advance by one frame. This module owns the mapping between the *logical*
//! frame (the index the caller last requested) and the *physical* frame (the
//! index the session has actually reached). Forward seeks advance and
//! discard; backward seeks force a full rewind and replay, re-decoding from
//! scratch rather than caching every frame. Exactly one decoded frame is
//! materialized at a time: loading frame N discards frame N-1's pixels.
//!
//! Costs follow from the replay strategy: a forward seek is O(distance), a
//! backward seek is O(target).

use alloc::vec::Vec;
use log::{debug, trace};

use crate::codec::{AnimDecodeSession, LoopCount};
use crate::error::FrameError;
use crate::metadata::MetadataTable;
use crate::options::Background;
use crate::pixel::PixelLayout;
use crate::source::{FrameSource, SourceFrame};

/// Container-level facts, fixed once the cursor is opened.
#[derive(Debug, Clone, Copy)]
pub struct ContainerInfo {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Total number of frames.
    pub frame_count: u32,
    /// How many times the animation repeats.
    pub loop_count: LoopCount,
    /// Background color channel bytes in RGBA order, decomposed from the
    /// container's packed value.
    pub background: [u8; 4],
    /// Byte layout of decoded frame pixels.
    pub layout: PixelLayout,
}

/// Borrowed view of the currently loaded frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameRef<'a> {
    /// Decoded pixel bytes in the container's layout.
    pub pixels: &'a [u8],
    /// Presentation start time in milliseconds.
    pub start_ms: u32,
    /// Display duration in milliseconds.
    pub duration_ms: u32,
}

/// Random-access cursor over the frames of one opened container.
///
/// Owns its decode session exclusively for its lifetime; dropping the
/// cursor releases the session. Not designed for concurrent mutation —
/// callers serialize access to one open container.
pub struct FrameCursor<D: AnimDecodeSession> {
    decoder: D,
    info: ContainerInfo,
    metadata: MetadataTable,
    /// Frame the caller last requested via `seek`.
    logical_frame: u32,
    /// Frame the decode session has actually advanced to.
    physical_frame: u32,
    /// Frame whose pixels are currently materialized.
    loaded: Option<u32>,
    /// Running end-of-frame clock reported by the session.
    cumulative_ms: u32,
    pixels: Vec<u8>,
    start_ms: u32,
    duration_ms: u32,
}

impl<D: AnimDecodeSession> FrameCursor<D> {
    /// Open a cursor over a freshly constructed decode session.
    ///
    /// Reads the container-level info once, pulls the optional metadata
    /// chunks, and leaves the cursor positioned at frame zero with nothing
    /// loaded yet.
    pub fn open(mut decoder: D) -> Result<Self, FrameError> {
        let raw = decoder.info();
        if raw.frame_count == 0 {
            return Err(FrameError::InvalidFormat(
                "container reports zero frames".into(),
            ));
        }
        let metadata = MetadataTable::extract(&mut decoder);
        let info = ContainerInfo {
            width: raw.width,
            height: raw.height,
            frame_count: raw.frame_count,
            loop_count: raw.loop_count,
            background: Background::unpack(raw.background),
            layout: raw.layout,
        };
        debug!(
            "opened {}x{} container: {} frame(s), looping {}",
            info.width, info.height, info.frame_count, info.loop_count
        );
        Ok(Self {
            decoder,
            info,
            metadata,
            logical_frame: 0,
            physical_frame: 0,
            loaded: None,
            cumulative_ms: 0,
            pixels: Vec::new(),
            start_ms: 0,
            duration_ms: 0,
        })
    }

    /// Request frame `n` as the next frame to load.
    ///
    /// This only updates the requested index; the decode session and the
    /// pixel cache are untouched until [`load`](Self::load) runs, so
    /// repeated seeks are cheap. Seeking at or past the frame count fails
    /// with [`FrameError::EndOfSequence`].
    pub fn seek(&mut self, frame: u32) -> Result<(), FrameError> {
        if frame >= self.info.frame_count {
            return Err(FrameError::EndOfSequence {
                index: frame,
                total: self.info.frame_count,
            });
        }
        self.logical_frame = frame;
        Ok(())
    }

    /// The frame index last requested via [`seek`](Self::seek), whether or
    /// not it has been loaded yet.
    pub fn tell(&self) -> u32 {
        self.logical_frame
    }

    /// Materialize the requested frame and return its pixels and timing.
    ///
    /// Idempotent: when the requested frame is already loaded, the cached
    /// view is returned without touching the decode session. Otherwise the
    /// physical position is reconciled first — a backward target forces a
    /// full rewind — and frames are then decoded one at a time up to and
    /// including the target.
    ///
    /// If an advance fails mid-sequence the cursor rewinds itself to frame
    /// zero and reports [`FrameError::EndOfSequence`]; it remains usable
    /// rather than wedged.
    pub fn load(&mut self) -> Result<FrameRef<'_>, FrameError> {
        if self.loaded != Some(self.logical_frame) {
            let target = self.logical_frame;
            self.reconcile(target)?;
            let (pixels, start_ms, duration_ms) = self.advance_one()?;
            self.pixels = pixels;
            self.start_ms = start_ms;
            self.duration_ms = duration_ms;
            self.loaded = Some(target);
        }
        Ok(FrameRef {
            pixels: &self.pixels,
            start_ms: self.start_ms,
            duration_ms: self.duration_ms,
        })
    }

    /// Container-level info.
    pub fn info(&self) -> &ContainerInfo {
        &self.info
    }

    /// Total number of frames.
    pub fn frame_count(&self) -> u32 {
        self.info.frame_count
    }

    /// True when the container holds more than one frame.
    pub fn is_animated(&self) -> bool {
        self.info.frame_count > 1
    }

    /// How many times the animation repeats.
    pub fn loop_count(&self) -> LoopCount {
        self.info.loop_count
    }

    /// Background color channel bytes in RGBA order.
    pub fn background(&self) -> [u8; 4] {
        self.info.background
    }

    /// The metadata side table extracted at open time.
    pub fn metadata(&self) -> &MetadataTable {
        &self.metadata
    }

    /// ICC color profile chunk, if the container carries one.
    pub fn icc_profile(&self) -> Option<&[u8]> {
        self.metadata.icc_profile.as_deref()
    }

    /// EXIF chunk, if present.
    pub fn exif(&self) -> Option<&[u8]> {
        self.metadata.exif.as_deref()
    }

    /// XMP chunk, if present.
    pub fn xmp(&self) -> Option<&[u8]> {
        self.metadata.xmp.as_deref()
    }

    /// Rewind the session and zero the physical position and clock.
    fn rewind(&mut self) {
        trace!("rewinding decode session to frame 0");
        self.decoder.reset();
        self.physical_frame = 0;
        self.loaded = None;
        self.cumulative_ms = 0;
    }

    /// Bring the physical position to `target`, so the next advance decodes
    /// exactly that frame.
    fn reconcile(&mut self, target: u32) -> Result<(), FrameError> {
        if self.physical_frame == target {
            return Ok(());
        }
        if target < self.physical_frame {
            self.rewind();
        }
        while self.physical_frame < target {
            self.advance_one()?;
        }
        Ok(())
    }

    /// Decode one frame, converting the session's cumulative end timestamp
    /// into a start time and duration.
    fn advance_one(&mut self) -> Result<(Vec<u8>, u32, u32), FrameError> {
        let next = self.decoder.advance();
        self.physical_frame += 1;

        let Some(frame) = next else {
            // Park the cursor at frame 0 instead of leaving it wedged
            // mid-sequence.
            debug!(
                "decode failed at physical frame {}, rewinding",
                self.physical_frame - 1
            );
            let failed = self.physical_frame - 1;
            self.rewind();
            self.logical_frame = 0;
            return Err(FrameError::EndOfSequence {
                index: failed,
                total: self.info.frame_count,
            });
        };

        // The session reports when each frame *ends*; callers want when it
        // starts and for how long it shows.
        let end = frame.end_timestamp_ms;
        let duration = end.saturating_sub(self.cumulative_ms);
        self.cumulative_ms = end;
        Ok((frame.pixels, end - duration, duration))
    }
}

impl<D: AnimDecodeSession> FrameSource for FrameCursor<D> {
    fn frame_count(&self) -> u32 {
        self.info.frame_count
    }

    fn seek(&mut self, frame: u32) -> Result<(), FrameError> {
        FrameCursor::seek(self, frame)
    }

    fn tell(&self) -> u32 {
        self.logical_frame
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.info.width, self.info.height)
    }

    fn load_frame(&mut self) -> Result<SourceFrame<'_>, FrameError> {
        let (width, height) = (self.info.width, self.info.height);
        let layout = self.info.layout;
        let frame = self.load()?;
        Ok(SourceFrame {
            pixels: frame.pixels.into(),
            width,
            height,
            layout,
        })
    }
}
