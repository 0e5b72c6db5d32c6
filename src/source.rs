//! Source-image capability consumed by the animation assembler.
//!
//! The assembler treats still and animated inputs uniformly: every source
//! simply has N frames, and frame i can be seeked to and loaded. Still
//! images are the N = 1 case and get the default implementations; animated
//! sources such as [`FrameCursor`](crate::FrameCursor) report their real
//! frame count and honor seeks.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::codec::StillImage;
use crate::error::FrameError;
use crate::pixel::PixelLayout;

/// One loaded frame of a source image.
#[derive(Debug)]
pub struct SourceFrame<'a> {
    /// Interleaved pixel bytes in `layout`.
    pub pixels: Cow<'a, [u8]>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Byte layout of `pixels`.
    pub layout: PixelLayout,
}

/// A source image the assembler can walk frame by frame.
pub trait FrameSource {
    /// Number of frames this source can produce. 1 for still images.
    fn frame_count(&self) -> u32 {
        1
    }

    /// Position the source at frame `n`.
    ///
    /// Fails with [`FrameError::EndOfSequence`] when `n` is at or past
    /// [`frame_count`](Self::frame_count).
    fn seek(&mut self, frame: u32) -> Result<(), FrameError> {
        if frame >= self.frame_count() {
            return Err(FrameError::EndOfSequence {
                index: frame,
                total: self.frame_count(),
            });
        }
        Ok(())
    }

    /// The current frame position.
    fn tell(&self) -> u32 {
        0
    }

    /// Canvas dimensions in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// Load the current frame's pixels.
    fn load_frame(&mut self) -> Result<SourceFrame<'_>, FrameError>;
}

/// A single still frame backed by an owned pixel buffer.
#[derive(Debug, Clone)]
pub struct StillSource {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    layout: PixelLayout,
}

impl StillSource {
    /// Wrap an owned pixel buffer.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            pixels,
            width,
            height,
            layout,
        }
    }
}

impl From<StillImage> for StillSource {
    fn from(image: StillImage) -> Self {
        Self::new(image.pixels, image.width, image.height, image.layout)
    }
}

impl FrameSource for StillSource {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn load_frame(&mut self) -> Result<SourceFrame<'_>, FrameError> {
        Ok(SourceFrame {
            pixels: Cow::Borrowed(&self.pixels),
            width: self.width,
            height: self.height,
            layout: self.layout,
        })
    }
}
