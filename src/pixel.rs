//! Pixel layouts and byte-level layout normalization.
//!
//! The animation encoder accepts only `Rgb8` and `Rgba8`. Everything else is
//! normalized by byte shuffling before it reaches an encode session: layouts
//! that carry an alpha channel widen to `Rgba8`, opaque layouts widen to
//! `Rgb8`. Real color-space conversion math is the codec's business, not
//! this crate's.

use alloc::borrow::Cow;
use alloc::format;
use alloc::vec::Vec;

use crate::error::FrameError;

/// Byte layout of interleaved 8-bit pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// Opaque image with a single luminance byte per pixel.
    L8,
    /// Image with a luminance and alpha byte per pixel.
    La8,
    /// Opaque image with a red, green, and blue byte per pixel.
    Rgb8,
    /// Image with a red, green, blue, and alpha byte per pixel.
    Rgba8,
    /// Opaque image with a blue, green, and red byte per pixel.
    Bgr8,
    /// Image with a blue, green, red, and alpha byte per pixel.
    Bgra8,
}

impl PixelLayout {
    /// Number of bytes per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::L8 => 1,
            PixelLayout::La8 => 2,
            PixelLayout::Rgb8 | PixelLayout::Bgr8 => 3,
            PixelLayout::Rgba8 | PixelLayout::Bgra8 => 4,
        }
    }

    /// Whether this layout carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            PixelLayout::La8 | PixelLayout::Rgba8 | PixelLayout::Bgra8
        )
    }

    /// Whether the animation encoder accepts this layout as-is.
    pub(crate) fn is_encodable(self) -> bool {
        matches!(self, PixelLayout::Rgb8 | PixelLayout::Rgba8)
    }
}

/// Normalize pixel data to an encodable layout.
///
/// Encodable input is passed through borrowed. Anything else is converted:
/// the target is `Rgba8` when the source layout has an alpha channel,
/// `Rgb8` otherwise. A buffer too short for the claimed dimensions is an
/// input error, so a misbehaving source surfaces as `Err` rather than a
/// panic.
pub(crate) fn normalize(
    pixels: &[u8],
    layout: PixelLayout,
    width: u32,
    height: u32,
) -> Result<(Cow<'_, [u8]>, PixelLayout), FrameError> {
    let npixels = (width as usize) * (height as usize);
    let needed = npixels * layout.bytes_per_pixel();
    if pixels.len() < needed {
        return Err(FrameError::InvalidInput(format!(
            "{width}x{height} {layout:?} frame needs {needed} bytes, buffer has {}",
            pixels.len()
        )));
    }
    if layout.is_encodable() {
        return Ok((Cow::Borrowed(pixels), layout));
    }

    let converted: Vec<u8> = match layout {
        PixelLayout::L8 => pixels[..npixels].iter().flat_map(|&p| [p, p, p]).collect(),
        PixelLayout::La8 => pixels[..npixels * 2]
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        PixelLayout::Bgr8 => pixels[..npixels * 3]
            .chunks_exact(3)
            .flat_map(|p| [p[2], p[1], p[0]])
            .collect(),
        PixelLayout::Bgra8 => pixels[..npixels * 4]
            .chunks_exact(4)
            .flat_map(|p| [p[2], p[1], p[0], p[3]])
            .collect(),
        PixelLayout::Rgb8 | PixelLayout::Rgba8 => unreachable!(),
    };

    let target = if layout.has_alpha() {
        PixelLayout::Rgba8
    } else {
        PixelLayout::Rgb8
    };
    Ok((Cow::Owned(converted), target))
}
