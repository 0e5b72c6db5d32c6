//! Single-frame fallback paths.
//!
//! Used when the codec is built without the animation-capable API: decode
//! treats the whole file as one flat frame with no timing metadata, and
//! encode normalizes a single frame and hands it to the codec's single-shot
//! entry point.

use alloc::vec::Vec;
use log::debug;

use crate::codec::{FramePayload, StillImage, WebpCodec};
use crate::error::FrameError;
use crate::metadata::AssemblyMetadata;
use crate::options::StillOptions;
use crate::pixel::{PixelLayout, normalize};
use crate::source::FrameSource;

/// Decode a whole container as a single still frame.
pub fn decode_still<C: WebpCodec>(codec: &C, data: &[u8]) -> Result<StillImage, FrameError> {
    let image = codec.decode_still(data).ok_or(FrameError::DecodeFailed)?;
    debug!(
        "decoded {}x{} still frame ({:?})",
        image.width, image.height, image.layout
    );
    Ok(image)
}

/// Encode a single frame directly, bypassing the animation encoder.
///
/// The frame is normalized to an encodable layout first; a codec that then
/// returns no output is a fatal [`FrameError::EncodeFailed`].
pub fn encode_still<C: WebpCodec>(
    codec: &C,
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    options: &StillOptions,
) -> Result<Vec<u8>, FrameError> {
    let (pixels, layout) = normalize(pixels, layout, width, height)?;
    codec
        .encode_still(
            FramePayload {
                pixels: &pixels,
                width,
                height,
                layout,
                lossless: options.lossless,
                quality: options.quality,
                method: 0,
            },
            &AssemblyMetadata {
                icc_profile: options.icc_profile.as_deref(),
                exif: options.exif.as_deref(),
                xmp: None,
            },
        )
        .ok_or(FrameError::EncodeFailed)
}

/// Encode a source's current frame through the still path.
///
/// The animation assembler falls through to this when the codec cannot
/// assemble containers.
pub(crate) fn encode_current_frame<C: WebpCodec>(
    codec: &C,
    source: &mut dyn FrameSource,
    options: &StillOptions,
) -> Result<Vec<u8>, FrameError> {
    let frame = source.load_frame()?;
    let (width, height, layout) = (frame.width, frame.height, frame.layout);
    encode_still(codec, &frame.pixels, width, height, layout, options)
}
