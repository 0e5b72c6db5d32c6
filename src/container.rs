//! Opening a container through the signature gate.

use crate::codec::{StillImage, WebpCodec};
use crate::cursor::FrameCursor;
use crate::error::FrameError;
use crate::probe;
use crate::still;

/// An opened WebP image: frame-addressable when the codec supports
/// animation, otherwise a single flat frame.
pub enum WebpImage<D: crate::codec::AnimDecodeSession> {
    /// Container behind a random-access frame cursor.
    Animated(FrameCursor<D>),
    /// Fallback single-frame decode with no timing metadata.
    Still(StillImage),
}

/// Open raw container bytes.
///
/// The fixed 16-byte signature is checked first; a rejected prefix fails
/// with [`FrameError::InvalidFormat`] before any decode session is
/// constructed, so no bytes past the prefix are ever touched. With an
/// animation-capable codec this opens a [`FrameCursor`]; otherwise the
/// whole buffer is decoded once as a single frame.
pub fn open<C: WebpCodec>(codec: &C, data: &[u8]) -> Result<WebpImage<C::Decoder>, FrameError> {
    if !probe::is_webp(data) {
        return Err(FrameError::InvalidFormat("missing WebP signature".into()));
    }
    if !codec.supports_animation() {
        return Ok(WebpImage::Still(still::decode_still(codec, data)?));
    }
    let cursor = FrameCursor::open(codec.open_decoder(data)?)?;
    Ok(WebpImage::Animated(cursor))
}
