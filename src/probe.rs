//! Container signature probing.
//!
//! Classifies a fixed-length byte prefix as WebP or not, without parsing the
//! rest of the file. Probing is the gate in front of every open: a rejected
//! prefix means no decode session is ever constructed.

/// Number of prefix bytes [`is_webp`] inspects.
pub const PREFIX_LEN: usize = 16;

/// Returns `true` if `prefix` starts a WebP container.
///
/// The prefix must carry the RIFF magic at bytes 0..4, the WEBP magic at
/// bytes 8..12, and one of the three recognized bitstream tags at bytes
/// 12..16: `VP8 ` (lossy), `VP8X` (extended, alpha-capable), or `VP8L`
/// (lossless). Bytes 4..8 hold the RIFF payload size and are not checked.
///
/// Prefixes shorter than 16 bytes are rejected, never indexed out of range.
pub fn is_webp(prefix: &[u8]) -> bool {
    if prefix.len() < PREFIX_LEN {
        return false;
    }
    let tag = &prefix[12..16];
    &prefix[0..4] == b"RIFF"
        && &prefix[8..12] == b"WEBP"
        && (tag == b"VP8 " || tag == b"VP8X" || tag == b"VP8L")
}
