//! Optional metadata chunks carried alongside frames.
//!
//! WebP containers can carry an ICC color profile and EXIF/XMP provenance
//! blocks as named chunks next to the frame data. They are strictly
//! optional: a missing chunk is absence-by-design, never a fault, and never
//! fails an open.

use alloc::vec::Vec;

use crate::codec::AnimDecodeSession;

/// The well-known metadata chunks this crate extracts and embeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// ICC color profile (`ICCP`).
    IccProfile,
    /// EXIF provenance block (`EXIF`).
    Exif,
    /// XMP provenance block (`XMP `, with a trailing space).
    Xmp,
}

impl ChunkKind {
    /// The chunk's fourcc as stored in the container.
    pub fn fourcc(self) -> &'static [u8; 4] {
        match self {
            ChunkKind::IccProfile => b"ICCP",
            ChunkKind::Exif => b"EXIF",
            ChunkKind::Xmp => b"XMP ",
        }
    }
}

/// Side table of metadata chunks pulled from an opened container.
///
/// Populated once at open time and never mutated afterward. A chunk the
/// container lacks stays `None` rather than defaulting to empty bytes.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    /// ICC color profile bytes, if the container carries the chunk.
    pub icc_profile: Option<Vec<u8>>,
    /// EXIF bytes, if present.
    pub exif: Option<Vec<u8>>,
    /// XMP bytes, if present.
    pub xmp: Option<Vec<u8>>,
}

impl MetadataTable {
    /// Pull the three well-known chunks from a decode session.
    pub fn extract<D: AnimDecodeSession>(decoder: &mut D) -> Self {
        Self {
            icc_profile: decoder.chunk(ChunkKind::IccProfile),
            exif: decoder.chunk(ChunkKind::Exif),
            xmp: decoder.chunk(ChunkKind::Xmp),
        }
    }
}

/// Metadata handed to an encode session at assembly time.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssemblyMetadata<'a> {
    /// ICC color profile to embed, if any.
    pub icc_profile: Option<&'a [u8]>,
    /// EXIF block to embed, if any.
    pub exif: Option<&'a [u8]>,
    /// XMP block to embed, if any.
    pub xmp: Option<&'a [u8]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourcc_is_four_bytes_with_padded_xmp() {
        assert_eq!(ChunkKind::IccProfile.fourcc(), b"ICCP");
        assert_eq!(ChunkKind::Exif.fourcc(), b"EXIF");
        assert_eq!(ChunkKind::Xmp.fourcc(), b"XMP ");
    }
}
