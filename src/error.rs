//! Error types for cursor navigation, assembly, and the fallback paths.

use alloc::string::String;
use thiserror::Error;

/// Errors produced by frame access and animation assembly.
///
/// Format rejection during probing is deliberately not represented here:
/// [`probe::is_webp`](crate::probe::is_webp) answers with a boolean because
/// probing is expected to fail often during format auto-detection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FrameError {
    /// The data does not carry the container signature, or the container
    /// is structurally unusable.
    #[error("invalid WebP container: {0}")]
    InvalidFormat(String),

    /// A seek or advance moved outside the frame sequence.
    ///
    /// Recoverable: the cursor stays usable and the caller can seek to a
    /// valid index.
    #[error("frame {index} is outside the sequence (total: {total})")]
    EndOfSequence {
        /// The frame index that could not be reached.
        index: u32,
        /// The total number of frames in the container.
        total: u32,
    },

    /// An encode parameter was rejected before any encoder work began.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The decode session produced no output for a whole-buffer decode.
    #[error("cannot decode file as WebP (decoder returned no output)")]
    DecodeFailed,

    /// The encode session produced no output after valid input was supplied.
    ///
    /// Fatal for the call; no partial output is valid.
    #[error("cannot write file as WebP (encoder returned no output)")]
    EncodeFailed,
}
