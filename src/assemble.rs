//! Animation assembly: many source images in, one container out.
//!
//! Mirrors the decode path. Every source — still or animated — is walked
//! frame by frame, normalized to an encodable pixel layout, and appended to
//! one encode session with a running global timestamp. After the last real
//! frame, a single null-payload append flushes the encoder: that sentinel
//! is the only thing that commits the final frame's duration, so omitting
//! it would truncate the last frame's display time to zero.

use alloc::vec::Vec;
use log::{debug, trace};

use crate::codec::{AnimEncodeSession, EncoderSetup, FramePayload, WebpCodec};
use crate::error::FrameError;
use crate::options::AnimOptions;
use crate::pixel::normalize;
use crate::source::FrameSource;
use crate::still;

/// Running position within the assembly: how many frames have been emitted
/// and the presentation time of the next one.
struct Timeline {
    frame_idx: usize,
    timestamp_ms: u32,
}

/// Assemble one animated container from a primary source plus any number of
/// additional sources.
///
/// The canvas takes the primary source's dimensions; every frame of every
/// source is appended in order, each normalized to `Rgb8` or `Rgba8`
/// depending on its alpha signal. The primary's frame position is restored
/// before returning — on success and on every failure path — so assembly
/// never leaves the source's own cursor moved as an observable side effect.
///
/// When the codec has no animation support, the primary's current frame is
/// encoded through the still-image path instead.
pub fn assemble_animation<C: WebpCodec>(
    codec: &C,
    primary: &mut dyn FrameSource,
    append_images: &mut [&mut dyn FrameSource],
    options: &AnimOptions,
) -> Result<Vec<u8>, FrameError> {
    if !codec.supports_animation() {
        return still::encode_current_frame(codec, primary, &options.still());
    }

    let (width, height) = primary.dimensions();
    let (kmin, kmax) = options.keyframe_bounds();
    let lossless = options.effective_lossless();

    let mut session = codec.open_encoder(&EncoderSetup {
        width,
        height,
        background: options.background.packed(),
        loop_count: options.loop_count,
        minimize_size: options.minimize_size,
        kmin,
        kmax,
        allow_mixed: options.allow_mixed,
    })?;
    debug!(
        "assembling {}x{} animation from {} source(s)",
        width,
        height,
        1 + append_images.len()
    );

    let saved = primary.tell();
    let mut clock = Timeline {
        frame_idx: 0,
        timestamp_ms: 0,
    };

    // The iteration moves the primary's own cursor; its position must come
    // back even when a source or the encoder fails mid-stream.
    let pushed = push_all_sources(
        &mut session,
        primary,
        append_images,
        options,
        lossless,
        &mut clock,
    );
    let restored = primary.seek(saved);
    pushed?;
    restored?;

    // Terminating sentinel: commits the last real frame's duration.
    session.append(None, clock.timestamp_ms)?;

    session
        .assemble(&options.metadata())
        .ok_or(FrameError::EncodeFailed)
}

fn push_all_sources<E: AnimEncodeSession>(
    session: &mut E,
    primary: &mut dyn FrameSource,
    append_images: &mut [&mut dyn FrameSource],
    options: &AnimOptions,
    lossless: bool,
    clock: &mut Timeline,
) -> Result<(), FrameError> {
    push_source(session, primary, options, lossless, clock)?;
    for source in append_images.iter_mut() {
        push_source(session, *source, options, lossless, clock)?;
    }
    Ok(())
}

/// Append every frame of one source at the current global timestamps.
fn push_source<E: AnimEncodeSession>(
    session: &mut E,
    source: &mut dyn FrameSource,
    options: &AnimOptions,
    lossless: bool,
    clock: &mut Timeline,
) -> Result<(), FrameError> {
    for idx in 0..source.frame_count() {
        source.seek(idx)?;
        let frame = source.load_frame()?;
        let (pixels, layout) = normalize(&frame.pixels, frame.layout, frame.width, frame.height)?;

        trace!(
            "appending frame {} at {}ms ({layout:?})",
            clock.frame_idx, clock.timestamp_ms
        );
        session.append(
            Some(FramePayload {
                pixels: &pixels,
                width: frame.width,
                height: frame.height,
                layout,
                lossless,
                quality: options.quality,
                method: options.method,
            }),
            clock.timestamp_ms,
        )?;

        let step = options.duration.for_frame(clock.frame_idx)?;
        clock.timestamp_ms = clock.timestamp_ms.saturating_add(step);
        clock.frame_idx += 1;
    }
    Ok(())
}
