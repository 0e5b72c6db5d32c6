//! Encode options and their container-format defaults.

use alloc::format;
use alloc::vec::Vec;

use crate::codec::LoopCount;
use crate::error::FrameError;
use crate::metadata::AssemblyMetadata;

/// Keyframe interval defaults, taken from the gif2webp tool.
const KEYFRAME_BOUNDS_LOSSLESS: (u32, u32) = (9, 17);
const KEYFRAME_BOUNDS_LOSSY: (u32, u32) = (3, 5);

/// Background color for the animation canvas.
///
/// Channels are validated once at construction, so an out-of-range color is
/// rejected before any encoder work can begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Background {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Background {
    /// Fully transparent black, the default canvas background.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Validate RGBA channels, rejecting anything outside 0..=255.
    pub fn new(r: i32, g: i32, b: i32, a: i32) -> Result<Self, FrameError> {
        let channel = |v: i32| {
            u8::try_from(v).map_err(|_| {
                FrameError::InvalidInput(format!(
                    "background color is not an RGBA tuple clamped to 0-255: ({r}, {g}, {b}, {a})"
                ))
            })
        };
        Ok(Self {
            r: channel(r)?,
            g: channel(g)?,
            b: channel(b)?,
            a: channel(a)?,
        })
    }

    /// The packed container representation:
    /// `alpha << 24 | red << 16 | green << 8 | blue`.
    pub fn packed(self) -> u32 {
        (u32::from(self.a) << 24)
            | (u32::from(self.r) << 16)
            | (u32::from(self.g) << 8)
            | u32::from(self.b)
    }

    /// Decompose a packed value into `[r, g, b, a]` channel bytes.
    pub fn unpack(packed: u32) -> [u8; 4] {
        [
            ((packed >> 16) & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            (packed & 0xFF) as u8,
            ((packed >> 24) & 0xFF) as u8,
        ]
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<[u8; 4]> for Background {
    /// Channels in RGBA order.
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

/// Per-frame display duration configuration.
#[derive(Debug, Clone)]
pub enum FrameDuration {
    /// Every emitted frame gets the same duration in milliseconds.
    Constant(u32),
    /// Durations in milliseconds, indexed by emitted frame number across
    /// all sources.
    PerFrame(Vec<u32>),
}

impl Default for FrameDuration {
    fn default() -> Self {
        FrameDuration::Constant(0)
    }
}

impl FrameDuration {
    /// Duration for the `index`-th emitted frame.
    ///
    /// An exhausted per-frame list is an input error: the list must cover
    /// every frame the sources produce.
    pub fn for_frame(&self, index: usize) -> Result<u32, FrameError> {
        match self {
            FrameDuration::Constant(ms) => Ok(*ms),
            FrameDuration::PerFrame(list) => list.get(index).copied().ok_or_else(|| {
                FrameError::InvalidInput(format!(
                    "duration list has {} entries but frame {index} was emitted",
                    list.len()
                ))
            }),
        }
    }
}

/// Options controlling animation assembly.
///
/// The defaults match the container format's conventions: transparent
/// background, zero duration, infinite looping, lossy encoding at quality
/// 80 with the fastest method.
#[derive(Debug, Clone)]
pub struct AnimOptions {
    /// Canvas background color.
    pub background: Background,
    /// Display duration per emitted frame.
    pub duration: FrameDuration,
    /// How many times the animation repeats.
    pub loop_count: LoopCount,
    /// Spend extra effort minimizing output size.
    pub minimize_size: bool,
    /// Minimum keyframe interval. `None` uses the format default
    /// (9 lossless, 3 lossy).
    pub kmin: Option<u32>,
    /// Maximum keyframe interval. `None` uses the format default
    /// (17 lossless, 5 lossy).
    pub kmax: Option<u32>,
    /// Let the encoder pick lossy or lossless per frame. Forces
    /// `lossless` off.
    pub allow_mixed: bool,
    /// Encode frames losslessly.
    pub lossless: bool,
    /// Quality factor, 0-100.
    pub quality: f32,
    /// Quality/speed effort, 0 (fast) to 6 (slow).
    pub method: u8,
    /// ICC color profile to embed in the output.
    pub icc_profile: Option<Vec<u8>>,
    /// EXIF block to embed in the output.
    pub exif: Option<Vec<u8>>,
    /// XMP block to embed in the output.
    pub xmp: Option<Vec<u8>>,
}

impl Default for AnimOptions {
    fn default() -> Self {
        Self {
            background: Background::TRANSPARENT,
            duration: FrameDuration::default(),
            loop_count: LoopCount::Forever,
            minimize_size: false,
            kmin: None,
            kmax: None,
            allow_mixed: false,
            lossless: false,
            quality: 80.0,
            method: 0,
            icc_profile: None,
            exif: None,
            xmp: None,
        }
    }
}

impl AnimOptions {
    /// Effective lossless flag: `allow_mixed` hands the lossy/lossless
    /// choice to the encoder, so it forces the per-frame flag off.
    pub(crate) fn effective_lossless(&self) -> bool {
        self.lossless && !self.allow_mixed
    }

    /// Resolved keyframe interval bounds.
    pub(crate) fn keyframe_bounds(&self) -> (u32, u32) {
        let (dmin, dmax) = if self.effective_lossless() {
            KEYFRAME_BOUNDS_LOSSLESS
        } else {
            KEYFRAME_BOUNDS_LOSSY
        };
        (self.kmin.unwrap_or(dmin), self.kmax.unwrap_or(dmax))
    }

    /// Metadata view handed to the encode session at assembly time.
    pub(crate) fn metadata(&self) -> AssemblyMetadata<'_> {
        AssemblyMetadata {
            icc_profile: self.icc_profile.as_deref(),
            exif: self.exif.as_deref(),
            xmp: self.xmp.as_deref(),
        }
    }

    /// The still-path subset of these options, for the no-animation
    /// fallback.
    pub(crate) fn still(&self) -> StillOptions {
        StillOptions {
            lossless: self.lossless,
            quality: self.quality,
            icc_profile: self.icc_profile.clone(),
            exif: self.exif.clone(),
        }
    }
}

/// Options for the single-frame fallback encoder.
#[derive(Debug, Clone)]
pub struct StillOptions {
    /// Encode losslessly.
    pub lossless: bool,
    /// Quality factor, 0-100.
    pub quality: f32,
    /// ICC color profile to embed in the output.
    pub icc_profile: Option<Vec<u8>>,
    /// EXIF block to embed in the output.
    pub exif: Option<Vec<u8>>,
}

impl Default for StillOptions {
    fn default() -> Self {
        Self {
            lossless: false,
            quality: 80.0,
            icc_profile: None,
            exif: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn background_packs_argb_bit_layout() {
        let bg = Background::new(0x22, 0x33, 0x44, 0x11).unwrap();
        assert_eq!(bg.packed(), 0x1122_3344);
        assert_eq!(Background::unpack(0x1122_3344), [0x22, 0x33, 0x44, 0x11]);
    }

    #[test]
    fn background_rejects_out_of_range_channels() {
        for bad in [
            (256, 0, 0, 0),
            (0, 256, 0, 0),
            (0, 0, 256, 0),
            (0, 0, 0, 256),
            (-1, 0, 0, 0),
        ] {
            let err = Background::new(bad.0, bad.1, bad.2, bad.3).unwrap_err();
            assert!(matches!(err, FrameError::InvalidInput(_)), "{bad:?}");
        }
    }

    #[test]
    fn keyframe_bounds_follow_lossless_flag() {
        let mut opts = AnimOptions::default();
        assert_eq!(opts.keyframe_bounds(), (3, 5));

        opts.lossless = true;
        assert_eq!(opts.keyframe_bounds(), (9, 17));

        // allow_mixed forces the lossy defaults back on
        opts.allow_mixed = true;
        assert!(!opts.effective_lossless());
        assert_eq!(opts.keyframe_bounds(), (3, 5));

        opts.allow_mixed = false;
        opts.kmin = Some(2);
        opts.kmax = Some(40);
        assert_eq!(opts.keyframe_bounds(), (2, 40));
    }

    #[test]
    fn per_frame_durations_must_cover_every_frame() {
        let d = FrameDuration::PerFrame(vec![30, 40]);
        assert_eq!(d.for_frame(0).unwrap(), 30);
        assert_eq!(d.for_frame(1).unwrap(), 40);
        assert!(matches!(
            d.for_frame(2),
            Err(FrameError::InvalidInput(_))
        ));

        assert_eq!(FrameDuration::Constant(100).for_frame(99).unwrap(), 100);
    }
}
