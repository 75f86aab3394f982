//! Normalized stream format and the format-change notification seam.

use crate::engine::RawFormat;

/// Native constant for 16-bit signed PCM (mpg123 encoding vocabulary).
pub const ENC_SIGNED_16: i32 = 0xd0;
/// Native constant for 8-bit signed PCM (mpg123 encoding vocabulary).
pub const ENC_SIGNED_8: i32 = 0x82;

/// Bits-per-sample value delivered when the detected encoding is neither
/// of the two supported depths. Detection itself succeeded; collaborators
/// use this to refuse to configure audio output for the stream.
pub const UNSUPPORTED_BITS: i32 = -1;

/// Sample encodings as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleEncoding {
    /// 16-bit signed PCM.
    Signed16,
    /// 8-bit signed PCM.
    Signed8,
    /// Anything else the engine may decode to.
    Unsupported,
}

impl SampleEncoding {
    /// Normalize a native encoding constant.
    pub fn from_native(encoding: i32) -> Self {
        match encoding {
            ENC_SIGNED_16 => Self::Signed16,
            ENC_SIGNED_8 => Self::Signed8,
            _ => Self::Unsupported,
        }
    }

    /// Bits per sample as carried in [`FormatChange`]: 16, 8, or -1.
    pub fn bits_per_sample(self) -> i32 {
        match self {
            Self::Signed16 => 16,
            Self::Signed8 => 8,
            Self::Unsupported => UNSUPPORTED_BITS,
        }
    }
}

/// Payload of one format notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatChange {
    /// Sample rate in Hz.
    pub sample_rate: i32,
    /// Channel count.
    pub channels: i32,
    /// 16, 8, or -1 for an unsupported encoding. Never a native constant.
    pub bits_per_sample: i32,
}

impl FormatChange {
    pub(crate) fn from_raw(raw: RawFormat) -> Self {
        Self {
            sample_rate: raw.rate as i32,
            channels: raw.channels,
            bits_per_sample: SampleEncoding::from_native(raw.encoding).bits_per_sample(),
        }
    }
}

/// Receiver for format notifications.
///
/// Registered once when a session opens and invoked synchronously from
/// inside the decode call that discovers the format, strictly before that
/// call returns. A true mid-stream format change invokes it again.
pub trait FormatSink: Send {
    /// Called once per format determination.
    fn on_format_change(&mut self, change: FormatChange);
}

impl<F: FnMut(FormatChange) + Send> FormatSink for F {
    fn on_format_change(&mut self, change: FormatChange) {
        self(change)
    }
}
