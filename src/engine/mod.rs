//! The decoding engine seam: an incremental feed-mode decoder consumed as
//! a black box by the session layer.

use thiserror::Error;

#[cfg(feature = "mpg123")]
mod mpg123;

#[cfg(feature = "mpg123")]
pub use mpg123::Mpg123Engine;

/// Outcome of one engine decode step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStep {
    /// This many bytes of PCM were written into the output region.
    Decoded(usize),
    /// The engine has seen enough data to know the stream parameters.
    /// Query them with [`FeedEngine::format`].
    FormatDetermined,
    /// Not enough compressed data buffered to produce anything yet.
    NeedMore,
    /// Unrecoverable failure, carrying the engine's native status code.
    Failed(i32),
}

/// Stream parameters exactly as the engine reports them, prior to any
/// normalization of the encoding constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFormat {
    /// Sample rate in Hz.
    pub rate: i64,
    /// Channel count.
    pub channels: i32,
    /// Native encoding constant, see [`crate::format::SampleEncoding`].
    pub encoding: i32,
}

/// Failure while bringing an engine instance up.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The decoder instance could not be created.
    #[error("unable to create decoder instance (engine code {0})")]
    Init(i32),
    /// The decoder could not be switched into feed mode; the instance is
    /// discarded and never handed out.
    #[error("unable to switch decoder into feed mode (engine code {0})")]
    Mode(i32),
}

/// An incremental feed-mode audio decoder.
///
/// Each [`decode`](FeedEngine::decode) call appends the input chunk to the
/// engine's internal backlog and pulls out whatever PCM it can produce,
/// bounded by the output slice. The engine owns all buffering between
/// calls; neither buffer is retained past the call.
///
/// Instances are not safe for concurrent use. Calls for one engine must be
/// serialized by the caller, which the session layer guarantees through
/// `&mut` access.
pub trait FeedEngine: Send {
    /// Run one push-and-pull cycle. Never writes past `output.len()`.
    fn decode(&mut self, input: &[u8], output: &mut [u8]) -> EngineStep;

    /// Current stream parameters. Only meaningful once the engine has
    /// reported [`EngineStep::FormatDetermined`]; `Err` carries the native
    /// status code of the failed query.
    fn format(&mut self) -> Result<RawFormat, i32>;
}
