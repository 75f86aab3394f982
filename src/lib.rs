//! streamdec - streaming MPEG audio decode bridge
//!
//! Feeds externally-supplied compressed audio bytes into an incremental
//! feed-mode decoder and returns raw PCM as it becomes available. The
//! stream's parameters (sample rate, channel count, bit depth) are not
//! known up front; the moment the engine determines them, the session's
//! [`FormatSink`] is notified, inline, before the decode call returns.
//!
//! The surrounding application stays in charge of transport and output:
//! it supplies compressed chunks and an output buffer, and reads decoded
//! byte counts back. A non-negative return from
//! [`SessionRegistry::decode`] is always a byte count; a negative return
//! always means the stream is beyond recovery and the session should be
//! torn down and reopened.

pub mod engine;
pub mod format;
pub mod session;

#[cfg(feature = "mpg123")]
pub use engine::Mpg123Engine;
pub use engine::{EngineError, EngineStep, FeedEngine, RawFormat};
pub use format::{FormatChange, FormatSink, SampleEncoding};
pub use session::{STATUS_BAD_SESSION, SessionHandle, SessionRegistry};
