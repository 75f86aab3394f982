//! Decode sessions: the handle registry and the per-call decode protocol.

use std::collections::HashMap;

#[cfg(feature = "mpg123")]
use crate::engine::{EngineError, Mpg123Engine};
use crate::engine::{EngineStep, FeedEngine};
use crate::format::{FormatChange, FormatSink};

/// Status returned by [`SessionRegistry::decode`] when the handle does not
/// name a live session.
pub const STATUS_BAD_SESSION: i32 = -1;

/// Opaque identifier for one open decode session.
///
/// Handles are minted from a monotonic counter and never reused, so a
/// stale handle can only miss, never alias a newer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(u64);

/// One live session: an engine instance plus its notification sink.
struct Session {
    engine: Box<dyn FeedEngine>,
    sink: Box<dyn FormatSink>,
    /// Last format delivered to the sink. None until first determination.
    format: Option<FormatChange>,
}

/// Result of one decode step, before sign encoding at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeOutcome {
    Produced(usize),
    FormatChanged(FormatChange),
    NeedMore,
    Failed(i32),
}

impl DecodeOutcome {
    /// Collapse to the boundary contract: a non-negative return is always
    /// a byte count, a negative return is always an error.
    fn status(self) -> i32 {
        match self {
            DecodeOutcome::Produced(n) => n as i32,
            DecodeOutcome::FormatChanged(_) | DecodeOutcome::NeedMore => 0,
            DecodeOutcome::Failed(code) => {
                if code > 0 { -code } else { code }
            }
        }
    }
}

impl Session {
    fn step(&mut self, input: &[u8], output: &mut [u8]) -> DecodeOutcome {
        match self.engine.decode(input, output) {
            EngineStep::Decoded(n) => DecodeOutcome::Produced(n),
            EngineStep::FormatDetermined => match self.engine.format() {
                Ok(raw) => {
                    let change = FormatChange::from_raw(raw);
                    self.format = Some(change);
                    self.sink.on_format_change(change);
                    DecodeOutcome::FormatChanged(change)
                }
                Err(code) => DecodeOutcome::Failed(code),
            },
            EngineStep::NeedMore => DecodeOutcome::NeedMore,
            EngineStep::Failed(code) => DecodeOutcome::Failed(code),
        }
    }
}

/// Registry owning all live decode sessions.
///
/// Methods take `&mut self`, so decode and close calls are serialized by
/// construction, which is the contract the underlying engine requires.
/// Sessions share no state with each other; closing one never disturbs
/// another.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionHandle, Session>,
    last_handle: u64,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session backed by the system mpg123 decoder.
    #[cfg(feature = "mpg123")]
    pub fn open<S>(&mut self, sink: S) -> Result<SessionHandle, EngineError>
    where
        S: FormatSink + 'static,
    {
        let engine = Mpg123Engine::new()?;
        Ok(self.open_with(Box::new(engine), sink))
    }

    /// Open a session over a caller-supplied engine instance.
    pub fn open_with<S>(&mut self, engine: Box<dyn FeedEngine>, sink: S) -> SessionHandle
    where
        S: FormatSink + 'static,
    {
        self.last_handle += 1;
        let handle = SessionHandle(self.last_handle);
        self.sessions.insert(
            handle,
            Session {
                engine,
                sink: Box::new(sink),
                format: None,
            },
        );
        log::info!("Opened decode session {:?}", handle);
        handle
    }

    /// Feed one compressed chunk and collect whatever PCM the engine can
    /// produce into `output`.
    ///
    /// Returns the number of PCM bytes written, or a negative status on
    /// failure. Zero is the normal steady-state answer while the engine
    /// gathers data, and also the answer for the call on which a format
    /// notification fires; the notification reaches the session's sink
    /// before this call returns. At most `output.len()` bytes are written.
    ///
    /// Chunks must arrive in stream order. The engine cannot recover from
    /// reordered input, so a caller that reorders gets garbage, not an
    /// error.
    pub fn decode(&mut self, handle: SessionHandle, input: &[u8], output: &mut [u8]) -> i32 {
        let Some(session) = self.sessions.get_mut(&handle) else {
            log::error!("Decode on unknown session {:?}", handle);
            return STATUS_BAD_SESSION;
        };
        let outcome = session.step(input, output);
        log::debug!(
            "Decode {:?}: in={} cap={} outcome={:?}",
            handle,
            input.len(),
            output.len(),
            outcome,
        );
        if let DecodeOutcome::FormatChanged(change) = outcome {
            log::info!(
                "Session {:?} stream format: {} Hz, {} ch, {} bits per sample",
                handle,
                change.sample_rate,
                change.channels,
                change.bits_per_sample,
            );
        }
        outcome.status()
    }

    /// Close a session and release its engine instance.
    ///
    /// Closing a handle that is not open (including a second close of the
    /// same handle) is a logged no-op.
    pub fn close(&mut self, handle: SessionHandle) {
        if self.sessions.remove(&handle).is_some() {
            log::info!("Closed decode session {:?}", handle);
        } else {
            log::warn!("Close on unknown session {:?}", handle);
        }
    }

    /// Last format delivered for this session, if one was determined yet.
    pub fn format(&self, handle: SessionHandle) -> Option<FormatChange> {
        self.sessions.get(&handle).and_then(|s| s.format)
    }

    /// Whether `handle` names a live session.
    pub fn is_open(&self, handle: SessionHandle) -> bool {
        self.sessions.contains_key(&handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_encoding_multiplexes_count_and_error() {
        assert_eq!(DecodeOutcome::Produced(0).status(), 0);
        assert_eq!(DecodeOutcome::Produced(4608).status(), 4608);
        assert_eq!(DecodeOutcome::NeedMore.status(), 0);
        let change = FormatChange {
            sample_rate: 44100,
            channels: 2,
            bits_per_sample: 16,
        };
        assert_eq!(DecodeOutcome::FormatChanged(change).status(), 0);
        // Native codes are negative already and pass through unchanged.
        assert_eq!(DecodeOutcome::Failed(-12).status(), -12);
        // A positive code under the failure branch must not masquerade as
        // a byte count.
        assert_eq!(DecodeOutcome::Failed(3).status(), -3);
    }
}
