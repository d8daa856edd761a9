//! Transcript acquisition
//!
//! Boundary to whatever produces transcripts for one listening attempt.
//! The engine never records audio itself; a backend yields zero or more
//! candidate strings plus a confidence score, and every failure mode
//! (timeout, silence, denial, cancellation) normalizes to an empty set.

pub mod scripted;
pub mod typed;

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use std::time::Duration;

// Re-export main types
pub use scripted::ScriptedSource;
pub use typed::TypedSource;

/// Result of one bounded listening attempt
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutcome {
    /// Candidate transcripts in recognizer preference order
    pub transcripts: Vec<String>,
    /// Overall confidence in [0,1]; 0.0 when nothing was heard
    pub confidence: f32,
}

impl CaptureOutcome {
    /// The "heard nothing usable" outcome
    pub fn silence() -> Self {
        Self {
            transcripts: Vec::new(),
            confidence: 0.0,
        }
    }

    pub fn is_silence(&self) -> bool {
        self.transcripts.iter().all(|t| t.trim().is_empty())
    }
}

/// Trait for transcript sources
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Listen for a single utterance, bounded by `timeout`.
    /// Never fails: anything that goes wrong resolves to silence.
    async fn capture(&self, timeout: Duration) -> CaptureOutcome;

    /// Abort an in-progress capture. Safe to call at any time, including
    /// when no capture is active or repeatedly.
    fn cancel(&self);

    /// Get the backend name
    fn name(&self) -> &str;
}

/// Factory to create the configured transcript source
pub fn create_source(config: &Config) -> Result<Box<dyn TranscriptSource>> {
    match config.capture_backend.as_str() {
        "typed" => Ok(Box::new(TypedSource::new(config))),
        "scripted" => Ok(Box::new(ScriptedSource::new())),
        _ => Ok(Box::new(TypedSource::new(config))),
    }
}
