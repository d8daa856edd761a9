//! Scripted transcript backend
//!
//! Deterministic queue of pre-arranged capture outcomes, one per listening
//! attempt. Used by tests and by the demo's `--script` mode; an exhausted
//! queue behaves like a child who stopped answering (silence).

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use super::{CaptureOutcome, TranscriptSource};

#[derive(Default)]
pub struct ScriptedSource {
    queue: Mutex<VecDeque<CaptureOutcome>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<CaptureOutcome>> {
        // A poisoned queue just means a test panicked mid-push; keep going
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue one attempt's worth of transcripts
    pub fn enqueue(&self, transcripts: &[&str], confidence: f32) {
        let outcome = CaptureOutcome {
            transcripts: transcripts.iter().map(|t| t.to_lowercase()).collect(),
            confidence,
        };
        self.lock().push_back(outcome);
    }

    /// Queue a silent attempt (timeout / nothing said)
    pub fn enqueue_silence(&self) {
        self.lock().push_back(CaptureOutcome::silence());
    }

    /// Load a script where each line is one attempt, `|`-separated
    /// alternatives within the line
    pub fn load_script(&self, script: &str) {
        for line in script.lines() {
            let transcripts: Vec<&str> = line
                .split('|')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();
            if transcripts.is_empty() {
                self.enqueue_silence();
            } else {
                self.enqueue(&transcripts, 1.0);
            }
        }
    }

    pub fn remaining(&self) -> usize {
        self.lock().len()
    }
}

#[async_trait]
impl TranscriptSource for ScriptedSource {
    async fn capture(&self, _timeout: Duration) -> CaptureOutcome {
        self.lock()
            .pop_front()
            .unwrap_or_else(CaptureOutcome::silence)
    }

    fn cancel(&self) {
        // Nothing in flight to abort; the contract only requires safety
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
