//! Typed transcript backend
//!
//! Stands in for a speech recognizer at the terminal: one line of input is
//! one utterance. Alternatives can be separated with `|` to simulate the
//! recognizer's N-best list.

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::{Mutex, Notify};
use tracing::debug;

use super::{CaptureOutcome, TranscriptSource};
use crate::config::Config;

pub struct TypedSource {
    reader: Mutex<Lines<BufReader<Stdin>>>,
    cancelled: Notify,
    max_alternatives: usize,
}

impl TypedSource {
    pub fn new(config: &Config) -> Self {
        Self {
            reader: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            cancelled: Notify::new(),
            max_alternatives: config.max_alternatives,
        }
    }

    fn outcome_from_line(&self, line: &str) -> CaptureOutcome {
        let mut transcripts: Vec<String> = line
            .split('|')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        transcripts.truncate(self.max_alternatives);

        if transcripts.is_empty() {
            return CaptureOutcome::silence();
        }
        // Typed input carries no acoustic score; treat it as certain.
        CaptureOutcome {
            transcripts,
            confidence: 1.0,
        }
    }
}

#[async_trait]
impl TranscriptSource for TypedSource {
    async fn capture(&self, timeout: Duration) -> CaptureOutcome {
        let mut reader = self.reader.lock().await;

        tokio::select! {
            line = reader.next_line() => match line {
                Ok(Some(line)) => self.outcome_from_line(&line),
                // Closed or failed stdin is silence, not an error
                _ => CaptureOutcome::silence(),
            },
            _ = self.cancelled.notified() => {
                debug!("Typed capture cancelled");
                CaptureOutcome::silence()
            }
            _ = tokio::time::sleep(timeout) => {
                debug!("Typed capture timed out after {:?}", timeout);
                CaptureOutcome::silence()
            }
        }
    }

    fn cancel(&self) {
        // No-op when nobody is waiting, which makes repeat cancels safe
        self.cancelled.notify_waiters();
    }

    fn name(&self) -> &str {
        "typed"
    }
}
