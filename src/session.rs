//! Exercise session context
//!
//! Owns the transcript source for the lifetime of one lesson screen and
//! carries the epoch counter that gates stale capture results. The epoch
//! bumps whenever the active target changes; any capture that settles
//! under an old epoch must be discarded unscored.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::capture::{CaptureOutcome, TranscriptSource};

pub struct Session {
    source: Arc<dyn TranscriptSource>,
    epoch: AtomicU64,
    active: AtomicBool,
}

impl Session {
    pub fn new(source: Arc<dyn TranscriptSource>) -> Self {
        Self {
            source,
            epoch: AtomicU64::new(0),
            active: AtomicBool::new(true),
        }
    }

    /// Current epoch; pair with `is_current` around an await
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Mark a target change. Cancels any in-flight capture so its result
    /// settles (as silence) under the old epoch and gets discarded.
    pub fn advance_epoch(&self) -> u64 {
        self.source.cancel();
        self.epoch.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// True while `epoch` is still the live one and the session is up
    pub fn is_current(&self, epoch: u64) -> bool {
        self.active.load(Ordering::Acquire) && self.epoch() == epoch
    }

    /// One bounded listening attempt via the owned source
    pub async fn capture(&self, timeout: Duration) -> CaptureOutcome {
        if !self.active.load(Ordering::Acquire) {
            return CaptureOutcome::silence();
        }
        self.source.capture(timeout).await
    }

    /// Abort any in-flight capture. Idempotent.
    pub fn cancel(&self) {
        self.source.cancel();
    }

    /// Tear the session down; all later captures resolve to silence and
    /// every outstanding epoch goes stale. Idempotent.
    pub fn teardown(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            debug!("Session torn down");
        }
        self.source.cancel();
    }
}
