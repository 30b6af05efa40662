// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time source abstraction.
//!
//! Every clock read inside [`crate::run_state::RunState::transition`] and the
//! [`crate::timeout::TimeoutSupervisor`] goes through this trait instead of
//! calling `SystemTime::now()` directly, so both can be driven deterministically
//! under test.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of milliseconds-since-epoch timestamps.
pub trait Clock: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn epoch_ms(&self) -> u64;
}

/// Real wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn epoch_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Settable clock for deterministic tests.
///
/// Cheaply cloneable; all clones share the same underlying counter, so a
/// test can hand out a clone to the code under test and keep one to advance
/// time from the assertion side.
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    millis: Arc<AtomicU64>,
}

impl FakeClock {
    /// Create a clock starting at epoch 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at the given epoch millis.
    pub fn at(epoch_ms: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(epoch_ms)),
        }
    }

    /// Set the current time.
    pub fn set(&self, epoch_ms: u64) {
        self.millis.store(epoch_ms, Ordering::SeqCst);
    }

    /// Advance the current time by `delta_ms`.
    pub fn advance(&self, delta_ms: u64) {
        self.millis.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn epoch_ms(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
