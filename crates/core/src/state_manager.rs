// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The boundary the hosting state manager implements against.
//!
//! Persistence, the event bus, and per-instance locking all live on the
//! other side of this trait, outside this crate.

use crate::error::SupervisorError;
use crate::event::Event;
use crate::run_state::RunState;

/// Posts an event to the state manager under optimistic concurrency.
pub trait StateManagerHandle: Send + Sync {
    /// Applies `event` if `expected_counter` still matches the instance's
    /// current counter. Returns `Ok(None)` rather than an error when the
    /// counter was stale — the event is silently dropped, which is what lets
    /// the timeout supervisor tolerate races with other event producers.
    fn receive_ignore_closed(
        &self,
        event: Event,
        expected_counter: i64,
    ) -> Result<Option<RunState>, SupervisorError>;
}

#[cfg(test)]
#[path = "state_manager_tests.rs"]
mod tests;
