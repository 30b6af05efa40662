// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! After each successful transition, the state manager invokes every
//! registered output handler with the post-transition value.
//!
//! Concrete handlers (docker runners, log shipping, metrics emission) are
//! out of scope for this core and live downstream, except for
//! [`crate::timeout::TimeoutHandler`], which wraps the supervisor so it can
//! be registered alongside them. [`RecordingOutputHandler`] is a test double
//! only.

use crate::run_state::RunState;

/// Receives every [`RunState`] a transition produces.
pub trait OutputHandler: Send + Sync {
    fn transition_into(&self, run_state: &RunState);
}

/// Records every value it's handed, for assertions in downstream tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Default)]
pub struct RecordingOutputHandler {
    seen: parking_lot::Mutex<Vec<RunState>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingOutputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self) -> Vec<RunState> {
        self.seen.lock().clone()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl OutputHandler for RecordingOutputHandler {
    fn transition_into(&self, run_state: &RunState) {
        self.seen.lock().push(run_state.clone());
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
