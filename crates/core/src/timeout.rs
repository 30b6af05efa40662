// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dwell-time policy: observes a [`RunState`] and, once it has sat in its
//! current state longer than the configured time-to-live, posts a `timeout`
//! event back through the [`StateManagerHandle`] boundary.
//!
//! Side-effect-free except for that one post; never mutates `RunState`
//! directly, and performs no retries or backoff of its own. [`TimeoutHandler`]
//! is the [`crate::output::OutputHandler`] wrapper that lets a state manager
//! register the supervisor like any other output handler.

use crate::clock::Clock;
use crate::error::ConfigError;
use crate::event::Event;
use crate::output::OutputHandler;
use crate::run_state::RunState;
use crate::state::State;
use crate::state_manager::StateManagerHandle;
use crate::workflow::{Workflow, WorkflowLookup};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Per-state default dwell-time budgets, in milliseconds.
///
/// These are policy defaults, not wire constants; a deployment overrides
/// them via [`TimeoutConfig::from_toml`].
const DEFAULT_NEW_MILLIS: u64 = 5 * 60 * 1_000;
const DEFAULT_QUEUED_MILLIS: u64 = 60 * 60 * 1_000;
const DEFAULT_PREPARE_MILLIS: u64 = 10 * 60 * 1_000;
const DEFAULT_SUBMITTING_MILLIS: u64 = 10 * 60 * 1_000;
const DEFAULT_SUBMITTED_MILLIS: u64 = 10 * 60 * 1_000;
const DEFAULT_RUNNING_MILLIS: u64 = 24 * 60 * 60 * 1_000;
const DEFAULT_TERMINATED_MILLIS: u64 = 5 * 60 * 1_000;
const DEFAULT_FAILED_MILLIS: u64 = 60 * 60 * 1_000;

/// Time-to-live table keyed by state, with a per-workflow override for
/// `RUNNING`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub new_millis: u64,
    pub queued_millis: u64,
    pub prepare_millis: u64,
    pub submitting_millis: u64,
    pub submitted_millis: u64,
    pub running_millis: u64,
    pub terminated_millis: u64,
    pub failed_millis: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            new_millis: DEFAULT_NEW_MILLIS,
            queued_millis: DEFAULT_QUEUED_MILLIS,
            prepare_millis: DEFAULT_PREPARE_MILLIS,
            submitting_millis: DEFAULT_SUBMITTING_MILLIS,
            submitted_millis: DEFAULT_SUBMITTED_MILLIS,
            running_millis: DEFAULT_RUNNING_MILLIS,
            terminated_millis: DEFAULT_TERMINATED_MILLIS,
            failed_millis: DEFAULT_FAILED_MILLIS,
        }
    }
}

impl TimeoutConfig {
    /// Load a config from a TOML document; any field it omits falls back to
    /// [`TimeoutConfig::default`].
    pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(document)?)
    }

    /// TTL for `state`, honoring `workflow`'s `RUNNING` override when the
    /// state is `RUNNING` and the override is present.
    ///
    /// Terminal states (`DONE`, `ERROR`) have no meaningful TTL since no
    /// transition is ever legal from them; callers should not invoke the
    /// supervisor with a terminal `RunState`, but a terminal state falls
    /// back to the longest configured budget rather than panicking.
    pub fn ttl_of(&self, state: State, workflow: Option<&Workflow>) -> u64 {
        match state {
            State::New => self.new_millis,
            State::Queued => self.queued_millis,
            State::Prepare => self.prepare_millis,
            State::Submitting => self.submitting_millis,
            State::Submitted => self.submitted_millis,
            State::Running => workflow
                .and_then(|wf| wf.running_timeout_millis)
                .unwrap_or(self.running_millis),
            State::Terminated => self.terminated_millis,
            State::Failed => self.failed_millis,
            State::Done | State::Error => u64::MAX,
        }
    }
}

/// Stateless dwell-time policy over a [`TimeoutConfig`].
#[derive(Debug, Clone, Default)]
pub struct TimeoutSupervisor {
    config: TimeoutConfig,
}

impl TimeoutSupervisor {
    pub fn new(config: TimeoutConfig) -> Self {
        Self { config }
    }

    /// Evaluates `run_state`'s dwell time against its TTL and, if exceeded,
    /// posts a `timeout` event tagged with the observed counter.
    ///
    /// Returns `Ok(None)` both when the TTL hasn't elapsed yet and when it
    /// has but the post was dropped as stale by the state manager — the two
    /// are distinguished only by the log line, never by the return value,
    /// since callers treat "nothing to do right now" the same either way.
    pub fn check(
        &self,
        run_state: &RunState,
        lookup: &dyn WorkflowLookup,
        clock: &dyn Clock,
        handle: &dyn StateManagerHandle,
    ) -> Result<Option<RunState>, crate::error::SupervisorError> {
        let workflow = lookup.lookup(&run_state.workflow_instance.workflow_id);
        let ttl = self.config.ttl_of(run_state.state, workflow.as_ref());
        let now = clock.epoch_ms();
        let dwell = now.saturating_sub(run_state.timestamp_millis);

        tracing::debug!(
            instance = %run_state.workflow_instance,
            state = %run_state.state,
            dwell_millis = dwell,
            ttl_millis = ttl,
            "evaluating dwell time"
        );

        if dwell < ttl {
            return Ok(None);
        }

        tracing::info!(
            instance = %run_state.workflow_instance,
            counter = run_state.counter,
            dwell_millis = dwell,
            "posting timeout event"
        );

        handle.receive_ignore_closed(
            Event::Timeout {
                instance: run_state.workflow_instance.clone(),
            },
            run_state.counter,
        )
    }
}

/// Wires [`TimeoutSupervisor`] in as the one [`OutputHandler`] that lives
/// inside this core — the exception spec.md §6 carves out alongside the
/// otherwise-external output handlers ("except for the `TimeoutHandler`,
/// which lives in this core"). Registered like any other output handler, it
/// is invoked on every successful transition and, per spec.md §2, evaluates
/// dwell time on every state entry.
pub struct TimeoutHandler {
    supervisor: TimeoutSupervisor,
    lookup: Arc<dyn WorkflowLookup>,
    clock: Arc<dyn Clock>,
    handle: Arc<dyn StateManagerHandle>,
}

impl TimeoutHandler {
    pub fn new(
        supervisor: TimeoutSupervisor,
        lookup: Arc<dyn WorkflowLookup>,
        clock: Arc<dyn Clock>,
        handle: Arc<dyn StateManagerHandle>,
    ) -> Self {
        Self {
            supervisor,
            lookup,
            clock,
            handle,
        }
    }
}

impl OutputHandler for TimeoutHandler {
    /// Delegates straight to `TimeoutSupervisor::check` against this
    /// handler's own lookup, clock, and state-manager handle.
    /// `OutputHandler::transition_into` has no error channel, so a
    /// stale-event or core error from `check` is logged and swallowed
    /// rather than propagated.
    fn transition_into(&self, run_state: &RunState) {
        if let Err(err) = self.supervisor.check(
            run_state,
            self.lookup.as_ref(),
            self.clock.as_ref(),
            self.handle.as_ref(),
        ) {
            tracing::warn!(
                instance = %run_state.workflow_instance,
                error = %err,
                "timeout supervisor check failed"
            );
        }
    }
}

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;
