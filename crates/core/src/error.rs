// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the transducer and the state-manager boundary.
//!
//! Kept as two enums rather than one: `IllegalTransition` is raised deep
//! inside the pure [`crate::run_state::RunState::transition`], which never
//! sees a caller-supplied counter, while `StaleEvent` is raised only at the
//! optimistic-concurrency boundary the timeout supervisor talks to.
//! `ApplicationFailure` has no corresponding variant here — it is modeled as
//! the `run_error` event, never as a Rust error.

use crate::event::Event;
use crate::state::State;
use crate::workflow_instance::WorkflowInstance;
use thiserror::Error;

/// Raised by `transition` when the current state does not admit the event.
///
/// A structural bug in the caller (a stale or out-of-order event), not an
/// application failure — never retried by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("illegal transition: {instance} cannot accept {event} while in {from_state}")]
pub struct IllegalTransition {
    pub instance: WorkflowInstance,
    pub from_state: State,
    pub event: String,
}

impl IllegalTransition {
    pub fn new(instance: WorkflowInstance, from_state: State, event: &Event) -> Self {
        Self {
            instance,
            from_state,
            event: event.name().to_string(),
        }
    }
}

/// Errors raised by the pure transducer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error(transparent)]
    IllegalTransition(#[from] IllegalTransition),
}

/// Raised by `receive_ignore_closed` when the caller-supplied counter does
/// not match the current counter. The caller may drop or retry; the timeout
/// supervisor always drops.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("stale event for {instance}: expected counter {expected}, instance is at {actual}")]
pub struct StaleEvent {
    pub instance: WorkflowInstance,
    pub expected: i64,
    pub actual: i64,
}

/// Errors raised at the state-manager boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SupervisorError {
    #[error(transparent)]
    StaleEvent(#[from] StaleEvent),
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Raised while loading a [`crate::timeout::TimeoutConfig`] from TOML.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid timeout config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
