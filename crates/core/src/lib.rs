// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! flowstate-core: the per-workflow-instance run-state machine.
//!
//! [`run_state::RunState`] is a pure transducer — `(state, data, event) ->
//! (state', data')` — replayable from a persisted event log. Everything
//! else in this crate is either a value type it's built from ([`data`],
//! [`event`], [`state`], [`workflow_instance`]), ambient tooling it shares
//! with the rest of the scheduler ([`clock`], [`id`], [`error`]), or the
//! small policy that watches it from outside ([`timeout`]) and the seams
//! that policy talks through ([`state_manager`], [`output`],
//! [`workflow`]).

pub mod clock;
pub mod data;
pub mod error;
pub mod event;
pub mod exit_code;
pub mod id;
pub mod output;
pub mod run_state;
pub mod state;
pub mod state_manager;
pub mod timeout;
pub mod workflow;
pub mod workflow_instance;

pub use clock::{Clock, FakeClock, SystemClock};
pub use data::{ExecutionDescription, Message, MessageLevel, StateData, Trigger};
pub use error::{ConfigError, CoreError, IllegalTransition, StaleEvent, SupervisorError};
pub use event::Event;
pub use exit_code::{
    exit_cost, message_level, resets_consecutive_failures, MISSING_DEPS, SUCCESS,
    UNKNOWN_ERROR, UNRECOVERABLE_FAILURE,
};
pub use id::ShortId;
pub use output::OutputHandler;
pub use run_state::{RunState, COUNTER_SENTINEL};
pub use state::State;
pub use state_manager::StateManagerHandle;
pub use timeout::{TimeoutConfig, TimeoutHandler, TimeoutSupervisor};
pub use workflow::{Workflow, WorkflowLookup};
pub use workflow_instance::{ExecutionId, RunnerId, WorkflowId, WorkflowInstance};

#[cfg(any(test, feature = "test-support"))]
pub use output::RecordingOutputHandler;
