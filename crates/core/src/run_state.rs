// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The run-state transducer: `(state, data, event) -> (state', data')`.
//!
//! [`RunState`] is the only mutable-feeling thing in this crate, and it
//! isn't — every [`RunState::transition`] call returns a new value rather
//! than mutating `self`. The dispatch table in [`apply`] below is the
//! transition relation from the workflow-instance lifecycle: one match arm
//! per row, as a flat tagged-variant match rather than a visitor.

use crate::clock::Clock;
use crate::data::{ExecutionDescription, Message, MessageLevel, StateData, Trigger};
use crate::error::{CoreError, IllegalTransition};
use crate::event::Event;
use crate::exit_code::{exit_cost, message_level, resets_consecutive_failures};
use crate::state::State;
use crate::workflow_instance::WorkflowInstance;
use serde::{Deserialize, Serialize};

/// Counter value meaning "no events processed yet". The first successful
/// transition moves the counter to `0`.
pub const COUNTER_SENTINEL: i64 = -1;

/// `(workflowInstance, state, timestampMillis, data, counter)`.
///
/// Immutable. `counter` is monotone non-decreasing and strictly increases on
/// every successful transition; `timestampMillis` reflects the clock value at
/// the transition that produced this value. If `state.is_terminal()`, no
/// transition is legal from this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    pub workflow_instance: WorkflowInstance,
    pub state: State,
    pub timestamp_millis: u64,
    pub data: StateData,
    pub counter: i64,
}

impl RunState {
    /// A fresh instance in state `NEW` with zeroed data and the counter at
    /// its sentinel.
    pub fn fresh<C: Clock>(instance: WorkflowInstance, clock: &C) -> Self {
        Self {
            workflow_instance: instance,
            state: State::New,
            timestamp_millis: clock.epoch_ms(),
            data: StateData::zero(),
            counter: COUNTER_SENTINEL,
        }
    }

    /// Restore a value from persistence. Does not validate that `state` and
    /// `data` are mutually consistent — that's the persistence layer's job.
    pub fn create(
        instance: WorkflowInstance,
        state: State,
        data: StateData,
        timestamp_millis: u64,
        counter: i64,
    ) -> Self {
        Self {
            workflow_instance: instance,
            state,
            timestamp_millis,
            data,
            counter,
        }
    }

    /// Apply `event`, returning a new value with updated `state`, `data`,
    /// `timestamp_millis = clock.epoch_ms()`, and `counter = counter + 1`.
    ///
    /// Fails with [`CoreError::IllegalTransition`] when the current state
    /// does not admit `event`. Never blocks; the only clock read happens
    /// here, once, when building the successor value.
    pub fn transition<C: Clock>(&self, event: Event, clock: &C) -> Result<RunState, CoreError> {
        let (next_state, next_data) = apply(&self.workflow_instance, self.state, &self.data, event)?;
        Ok(RunState {
            workflow_instance: self.workflow_instance.clone(),
            state: next_state,
            timestamp_millis: clock.epoch_ms(),
            data: next_data,
            counter: self.counter + 1,
        })
    }
}

/// The transition relation: given the current `state` and an `event`
/// variant, yields the successor `state` and the data delta. Any
/// `(state, event)` pair not covered below raises [`IllegalTransition`].
fn apply(
    instance: &WorkflowInstance,
    state: State,
    data: &StateData,
    event: Event,
) -> Result<(State, StateData), IllegalTransition> {
    use Event::*;
    use State::*;

    if state.is_terminal() {
        return Err(IllegalTransition::new(instance.clone(), state, &event));
    }

    match (state, event) {
        (New, TriggerExecution {
            trigger,
            parameters,
            ..
        }) => {
            let trigger_id = trigger.flatten();
            let mut next = data.clone().with_trigger(trigger, trigger_id);
            if let Some(parameters) = parameters {
                next = next.with_trigger_parameters(parameters);
            }
            Ok((Queued, next))
        }

        (New, TimeTrigger { .. }) => {
            let unknown = Trigger::Unknown("UNKNOWN".to_string());
            let next = data
                .clone()
                .with_trigger(unknown.clone(), unknown.flatten());
            Ok((Submitted, next))
        }

        (Queued, Info { message, .. }) => {
            let next = data
                .clone()
                .with_message(Message::new(MessageLevel::Info, message));
            Ok((Queued, next))
        }

        (Queued, Dequeue { resource_ids, .. }) => {
            let next = data
                .clone()
                .with_retry_delay_millis(None)
                .with_resource_ids(resource_ids);
            Ok((Prepare, next))
        }

        (Queued, Submit { execution_description, execution_id, .. })
        | (Prepare, Submit { execution_description, execution_id, .. }) => {
            let next = data
                .clone()
                .with_execution_description(execution_description)
                .with_execution_id(execution_id);
            Ok((Submitting, next))
        }

        (Submitting, Submitted { execution_id, runner_id, .. }) => {
            let resolved_execution_id = data.execution_id.clone().unwrap_or(execution_id);
            let next = data
                .clone()
                .with_tries(data.tries + 1)
                .with_execution_id(resolved_execution_id)
                .with_runner_id(runner_id);
            Ok((Submitted, next))
        }

        (Prepare, Created { execution_id, docker_image, .. })
        | (Queued, Created { execution_id, docker_image, .. }) => {
            let next = data
                .clone()
                .with_execution_id(execution_id)
                .with_execution_description(ExecutionDescription::for_image(docker_image))
                .with_tries(data.tries + 1);
            Ok((Submitted, next))
        }

        (Submitted, Started { .. }) | (Prepare, Started { .. }) => Ok((Running, data.clone())),

        (Running, Terminate { exit_code, .. }) => {
            let consecutive_failures = if resets_consecutive_failures(exit_code) {
                0
            } else {
                data.consecutive_failures + 1
            };
            let exit_text = exit_code
                .map(|code| code.to_string())
                .unwrap_or_else(|| "none".to_string());
            let next = data
                .clone()
                .with_retry_cost(data.retry_cost + exit_cost(exit_code))
                .with_last_exit(exit_code)
                .with_consecutive_failures(consecutive_failures)
                .with_message(Message::new(
                    message_level(exit_code),
                    format!("Exit code: {exit_text}"),
                ));
            Ok((Terminated, next))
        }

        (Queued, RunError { message, .. })
        | (Prepare, RunError { message, .. })
        | (Submitting, RunError { message, .. })
        | (Submitted, RunError { message, .. })
        | (Running, RunError { message, .. }) => {
            let next = data
                .clone()
                .with_retry_cost(data.retry_cost + 1.0)
                .with_last_exit(None)
                .with_consecutive_failures(data.consecutive_failures + 1)
                .with_message(Message::new(MessageLevel::Error, message));
            Ok((Failed, next))
        }

        (Terminated, Success { .. }) => Ok((Done, data.clone())),

        (Terminated, RetryAfter { delay_millis, .. })
        | (Failed, RetryAfter { delay_millis, .. })
        | (Queued, RetryAfter { delay_millis, .. }) => {
            let next = data
                .clone()
                .with_retry_delay_millis(Some(delay_millis))
                .clear_execution_id()
                .clear_execution_description()
                .clear_resource_ids();
            Ok((Queued, next))
        }

        (Terminated, Retry { .. }) | (Failed, Retry { .. }) | (Queued, Retry { .. }) => {
            Ok((Prepare, data.clone()))
        }

        (Terminated, Stop { .. }) | (Failed, Stop { .. }) => Ok((Error, data.clone())),

        // Admin-level interventions bypass predecessor checks (but not the
        // terminal check above).
        (_, Timeout { .. }) => Ok((Failed, data.clone())),
        (_, Halt { .. }) => Ok((Error, data.clone())),

        (from_state, other_event) => {
            Err(IllegalTransition::new(instance.clone(), from_state, &other_event))
        }
    }
}

#[cfg(test)]
#[path = "run_state_tests.rs"]
mod tests;
