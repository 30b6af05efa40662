// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events that drive [`crate::run_state::RunState::transition`].
//!
//! Serializes with `{"type": "event:name", ...fields}` so persisted event
//! logs are self-describing. `time_trigger`, `created`, and `retry` are
//! legacy variants kept only so historical logs replay; new code should
//! prefer `trigger_execution` and `retry_after`.

use crate::data::{ExecutionDescription, Trigger};
use crate::workflow_instance::{ExecutionId, RunnerId, WorkflowInstance};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An event applied to exactly one workflow instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "event:trigger_execution")]
    TriggerExecution {
        instance: WorkflowInstance,
        trigger: Trigger,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parameters: Option<serde_json::Value>,
    },

    /// Legacy: historical logs emit this instead of `trigger_execution`.
    #[serde(rename = "event:time_trigger")]
    TimeTrigger { instance: WorkflowInstance },

    #[serde(rename = "event:info")]
    Info {
        instance: WorkflowInstance,
        message: String,
    },

    #[serde(rename = "event:dequeue")]
    Dequeue {
        instance: WorkflowInstance,
        #[serde(default)]
        resource_ids: BTreeSet<String>,
    },

    #[serde(rename = "event:submit")]
    Submit {
        instance: WorkflowInstance,
        execution_description: ExecutionDescription,
        execution_id: ExecutionId,
    },

    #[serde(rename = "event:submitted")]
    Submitted {
        instance: WorkflowInstance,
        execution_id: ExecutionId,
        runner_id: RunnerId,
    },

    /// Legacy: historical logs emit this instead of `submit` + `submitted`.
    #[serde(rename = "event:created")]
    Created {
        instance: WorkflowInstance,
        execution_id: ExecutionId,
        docker_image: String,
    },

    #[serde(rename = "event:started")]
    Started { instance: WorkflowInstance },

    #[serde(rename = "event:terminate")]
    Terminate {
        instance: WorkflowInstance,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        exit_code: Option<i32>,
    },

    #[serde(rename = "event:run_error")]
    RunError {
        instance: WorkflowInstance,
        message: String,
    },

    #[serde(rename = "event:success")]
    Success { instance: WorkflowInstance },

    #[serde(rename = "event:retry_after")]
    RetryAfter {
        instance: WorkflowInstance,
        delay_millis: u64,
    },

    /// Legacy: transitions to `PREPARE` without mutating data, unlike
    /// `retry_after`. Prefer `retry_after` for new code.
    #[serde(rename = "event:retry")]
    Retry { instance: WorkflowInstance },

    #[serde(rename = "event:stop")]
    Stop { instance: WorkflowInstance },

    #[serde(rename = "event:timeout")]
    Timeout { instance: WorkflowInstance },

    #[serde(rename = "event:halt")]
    Halt { instance: WorkflowInstance },
}

impl Event {
    /// The workflow instance this event applies to.
    pub fn instance(&self) -> &WorkflowInstance {
        match self {
            Event::TriggerExecution { instance, .. }
            | Event::TimeTrigger { instance }
            | Event::Info { instance, .. }
            | Event::Dequeue { instance, .. }
            | Event::Submit { instance, .. }
            | Event::Submitted { instance, .. }
            | Event::Created { instance, .. }
            | Event::Started { instance }
            | Event::Terminate { instance, .. }
            | Event::RunError { instance, .. }
            | Event::Success { instance }
            | Event::RetryAfter { instance, .. }
            | Event::Retry { instance }
            | Event::Stop { instance }
            | Event::Timeout { instance }
            | Event::Halt { instance } => instance,
        }
    }

    /// Event name for log spans (e.g. "terminate", "run_error").
    pub fn name(&self) -> &'static str {
        match self {
            Event::TriggerExecution { .. } => "trigger_execution",
            Event::TimeTrigger { .. } => "time_trigger",
            Event::Info { .. } => "info",
            Event::Dequeue { .. } => "dequeue",
            Event::Submit { .. } => "submit",
            Event::Submitted { .. } => "submitted",
            Event::Created { .. } => "created",
            Event::Started { .. } => "started",
            Event::Terminate { .. } => "terminate",
            Event::RunError { .. } => "run_error",
            Event::Success { .. } => "success",
            Event::RetryAfter { .. } => "retry_after",
            Event::Retry { .. } => "retry",
            Event::Stop { .. } => "stop",
            Event::Timeout { .. } => "timeout",
            Event::Halt { .. } => "halt",
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
