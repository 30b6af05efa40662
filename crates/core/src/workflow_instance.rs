// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identity of a workflow instance: a parameterized invocation of a workflow
//! definition.

use serde::{Deserialize, Serialize};
use std::fmt;

crate::define_id! {
    /// Identifier of a workflow definition (not a specific run of it).
    pub struct WorkflowId;
}

crate::define_id! {
    /// Identifier assigned by the downstream executor to a submitted run.
    pub struct ExecutionId;
}

crate::define_id! {
    /// Identifier of the process that accepted a submission.
    pub struct RunnerId;
}

/// Opaque identity of `(workflow id, parameter)`. Never mutated once a
/// [`crate::run_state::RunState`] is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowInstance {
    pub workflow_id: WorkflowId,
    pub parameter: String,
}

impl WorkflowInstance {
    pub fn new(workflow_id: impl Into<WorkflowId>, parameter: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            parameter: parameter.into(),
        }
    }
}

impl fmt::Display for WorkflowInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.workflow_id, self.parameter)
    }
}

#[cfg(test)]
#[path = "workflow_instance_tests.rs"]
mod tests;
