// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable per-instance bookkeeping carried alongside a [`State`](crate::state::State).
//!
//! `StateData` never mutates in place; every transition derives a new value
//! with the handful of fields it touches replaced via the `with_*` methods
//! below, in the same spirit as the rest of this crate's value types.

use crate::workflow_instance::{ExecutionId, RunnerId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// What caused a run to be triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Trigger {
    Natural,
    Backfill,
    AdHoc,
    Unknown(String),
}

impl Trigger {
    /// Flat string form, retained for backward compatibility with legacy
    /// consumers that only understand `trigger_id`.
    pub fn flatten(&self) -> String {
        match self {
            Trigger::Natural => "NATURAL".to_string(),
            Trigger::Backfill => "BACKFILL".to_string(),
            Trigger::AdHoc => "AD_HOC".to_string(),
            Trigger::Unknown(tag) => tag.clone(),
        }
    }
}

/// Record of image, args, and commit info committed at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionDescription {
    pub image: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl ExecutionDescription {
    /// Build a minimal description from just an image name, the shape the
    /// legacy `created` event carries.
    pub fn for_image(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            args: Vec::new(),
            commit: None,
        }
    }
}

/// Severity of an appended [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageLevel::Info => write!(f, "INFO"),
            MessageLevel::Warning => write!(f, "WARNING"),
            MessageLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A single appended log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: MessageLevel,
    pub text: String,
}

impl Message {
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// Immutable accumulated bookkeeping for one workflow instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Trigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_parameters: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_id: Option<ExecutionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_description: Option<ExecutionDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner_id: Option<RunnerId>,
    #[serde(default)]
    pub resource_ids: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_delay_millis: Option<u64>,
    #[serde(default)]
    pub tries: u32,
    #[serde(default)]
    pub consecutive_failures: u32,
    #[serde(default)]
    pub retry_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_exit: Option<i32>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl StateData {
    /// All optionals absent, empty sequences, counters at zero.
    pub fn zero() -> Self {
        Self {
            trigger: None,
            trigger_id: None,
            trigger_parameters: None,
            execution_id: None,
            execution_description: None,
            runner_id: None,
            resource_ids: BTreeSet::new(),
            retry_delay_millis: None,
            tries: 0,
            consecutive_failures: 0,
            retry_cost: 0.0,
            last_exit: None,
            messages: Vec::new(),
        }
    }

    pub fn with_trigger(mut self, trigger: Trigger, trigger_id: String) -> Self {
        self.trigger = Some(trigger);
        self.trigger_id = Some(trigger_id);
        self
    }

    pub fn with_trigger_parameters(mut self, parameters: serde_json::Value) -> Self {
        self.trigger_parameters = Some(parameters);
        self
    }

    pub fn with_execution_id(mut self, execution_id: ExecutionId) -> Self {
        self.execution_id = Some(execution_id);
        self
    }

    pub fn clear_execution_id(mut self) -> Self {
        self.execution_id = None;
        self
    }

    pub fn with_execution_description(mut self, description: ExecutionDescription) -> Self {
        self.execution_description = Some(description);
        self
    }

    pub fn clear_execution_description(mut self) -> Self {
        self.execution_description = None;
        self
    }

    pub fn with_runner_id(mut self, runner_id: RunnerId) -> Self {
        self.runner_id = Some(runner_id);
        self
    }

    pub fn with_resource_ids(mut self, resource_ids: BTreeSet<String>) -> Self {
        self.resource_ids = resource_ids;
        self
    }

    pub fn clear_resource_ids(mut self) -> Self {
        self.resource_ids = BTreeSet::new();
        self
    }

    pub fn with_retry_delay_millis(mut self, delay_millis: Option<u64>) -> Self {
        self.retry_delay_millis = delay_millis;
        self
    }

    pub fn with_tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    pub fn with_consecutive_failures(mut self, consecutive_failures: u32) -> Self {
        self.consecutive_failures = consecutive_failures;
        self
    }

    pub fn with_retry_cost(mut self, retry_cost: f64) -> Self {
        self.retry_cost = retry_cost;
        self
    }

    pub fn with_last_exit(mut self, last_exit: Option<i32>) -> Self {
        self.last_exit = last_exit;
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

impl Default for StateData {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
