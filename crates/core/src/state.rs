// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The ten states a [`crate::run_state::RunState`] can occupy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in a workflow instance's lifecycle.
///
/// `Done` and `Error` are terminal: once entered, no further transition is
/// legal (see [`State::is_terminal`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    New,
    Queued,
    Prepare,
    Submitting,
    Submitted,
    Running,
    Terminated,
    Failed,
    Error,
    Done,
}

impl State {
    /// Whether this state admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Done | State::Error)
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::New => write!(f, "NEW"),
            State::Queued => write!(f, "QUEUED"),
            State::Prepare => write!(f, "PREPARE"),
            State::Submitting => write!(f, "SUBMITTING"),
            State::Submitted => write!(f, "SUBMITTED"),
            State::Running => write!(f, "RUNNING"),
            State::Terminated => write!(f, "TERMINATED"),
            State::Failed => write!(f, "FAILED"),
            State::Error => write!(f, "ERROR"),
            State::Done => write!(f, "DONE"),
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
