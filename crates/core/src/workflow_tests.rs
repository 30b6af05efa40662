// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_workflow_has_no_running_override() {
    let wf = Workflow::new(WorkflowId::new("wf"));
    assert_eq!(wf.running_timeout_millis, None);
}

#[test]
fn with_running_timeout_millis_sets_the_override() {
    let wf = Workflow::new(WorkflowId::new("wf")).with_running_timeout_millis(60_000);
    assert_eq!(wf.running_timeout_millis, Some(60_000));
}

#[test]
fn closures_implement_workflow_lookup() {
    let known = Workflow::new(WorkflowId::new("wf")).with_running_timeout_millis(1_000);
    let lookup = |id: &WorkflowId| -> Option<Workflow> {
        if id.as_str() == "wf" {
            Some(known.clone())
        } else {
            None
        }
    };
    assert_eq!(lookup.lookup(&WorkflowId::new("wf")), Some(known));
    assert_eq!(lookup.lookup(&WorkflowId::new("other")), None);
}
