// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn zero_has_no_optionals_and_empty_collections() {
    let data = StateData::zero();
    assert!(data.trigger.is_none());
    assert!(data.trigger_id.is_none());
    assert!(data.execution_id.is_none());
    assert!(data.execution_description.is_none());
    assert!(data.runner_id.is_none());
    assert!(data.resource_ids.is_empty());
    assert!(data.retry_delay_millis.is_none());
    assert_eq!(data.tries, 0);
    assert_eq!(data.consecutive_failures, 0);
    assert_eq!(data.retry_cost, 0.0);
    assert!(data.last_exit.is_none());
    assert!(data.messages.is_empty());
}

#[test]
fn with_trigger_sets_both_trigger_and_flattened_id() {
    let data = StateData::zero().with_trigger(Trigger::Backfill, Trigger::Backfill.flatten());
    assert_eq!(data.trigger, Some(Trigger::Backfill));
    assert_eq!(data.trigger_id.as_deref(), Some("BACKFILL"));
}

#[test]
fn trigger_flatten_unknown_preserves_tag() {
    assert_eq!(Trigger::Unknown("UNKNOWN".to_string()).flatten(), "UNKNOWN");
}

#[test]
fn with_message_appends_without_losing_prior_messages() {
    let data = StateData::zero()
        .with_message(Message::new(MessageLevel::Info, "first"))
        .with_message(Message::new(MessageLevel::Error, "second"));
    assert_eq!(data.messages.len(), 2);
    assert_eq!(data.messages[0].text, "first");
    assert_eq!(data.messages[1].text, "second");
}

#[test]
fn derivation_preserves_untouched_fields() {
    let data = StateData::zero()
        .with_tries(3)
        .with_retry_cost(1.5)
        .with_consecutive_failures(2);
    let next = data.clone().with_last_exit(Some(0));
    assert_eq!(next.tries, data.tries);
    assert_eq!(next.retry_cost, data.retry_cost);
    assert_eq!(next.consecutive_failures, data.consecutive_failures);
    assert_eq!(next.last_exit, Some(0));
}

#[test]
fn clear_execution_id_and_description_reset_to_none() {
    let data = StateData::zero()
        .with_execution_id(ExecutionId::new("exec-1"))
        .with_execution_description(ExecutionDescription::for_image("img:latest"));
    let cleared = data.clear_execution_id().clear_execution_description();
    assert!(cleared.execution_id.is_none());
    assert!(cleared.execution_description.is_none());
}

#[test]
fn execution_description_for_image_has_no_args_or_commit() {
    let desc = ExecutionDescription::for_image("img:latest");
    assert_eq!(desc.image, "img:latest");
    assert!(desc.args.is_empty());
    assert!(desc.commit.is_none());
}

#[test]
fn serde_roundtrip_preserves_absence_vs_zero() {
    let zero = StateData::zero();
    let json = serde_json::to_string(&zero).unwrap();
    let back: StateData = serde_json::from_str(&json).unwrap();
    assert_eq!(back, zero);
    assert!(back.last_exit.is_none());

    let with_zero_exit = zero.with_last_exit(Some(0));
    let json2 = serde_json::to_string(&with_zero_exit).unwrap();
    let back2: StateData = serde_json::from_str(&json2).unwrap();
    assert_eq!(back2.last_exit, Some(0));
}
