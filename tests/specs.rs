//! End-to-end specifications for the run-state machine, exercised only
//! through `flowstate_core`'s public API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use flowstate_core::{
    Event, ExecutionDescription, ExecutionId, FakeClock, MessageLevel, RunState, RunnerId, State,
    TimeoutConfig, TimeoutSupervisor, Workflow, WorkflowId, WorkflowInstance,
};
use std::collections::BTreeSet;

fn instance() -> WorkflowInstance {
    WorkflowInstance::new("nightly-etl", "2026-07-27")
}

#[test]
fn happy_path_reaches_done_with_clean_bookkeeping() {
    let clock = FakeClock::at(0);
    let run = RunState::fresh(instance(), &clock);

    let run = run
        .transition(
            Event::TriggerExecution {
                instance: instance(),
                trigger: flowstate_core::Trigger::Natural,
                parameters: None,
            },
            &clock,
        )
        .expect("new -> queued");
    let run = run
        .transition(
            Event::Dequeue {
                instance: instance(),
                resource_ids: BTreeSet::from(["gpu-pool".to_string()]),
            },
            &clock,
        )
        .expect("queued -> prepare");
    let run = run
        .transition(
            Event::Submit {
                instance: instance(),
                execution_description: ExecutionDescription::for_image("etl:2026.07"),
                execution_id: ExecutionId::new("exec-1"),
            },
            &clock,
        )
        .expect("prepare -> submitting");
    let run = run
        .transition(
            Event::Submitted {
                instance: instance(),
                execution_id: ExecutionId::new("exec-1"),
                runner_id: RunnerId::new("runner-A"),
            },
            &clock,
        )
        .expect("submitting -> submitted");
    let run = run
        .transition(Event::Started { instance: instance() }, &clock)
        .expect("submitted -> running");
    let run = run
        .transition(
            Event::Terminate {
                instance: instance(),
                exit_code: Some(0),
            },
            &clock,
        )
        .expect("running -> terminated");
    let run = run
        .transition(Event::Success { instance: instance() }, &clock)
        .expect("terminated -> done");

    assert_eq!(run.state, State::Done);
    assert_eq!(run.data.tries, 1);
    assert_eq!(run.data.consecutive_failures, 0);
    assert_eq!(run.data.retry_cost, 0.0);
    assert_eq!(run.data.last_exit, Some(0));
    assert_eq!(run.data.messages.last().unwrap().level, MessageLevel::Info);
}

#[test]
fn missing_dependency_retries_without_burning_the_failure_streak() {
    let clock = FakeClock::at(0);
    let run = RunState::create(
        instance(),
        State::Queued,
        flowstate_core::StateData::zero(),
        0,
        0,
    );

    let run = run
        .transition(
            Event::Dequeue {
                instance: instance(),
                resource_ids: BTreeSet::new(),
            },
            &clock,
        )
        .unwrap();
    let run = run
        .transition(
            Event::Submit {
                instance: instance(),
                execution_description: ExecutionDescription::for_image("etl:2026.07"),
                execution_id: ExecutionId::new("e1"),
            },
            &clock,
        )
        .unwrap();
    let run = run
        .transition(
            Event::Submitted {
                instance: instance(),
                execution_id: ExecutionId::new("e1"),
                runner_id: RunnerId::new("rA"),
            },
            &clock,
        )
        .unwrap();
    let run = run
        .transition(Event::Started { instance: instance() }, &clock)
        .unwrap();
    let run = run
        .transition(
            Event::Terminate {
                instance: instance(),
                exit_code: Some(20),
            },
            &clock,
        )
        .unwrap();
    let run = run
        .transition(
            Event::RetryAfter {
                instance: instance(),
                delay_millis: 30_000,
            },
            &clock,
        )
        .unwrap();

    assert_eq!(run.state, State::Queued);
    assert_eq!(run.data.consecutive_failures, 0);
    assert_eq!(run.data.retry_cost, 0.1);
    assert_eq!(run.data.retry_delay_millis, Some(30_000));
    assert!(run.data.execution_id.is_none());
}

#[test]
fn persisted_run_state_round_trips_through_create() {
    let clock = FakeClock::at(12_345);
    let run = RunState::fresh(instance(), &clock);
    let run = run
        .transition(
            Event::TriggerExecution {
                instance: instance(),
                trigger: flowstate_core::Trigger::Backfill,
                parameters: Some(serde_json::json!({"window": "2026-07-01..2026-07-27"})),
            },
            &clock,
        )
        .unwrap();

    let restored = RunState::create(
        run.workflow_instance.clone(),
        run.state,
        run.data.clone(),
        run.timestamp_millis,
        run.counter,
    );

    similar_asserts::assert_eq!(restored, run);
}

#[test]
fn admin_halt_seals_the_instance_against_further_events() {
    let clock = FakeClock::at(0);
    let run = RunState::create(
        instance(),
        State::Running,
        flowstate_core::StateData::zero(),
        0,
        3,
    );
    let run = run
        .transition(Event::Halt { instance: instance() }, &clock)
        .unwrap();
    assert_eq!(run.state, State::Error);

    let rejected = run.transition(Event::Success { instance: instance() }, &clock);
    assert!(rejected.is_err());
}

#[test]
fn run_error_mid_flight_lands_in_failed_with_an_error_message() {
    let clock = FakeClock::at(0);
    let run = RunState::create(
        instance(),
        State::Submitted,
        flowstate_core::StateData::zero(),
        0,
        0,
    );
    let run = run
        .transition(
            Event::RunError {
                instance: instance(),
                message: "executor unreachable".to_string(),
            },
            &clock,
        )
        .unwrap();

    assert_eq!(run.state, State::Failed);
    assert_eq!(run.data.consecutive_failures, 1);
    assert_eq!(run.data.retry_cost, 1.0);
    assert!(run.data.last_exit.is_none());
    assert_eq!(
        run.data.messages.last().unwrap().text,
        "executor unreachable"
    );
}

#[test]
fn timeout_supervisor_posts_exactly_once_past_the_configured_ttl() {
    let mut config = TimeoutConfig::default();
    config.running_millis = 60_000;
    let supervisor = TimeoutSupervisor::new(config);

    let run_state = RunState::create(
        instance(),
        State::Running,
        flowstate_core::StateData::zero(),
        0,
        9,
    );

    struct OneShotHandle {
        posted: std::sync::Mutex<u32>,
        reply: RunState,
    }
    impl flowstate_core::StateManagerHandle for OneShotHandle {
        fn receive_ignore_closed(
            &self,
            event: Event,
            expected_counter: i64,
        ) -> Result<Option<RunState>, flowstate_core::SupervisorError> {
            assert!(matches!(event, Event::Timeout { .. }));
            assert_eq!(expected_counter, 9);
            *self.posted.lock().unwrap() += 1;
            Ok(Some(self.reply.clone()))
        }
    }

    let state_manager = OneShotHandle {
        posted: std::sync::Mutex::new(0),
        reply: run_state
            .transition(Event::Timeout { instance: instance() }, &FakeClock::at(61_000))
            .unwrap(),
    };

    let clock_before_ttl = FakeClock::at(30_000);
    let result = supervisor
        .check(
            &run_state,
            &(|_: &WorkflowId| None::<Workflow>),
            &clock_before_ttl,
            &state_manager,
        )
        .unwrap();
    assert!(result.is_none());
    assert_eq!(*state_manager.posted.lock().unwrap(), 0);

    let clock_past_ttl = FakeClock::at(61_000);
    let result = supervisor
        .check(
            &run_state,
            &(|_: &WorkflowId| None::<Workflow>),
            &clock_past_ttl,
            &state_manager,
        )
        .unwrap();
    assert!(result.is_some());
    assert_eq!(*state_manager.posted.lock().unwrap(), 1);
}
