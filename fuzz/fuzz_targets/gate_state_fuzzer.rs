//! Fuzz target for the [`SubmissionGate`] state machine
//!
//! Prevent a guess from reaching the server without a successful or failed
//! check, and the control from ending up in the wrong state.
//!
//! # Strategy
//!
//! - Event sequences: Arbitrary submissions, validation results and resets
//! - Raw field content: Arbitrary strings, including non-ASCII and
//!   whitespace-only input
//! - State probing: Results for the wrong attempt, resets long after their
//!   attempt, submissions while checking or after release
//!
//! # Invariants
//!
//! - `Validate` ONLY for guesses of exactly five UTF-16 units after trimming
//! - `LockControl` immediately precedes every `Validate`
//! - `SubmitNative` at most once, and only late resets are accepted after it
//! - A late reset after release never clears a notice or submits again
//! - `UnlockControl` only when an invalid word is reported
//! - Rejected events leave the state unchanged
//! - NEVER panic on unexpected input

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use wordgate_core::{
    GUESS_LEN, GateAction, GateConfig, GateEvent, GateState, GuessInput, SubmissionGate,
    ValidationOutcome,
};
use wordgate_harness::{Operation, Verdict};

#[derive(Debug, Clone, Arbitrary)]
enum FuzzEvent {
    /// Structured operation shared with the model-based tests.
    Op(Operation),
    /// Submit arbitrary field content.
    RawSubmit(String),
    /// Result for an arbitrary attempt id.
    ResolveAny { attempt: u64, verdict: Verdict },
    /// Reset for an arbitrary attempt id.
    ResetAny { attempt: u64 },
}

fn to_event(gate: &SubmissionGate, event: FuzzEvent) -> GateEvent {
    let latest = gate.latest_attempt();
    match event {
        FuzzEvent::Op(Operation::Submit { shape }) => GateEvent::Submit { raw: shape.to_raw() },
        FuzzEvent::Op(Operation::Resolve { verdict, stale }) => GateEvent::ValidationResolved {
            attempt: if stale { latest.saturating_sub(1) } else { latest },
            outcome: verdict.to_outcome(),
        },
        FuzzEvent::Op(Operation::FireReset { back }) => {
            GateEvent::ResetDue { attempt: latest.saturating_sub(u64::from(back % 3)) }
        },
        FuzzEvent::RawSubmit(raw) => GateEvent::Submit { raw },
        FuzzEvent::ResolveAny { attempt, verdict } => {
            GateEvent::ValidationResolved { attempt, outcome: verdict.to_outcome() }
        },
        FuzzEvent::ResetAny { attempt } => GateEvent::ResetDue { attempt },
    }
}

fuzz_target!(|events: Vec<FuzzEvent>| {
    let mut gate = SubmissionGate::new(GateConfig::default());
    let mut native_submits = 0u32;

    for event in events {
        let previous_state = gate.state();
        let previous_attempt = gate.latest_attempt();
        let event = to_event(&gate, event);

        let submitted_guess_len = match &event {
            GateEvent::Submit { raw } => Some(GuessInput::normalize(raw).len()),
            _ => None,
        };
        let invalid_result = matches!(
            &event,
            GateEvent::ValidationResolved { outcome: ValidationOutcome::Invalid, .. }
        );
        let is_reset = matches!(&event, GateEvent::ResetDue { .. });

        let Ok(actions) = gate.handle(event) else {
            assert_eq!(gate.state(), previous_state, "rejected event changed state");
            assert_eq!(gate.latest_attempt(), previous_attempt);
            continue;
        };

        if let GateState::Submitted { .. } = previous_state {
            // Reset timers are fire-and-forget and may outlive the page.
            assert!(is_reset, "event accepted after the form was released: {actions:?}");
            assert!(
                actions.iter().all(|a| matches!(a, GateAction::Log { .. })),
                "late reset touched a released form: {actions:?}"
            );
            assert_eq!(gate.state(), previous_state);
            continue;
        }

        for (i, action) in actions.iter().enumerate() {
            match action {
                GateAction::Validate { guess, .. } => {
                    assert_eq!(submitted_guess_len, Some(GUESS_LEN));
                    assert_eq!(guess.len(), GUESS_LEN);
                    assert!(
                        i > 0 && matches!(actions[i - 1], GateAction::LockControl { .. }),
                        "validation without lock: {actions:?}"
                    );
                },
                GateAction::SubmitNative { .. } => {
                    native_submits += 1;
                    assert!(matches!(gate.state(), GateState::Submitted { .. }));
                },
                GateAction::UnlockControl { .. } => {
                    assert!(invalid_result, "unlock outside an invalid result: {actions:?}");
                },
                _ => {},
            }
        }

        assert!(native_submits <= 1, "form released twice");
        if let Some(len) = submitted_guess_len {
            let validating = actions.iter().any(|a| matches!(a, GateAction::Validate { .. }));
            assert_eq!(validating, len == GUESS_LEN);
        }
    }
});
