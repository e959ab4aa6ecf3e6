//! Model-based property tests.
//!
//! These tests generate random operation sequences and verify that the real
//! gate behaves identically to the reference model.
//!
//! # Architecture
//!
//! ```text
//! proptest generates: Vec<Operation>
//!                          │
//!           ┌──────────────┼──────────────┐
//!           ▼              ▼              ▼
//!      ModelGate      RealGate        Compare
//!      (reference)   (SubmissionGate) Observables
//! ```

use proptest::prelude::*;
use wordgate_core::{GateAction, GateConfig, GateEvent, GateState, NoticeKind, SubmissionGate};
use wordgate_harness::{
    GuessShape, ModelGate, ObservableGate, Operation, OperationResult, Verdict,
};

/// Real gate wrapper that mirrors ModelGate's interface.
///
/// Actions are interpreted the way a host would, into the same observable
/// state the model keeps.
struct RealGate {
    gate: SubmissionGate,
    obs: ObservableGate,
}

impl RealGate {
    fn new() -> Self {
        Self {
            gate: SubmissionGate::new(GateConfig::default()),
            obs: ObservableGate { control_enabled: true, ..ObservableGate::default() },
        }
    }

    fn observable(&self) -> ObservableGate {
        let mut obs = self.obs;
        obs.latest_attempt = self.gate.latest_attempt();
        obs.checking = match self.gate.state() {
            GateState::Checking { attempt } => Some(attempt),
            _ => None,
        };
        obs.submitted = matches!(self.gate.state(), GateState::Submitted { .. });
        obs
    }

    fn apply(&mut self, op: &Operation) -> OperationResult {
        let latest = self.gate.latest_attempt();
        let event = match *op {
            Operation::Submit { shape } => GateEvent::Submit { raw: shape.to_raw() },
            Operation::Resolve { verdict, stale } => GateEvent::ValidationResolved {
                attempt: if stale { latest.saturating_sub(1) } else { latest },
                outcome: verdict.to_outcome(),
            },
            Operation::FireReset { back } => {
                GateEvent::ResetDue { attempt: latest.saturating_sub(u64::from(back % 3)) }
            },
        };

        match self.gate.handle(event) {
            Ok(actions) => {
                actions.iter().for_each(|action| self.interpret(action));
                OperationResult::Ok
            },
            Err(_) => OperationResult::Rejected,
        }
    }

    fn interpret(&mut self, action: &GateAction) {
        match action {
            GateAction::ShowNotice { kind, .. } => self.obs.notice = Some(*kind),
            GateAction::ClearNotice => self.obs.notice = None,
            GateAction::LockControl { .. } => self.obs.control_enabled = false,
            GateAction::UnlockControl { .. } => self.obs.control_enabled = true,
            GateAction::Validate { .. } => self.obs.validations += 1,
            GateAction::SubmitNative { .. } => self.obs.native_submits += 1,
            GateAction::FocusInput | GateAction::ScheduleReset { .. } | GateAction::Log { .. } => {
            },
        }
    }
}

/// Strategy for generating field content.
fn shape_strategy() -> impl Strategy<Value = GuessShape> {
    (0..9u8, any::<bool>(), any::<bool>()).prop_map(|(letters, padded, lowercase)| GuessShape {
        letters,
        padded,
        lowercase,
    })
}

fn verdict_strategy() -> impl Strategy<Value = Verdict> {
    prop_oneof![
        3 => Just(Verdict::Valid),
        4 => Just(Verdict::Invalid),
        1 => Just(Verdict::NetworkError),
        1 => Just(Verdict::ServerError),
        1 => Just(Verdict::MalformedBody),
    ]
}

/// Strategy for generating operations.
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        // Weight towards submissions and resolutions
        4 => shape_strategy().prop_map(|shape| Operation::Submit { shape }),
        3 => (verdict_strategy(), prop::bool::weighted(0.2))
            .prop_map(|(verdict, stale)| Operation::Resolve { verdict, stale }),
        2 => any::<u8>().prop_map(|back| Operation::FireReset { back }),
    ]
}

proptest! {
    /// Verify that results and observable state match after every operation.
    #[test]
    fn prop_model_matches_real(ops in prop::collection::vec(operation_strategy(), 0..60)) {
        let mut model = ModelGate::new();
        let mut real = RealGate::new();

        for (i, op) in ops.iter().enumerate() {
            let model_result = model.apply(op);
            let real_result = real.apply(op);

            prop_assert_eq!(
                model_result,
                real_result,
                "Divergence at operation {}: {:?}",
                i, op
            );
            prop_assert_eq!(
                model.observable(),
                real.observable(),
                "State divergence after operation {}: {:?}",
                i, op
            );
        }
    }

    /// Verify gate invariants hold after any operation sequence.
    #[test]
    fn prop_gate_invariants(ops in prop::collection::vec(operation_strategy(), 0..100)) {
        let mut real = RealGate::new();

        for op in &ops {
            let _ = real.apply(op);
            let obs = real.observable();

            // Invariant: Control is disabled exactly while checking or after release
            prop_assert_eq!(obs.control_enabled, obs.checking.is_none() && !obs.submitted);

            // Invariant: The form is released at most once
            prop_assert!(obs.native_submits <= 1);
            prop_assert_eq!(obs.native_submits == 1, obs.submitted);

            // Invariant: Every release was preceded by a validation
            prop_assert!(obs.validations >= obs.native_submits);
        }
    }

    /// Verify that a guess of the wrong length never reaches the validator.
    #[test]
    fn prop_wrong_length_never_validates(shape in shape_strategy()) {
        prop_assume!(shape.len() != 5);

        let mut real = RealGate::new();
        let accepted = real.apply(&Operation::Submit { shape }).is_ok();
        prop_assert!(accepted);

        let obs = real.observable();
        prop_assert_eq!(obs.validations, 0);
        prop_assert!(obs.control_enabled);
        prop_assert_eq!(obs.notice, Some(NoticeKind::LengthWarning));
    }

    /// Verify that five letters always produce exactly one validation.
    #[test]
    fn prop_five_letters_validate_once(padded in any::<bool>(), lowercase in any::<bool>()) {
        let shape = GuessShape { letters: 5, padded, lowercase };

        let mut real = RealGate::new();
        let accepted = real.apply(&Operation::Submit { shape }).is_ok();
        prop_assert!(accepted);
        prop_assert_eq!(real.apply(&Operation::Submit { shape }), OperationResult::Rejected);

        let obs = real.observable();
        prop_assert_eq!(obs.validations, 1);
        prop_assert!(!obs.control_enabled);
    }
}

#[cfg(test)]
mod smoke_tests {
    use super::*;

    /// Basic smoke test for the real wrapper.
    #[test]
    fn real_gate_basic_operations() {
        let mut real = RealGate::new();
        let five = GuessShape { letters: 5, padded: false, lowercase: false };

        // Short guess warns
        let result = real.apply(&Operation::Submit {
            shape: GuessShape { letters: 2, padded: false, lowercase: true },
        });
        assert!(result.is_ok());
        assert_eq!(real.observable().notice, Some(NoticeKind::LengthWarning));

        // Its reset clears the warning
        assert!(real.apply(&Operation::FireReset { back: 0 }).is_ok());
        assert_eq!(real.observable().notice, None);

        // Invalid word unlocks
        real.apply(&Operation::Submit { shape: five });
        real.apply(&Operation::Resolve { verdict: Verdict::Invalid, stale: false });
        assert!(real.observable().control_enabled);

        // Stale result is refused
        real.apply(&Operation::Submit { shape: five });
        let result = real.apply(&Operation::Resolve { verdict: Verdict::Valid, stale: true });
        assert_eq!(result, OperationResult::Rejected);

        // Transport failure releases the form
        real.apply(&Operation::Resolve { verdict: Verdict::NetworkError, stale: false });
        assert!(real.observable().submitted);
        assert_eq!(real.observable().native_submits, 1);
    }
}
