//! Model gate.

use wordgate_core::{GUESS_LEN, NoticeKind};

use super::operation::{Operation, OperationResult, Verdict};

/// Observable state for oracle comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ObservableGate {
    /// Latest attempt id (0 before the first submit).
    pub latest_attempt: u64,
    /// Attempt awaiting validation.
    pub checking: Option<u64>,
    /// Whether the form has been released.
    pub submitted: bool,
    /// Validation requests issued.
    pub validations: u32,
    /// Native submissions performed.
    pub native_submits: u32,
    /// Whether the submit control is enabled.
    pub control_enabled: bool,
    /// Notice currently in the input.
    pub notice: Option<NoticeKind>,
}

/// Reference implementation of the gate rules.
#[derive(Debug, Clone)]
pub struct ModelGate {
    obs: ObservableGate,
    /// Attempt that owns the visible notice.
    notice_owner: Option<u64>,
}

impl Default for ModelGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelGate {
    /// Fresh page.
    pub fn new() -> Self {
        Self {
            obs: ObservableGate { control_enabled: true, ..ObservableGate::default() },
            notice_owner: None,
        }
    }

    /// Extract observable state for comparison.
    pub fn observable(&self) -> ObservableGate {
        self.obs
    }

    /// Attempt id a `Resolve` operation targets.
    pub fn resolve_target(&self, stale: bool) -> u64 {
        if stale { self.obs.latest_attempt.saturating_sub(1) } else { self.obs.latest_attempt }
    }

    /// Attempt id a `FireReset` operation targets.
    pub fn reset_target(&self, back: u8) -> u64 {
        self.obs.latest_attempt.saturating_sub(u64::from(back % 3))
    }

    /// Apply an operation and return the result.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        match *op {
            Operation::Submit { shape } => self.submit(shape.len()),
            Operation::Resolve { verdict, stale } => self.resolve(self.resolve_target(stale), verdict),
            Operation::FireReset { back } => {
                self.reset(self.reset_target(back));
                OperationResult::Ok
            },
        }
    }

    fn submit(&mut self, len: usize) -> OperationResult {
        if self.obs.checking.is_some() || self.obs.submitted {
            return OperationResult::Rejected;
        }

        self.obs.latest_attempt += 1;
        self.notice_owner = None;

        if len == GUESS_LEN {
            self.obs.checking = Some(self.obs.latest_attempt);
            self.obs.validations += 1;
            self.obs.control_enabled = false;
        } else {
            self.obs.notice = Some(NoticeKind::LengthWarning);
            self.notice_owner = Some(self.obs.latest_attempt);
        }

        OperationResult::Ok
    }

    fn resolve(&mut self, attempt: u64, verdict: Verdict) -> OperationResult {
        if self.obs.checking != Some(attempt) {
            return OperationResult::Rejected;
        }
        self.obs.checking = None;

        if verdict == Verdict::Invalid {
            self.obs.notice = Some(NoticeKind::InvalidWord);
            self.notice_owner = Some(attempt);
            self.obs.control_enabled = true;
        } else {
            // Valid and every transport failure release the form.
            self.obs.submitted = true;
            self.obs.native_submits += 1;
        }

        OperationResult::Ok
    }

    fn reset(&mut self, attempt: u64) {
        if self.notice_owner == Some(attempt) {
            self.notice_owner = None;
            self.obs.notice = None;
        }
    }
}
