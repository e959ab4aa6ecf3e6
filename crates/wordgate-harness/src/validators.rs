//! Test validators.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use async_trait::async_trait;
use tokio::sync::oneshot;
use wordgate_core::{
    GuessInput, ValidationError, ValidationResult, Validator, check_url,
};

type Answer = Result<ValidationResult, ValidationError>;

/// Answers requests from a fixed script, in order, and records each URL.
///
/// Once the script runs out every request fails with a network error.
#[derive(Debug, Clone)]
pub struct ScriptedValidator {
    endpoint: String,
    script: Rc<RefCell<VecDeque<Answer>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl ScriptedValidator {
    /// Validator for `endpoint` with the given answers.
    pub fn new(endpoint: &str, script: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            script: Rc::new(RefCell::new(script.into_iter().collect())),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Validator whose every answer is `{"valid": valid}`.
    pub fn always(endpoint: &str, valid: bool, times: usize) -> Self {
        Self::new(endpoint, std::iter::repeat_n(Ok(ValidationResult { valid }), times))
    }

    /// URLs requested so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Validator for ScriptedValidator {
    async fn check(&self, guess: &GuessInput) -> Answer {
        self.calls.borrow_mut().push(check_url(&self.endpoint, guess));
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ValidationError::Network { reason: "script exhausted".into() }))
    }
}

/// Holds every request open until the test answers it.
///
/// Lets tests observe the page while a validation is in flight, or leave a
/// request hanging forever.
#[derive(Debug, Clone, Default)]
pub struct ManualValidator {
    pending: Rc<RefCell<VecDeque<(GuessInput, oneshot::Sender<Answer>)>>>,
    calls: Rc<RefCell<Vec<GuessInput>>>,
}

impl ManualValidator {
    /// Validator with no pending requests.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests awaiting an answer.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Guesses requested so far.
    pub fn calls(&self) -> Vec<GuessInput> {
        self.calls.borrow().clone()
    }

    /// Answer the oldest pending request. Returns false if none was pending.
    pub fn answer(&self, answer: Answer) -> bool {
        let Some((_, tx)) = self.pending.borrow_mut().pop_front() else {
            return false;
        };
        tx.send(answer).is_ok()
    }
}

#[async_trait(?Send)]
impl Validator for ManualValidator {
    async fn check(&self, guess: &GuessInput) -> Answer {
        let (tx, rx) = oneshot::channel();
        self.calls.borrow_mut().push(guess.clone());
        self.pending.borrow_mut().push_back((guess.clone(), tx));

        rx.await.unwrap_or_else(|_| {
            Err(ValidationError::Network { reason: "request dropped".to_string() })
        })
    }
}
