//! DOM gate host and fetch validator.

use async_trait::async_trait;
use gloo_net::http::Request;
use wasm_bindgen::JsValue;
use web_sys::{HtmlButtonElement, HtmlFormElement, HtmlInputElement};
use wordgate_core::{
    ControlState, GateHost, GuessInput, LogLevel, ValidationError, ValidationResult, Validator,
    check_url, parse_check_response,
};

/// The gated form, its guess input and its submit button.
#[derive(Debug, Clone)]
pub struct DomHost {
    form: HtmlFormElement,
    input: HtmlInputElement,
    submit: HtmlButtonElement,
}

impl DomHost {
    /// Host acting on the given elements.
    pub fn new(form: HtmlFormElement, input: HtmlInputElement, submit: HtmlButtonElement) -> Self {
        Self { form, input, submit }
    }

    fn report(&self, what: &str, result: Result<(), JsValue>) {
        if let Err(err) = result {
            self.log(LogLevel::Warn, &format!("{what} failed: {err:?}"));
        }
    }
}

impl GateHost for DomHost {
    fn show_notice(&self, text: &str, color: &str) {
        self.input.set_value(text);
        self.report("set input color", self.input.style().set_property("color", color));
    }

    fn clear_notice(&self) {
        self.input.set_value("");
        self.report("clear input color", self.input.style().remove_property("color").map(drop));
    }

    fn focus_input(&self) {
        self.report("focus input", self.input.focus());
    }

    fn set_control(&self, state: ControlState) {
        self.submit.set_disabled(!state.enabled);
        self.submit.set_text_content(Some(&state.label));
    }

    fn submit_native(&self) {
        // Does not fire submit listeners, so the gate is not re-entered.
        self.report("form submit", self.form.submit());
    }

    fn log(&self, level: LogLevel, message: &str) {
        let message = JsValue::from_str(message);
        match level {
            LogLevel::Debug => web_sys::console::debug_1(&message),
            LogLevel::Info => web_sys::console::info_1(&message),
            LogLevel::Warn => web_sys::console::warn_1(&message),
            LogLevel::Error => web_sys::console::error_1(&message),
        }
    }
}

/// Validator issuing `GET {endpoint}/{guess}` through `fetch`.
#[derive(Debug, Clone)]
pub struct FetchValidator {
    endpoint: String,
}

impl FetchValidator {
    /// Validator for `endpoint`, absolute or relative to the page.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

#[async_trait(?Send)]
impl Validator for FetchValidator {
    async fn check(&self, guess: &GuessInput) -> Result<ValidationResult, ValidationError> {
        let url = check_url(&self.endpoint, guess);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|err| ValidationError::Network { reason: err.to_string() })?;
        let body = response
            .binary()
            .await
            .map_err(|err| ValidationError::Network { reason: err.to_string() })?;

        parse_check_response(response.status(), &body)
    }
}
