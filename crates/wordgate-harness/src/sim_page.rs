//! Recording page host.

use std::{cell::RefCell, rc::Rc};

use wordgate_core::{ControlState, GateHost, LogLevel};

/// Form data captured when the gate released the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedForm {
    /// Guess field name.
    pub field: String,
    /// Guess field value at submission time.
    pub value: String,
}

/// Visible state of the simulated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    /// Input field content.
    pub input_value: String,
    /// Input text color, `None` when uncolored.
    pub input_color: Option<String>,
    /// Whether the input has keyboard focus.
    pub input_focused: bool,
    /// Submit control.
    pub control: ControlState,
}

#[derive(Debug)]
struct PageState {
    snapshot: PageSnapshot,
    field: String,
    control_history: Vec<ControlState>,
    submissions: Vec<SubmittedForm>,
    logs: Vec<(LogLevel, String)>,
}

/// In-memory page: one input, one submit control, one form.
///
/// Clones share state, so a test keeps one handle while the driver owns
/// another.
#[derive(Debug, Clone)]
pub struct SimPage {
    state: Rc<RefCell<PageState>>,
}

impl SimPage {
    /// Fresh page with an empty, unfocused input and an enabled control.
    pub fn new(field: &str, idle_label: &str) -> Self {
        let control = ControlState { enabled: true, label: idle_label.to_string() };
        let state = PageState {
            snapshot: PageSnapshot {
                input_value: String::new(),
                input_color: None,
                input_focused: false,
                control: control.clone(),
            },
            field: field.to_string(),
            control_history: vec![control],
            submissions: Vec::new(),
            logs: Vec::new(),
        };
        Self { state: Rc::new(RefCell::new(state)) }
    }

    /// Simulate the user typing `text` over the input's content.
    pub fn type_input(&self, text: &str) {
        self.state.borrow_mut().snapshot.input_value = text.to_string();
    }

    /// Current visible state.
    pub fn snapshot(&self) -> PageSnapshot {
        self.state.borrow().snapshot.clone()
    }

    /// Every control state the page has shown, starting with the initial one.
    pub fn control_history(&self) -> Vec<ControlState> {
        self.state.borrow().control_history.clone()
    }

    /// Forms released to the server.
    pub fn submissions(&self) -> Vec<SubmittedForm> {
        self.state.borrow().submissions.clone()
    }

    /// Logged diagnostics.
    pub fn logs(&self) -> Vec<(LogLevel, String)> {
        self.state.borrow().logs.clone()
    }

    /// Logged diagnostics at `level` or above.
    pub fn logs_at_least(&self, level: LogLevel) -> Vec<String> {
        self.state
            .borrow()
            .logs
            .iter()
            .filter(|(l, _)| *l >= level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl GateHost for SimPage {
    fn show_notice(&self, text: &str, color: &str) {
        let mut state = self.state.borrow_mut();
        state.snapshot.input_value = text.to_string();
        state.snapshot.input_color = Some(color.to_string());
    }

    fn clear_notice(&self) {
        let mut state = self.state.borrow_mut();
        state.snapshot.input_value.clear();
        state.snapshot.input_color = None;
    }

    fn focus_input(&self) {
        self.state.borrow_mut().snapshot.input_focused = true;
    }

    fn set_control(&self, control: ControlState) {
        let mut state = self.state.borrow_mut();
        state.snapshot.control = control.clone();
        state.control_history.push(control);
    }

    fn submit_native(&self) {
        let mut state = self.state.borrow_mut();
        let form =
            SubmittedForm { field: state.field.clone(), value: state.snapshot.input_value.clone() };
        state.submissions.push(form);
    }

    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => tracing::debug!("{}", message),
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warn => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        }
        self.state.borrow_mut().logs.push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_replaces_typed_text_and_clear_empties() {
        let page = SimPage::new("user_input", "Send");
        page.type_input("zz");

        page.show_notice("enter 5 letters", "orange");
        assert_eq!(page.snapshot().input_value, "enter 5 letters");
        assert_eq!(page.snapshot().input_color.as_deref(), Some("orange"));

        page.clear_notice();
        assert_eq!(page.snapshot().input_value, "");
        assert_eq!(page.snapshot().input_color, None);
    }

    #[test]
    fn submit_captures_current_field_value() {
        let page = SimPage::new("user_input", "Send");
        page.type_input(" hello ");
        page.submit_native();

        assert_eq!(
            page.submissions(),
            vec![SubmittedForm { field: "user_input".to_string(), value: " hello ".to_string() }]
        );
    }
}
