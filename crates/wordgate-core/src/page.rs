//! Page-load affordances.
//!
//! Everything here is independent of the gate: scrolling the history panel,
//! focusing the input, locking buttons of other forms on submit and starting
//! the celebration. The plan only depends on which elements the page has.

use crate::config::PageConfig;

/// Which optional elements the host found on the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PagePresence {
    /// Chat/history panel.
    pub history: bool,
    /// Guess input field.
    pub input: bool,
    /// Forms other than the gated guess form.
    pub other_forms: usize,
    /// Win marker element.
    pub celebration_marker: bool,
}

/// Something to do once when the page loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    /// Scroll the history panel to its last entry.
    ScrollHistoryToBottom,
    /// Give the guess input keyboard focus.
    FocusInput,
    /// On submit of each non-gated form, disable its button and relabel it.
    ///
    /// The gated form is excluded so this never fights the gate's own
    /// control transitions.
    LockOnSubmit {
        /// In-progress label.
        label: String,
    },
    /// Play the one-shot celebration.
    Celebrate,
}

/// Page-load planner.
pub struct PagePlan;

impl PagePlan {
    /// Actions to run once on load, in order.
    pub fn on_load(config: &PageConfig, presence: &PagePresence) -> Vec<PageAction> {
        let mut actions = Vec::with_capacity(4);

        if presence.history {
            actions.push(PageAction::ScrollHistoryToBottom);
        }
        if presence.input {
            actions.push(PageAction::FocusInput);
        }
        if presence.other_forms > 0 {
            actions.push(PageAction::LockOnSubmit { label: config.lock_label.clone() });
        }
        if presence.celebration_marker {
            actions.push(PageAction::Celebrate);
        }

        actions
    }
}
