//! DOM lookup and page-load affordances.

use std::cell::RefCell;

use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    Node,
};
use wordgate_core::{ConfettiPlan, PageAction, PageConfig, PagePresence, WordgateConfig};

use crate::{confetti, env::DomEnv, error::WebError};

thread_local! {
    /// Listeners live as long as the page.
    static LISTENERS: RefCell<Vec<Closure<dyn FnMut(Event)>>> = const { RefCell::new(Vec::new()) };
}

/// Keep `listener` alive and attach it to `target` for `event`.
pub(crate) fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    listener: Closure<dyn FnMut(Event)>,
) -> Result<(), WebError> {
    target.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())?;
    LISTENERS.with(|listeners| listeners.borrow_mut().push(listener));
    Ok(())
}

/// Elements the gate itself needs.
#[derive(Debug, Clone)]
pub struct GateHandles {
    /// The gated guess form.
    pub form: HtmlFormElement,
    /// Guess input inside it.
    pub input: HtmlInputElement,
    /// Submit button inside it.
    pub submit: HtmlButtonElement,
}

/// Every element the binding works with.
#[derive(Debug, Clone)]
pub struct PageHandles {
    /// Owning document.
    pub document: Document,
    /// Gated form, if this page has one.
    pub gate: Option<GateHandles>,
    /// History panel.
    pub history: Option<HtmlElement>,
    /// Guess input, anywhere on the page.
    pub input: Option<HtmlInputElement>,
    /// Forms other than the gated one.
    pub other_forms: Vec<HtmlFormElement>,
    /// Whether the win marker is present.
    pub celebration_marker: bool,
}

impl PageHandles {
    /// Look the elements named by `config` up in `document`.
    ///
    /// A page without the gated form is fine; a gated form without its input
    /// or submit button is not.
    pub fn lookup(document: &Document, config: &PageConfig) -> Result<Self, WebError> {
        let gate = match query::<HtmlFormElement>(document, &config.form_selector, "form")? {
            Some(form) => Some(GateHandles {
                input: required(&form, &config.input_selector, "input")?,
                submit: required(&form, &config.submit_selector, "button")?,
                form,
            }),
            None => None,
        };

        let history = query::<HtmlElement>(document, &config.history_selector, "element")?;
        let input = query::<HtmlInputElement>(document, &config.input_selector, "input")?;
        let celebration_marker =
            document.get_element_by_id(&config.celebration_marker_id).is_some();

        let gated: Option<Node> = gate.as_ref().map(|g| g.form.clone().into());
        let forms = document.query_selector_all("form")?;
        let other_forms = (0..forms.length())
            .filter_map(|i| forms.item(i))
            .filter(|node| !gated.as_ref().is_some_and(|gated| node.is_same_node(Some(gated))))
            .filter_map(|node| node.dyn_into::<HtmlFormElement>().ok())
            .collect();

        Ok(Self { document: document.clone(), gate, history, input, other_forms, celebration_marker })
    }

    /// What the page-load planner needs to know.
    pub fn presence(&self) -> PagePresence {
        PagePresence {
            history: self.history.is_some(),
            input: self.input.is_some(),
            other_forms: self.other_forms.len(),
            celebration_marker: self.celebration_marker,
        }
    }
}

fn query<T: JsCast>(
    root: &Document,
    selector: &str,
    expected: &'static str,
) -> Result<Option<T>, WebError> {
    root.query_selector(selector)?.map(|element| cast(element, selector, expected)).transpose()
}

fn required<T: JsCast>(
    form: &HtmlFormElement,
    selector: &str,
    expected: &'static str,
) -> Result<T, WebError> {
    let element = form
        .query_selector(selector)?
        .ok_or_else(|| WebError::Missing { selector: selector.to_string() })?;
    cast(element, selector, expected)
}

fn cast<T: JsCast>(element: Element, selector: &str, expected: &'static str) -> Result<T, WebError> {
    element
        .dyn_into::<T>()
        .map_err(|_| WebError::WrongType { selector: selector.to_string(), expected })
}

/// Run one page-load action.
pub(crate) fn run(
    action: &PageAction,
    handles: &PageHandles,
    config: &WordgateConfig,
) -> Result<(), WebError> {
    match action {
        PageAction::ScrollHistoryToBottom => {
            if let Some(history) = &handles.history {
                history.set_scroll_top(history.scroll_height().into());
            }
        },
        PageAction::FocusInput => {
            if let Some(input) = &handles.input {
                input.focus()?;
            }
        },
        PageAction::LockOnSubmit { label } => {
            for form in &handles.other_forms {
                lock_on_submit(form, label)?;
            }
        },
        PageAction::Celebrate => {
            let plan = ConfettiPlan::generate(&DomEnv, &config.confetti);
            confetti::render(&handles.document, &plan, &config.confetti)?;
        },
    }

    Ok(())
}

/// Disable and relabel `form`'s submit button once it submits.
fn lock_on_submit(form: &HtmlFormElement, label: &str) -> Result<(), WebError> {
    let Some(button) = form
        .query_selector("button[type=\"submit\"]")?
        .and_then(|element| element.dyn_into::<HtmlButtonElement>().ok())
    else {
        return Ok(());
    };

    let label = label.to_string();
    let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        button.set_disabled(true);
        button.set_text_content(Some(&label));
    });
    listen(form, "submit", listener)
}
