//! Wordgate web binding
//!
//! Wires [`wordgate_core::GateDriver`] into a server-rendered page: the
//! gated form's submit event is intercepted, the guess is checked with
//! `fetch`, and the form is released with `HTMLFormElement.submit()`.
//!
//! [`init`] takes explicit element handles; the `wasm_bindgen(start)` hook
//! only looks them up once the document has been parsed.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod confetti;
mod env;
mod error;
mod host;
mod page;

use std::rc::Rc;

use wasm_bindgen::{JsValue, closure::Closure, prelude::wasm_bindgen};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event};
use wordgate_core::{GateDriver, GateHost, LogLevel, PagePlan, WordgateConfig};

pub use env::{DomEnv, DomInstant};
pub use error::WebError;
pub use host::{DomHost, FetchValidator};
pub use page::{GateHandles, PageHandles};

/// Element id of the optional JSON configuration block.
pub const CONFIG_ELEMENT_ID: &str = "wordgate-config";

/// Attach the gate and run the page-load affordances.
///
/// The submit button's current text becomes the idle label, so the control
/// is restored to whatever the page rendered.
pub fn init(handles: &PageHandles, config: &WordgateConfig) -> Result<(), WebError> {
    config.validate()?;

    if let Some(gate) = &handles.gate {
        attach_gate(gate, config)?;
    }

    for action in PagePlan::on_load(&config.page, &handles.presence()) {
        page::run(&action, handles, config)?;
    }

    Ok(())
}

fn attach_gate(handles: &GateHandles, config: &WordgateConfig) -> Result<(), WebError> {
    let mut gate_config = config.gate.clone();
    if let Some(label) = handles.submit.text_content().filter(|text| !text.trim().is_empty()) {
        gate_config.messages.idle_label = label;
    }

    let host =
        DomHost::new(handles.form.clone(), handles.input.clone(), handles.submit.clone());
    let validator = FetchValidator::new(gate_config.endpoint.clone());
    let driver = Rc::new(GateDriver::new(DomEnv, gate_config, validator, host));

    let input = handles.input.clone();
    let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        // Always suppressed; only the gate releases the form.
        event.prevent_default();

        let raw = input.value();
        let driver = Rc::clone(&driver);
        spawn_local(async move {
            match driver.submit(&raw).await {
                Ok(report) => driver.host().log(LogLevel::Debug, &format!("{report:?}")),
                Err(err) => driver.host().log(LogLevel::Debug, &format!("submission ignored: {err}")),
            }
        });
    });

    page::listen(&handles.form, "submit", listener)
}

/// Read the page's configuration block, falling back to defaults.
pub fn read_config(document: &Document) -> Result<WordgateConfig, WebError> {
    match document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|element| element.text_content()) {
        Some(json) => Ok(WordgateConfig::from_json(&json)?),
        None => Ok(WordgateConfig::default()),
    }
}

fn boot(document: &Document) -> Result<(), WebError> {
    let config = read_config(document)?;
    let handles = PageHandles::lookup(document, &config.page)?;
    init(&handles, &config)
}

/// Module entry point.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;

    if document.ready_state() != "loading" {
        return boot(&document).map_err(JsValue::from);
    }

    let loaded = document.clone();
    let listener = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        if let Err(err) = boot(&loaded) {
            web_sys::console::error_1(&JsValue::from(err));
        }
    });
    page::listen(&document, "DOMContentLoaded", listener).map_err(JsValue::from)
}
