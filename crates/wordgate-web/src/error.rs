//! Web binding errors.

use thiserror::Error;
use wasm_bindgen::JsValue;
use wordgate_core::ConfigError;

/// Errors raised while wiring the gate into a page.
#[derive(Debug, Error)]
pub enum WebError {
    /// Not running in a window context.
    #[error("no global window")]
    NoWindow,

    /// Window has no document.
    #[error("window has no document")]
    NoDocument,

    /// A required element is missing.
    #[error("element not found: {selector}")]
    Missing {
        /// Selector that matched nothing.
        selector: String,
    },

    /// An element has the wrong type.
    #[error("element {selector} is not a {expected}")]
    WrongType {
        /// Selector of the element.
        selector: String,
        /// Expected element interface.
        expected: &'static str,
    },

    /// A DOM call threw.
    #[error("DOM call failed: {0}")]
    Js(String),

    /// Page configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<WebError> for JsValue {
    fn from(error: WebError) -> Self {
        Self::from_str(&error.to_string())
    }
}
