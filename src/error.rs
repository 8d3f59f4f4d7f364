use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::config::ConfigError;

/// Failures while wiring the backdrop into a page. Once running, nothing
/// the backdrop does is allowed to fail the page.
#[derive(Debug, Error)]
pub enum BackdropError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("element #{0} not found")]
    ElementNotFound(String),
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("javascript error: {0}")]
    Js(String),
}

impl BackdropError {
    pub fn js(value: JsValue) -> Self {
        BackdropError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<BackdropError> for JsValue {
    fn from(err: BackdropError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
