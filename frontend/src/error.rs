use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Errors raised while activating the analytics probe. These never abort
/// startup; the bootstrap logs them and moves on to mounting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TelemetryError {
    #[error("no browser window available")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no <head> element")]
    NoHead,
    #[error("dom call failed: {0}")]
    Dom(String),
}

impl From<JsValue> for TelemetryError {
    fn from(value: JsValue) -> Self {
        TelemetryError::Dom(describe_js(&value))
    }
}

/// Startup failures. The page is left as the framework leaves it, which in
/// practice means an empty mount anchor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartupError {
    #[error("no browser document available")]
    NoDocument,
    #[error("mount selector `{selector}` is invalid: {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("mount target `{selector}` not found in document")]
    TargetMissing { selector: String },
    #[error("startup already ran for this page")]
    AlreadyStarted,
}

/// Best-effort rendering of a thrown JavaScript value.
pub fn describe_js(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}
