use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, Document, HtmlScriptElement};

use crate::config::{current_host, AnalyticsConfig, AnalyticsMode};
use crate::error::TelemetryError;

pub const SDK_NAME: &str = "@vercel/analytics";
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEBUG_SCRIPT_SRC: &str = "https://va.vercel-scripts.com/v1/script.debug.js";
pub const PRODUCTION_SCRIPT_SRC: &str = "/_vercel/insights/script.js";

const QUEUE_MODE: &str = "vam";

#[wasm_bindgen(inline_js = r#"
export function installQueue(w) {
    if (w.va === undefined) {
        w.va = function (...params) {
            (w.vaq = w.vaq || []).push(params);
        };
    }
}
"#)]
extern "C" {
    /// Defines `window.va` unless the page already has one. Calls made
    /// before the script loads are queued on `window.vaq`.
    #[wasm_bindgen(catch, js_name = installQueue)]
    fn install_queue_js(window: &JsValue) -> Result<(), JsValue>;
}

/// A passive usage probe activated once at startup.
pub trait Telemetry {
    fn activate(&self) -> Result<(), TelemetryError>;
}

/// Picks the analytics script: explicit override first, then the debug
/// build of the script in development.
pub fn script_src(config: &AnalyticsConfig, mode: AnalyticsMode) -> String {
    if let Some(src) = config.script_src.as_deref().filter(|src| !src.is_empty()) {
        return src.to_string();
    }
    match mode {
        AnalyticsMode::Development => DEBUG_SCRIPT_SRC.to_string(),
        _ => PRODUCTION_SCRIPT_SRC.to_string(),
    }
}

/// `data-*` attributes carried by the injected script tag.
pub fn script_attributes(config: &AnalyticsConfig, mode: AnalyticsMode) -> Vec<(&'static str, String)> {
    let sdk_name = match config.framework.as_deref() {
        Some(framework) if !framework.is_empty() => format!("{}/{}", SDK_NAME, framework),
        _ => SDK_NAME.to_string(),
    };

    let mut attrs = vec![
        ("data-sdkn", sdk_name),
        ("data-sdkv", SDK_VERSION.to_string()),
    ];
    if config.disable_auto_track {
        attrs.push(("data-disable-auto-track", "1".to_string()));
    }
    if let Some(endpoint) = &config.endpoint {
        attrs.push(("data-endpoint", endpoint.clone()));
    }
    if let Some(dsn) = &config.dsn {
        attrs.push(("data-dsn", dsn.clone()));
    }
    if mode == AnalyticsMode::Development && !config.debug {
        attrs.push(("data-debug", "false".to_string()));
    }
    attrs
}

pub fn load_failure_message(src: &str, mode: AnalyticsMode) -> String {
    let hint = match mode {
        AnalyticsMode::Development => "Please check if any ad blockers are enabled and try again.",
        _ => "Be sure to enable Web Analytics for your project and deploy again.",
    };
    format!("[Web Analytics] Failed to load script from {}. {}", src, hint)
}

/// Browser probe: publishes the mode, installs the `window.va` command
/// queue and appends the deferred analytics script to `<head>`.
pub struct InsightsProbe {
    config: AnalyticsConfig,
}

impl InsightsProbe {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self { config }
    }

    fn install_queue(window: &JsValue, mode: AnalyticsMode) -> Result<(), TelemetryError> {
        Reflect::set(window, &QUEUE_MODE.into(), &mode.as_str().into())?;
        install_queue_js(window)?;
        Ok(())
    }

    fn append_script(&self, document: &Document, mode: AnalyticsMode) -> Result<(), TelemetryError> {
        let head = document.head().ok_or(TelemetryError::NoHead)?;
        let src = script_src(&self.config, mode);

        let selector = format!("script[src*=\"{}\"]", src);
        if head.query_selector(&selector)?.is_some() {
            log::debug!("analytics script {} already present", src);
            return Ok(());
        }

        let script: HtmlScriptElement = document.create_element("script")?.dyn_into().map_err(|_| {
            TelemetryError::Dom("created element is not a <script>".to_string())
        })?;
        script.set_src(&src);
        script.set_defer(true);
        for (name, value) in script_attributes(&self.config, mode) {
            script.set_attribute(name, &value)?;
        }

        let message = load_failure_message(&src, mode);
        let on_error = Closure::once_into_js(move || log::warn!("{}", message));
        script.set_onerror(Some(on_error.unchecked_ref()));

        head.append_child(&script)?;
        log::debug!("analytics script {} injected", src);
        Ok(())
    }
}

impl Telemetry for InsightsProbe {
    fn activate(&self) -> Result<(), TelemetryError> {
        if !self.config.enabled {
            log::debug!("analytics disabled, skipping activation");
            return Ok(());
        }

        let window = window().ok_or(TelemetryError::NoWindow)?;
        let document = window.document().ok_or(TelemetryError::NoDocument)?;
        let mode = self
            .config
            .mode
            .resolve(current_host().as_deref(), cfg!(debug_assertions));

        Self::install_queue(window.as_ref(), mode)?;
        self.append_script(&document, mode)
    }
}
