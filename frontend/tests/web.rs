#![cfg(target_arch = "wasm32")]

use app_frontend::analytics::{InsightsProbe, Telemetry};
use app_frontend::config::{AnalyticsConfig, AnalyticsMode, MountTarget};
use app_frontend::mount::{DomMounter, MountState, Mounter};
use app_frontend::bootstrap::is_started;
use app_frontend::{start, styles, App, AppConfig, Bootstrap, StartupError, TelemetryError};
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Element};

wasm_bindgen_test_configure!(run_in_browser);

const TEST_SCRIPT_SRC: &str = "/__tests__/insights.js";

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn anchor(id: &str) -> Element {
    let document = document();
    let element = document.create_element("div").unwrap();
    element.set_id(id);
    document.body().unwrap().append_child(&element).unwrap();
    element
}

struct ThrowingTelemetry;

impl Telemetry for ThrowingTelemetry {
    fn activate(&self) -> Result<(), TelemetryError> {
        Err(TelemetryError::Dom("TypeError: integration unavailable".to_string()))
    }
}

fn disabled_probe() -> InsightsProbe {
    InsightsProbe::new(AnalyticsConfig {
        enabled: false,
        ..AnalyticsConfig::default()
    })
}

#[wasm_bindgen_test]
async fn mounts_into_existing_anchor() {
    let element = anchor("app-mount-test");
    let target = MountTarget::new("#app-mount-test").unwrap();

    let mut bootstrap = Bootstrap::new(disabled_probe(), DomMounter::<App>::new(), target);
    let handle = bootstrap.run().expect("mount should succeed");
    TimeoutFuture::new(20).await;

    assert_eq!(bootstrap.state(), MountState::Mounted);
    assert!(element.child_element_count() > 0);
    assert!(element.query_selector("main").unwrap().is_some());

    handle.destroy();
    element.remove();
}

#[wasm_bindgen_test]
fn missing_anchor_leaves_document_untouched() {
    let body = document().body().unwrap();
    let before = body.inner_html();

    let target = MountTarget::new("#no-such-anchor").unwrap();
    let result = DomMounter::<App>::new().mount(&target);

    assert_eq!(
        result.err(),
        Some(StartupError::TargetMissing {
            selector: "#no-such-anchor".to_string()
        })
    );
    assert_eq!(body.inner_html(), before);
}

#[wasm_bindgen_test]
fn malformed_selector_is_rejected() {
    let target = MountTarget::new("##").unwrap();
    match DomMounter::<App>::new().mount(&target) {
        Err(StartupError::InvalidSelector { selector, .. }) => assert_eq!(selector, "##"),
        other => panic!("unexpected result: {:?}", other.err()),
    }
}

#[wasm_bindgen_test]
async fn throwing_telemetry_still_mounts() {
    let element = anchor("app-throwing-telemetry");
    let target = MountTarget::new("#app-throwing-telemetry").unwrap();

    let mut bootstrap = Bootstrap::new(ThrowingTelemetry, DomMounter::<App>::new(), target);
    let handle = bootstrap.run().expect("mount should survive telemetry failure");
    TimeoutFuture::new(20).await;

    assert!(element.child_element_count() > 0);
    assert_eq!(bootstrap.run().err(), Some(StartupError::AlreadyStarted));

    handle.destroy();
    element.remove();
}

/// Makes every read of `window.va` throw, the way a locked-down page
/// rejects the integration. Returns the getter so it outlives the test body.
fn make_queue_throw() -> Closure<dyn Fn() -> JsValue> {
    let getter = Closure::<dyn Fn() -> JsValue>::new(|| -> JsValue {
        wasm_bindgen::throw_str("EvalError: code generation from strings disallowed")
    });
    let descriptor = Object::new();
    Reflect::set(&descriptor, &"get".into(), getter.as_ref()).unwrap();
    Reflect::set(&descriptor, &"configurable".into(), &JsValue::TRUE).unwrap();

    let window = web_sys::window().unwrap();
    Object::define_property(window.as_ref(), &"va".into(), &descriptor);
    getter
}

fn restore_queue() {
    let window: JsValue = web_sys::window().unwrap().into();
    Reflect::delete_property(window.unchecked_ref(), &"va".into()).unwrap();
}

#[wasm_bindgen_test]
async fn javascript_exception_in_analytics_still_mounts() {
    let _getter = make_queue_throw();
    let element = anchor("app-analytics-exception");
    let target = MountTarget::new("#app-analytics-exception").unwrap();
    let config = AnalyticsConfig {
        script_src: Some(TEST_SCRIPT_SRC.to_string()),
        ..AnalyticsConfig::default()
    };

    let failed = InsightsProbe::new(config.clone()).activate();
    assert!(matches!(failed, Err(TelemetryError::Dom(_))));

    let mut bootstrap = Bootstrap::new(InsightsProbe::new(config), DomMounter::<App>::new(), target);
    let handle = bootstrap.run().expect("mount should survive a thrown analytics error");
    TimeoutFuture::new(20).await;

    assert_eq!(bootstrap.state(), MountState::Mounted);
    assert!(element.child_element_count() > 0);

    restore_queue();
    handle.destroy();
    element.remove();
}

#[wasm_bindgen_test]
fn analytics_activation_is_idempotent() {
    let probe = InsightsProbe::new(AnalyticsConfig {
        mode: AnalyticsMode::Production,
        script_src: Some(TEST_SCRIPT_SRC.to_string()),
        ..AnalyticsConfig::default()
    });

    probe.activate().unwrap();
    probe.activate().unwrap();

    let head = document().head().unwrap();
    let scripts = head
        .query_selector_all(&format!("script[src*=\"{}\"]", TEST_SCRIPT_SRC))
        .unwrap();
    assert_eq!(scripts.length(), 1);

    let script = head
        .query_selector(&format!("script[src*=\"{}\"]", TEST_SCRIPT_SRC))
        .unwrap()
        .unwrap();
    assert_eq!(script.get_attribute("data-sdkn").as_deref(), Some("@vercel/analytics/yew"));
    assert!(script.has_attribute("defer"));

    let window: JsValue = web_sys::window().unwrap().into();
    let mode = Reflect::get(&window, &"vam".into()).unwrap();
    assert_eq!(mode.as_string().as_deref(), Some("production"));
}

#[wasm_bindgen_test]
fn analytics_queue_collects_calls() {
    let probe = InsightsProbe::new(AnalyticsConfig {
        script_src: Some(TEST_SCRIPT_SRC.to_string()),
        ..AnalyticsConfig::default()
    });
    probe.activate().unwrap();

    let window: JsValue = web_sys::window().unwrap().into();
    let va: Function = Reflect::get(&window, &"va".into()).unwrap().dyn_into().unwrap();
    va.call2(&JsValue::NULL, &"event".into(), &"signup".into()).unwrap();

    let queue: Array = Reflect::get(&window, &"vaq".into()).unwrap().dyn_into().unwrap();
    let last: Array = queue.get(queue.length() - 1).dyn_into().unwrap();
    assert_eq!(last.get(0).as_string().as_deref(), Some("event"));
    assert_eq!(last.get(1).as_string().as_deref(), Some("signup"));
}

#[wasm_bindgen_test]
fn global_styles_applied_once() {
    let document = document();
    styles::apply_global_styles(&document).unwrap();
    let second = styles::apply_global_styles(&document).unwrap();

    assert!(!second);
    let count = document
        .query_selector_all(&format!("#{}", styles::STYLE_ELEMENT_ID))
        .unwrap()
        .length();
    assert_eq!(count, 1);
}

#[wasm_bindgen_test]
async fn start_runs_once_per_page() {
    let element = anchor("app-start-test");
    let config = AppConfig {
        mount: MountTarget::new("#app-start-test").unwrap(),
        analytics: AnalyticsConfig {
            enabled: false,
            ..AnalyticsConfig::default()
        },
        ..AppConfig::default()
    };

    assert!(!is_started());
    start(config.clone()).expect("first start should mount");
    TimeoutFuture::new(20).await;

    assert!(is_started());
    assert!(element.child_element_count() > 0);
    assert!(document().get_element_by_id(styles::STYLE_ELEMENT_ID).is_some());
    assert_eq!(start(config), Err(StartupError::AlreadyStarted));
}
