use wasm_bindgen::JsValue;
use web_sys::Document;

pub const STYLE_ELEMENT_ID: &str = "app-global-styles";

pub const APP_SHELL: &str = "app-shell";
pub const APP_CONTENT: &str = "app-content";
pub const APP_TITLE: &str = "app-title";

pub const GLOBAL_CSS: &str = r#"
:root {
    font-family: Inter, system-ui, Avenir, Helvetica, Arial, sans-serif;
    line-height: 1.5;
    font-weight: 400;
    color-scheme: light dark;
    color: rgba(255, 255, 255, 0.87);
    background-color: #242424;
    font-synthesis: none;
    text-rendering: optimizeLegibility;
    -webkit-font-smoothing: antialiased;
    -moz-osx-font-smoothing: grayscale;
}

body {
    margin: 0;
    display: flex;
    place-items: center;
    min-width: 320px;
    min-height: 100vh;
}

#app {
    max-width: 1280px;
    margin: 0 auto;
    padding: 2rem;
    text-align: center;
}

.app-shell {
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 1rem;
}

.app-title {
    font-size: 3.2em;
    line-height: 1.1;
}

@media (prefers-color-scheme: light) {
    :root {
        color: #213547;
        background-color: #ffffff;
    }
}
"#;

/// Appends the global stylesheet to `<head>`. Returns `false` when the
/// stylesheet was already present.
pub fn apply_global_styles(document: &Document) -> Result<bool, JsValue> {
    if document.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return Ok(false);
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head> element"))?;

    let style = document.create_element("style")?;
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(GLOBAL_CSS));
    head.append_child(&style)?;
    Ok(true)
}
