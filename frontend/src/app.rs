use yew::prelude::*;

use crate::styles;

/// Root view of the application. Everything visible is rendered beneath it.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <main class={styles::APP_SHELL}>
            <h1 class={styles::APP_TITLE}>{ "Welcome" }</h1>
            <div class={styles::APP_CONTENT}></div>
        </main>
    }
}
