use leptos::prelude::*;

/// White, rounded, lightly shadowed container
#[component]
pub fn Panel(children: Children) -> impl IntoView {
    view! { <div class="box">{children()}</div> }
}
