//! Home page component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::api::LOGIN_PATH;
use crate::ui::auth::use_session_context;
use crate::ui::common::Panel;

/// Application home
#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session_context();

    let greeting = move || {
        session.session.with(|s| {
            s.as_ref()
                .filter(|info| info.is_authenticated())
                .and_then(|info| info.display_name().map(str::to_string))
        })
    };

    view! {
        <main class="page-center">
            <Panel>
                {move || match greeting() {
                    Some(name) => view! {
                        <p>"Signed in as " <strong>{name}</strong></p>
                    }.into_any(),
                    None if session.loading.get() => view! { <p>"Loading session..."</p> }.into_any(),
                    None => view! {
                        <p>
                            "You are not signed in. "
                            <A href=LOGIN_PATH>"Log in"</A>
                        </p>
                    }.into_any(),
                }}
            </Panel>
        </main>
    }
}
