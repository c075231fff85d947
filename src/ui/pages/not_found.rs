//! Not found page component
//!
//! A 404 error page displayed when a route is not found.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::api::HOME_PATH;
use crate::ui::common::Panel;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <main class="page-center">
            <Panel>
                <h1>"404"</h1>
                <p>"The page you're looking for doesn't exist or has been moved."</p>
                <A href=HOME_PATH>"Go Home"</A>
            </Panel>
        </main>
    }
}
