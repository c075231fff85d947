//! Login page component
//!
//! A standalone page for user login, redirects home when a session exists.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::hooks::use_navigate;

use crate::core::api::HOME_PATH;
use crate::core::{RequestState, should_redirect_home};
use crate::ui::auth::{LoginView, use_session_context};

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session_context();
    let state = RwSignal::new(RequestState::Idle);

    // Redirect if already authenticated. A login submitted here navigates on
    // its own once the session is refreshed, so the state is read untracked
    // and a pending or successful attempt suppresses this redirect.
    Effect::new(move |_| {
        let authenticated = session.is_authenticated();
        if state.with_untracked(|s| should_redirect_home(authenticated, s)) {
            let navigate = use_navigate();
            navigate(HOME_PATH, Default::default());
        }
    });

    view! {
        <Title text="Log In"/>
        <main class="page-center">
            <LoginView state=state/>
        </main>
    }
}
