//! Login form component
//!
//! Username/password form that authenticates, refreshes the session and
//! then moves to the home route.

use leptos::ev::SubmitEvent;
use leptos::html;
use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use super::context::{use_api_client, use_session_context};
use crate::core::{
    LoginError, Navigator, Notifier, RequestState, RequestStateCell, backend_label,
    complete_login, prepare_login,
};
use crate::ui::common::{Button, ButtonType, FormControl, FormLabel, Input, Panel};

/// [`Navigator`] backed by the router's navigate function
struct RouterNavigator<F>(F);

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions),
{
    fn navigate(&self, path: &str) {
        (self.0)(path, NavigateOptions::default())
    }
}

/// Blocking browser alert with the classified error message
struct AlertNotifier;

impl Notifier for AlertNotifier {
    fn notify(&self, err: &LoginError) {
        #[cfg(feature = "hydrate")]
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&err.user_message());
        }
        #[cfg(not(feature = "hydrate"))]
        let _ = err;
    }
}

// The view may already be gone after navigating away, hence `try_update`
impl RequestStateCell for RwSignal<RequestState> {
    fn update_state<U>(&self, f: impl FnOnce(&mut RequestState) -> U) -> Option<U> {
        self.try_update(f)
    }
}

/// Current value of an input, empty if it is not mounted
fn input_value(node: NodeRef<html::Input>) -> String {
    node.get_untracked().map(|el| el.value()).unwrap_or_default()
}

/// Login form component
///
/// `state` is owned by the caller so the page can see whether an attempt is
/// running.
#[component]
pub fn LoginView(state: RwSignal<RequestState>) -> impl IntoView {
    let client = use_api_client();
    let session = use_session_context();
    let navigate = use_navigate();

    let username_ref = NodeRef::<html::Input>::new();
    let password_ref = NodeRef::<html::Input>::new();
    let pending = Signal::derive(move || state.with(RequestState::is_pending));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        // Values as they are in the DOM now, autofill included
        let Some(credentials) = prepare_login(
            input_value(username_ref),
            input_value(password_ref),
            &state,
            &AlertNotifier,
        ) else {
            return;
        };

        log!("Login attempt for user: {}", credentials.username);

        let client = client.clone();
        let navigator = RouterNavigator(navigate.clone());

        spawn_local(async move {
            let username = credentials.username.clone();
            if let Err(err) =
                complete_login(credentials, &state, &client, &session, &navigator, &AlertNotifier)
                    .await
            {
                warn!("Login failed for {}: {}", username, err);
            }
        });
    };

    view! {
        <Panel>
            <form method="POST" on:submit=on_submit>
                <FormControl>
                    <FormLabel for_id="username">"Username"</FormLabel>
                    <Input
                        name="username"
                        required=true
                        autocomplete="username"
                        node_ref=username_ref
                    />
                </FormControl>
                <FormControl>
                    <FormLabel for_id="password">"Password"</FormLabel>
                    <Input
                        name="password"
                        input_type="password"
                        required=true
                        autocomplete="current-password"
                        node_ref=password_ref
                    />
                </FormControl>
                <Button button_type=ButtonType::Submit disabled=pending loading=pending>
                    "Log In"
                </Button>
            </form>

            // Alternate login backends, when the session advertises any
            {move || {
                let backends = session.backends();
                (!backends.is_empty()).then(|| {
                    view! {
                        <div class="backend-links">
                            {backends
                                .into_iter()
                                .map(|backend| {
                                    let label = backend_label(&backend);
                                    view! { <a href=backend>{label}</a> }
                                })
                                .collect_view()}
                        </div>
                    }
                })
            }}
        </Panel>
    }
}
