//! Session context
//!
//! A reactive cache of the backend's "current session" answer:
//! - Holds the last [`SessionInfo`] fetched from the API
//! - Exposes an awaitable `refetch`
//! - Loads once after hydration

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos::task::spawn_local;

use crate::core::{ApiClient, LoginError, SessionCache, SessionInfo};

/// Session context providing the cached session and a way to reload it
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Last session fetched, `None` until the first fetch completes
    pub session: RwSignal<Option<SessionInfo>>,
    /// A fetch is in flight
    pub loading: RwSignal<bool>,
    client: StoredValue<ApiClient>,
}

impl SessionContext {
    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.session
            .with(|s| s.as_ref().is_some_and(SessionInfo::is_authenticated))
    }

    /// Alternate login backends advertised by the session payload
    pub fn backends(&self) -> Vec<String> {
        self.session
            .with(|s| s.as_ref().map(|s| s.backends.clone()).unwrap_or_default())
    }

    /// Reload the session. The cache holds the new value once this resolves.
    pub async fn refetch(&self) -> Result<SessionInfo, LoginError> {
        let client = self.client.get_value();
        self.loading.set(true);

        let result = client.fetch_session().await;

        match &result {
            Ok(info) => self.session.set(Some(info.clone())),
            Err(err) => leptos::logging::warn!("Session fetch failed: {}", err),
        }
        self.loading.set(false);

        result
    }
}

impl SessionCache for SessionContext {
    async fn refetch(&self) -> Result<SessionInfo, LoginError> {
        SessionContext::refetch(self).await
    }
}

/// Provide the API client and session context to the component tree
pub fn provide_session_context(client: ApiClient) -> SessionContext {
    let ctx = SessionContext {
        session: RwSignal::new(None),
        loading: RwSignal::new(false),
        client: StoredValue::new(client.clone()),
    };

    provide_context(client);
    provide_context(ctx);

    // Initial load after hydration (client-side only)
    #[cfg(feature = "hydrate")]
    Effect::new(move |_| {
        spawn_local(async move {
            let _ = ctx.refetch().await;
        });
    });

    ctx
}

/// Get session context from the component tree
pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}

/// Get the API client from the component tree
pub fn use_api_client() -> ApiClient {
    expect_context::<ApiClient>()
}
