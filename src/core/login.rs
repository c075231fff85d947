//! Login sequence
//!
//! Authenticate, then refresh the session cache, then navigate home. Each
//! step only starts after the previous one resolved successfully. The
//! collaborators sit behind small traits so the sequence runs the same in the
//! browser and against in-memory fakes.

use super::api::{ApiClient, HOME_PATH};
use super::credentials::Credentials;
use super::error::LoginError;
use super::session::SessionInfo;

/// Exchanges credentials with the backend
#[allow(async_fn_in_trait)]
pub trait Authenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), LoginError>;
}

/// Cached "current session" read
#[allow(async_fn_in_trait)]
pub trait SessionCache {
    /// Reload the session, resolving once the cache holds the new value
    async fn refetch(&self) -> Result<SessionInfo, LoginError>;
}

/// Client-side route transitions
pub trait Navigator {
    fn navigate(&self, path: &str);
}

/// Tells the user a login attempt failed
pub trait Notifier {
    fn notify(&self, err: &LoginError);
}

/// Shared, mutable [`RequestState`]
pub trait RequestStateCell {
    /// Apply `f` to the state. `None` when the state is no longer reachable.
    fn update_state<U>(&self, f: impl FnOnce(&mut RequestState) -> U) -> Option<U>;
}

impl RequestStateCell for std::cell::RefCell<RequestState> {
    fn update_state<U>(&self, f: impl FnOnce(&mut RequestState) -> U) -> Option<U> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl Authenticator for ApiClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<(), LoginError> {
        ApiClient::authenticate(self, credentials).await
    }
}

/// State of the current login attempt
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(LoginError),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    /// Move to `Pending`. Returns `false` (and changes nothing) when an
    /// attempt is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = RequestState::Pending;
        true
    }

    /// Record the outcome of the attempt started with [`begin`](Self::begin)
    pub fn finish(&mut self, result: &Result<SessionInfo, LoginError>) {
        *self = match result {
            Ok(_) => RequestState::Succeeded,
            Err(err) => RequestState::Failed(err.clone()),
        };
    }

    pub fn error(&self) -> Option<&LoginError> {
        match self {
            RequestState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Run the full login sequence.
///
/// Navigation to the home route happens only after the session refetch has
/// completed. A failed authentication never touches the session cache or the
/// navigator.
pub async fn perform_login<A, S, N>(
    credentials: &Credentials,
    auth: &A,
    session: &S,
    navigator: &N,
) -> Result<SessionInfo, LoginError>
where
    A: Authenticator,
    S: SessionCache,
    N: Navigator,
{
    auth.authenticate(credentials).await?;

    let info = session
        .refetch()
        .await
        .map_err(|e| LoginError::Session(Box::new(e)))?;

    navigator.navigate(HOME_PATH);
    Ok(info)
}

/// Synchronous half of a form submit.
///
/// Checks the required fields, then claims the request state. Returns the
/// credentials to send, or `None` when nothing must be sent: a missing field
/// (the user is notified) or an attempt already in flight.
pub fn prepare_login<St, Nt>(
    username: String,
    password: String,
    state: &St,
    notifier: &Nt,
) -> Option<Credentials>
where
    St: RequestStateCell,
    Nt: Notifier,
{
    let credentials = match Credentials::from_form(username, password) {
        Ok(credentials) => credentials,
        Err(err) => {
            notifier.notify(&err);
            return None;
        }
    };

    // Ignore resubmits while an attempt is in flight
    if !state.update_state(RequestState::begin).unwrap_or(false) {
        return None;
    }

    Some(credentials)
}

/// Asynchronous half of a form submit: run the sequence, record the outcome
/// and notify on failure.
pub async fn complete_login<St, A, S, N, Nt>(
    credentials: Credentials,
    state: &St,
    auth: &A,
    session: &S,
    navigator: &N,
    notifier: &Nt,
) -> Result<SessionInfo, LoginError>
where
    St: RequestStateCell,
    A: Authenticator,
    S: SessionCache,
    N: Navigator,
    Nt: Notifier,
{
    let result = perform_login(&credentials, auth, session, navigator).await;
    state.update_state(|s| s.finish(&result));

    if let Err(err) = &result {
        notifier.notify(err);
    }
    result
}

/// Handle one submit of the login form from raw field values.
///
/// `None` means no request was issued.
pub async fn submit_login<St, A, S, N, Nt>(
    username: String,
    password: String,
    state: &St,
    auth: &A,
    session: &S,
    navigator: &N,
    notifier: &Nt,
) -> Option<Result<SessionInfo, LoginError>>
where
    St: RequestStateCell,
    A: Authenticator,
    S: SessionCache,
    N: Navigator,
    Nt: Notifier,
{
    let credentials = prepare_login(username, password, state, notifier)?;
    Some(complete_login(credentials, state, auth, session, navigator, notifier).await)
}

/// Whether the login page should send an already signed-in user home.
///
/// While a login from this page is in flight or has just succeeded, the
/// sequence itself navigates, so the page stays put.
pub fn should_redirect_home(authenticated: bool, state: &RequestState) -> bool {
    authenticated && matches!(state, RequestState::Idle | RequestState::Failed(_))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_state_default_is_idle() {
        assert_eq!(RequestState::default(), RequestState::Idle);
    }

    #[test]
    fn test_begin_rejects_overlapping_attempt() {
        let mut state = RequestState::Idle;
        assert!(state.begin());
        assert!(state.is_pending());
        assert!(!state.begin());
        assert!(state.is_pending());
    }

    #[test]
    fn test_finish_records_outcome() {
        let mut state = RequestState::Idle;
        state.begin();
        state.finish(&Ok(SessionInfo::default()));
        assert_eq!(state, RequestState::Succeeded);

        assert!(state.begin());
        let err = LoginError::from_response(400, "");
        state.finish(&Err(err.clone()));
        assert_eq!(state.error(), Some(&err));
    }

    #[test]
    fn test_should_redirect_home() {
        assert!(should_redirect_home(true, &RequestState::Idle));
        assert!(should_redirect_home(
            true,
            &RequestState::Failed(LoginError::Network("offline".to_string()))
        ));
        assert!(!should_redirect_home(true, &RequestState::Pending));
        assert!(!should_redirect_home(true, &RequestState::Succeeded));
        assert!(!should_redirect_home(false, &RequestState::Idle));
    }

    #[test]
    fn test_refcell_state_cell() {
        let cell = std::cell::RefCell::new(RequestState::Idle);
        assert_eq!(cell.update_state(RequestState::begin), Some(true));
        assert_eq!(cell.update_state(RequestState::begin), Some(false));
        assert!(cell.borrow().is_pending());
    }

    #[test]
    fn test_can_retry_after_failure() {
        let mut state = RequestState::Failed(LoginError::Network("offline".to_string()));
        assert!(state.begin());
        assert_eq!(state.error(), None);
    }
}
