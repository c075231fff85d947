//! Core types and logic for the login flow

pub mod api;
#[cfg(feature = "ssr")]
pub mod config;
mod credentials;
mod error;
mod login;
#[cfg(feature = "ssr")]
pub mod proxy;
mod session;
#[cfg(test)]
mod tests;

pub use api::{ApiClient, HttpClientConfig};
pub use credentials::Credentials;
pub use error::{LoginError, extract_detail};
pub use login::{
    Authenticator, Navigator, Notifier, RequestState, RequestStateCell, SessionCache,
    complete_login, perform_login, prepare_login, should_redirect_home, submit_login,
};
pub use session::{SessionInfo, SessionUser, backend_label};
