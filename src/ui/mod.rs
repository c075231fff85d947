pub mod auth;
pub mod common;
pub mod pages;

pub use auth::{LoginView, SessionContext, provide_session_context, use_session_context};
pub use pages::{HomePage, LoginPage, NotFoundPage};
