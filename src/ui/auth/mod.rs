//! Authentication UI module
//!
//! The login view and the session context it refreshes.

mod context;
mod login_form;

pub use context::{SessionContext, provide_session_context, use_api_client, use_session_context};
pub use login_form::LoginView;
