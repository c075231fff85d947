//! Backend HTTP client
//!
//! The client is built once at application start from an explicit
//! [`HttpClientConfig`] and handed to components through context. Every call
//! includes cookies (when configured) and echoes the CSRF cookie into the
//! configured header.

use super::credentials::Credentials;
use super::error::LoginError;
use super::session::SessionInfo;

/// Credential exchange endpoint
pub const AUTHENTICATE_PATH: &str = "/api/users/tokens/authenticate/";
/// Current session endpoint
pub const SESSION_PATH: &str = "/api/users/session/";
/// Where the user lands after logging in
pub const HOME_PATH: &str = "/";
/// Login page route
pub const LOGIN_PATH: &str = "/login";

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Prefix for every request path; empty means same origin
    pub base_url: String,
    /// Send cookies with every request
    pub with_credentials: bool,
    /// Cookie holding the anti-forgery token
    pub csrf_cookie_name: String,
    /// Header the anti-forgery token is echoed in
    pub csrf_header_name: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            with_credentials: true,
            csrf_cookie_name: "csrftoken".to_string(),
            csrf_header_name: "X-CSRFToken".to_string(),
        }
    }
}

impl HttpClientConfig {
    /// Full URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// CSRF header `(name, value)` for the given `document.cookie` string
    pub fn csrf_header(&self, cookies: &str) -> Option<(String, String)> {
        read_cookie(cookies, &self.csrf_cookie_name)
            .map(|token| (self.csrf_header_name.clone(), token))
    }
}

/// Find a cookie value in a `name=value; name2=value2` string.
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Client for the administrative backend API
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    config: HttpClientConfig,
}

impl ApiClient {
    pub fn new(config: HttpClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[cfg(feature = "hydrate")]
impl ApiClient {
    fn credentials_mode(&self) -> web_sys::RequestCredentials {
        if self.config.with_credentials {
            web_sys::RequestCredentials::Include
        } else {
            web_sys::RequestCredentials::SameOrigin
        }
    }

    fn with_csrf(&self, builder: gloo_net::http::RequestBuilder) -> gloo_net::http::RequestBuilder {
        match document_cookie().and_then(|cookies| self.config.csrf_header(&cookies)) {
            Some((name, value)) => builder.header(&name, &value),
            None => builder,
        }
    }

    /// POST credentials to the authentication endpoint. Any non-2xx is an error.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<(), LoginError> {
        use gloo_net::http::Request;

        let builder = Request::post(&self.config.url(AUTHENTICATE_PATH))
            .credentials(self.credentials_mode());
        let request = self
            .with_csrf(builder)
            .json(credentials)
            .map_err(|e| LoginError::Network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| LoginError::Network(e.to_string()))?;

        if response.ok() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(LoginError::from_response(response.status(), &body))
        }
    }

    /// GET the current session
    pub async fn fetch_session(&self) -> Result<SessionInfo, LoginError> {
        use gloo_net::http::Request;

        let builder =
            Request::get(&self.config.url(SESSION_PATH)).credentials(self.credentials_mode());
        let request = self
            .with_csrf(builder)
            .build()
            .map_err(|e| LoginError::Network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| LoginError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LoginError::Decode(e.to_string()))?;

        if !response.ok() {
            return Err(LoginError::from_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| LoginError::Decode(e.to_string()))
    }
}

#[cfg(feature = "hydrate")]
fn document_cookie() -> Option<String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()?.document()?;
    document.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()
}

#[cfg(not(feature = "hydrate"))]
impl ApiClient {
    pub async fn authenticate(&self, _credentials: &Credentials) -> Result<(), LoginError> {
        Err(LoginError::Unavailable)
    }

    pub async fn fetch_session(&self) -> Result<SessionInfo, LoginError> {
        Err(LoginError::Unavailable)
    }
}
