#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use console_ui::app::*;
    use console_ui::core::config::Config;
    use console_ui::core::proxy::{ProxyState, api_proxy_router};
    use leptos::logging::log;
    use leptos::prelude::*;
    use leptos_axum::{LeptosRoutes, generate_route_list};
    use tower_http::compression::CompressionLayer;
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;

    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load server config from environment variables
    let config = Config::from_env();

    tracing::info!(
        "Config loaded: backend={}, backend_timeout={}s",
        config.backend_url.as_deref().unwrap_or("<none>"),
        config.backend_timeout.as_secs()
    );
    if !config.has_backend() {
        tracing::warn!("BACKEND_URL is not set; /api requests will answer 503");
    }

    // Load configuration from Cargo.toml [package.metadata.leptos]
    // Can be overridden via LEPTOS_SITE_ADDR env var for Docker/K8s
    let conf = get_configuration(None).unwrap();
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);

    let proxy_state = match ProxyState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to build backend client: {}", e);
            return;
        }
    };

    // Serve pre-compressed static assets from /pkg
    let pkg_service = ServeDir::new(format!("{}/pkg", leptos_options.site_root))
        .precompressed_br()
        .precompressed_gzip();

    let leptos_router = Router::new()
        .nest_service("/pkg", pkg_service)
        .leptos_routes(&leptos_options, routes, {
            let leptos_options = leptos_options.clone();
            move || shell(leptos_options.clone())
        })
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options);

    let app = Router::new()
        // Backend API, forwarded as-is
        .merge(api_proxy_router(proxy_state))
        .merge(leptos_router)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new().br(true).gzip(true));

    log!("listening on http://{}", &addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
