use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers::{protected, public};
use crate::middleware::require_user;
use crate::state::AppState;

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::root_get))
        .route("/health", get(public::health_get))
        .merge(auth_public_routes())
        // Protected
        .merge(product_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(&config.security))
        .with_state(state);

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(public::register_post))
        .route("/login", post(public::login_post))
}

fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(protected::products_get).post(protected::products_post),
        )
        .route(
            "/products/:id",
            get(protected::product_get).delete(protected::product_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, require_user))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origin = if security.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = security
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
