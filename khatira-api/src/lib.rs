pub mod handlers;
pub mod middleware;
pub mod session;
pub mod session_store;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use khatira_app::{AppContext, Config};
use session_store::DbSessionStore;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(ctx: AppContext) -> Router {
    // Per-IP limits cover submissions and login attempts only.
    let limited = Router::new()
        .route("/api/submit", post(handlers::submit))
        .route("/api/admin/login", post(handlers::admin_login))
        .route_layer(axum::middleware::from_fn_with_state(
            ctx.clone(),
            middleware::rate_limit,
        ));

    let app = Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/khawatir", get(handlers::list_khawatir))
        .route("/api/vote", post(handlers::vote))
        .route("/api/admin/logout", post(handlers::admin_logout))
        .route(
            "/api/admin/phase",
            get(handlers::get_phase).post(handlers::set_phase),
        )
        .route("/api/admin/khawatir", get(handlers::admin_list))
        .route("/api/admin/khawatir/clear-all", delete(handlers::clear_all))
        .route("/api/admin/khawatir/{id}", delete(handlers::delete_khatira))
        .merge(limited)
        .layer(session::session_layer(
            &ctx.config,
            DbSessionStore::new(ctx.sessions.clone()),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    let app = match cors_layer(&ctx.config) {
        Some(cors) => app.layer(cors),
        None => app,
    };

    app.with_state(ctx)
}

/// Credentialed CORS for the configured front-end origins.
fn cors_layer(config: &Config) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid origin {:?}", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_credentials(true)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
            .max_age(Duration::from_secs(60 * 60)),
    )
}
