//! HTTP surface: the user resource plus the latency administration endpoints.

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use state::{ApiInfo, AppState};

/// Build the application router over `state`.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.info.cors_origins);

    Router::new()
        .route("/", get(routes::info::root))
        .route("/health", get(routes::info::health))
        // Users
        .route(
            "/users",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route("/users/reset", post(routes::users::reset_users))
        .route(
            "/users/{id}",
            get(routes::users::get_user)
                .patch(routes::users::update_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        )
        // Latency administration
        .route(
            "/latency",
            get(routes::latency::get_status).post(routes::latency::set_mode),
        )
        .route("/latency/modes", get(routes::latency::get_modes))
        .route("/latency/reset", post(routes::latency::reset))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(parsed)
}
