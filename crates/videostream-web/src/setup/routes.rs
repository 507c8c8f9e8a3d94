//! Route configuration and setup.
//!
//! Public pages and the protected upload group. The session gate is a
//! route layer on the protected group only; its matcher is exactly the
//! `/upload` routes, so every other request skips the gate entirely.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, home, upload, videos};
use crate::middleware::session_gate;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/", get(home::home_page))
        .route("/auth", get(auth::auth_page).post(auth::auth_submit))
        .route("/auth/signout", post(auth::sign_out))
        .route("/videos", get(videos::videos_page))
        .route("/videos/{id}", get(videos::video_detail_page));

    let protected_routes = Router::new()
        .route(
            "/upload",
            get(upload::upload_form).post(upload::upload_submit),
        )
        .route("/upload/status", get(upload::upload_status))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_gate,
        ));

    let cors = setup_cors(&state.config.cors_origins);

    public_routes
        .merge(protected_routes)
        .layer(DefaultBodyLimit::max(state.config.max_video_size_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn setup_cors(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(parsed)
    }
}
