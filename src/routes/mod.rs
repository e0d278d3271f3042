use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{make_span_with_request_id, request_id_middleware},
    state::AppState,
};

pub mod auth;
pub mod extract;
pub mod preferences;
pub mod statistics;
pub mod videos;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(account_routes())
        .merge(preference_routes())
        .merge(video_routes())
        .merge(statistics_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register/", post(auth::register))
        .route("/login/", post(auth::login))
        .route("/token/refresh/", post(auth::refresh_token))
}

fn preference_routes() -> Router<AppState> {
    Router::new()
        .route("/preferences/", post(preferences::create_preferences))
        .route("/preferences/retrieve/", get(preferences::list_preferences))
        .route(
            "/preferences/retrieve/:genre/",
            get(preferences::get_preference),
        )
        .route(
            "/preference/update/:record_id/",
            put(preferences::update_preference),
        )
}

fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/videos/", post(videos::create_video))
        .route("/videos/retrieve/", get(videos::list_videos))
}

fn statistics_routes() -> Router<AppState> {
    Router::new()
        .route("/video-statistics/", post(statistics::record_interaction))
        .route(
            "/video-statistics/:video_id/",
            get(statistics::list_interactions),
        )
        .route(
            "/video-statistics/views/:video_id/",
            get(statistics::list_views),
        )
        .route(
            "/video-statistics/shares/:video_id/",
            get(statistics::list_shares),
        )
        .route(
            "/video-statistics/downloads/:video_id/",
            get(statistics::list_downloads),
        )
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
