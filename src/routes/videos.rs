use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::{
    auth::AuthUser,
    error::AppResult,
    middleware::RequestId,
    models::Video,
    services::videos::{self, CreateVideoRequest},
    state::AppState,
};

use super::extract::ApiJson;

/// Handler for adding a video to the catalog
pub async fn create_video(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    user: AuthUser,
    ApiJson(request): ApiJson<CreateVideoRequest>,
) -> AppResult<(StatusCode, Json<Video>)> {
    tracing::info!(
        request_id = %request_id,
        user_id = user.id(),
        title = %request.title,
        "Processing video creation"
    );

    let video = videos::add_video(state.store.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(video)))
}

/// Handler listing videos in the caller's preferred genres
pub async fn list_videos(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Video>>> {
    let videos = videos::list_videos_for_user(
        state.store.as_ref(),
        &state.cache,
        state.cache_ttl,
        user.id(),
    )
    .await?;
    Ok(Json(videos))
}
