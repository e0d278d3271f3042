use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use crate::{
    auth::AuthUser,
    error::AppResult,
    middleware::RequestId,
    models::{Interaction, InteractionKind},
    services::statistics::{self, RecordInteractionRequest},
    state::AppState,
};

use super::extract::{ApiJson, ApiPath};

/// Handler for recording an interaction by the caller
pub async fn record_interaction(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    user: AuthUser,
    ApiJson(request): ApiJson<RecordInteractionRequest>,
) -> AppResult<(StatusCode, Json<Interaction>)> {
    tracing::info!(
        request_id = %request_id,
        user_id = user.id(),
        video_id = request.video,
        "Processing interaction"
    );

    let interaction =
        statistics::record_interaction(state.store.as_ref(), Some(user.id()), request).await?;
    Ok((StatusCode::CREATED, Json(interaction)))
}

async fn list_for_kind(
    state: &AppState,
    user: &AuthUser,
    video_id: i64,
    kind: Option<InteractionKind>,
) -> AppResult<Json<Vec<Interaction>>> {
    let interactions = statistics::list_interactions(
        state.store.as_ref(),
        &state.cache,
        state.cache_ttl,
        user.id(),
        video_id,
        kind,
    )
    .await?;
    Ok(Json(interactions))
}

/// Handler listing all of the caller's interactions with a video
pub async fn list_interactions(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(video_id): ApiPath<i64>,
) -> AppResult<Json<Vec<Interaction>>> {
    list_for_kind(&state, &user, video_id, None).await
}

pub async fn list_views(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(video_id): ApiPath<i64>,
) -> AppResult<Json<Vec<Interaction>>> {
    list_for_kind(&state, &user, video_id, Some(InteractionKind::View)).await
}

pub async fn list_shares(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(video_id): ApiPath<i64>,
) -> AppResult<Json<Vec<Interaction>>> {
    list_for_kind(&state, &user, video_id, Some(InteractionKind::Share)).await
}

pub async fn list_downloads(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(video_id): ApiPath<i64>,
) -> AppResult<Json<Vec<Interaction>>> {
    list_for_kind(&state, &user, video_id, Some(InteractionKind::Download)).await
}
