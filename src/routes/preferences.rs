use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    middleware::RequestId,
    models::Preference,
    services::preferences,
    state::AppState,
};

use super::extract::{ApiJson, ApiPath};

#[derive(Debug, Deserialize)]
pub struct UpdatePreferenceRequest {
    pub preference: String,
}

/// Handler for creating preferences from a list of genre names
///
/// Responds 201 with the created rows, or 207 with `created` and `errors`
/// when any item was rejected.
pub async fn create_preferences(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    user: AuthUser,
    ApiJson(body): ApiJson<Value>,
) -> AppResult<Response> {
    let items = match body.get("preferences") {
        None => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(_) => {
            return Err(AppError::BadRequest(
                "preferences should be a list".to_string(),
            ))
        }
    };

    tracing::info!(
        request_id = %request_id,
        user_id = user.id(),
        item_count = items.len(),
        "Processing preference creation"
    );

    let batch = preferences::add_preferences(state.store.as_ref(), user.id(), &items).await?;

    if batch.is_complete() {
        Ok((StatusCode::CREATED, Json(batch.created)).into_response())
    } else {
        Ok((StatusCode::MULTI_STATUS, Json(batch)).into_response())
    }
}

/// Handler listing the caller's preferences
pub async fn list_preferences(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Preference>>> {
    let rows = preferences::list_preferences(
        state.store.as_ref(),
        &state.cache,
        state.cache_ttl,
        user.id(),
    )
    .await?;
    Ok(Json(rows))
}

/// Handler returning the caller's preference for one genre
pub async fn get_preference(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(genre): ApiPath<String>,
) -> AppResult<Json<Preference>> {
    let row = preferences::get_preference(
        state.store.as_ref(),
        &state.cache,
        state.cache_ttl,
        user.id(),
        &genre,
    )
    .await?;
    Ok(Json(row))
}

/// Handler replacing the genre of one of the caller's preferences
pub async fn update_preference(
    State(state): State<AppState>,
    user: AuthUser,
    ApiPath(record_id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdatePreferenceRequest>,
) -> AppResult<Json<Preference>> {
    let row = preferences::update_preference(
        state.store.as_ref(),
        user.id(),
        record_id,
        &request.preference,
    )
    .await?;
    Ok(Json(row))
}
