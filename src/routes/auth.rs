use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::{
    auth::TokenPair,
    error::AppResult,
    models::UserProfile,
    services::accounts::{self, LoginRequest, RefreshRequest, RegisterRequest},
    state::AppState,
};

use super::extract::ApiJson;

/// Handler for account registration
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserProfile>)> {
    let user = accounts::register(state.store.as_ref(), request, state.bcrypt_cost).await?;
    Ok((StatusCode::CREATED, Json(UserProfile::from(&user))))
}

/// Handler for login; returns a refresh/access token pair
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let pair = accounts::login(state.store.as_ref(), &state.tokens, request).await?;
    Ok(Json(pair))
}

/// Handler for exchanging a refresh token for a new access token
pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RefreshRequest>,
) -> AppResult<Json<Value>> {
    let access = accounts::refresh(&state.tokens, request)?;
    Ok(Json(json!({ "access": access })))
}
