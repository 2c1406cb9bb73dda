use axum::{Json, extract::State};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::extract::FormOrJson;
use crate::api::responses::UserResponse;
use crate::api::server::AppState;
use crate::error::AppError;
use crate::tracker::Scalar;

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserPayload {
    #[serde(default)]
    pub username: Option<Scalar>,
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    FormOrJson(payload): FormOrJson<CreateUserPayload>,
) -> Result<Json<UserResponse>, AppError> {
    let username = payload.username.as_ref().map(Scalar::to_text);
    let user = state.directory.create(username).await?;
    Ok(Json(user.into()))
}

pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.directory.list_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
