use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::extract::FormOrJson;
use crate::api::responses::{ExerciseResponse, LogResponse};
use crate::api::server::AppState;
use crate::error::AppError;
use crate::tracker::{LogQuery, NewExercise, Scalar};

#[derive(Debug, Default, Deserialize)]
pub struct ExercisePayload {
    #[serde(default)]
    pub description: Option<Scalar>,
    #[serde(default)]
    pub duration: Option<Scalar>,
    #[serde(default)]
    pub date: Option<Scalar>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

pub async fn add_exercise(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    FormOrJson(payload): FormOrJson<ExercisePayload>,
) -> Result<Json<ExerciseResponse>, AppError> {
    let input = NewExercise {
        description: payload.description.as_ref().map(Scalar::to_text),
        duration: payload.duration,
        date: payload.date,
    };

    let logged = state.log.append(&user_id, input).await?;
    Ok(Json(logged.into()))
}

pub async fn get_logs(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<LogParams>,
) -> Result<Json<LogResponse>, AppError> {
    let query = LogQuery {
        from: params.from,
        to: params.to,
        limit: params.limit,
    };

    let user_log = state.log.query(&user_id, query).await?;
    Ok(Json(user_log.into()))
}
