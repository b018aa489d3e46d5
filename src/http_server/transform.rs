use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use transform_models::{TransformRequest, TransformResponse};

use super::{ApiError, ApiState};

/// Evaluates the submitted script against the submitted input.
pub async fn transform(
    State(state): State<ApiState>,
    Json(request): Json<TransformRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.sandbox.transform_blocking(request.script, request.input).await?;
    Ok((StatusCode::OK, Json(TransformResponse { result })))
}
