use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use transform_models::{IdentityRequest, IdentityResponse};

use super::{ApiError, ApiState};

/// Derives the identity of the submitted document with the configured factory.
pub async fn identity(
    State(state): State<ApiState>,
    Json(request): Json<IdentityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let service = state
        .identity
        .as_ref()
        .ok_or_else(|| ApiError::NotFound("Identity factory is not configured".to_string()))?;

    let identity = service.derive(request.data).await?;
    Ok((StatusCode::OK, Json(IdentityResponse { identity })))
}
