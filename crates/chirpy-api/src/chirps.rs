use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use tracing::{error, info};
use uuid::Uuid;

use chirpy_types::api::{ChirpResponse, CreateChirpRequest, ValidateChirpRequest, ValidateChirpResponse};

use crate::error::ApiError;
use crate::filter::MAX_CHIRP_LENGTH;
use crate::state::AppState;

fn check_length(body: &str) -> Result<(), ApiError> {
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ApiError::BadRequest("Chirp is too long".into()));
    }
    Ok(())
}

/// POST /api/chirps — validate, mask and store a chirp.
pub async fn create_chirp(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<CreateChirpRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    check_length(&req.body)?;

    let cleaned = state.filter.clean(&req.body);
    let user_id = req.user_id;

    let chirp = state
        .call_store("create_chirp", move |store| store.create_chirp(&cleaned, user_id))
        .await
        .map_err(|e| {
            error!("{}", e);
            ApiError::Internal("issue creating chirp".into())
        })?;

    info!("Chirp {} created", chirp.id);
    Ok((StatusCode::CREATED, Json(ChirpResponse::from(chirp))))
}

/// GET /api/chirps — every chirp, oldest first.
pub async fn list_chirps(State(state): State<AppState>) -> Result<Json<Vec<ChirpResponse>>, ApiError> {
    let chirps = state
        .call_store("get_chirps", |store| store.get_chirps())
        .await
        .map_err(|e| {
            error!("{}", e);
            ApiError::Internal("issue with retrieving chirps".into())
        })?;

    Ok(Json(chirps.into_iter().map(ChirpResponse::from).collect()))
}

/// GET /api/chirps/{chirp_id}
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<String>,
) -> Result<Json<ChirpResponse>, ApiError> {
    let id = Uuid::parse_str(&chirp_id).map_err(|_| ApiError::BadRequest("bad uuid".into()))?;

    let chirp = state
        .call_store("get_chirp", move |store| store.get_chirp(id))
        .await
        .map_err(|e| {
            error!("{}", e);
            ApiError::Internal("issue with retrieving chirp".into())
        })?
        .ok_or_else(|| ApiError::NotFound("data not found".into()))?;

    Ok(Json(chirp.into()))
}

/// POST /api/validate_chirp — length check and masking without storing.
pub async fn validate_chirp(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<ValidateChirpRequest>, ApiError>,
) -> Result<Json<ValidateChirpResponse>, ApiError> {
    check_length(&req.body)?;

    Ok(Json(ValidateChirpResponse {
        valid: true,
        cleaned_body: state.filter.clean(&req.body),
    }))
}
