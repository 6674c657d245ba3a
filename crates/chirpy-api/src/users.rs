use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use tracing::{info, warn};

use chirpy_types::api::{CreateUserRequest, UserResponse};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/users — register an email.
///
/// Store failures, including a duplicate email, are reported as 400.
pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<CreateUserRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let email = req.email;

    let user = state
        .call_store("create_user", move |store| store.create_user(&email))
        .await
        .map_err(|e| {
            warn!("{}", e);
            ApiError::BadRequest("error with creating user".into())
        })?;

    info!("User {} created", user.id);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
