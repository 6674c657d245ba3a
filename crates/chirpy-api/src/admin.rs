use axum::{extract::State, http::StatusCode, response::Html};
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::state::{AppState, Platform};

/// GET /admin/metrics
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>",
        state.hits()
    ))
}

/// POST /admin/reset — delete every user (and their chirps). Dev only.
///
/// The hit counter is left as is.
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    if state.platform != Platform::Dev {
        warn!("Refusing reset outside dev platform");
        return Err(ApiError::Forbidden("reset is only allowed in dev".into()));
    }

    let removed = state
        .call_store("delete_users", |store| store.delete_users())
        .await
        .map_err(|e| {
            error!("{}", e);
            ApiError::Internal("error deleting users".into())
        })?;

    info!("Reset: deleted {} users", removed);
    Ok(StatusCode::OK)
}
