use std::path::Path;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::{admin, chirps, health, metrics, users};

/// Every route the service exposes. Files under `static_root` are served at
/// `/app/` and counted by the metrics middleware.
pub fn build(state: AppState, static_root: impl AsRef<Path>) -> Router {
    let app_files = ServiceBuilder::new()
        .layer(middleware::from_fn_with_state(state.clone(), metrics::count_hits))
        .service(ServeDir::new(static_root.as_ref()));

    let api_routes = Router::new()
        .route("/api/healthz", get(health::healthz))
        .route("/api/chirps", post(chirps::create_chirp).get(chirps::list_chirps))
        .route("/api/chirps/{chirp_id}", get(chirps::get_chirp))
        .route("/api/validate_chirp", post(chirps::validate_chirp))
        .route("/api/users", post(users::create_user));

    let admin_routes = Router::new()
        .route("/admin/metrics", get(admin::metrics))
        .route("/admin/reset", post(admin::reset));

    Router::new()
        .merge(api_routes)
        .merge(admin_routes)
        .nest_service("/app", app_files)
        .with_state(state)
}
