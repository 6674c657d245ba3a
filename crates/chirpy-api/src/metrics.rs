use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::state::AppState;

/// Count a static asset request, then hand it to the file server.
pub async fn count_hits(State(state): State<AppState>, req: Request, next: Next) -> Response {
    state.record_hit();
    next.run(req).await
}
