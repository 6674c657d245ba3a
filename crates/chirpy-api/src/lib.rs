pub mod admin;
pub mod chirps;
pub mod error;
pub mod filter;
pub mod health;
pub mod metrics;
pub mod router;
pub mod state;
pub mod users;

pub use error::ApiError;
pub use state::{AppState, AppStateInner, Platform};
