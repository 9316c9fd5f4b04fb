pub mod handler;
pub mod path;
use crate::server::state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use handler::{create_profile, get_profile};
use path::ProfilePath;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(ProfilePath::Profiles.as_str(), post(create_profile))
        .route(ProfilePath::Profile.as_str(), get(get_profile))
}
