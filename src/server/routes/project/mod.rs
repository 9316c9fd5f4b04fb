pub mod handler;
pub mod path;
use axum::{routing::get, Router};

use handler::get_projects;
use path::ProjectPath;

use crate::server::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(ProjectPath::Projects.as_str(), get(get_projects))
}
