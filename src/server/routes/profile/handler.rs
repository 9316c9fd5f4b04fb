use crate::{
    db::postgres::controller::profile::ProfileController,
    server::{
        result::{AppError, AppJsonResult},
        state::AppState,
    },
    types::model::Profile,
};

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "email": "holder@example.com",
    "firstName": "Ada",
    "lastName": "Lovelace"
}))]
pub struct CreateProfileRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    profile: Profile,
}

/// Create a profile
#[utoipa::path(
    post,
    path = "/profiles",
    request_body = CreateProfileRequest,
    responses(
        (status = 200, description = "Profile created", body = ProfileResponse),
        (status = 400, description = "Missing email or name"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Profile"
)]
#[instrument(skip(state))]
pub async fn create_profile(
    State(state): State<AppState>,
    Json(payload): Json<CreateProfileRequest>,
) -> AppJsonResult<ProfileResponse> {
    let email = payload.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest(format!("{} is not an email address", email)));
    }
    if payload.first_name.trim().is_empty() || payload.last_name.trim().is_empty() {
        return Err(AppError::BadRequest("first and last name are required".into()));
    }

    let profile_controller = ProfileController::new(state.postgres.clone());
    let profile = profile_controller
        .create_profile(
            email,
            payload.first_name.trim(),
            payload.last_name.trim(),
        )
        .await?;
    Ok(Json(ProfileResponse { profile }))
}

/// Get a profile
#[utoipa::path(
    get,
    path = "/profiles/{id}",
    params(
        ("id" = Uuid, Path, description = "Profile id")
    ),
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ProfileResponse),
        (status = 404, description = "Profile not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Profile"
)]
pub async fn get_profile(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> AppJsonResult<ProfileResponse> {
    let profile_controller = ProfileController::new(state.postgres.clone());
    let profile = profile_controller.get_profile(id).await?;
    Ok(Json(ProfileResponse { profile }))
}
