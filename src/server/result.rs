use axum::{
    http::{Response, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::error;

use crate::holdings::HoldingsError;

pub type AppResult<T> = Result<T, AppError>;
pub type AppJsonResult<T> = AppResult<Json<T>>;

#[derive(Debug)]
pub enum AppError {
    AnyhowError(anyhow::Error),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    InternalError(String),
    BadGateway(String),
    ServiceUnavailable(String),
}

/// Postgres `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        for cause in error.chain() {
            match cause.downcast_ref::<sqlx::Error>() {
                Some(sqlx::Error::RowNotFound) => {
                    return AppError::NotFound("Not Found".into());
                }
                Some(sqlx::Error::Database(db))
                    if db.code().as_deref() == Some(UNIQUE_VIOLATION) =>
                {
                    return AppError::Conflict(db.message().to_string());
                }
                _ => {}
            }
        }
        AppError::AnyhowError(error)
    }
}

impl From<HoldingsError> for AppError {
    fn from(error: HoldingsError) -> Self {
        let message = error.to_string();
        match error {
            HoldingsError::InvalidInput(_) => AppError::BadRequest(message),
            HoldingsError::ConfigurationMissing(_) | HoldingsError::Persistence(_) => {
                AppError::InternalError(message)
            }
            HoldingsError::ProviderUnavailable(_) => AppError::ServiceUnavailable(message),
            HoldingsError::Contract(_) => AppError::BadGateway(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response<axum::body::Body> {
        let (status, error_message) = match self {
            AppError::AnyhowError(err) => {
                error!("Unhandled error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalError(msg) => {
                error!("{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(error: impl Into<AppError>) -> StatusCode {
        error.into().into_response().status()
    }

    #[test]
    fn test_holdings_error_status() {
        assert_eq!(
            status(HoldingsError::InvalidInput("bad".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status(HoldingsError::ConfigurationMissing("key".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(HoldingsError::ProviderUnavailable("down".into())),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status(HoldingsError::Contract("revert".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status(HoldingsError::Persistence("db".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_row_not_found_behind_context_is_404() {
        let error = anyhow::Error::from(sqlx::Error::RowNotFound).context("Failed to load wallet");
        assert_eq!(status(error), StatusCode::NOT_FOUND);
        assert_eq!(
            status(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
