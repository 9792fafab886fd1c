//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use carrental_domain::error::RentalError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`RentalError`] to an HTTP response with appropriate status code.
///
/// Business-rule conflicts answer `406 Not Acceptable`, which is what API
/// clients of the rental desk already expect.
#[derive(Debug)]
pub struct ApiError(RentalError);

impl From<RentalError> for ApiError {
    fn from(err: RentalError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            RentalError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            RentalError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            RentalError::Conflict(err) => {
                tracing::warn!(reason = %err, "request refused");
                (StatusCode::NOT_ACCEPTABLE, err.to_string())
            }
            RentalError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
