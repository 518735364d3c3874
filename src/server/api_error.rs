use crate::error::ServiceError;
use crate::validation::ValidationError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Failure details attached to an error response.
///
/// The body itself is rendered by the `error_body` layer, which knows the
/// request path.
#[derive(Clone, Debug)]
pub struct ErrorReport {
    pub messages: Vec<String>,
    /// Full error chain of an internal failure, for the logs only.
    pub internal: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub messages: Vec<String>,
    source: Option<anyhow::Error>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError {
            status,
            messages: vec![message.into()],
            source: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal(err: anyhow::Error) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            messages: vec![INTERNAL_ERROR_MESSAGE.to_string()],
            source: Some(err),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            messages: err.violations,
            source: None,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(v) => v.into(),
            ServiceError::BadRequest(m) => Self::new(StatusCode::BAD_REQUEST, m),
            ServiceError::Unauthorized(m) => Self::new(StatusCode::UNAUTHORIZED, m),
            ServiceError::Forbidden(m) => Self::new(StatusCode::FORBIDDEN, m),
            ServiceError::NotFound(m) => Self::new(StatusCode::NOT_FOUND, m),
            ServiceError::Conflict(m) => Self::new(StatusCode::CONFLICT, m),
            ServiceError::UnprocessableEntity(m) => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, m)
            }
            ServiceError::Internal(e) => Self::internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let report = ErrorReport {
            messages: self.messages,
            internal: self.source.map(|e| format!("{:#}", e)),
        };
        let mut response = self.status.into_response();
        response.extensions_mut().insert(report);
        response
    }
}
