use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// JSON error body returned by every failing endpoint. Every error in
/// this API carries a stable machine-readable code alongside the message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: &'static str) -> Self {
        Self {
            error: error.into(),
            code,
        }
    }
}

/// Trait for service errors that map onto HTTP responses
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Stable machine-readable code (e.g. "CITY_NOT_FOUND")
    fn error_code(&self) -> &'static str;
}

/// Render any HttpError as an Axum response
pub fn into_response<E: HttpError>(err: E) -> Response {
    let status = err.status_code();
    let code = err.error_code();
    let message = err.to_string();

    tracing::error!(
        error = %message,
        status = %status,
        code = code,
        "API error"
    );

    (status, Json(ErrorResponse::new(message, code))).into_response()
}

/// Macro to implement IntoResponse for HttpError types
#[macro_export]
macro_rules! impl_into_response {
    ($error_type:ty) => {
        impl axum::response::IntoResponse for $error_type {
            fn into_response(self) -> axum::response::Response {
                $crate::error::into_response(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Error, Debug)]
    enum TestError {
        #[error("city not found: {0}")]
        NotFound(String),
    }

    impl HttpError for TestError {
        fn status_code(&self) -> StatusCode {
            StatusCode::NOT_FOUND
        }

        fn error_code(&self) -> &'static str {
            "CITY_NOT_FOUND"
        }
    }

    #[test]
    fn response_uses_the_error_status() {
        let response = into_response(TestError::NotFound("Nowhereville".to_string()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn body_carries_message_and_code() {
        let body = ErrorResponse::new("city not found: Nowhereville", "CITY_NOT_FOUND");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "city not found: Nowhereville");
        assert_eq!(json["code"], "CITY_NOT_FOUND");
    }
}
