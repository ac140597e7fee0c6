use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use blurcheck::BlurError;
use tokio::task::JoinError;

/// An HTTP error carrying a human-readable detail
///
/// Rendered as `{"detail": "..."}` with the matching status code.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }

    pub fn missing_data() -> Self {
        Self::bad_request("No image data received")
    }
}

impl From<BlurError> for ApiError {
    fn from(err: BlurError) -> Self {
        if err.is_client_error() {
            Self::bad_request(err.to_string())
        } else {
            Self::internal(err.to_string())
        }
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, detail = %self.detail, "Request failed");
        } else {
            tracing::info!(status = %self.status, detail = %self.detail, "Request rejected");
        }

        let body = Json(serde_json::json!({ "detail": self.detail }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400_and_the_rest_to_500() {
        let invalid = ApiError::from(BlurError::InvalidThreshold(-1.0));
        assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

        let internal = ApiError::from(BlurError::Internal("scorer exploded".into()));
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.detail, "scorer exploded");
    }

    #[test]
    fn decoder_limits_are_a_server_error_with_message() {
        use imageproc::image::error::{LimitError, LimitErrorKind};
        use imageproc::image::ImageError;

        let limits = ImageError::Limits(LimitError::from_kind(LimitErrorKind::InsufficientMemory));
        let err = ApiError::from(BlurError::from(limits));

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.detail.starts_with("image exceeds decoder limits"), "{}", err.detail);
    }

    #[tokio::test]
    async fn scorer_panic_is_a_server_error_with_message() {
        let join_error = tokio::task::spawn_blocking(|| panic!("scorer exploded"))
            .await
            .unwrap_err();
        let err = ApiError::from(join_error);

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.detail.contains("panicked"), "{}", err.detail);
    }

    #[tokio::test]
    async fn renders_detail_as_json() {
        let response = ApiError::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({ "detail": "boom" }));
    }
}
