//! Mapping from domain errors to HTTP responses.

use api_shared::ErrorRes;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use carefinder_core::CoreError;
use carefinder_providers::ProviderError;

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorRes,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorRes) -> Self {
        Self { status, body }
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorRes::new("Internal error"),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => {
                tracing::warn!(?errors, "validation failed");
                Self::new(
                    StatusCode::BAD_REQUEST,
                    ErrorRes::with_errors("Validation failed", errors),
                )
            }
            CoreError::InvalidCoordinate { .. }
            | CoreError::InvalidRadius(_)
            | CoreError::InvalidInput(_)
            | CoreError::Duplicate(_) => {
                tracing::warn!("rejected request: {}", err);
                Self::new(StatusCode::BAD_REQUEST, ErrorRes::new(err.to_string()))
            }
            CoreError::NotFound(_) => {
                tracing::warn!("{}", err);
                Self::new(StatusCode::NOT_FOUND, ErrorRes::new(err.to_string()))
            }
            CoreError::FileRead(_)
            | CoreError::FileWrite(_)
            | CoreError::Serialization(_)
            | CoreError::Deserialization(_) => {
                tracing::error!("registry storage error: {:?}", err);
                Self::internal()
            }
        }
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Core(core) => core.into(),
            ProviderError::NoProviders => {
                tracing::error!("nearby search requested but no providers are configured");
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorRes::new("No upstream providers configured"),
                )
            }
            other => {
                tracing::error!("upstream providers failed: {:?}", other);
                Self::new(
                    StatusCode::BAD_GATEWAY,
                    ErrorRes::new("Unable to reach map data providers"),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_client_statuses() {
        let cases = [
            (CoreError::InvalidRadius(0.0), StatusCode::BAD_REQUEST),
            (
                CoreError::Duplicate("Email already registered".into()),
                StatusCode::BAD_REQUEST,
            ),
            (CoreError::Validation(vec!["x".into()]), StatusCode::BAD_REQUEST),
            (CoreError::NotFound("hospital".into()), StatusCode::NOT_FOUND),
            (
                CoreError::FileWrite(std::io::Error::other("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_provider_errors_map_to_gateway_statuses() {
        let upstream = ProviderError::Status {
            provider: "overpass".into(),
            status: 504,
        };
        assert_eq!(ApiError::from(upstream).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ApiError::from(ProviderError::NoProviders).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(ProviderError::Core(CoreError::InvalidRadius(-1.0))).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
