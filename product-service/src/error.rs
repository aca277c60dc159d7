use crate::dtos::Envelope;
use crate::services::StoreError;
use axum::response::{IntoResponse, Response};
use metrics::counter;
use thiserror::Error;

/// Anything that can go wrong while serving a product route.
///
/// Callers never see the cause: every variant renders as the same FAIL
/// envelope. The cause is logged and counted instead.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Store(StoreError::InvalidId(_)) => "invalid_id",
            ApiError::Store(StoreError::Database(_)) => "database",
            ApiError::Store(StoreError::Serialization(_)) => "serialization",
            ApiError::Store(StoreError::Unavailable) => "unavailable",
            ApiError::MalformedRequest(_) => "malformed_request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        tracing::error!(error = %self, kind, "Product request failed");
        counter!("product_request_failures_total", "kind" => kind).increment(1);

        Envelope::fail().into_response()
    }
}
