//! The fixed response wrapper every product route answers with.
//!
//! Exactly three shapes leave the service:
//!
//! ```json
//! {"status": "SUCCESS", "data": ...}
//! {"status": "SUCCESS", "message": "..."}
//! {"status": "FAIL", "message": "Something went wrong!"}
//! ```
//!
//! All of them are sent with HTTP 200.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const FAILURE_MESSAGE: &str = "Something went wrong!";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum EnvelopeStatus {
    Success,
    Fail,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T = ()> {
    pub status: EnvelopeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: Some(data),
            message: None,
        }
    }
}

impl Envelope {
    pub fn message(message: &'static str) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            data: None,
            message: Some(message),
        }
    }

    pub fn fail() -> Self {
        Self {
            status: EnvelopeStatus::Fail,
            data: None,
            message: Some(FAILURE_MESSAGE),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
