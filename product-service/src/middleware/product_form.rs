use crate::error::ApiError;
use crate::models::ProductFields;
use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};

/// Extracts the product attributes from a create or update body.
///
/// Url-encoded forms and JSON are parsed; any other content type, or none,
/// yields no attributes at all rather than an error. A body that does not
/// parse (e.g. `price=abc`) is a malformed request.
#[derive(Debug, Default)]
pub struct ProductForm(pub ProductFields);

enum BodyKind {
    Form,
    Json,
    Ignored,
}

fn body_kind(req: &Request) -> BodyKind {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        BodyKind::Form
    } else if content_type.starts_with("application/json") {
        BodyKind::Json
    } else {
        BodyKind::Ignored
    }
}

#[async_trait]
impl<S> FromRequest<S> for ProductForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match body_kind(&req) {
            BodyKind::Form => {
                let Form(fields) = Form::<ProductFields>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::MalformedRequest(e.body_text()))?;
                Ok(Self(fields))
            }
            BodyKind::Json => {
                let Json(fields) = Json::<ProductFields>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::MalformedRequest(e.body_text()))?;
                Ok(Self(fields))
            }
            BodyKind::Ignored => Ok(Self::default()),
        }
    }
}
