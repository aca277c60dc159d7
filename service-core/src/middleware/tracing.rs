use axum::http::{HeaderMap, HeaderValue};
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Returns the caller-supplied request id, if it is valid header text.
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty())
}

/// Ensures every request and response carries an `x-request-id`.
///
/// An incoming id is kept as-is; otherwise a v4 UUID is minted before the
/// request reaches the trace layer, so spans and logs can be correlated.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let header_value = match request_id(req.headers()).map(HeaderValue::from_str) {
        Some(Ok(value)) => value,
        _ => HeaderValue::from_str(&Uuid::new_v4().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("-")),
    };

    req.headers_mut()
        .insert(REQUEST_ID_HEADER, header_value.clone());

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(REQUEST_ID_HEADER, header_value);

    response
}
