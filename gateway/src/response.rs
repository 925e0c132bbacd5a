//! Response construction.
//!
//! Every response carries an explicit `Content-Type` and a `Content-Length`
//! computed from the serialized body, so the values hold even when a test
//! drives the router without a real HTTP connection in front of it.

use axum::body::Body;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;

use crate::render::WireFormat;
use crate::tree::Value;

/// A fixed `text/plain; charset=UTF-8` response, used for the root usage
/// text and all error bodies.
pub fn text(status: StatusCode, body: &str) -> Response {
    build(status, "text/plain; charset=UTF-8", body.as_bytes().to_vec())
}

/// Serialize `tree` in the format negotiated from the request's `Accept`
/// header. A tree the chosen format cannot express is an adapter defect;
/// it fails the request loudly rather than truncating data.
pub fn negotiated(status: StatusCode, tree: &Value, request_headers: &HeaderMap) -> Response {
    let accept = request_headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok());
    let format = WireFormat::negotiate(accept);
    match format.render(tree) {
        Ok(body) => build(status, format.content_type(), body),
        Err(err) => {
            tracing::error!(%err, ?format, "response body failed to serialize");
            text(StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error\n")
        }
    }
}

fn build(status: StatusCode, content_type: &'static str, body: Vec<u8>) -> Response {
    let length = body.len();
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
        .headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    response
}
