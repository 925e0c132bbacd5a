//! Form-encoded parameter parsing.
//!
//! # Design
//! Both POST bodies and GET query strings decode into a flat
//! `name -> single value` map. Multi-valued keys collapse to their last
//! occurrence; blank values are dropped. Parsing never fails — malformed
//! input simply contributes fewer entries, and an absent or non-numeric
//! `Content-Length` reads as an empty body.

use std::collections::HashMap;

use axum::http::{header, HeaderMap};
use percent_encoding::percent_decode_str;

/// Decode a form-urlencoded POST body, honoring the declared
/// `Content-Length` (absent or unparsable means zero bytes).
pub fn parse_post_params(headers: &HeaderMap, body: &[u8]) -> HashMap<String, String> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    parse_form(&body[..declared.min(body.len())])
}

/// Decode a raw URL query string. `None` (no `?` in the request line)
/// yields an empty map.
pub fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    parse_form(query.unwrap_or("").as_bytes())
}

fn parse_form(raw: &[u8]) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in form_urlencoded::parse(raw) {
        // A bare key or empty value carries no information; dropping it
        // also means `a=1&a=` keeps the earlier non-blank value.
        if value.is_empty() {
            continue;
        }
        params.insert(key.into_owned(), value.into_owned());
    }
    params
}

/// Plus-to-space and percent-decoding of a single parameter value.
///
/// Applied by handlers to values bound for the upstream platform, after
/// the form layer has already decoded once. Invalid UTF-8 sequences decode
/// lossily rather than failing the request.
pub fn unquote_plus(value: &str) -> String {
    let spaced = value.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}
