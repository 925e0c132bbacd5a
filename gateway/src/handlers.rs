//! Endpoint handlers.
//!
//! Handlers are stateless: each one validates its parameters, makes a
//! single upstream call through the shared [`tubegate_core::VideoPlatform`]
//! handle, and adapts the result. Method checking happens here, not in the
//! router — the route table is a pure path lookup.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::Response;
use tubegate_core::{
    ChannelHandle, ChannelId, ChannelSelector, ChannelSlug, PlatformError, UserName, VideoId,
};

use crate::params::{parse_post_params, parse_query, unquote_plus};
use crate::response;
use crate::{adapt, AppState};

const BAD_REQUEST: &str = "400 Bad Request\n";
const NOT_FOUND: &str = "404 Not Found\n";
const BAD_GATEWAY: &str = "502 Bad Gateway\n";

const USAGE: &str = r#"Usage:

Search for "iMac":
curl -X POST -d "q=iMac" http://localhost:8000/search

Search for "El Nino" (spaces replaced with '+', unicode percent-escaped):
curl -X POST -d "q=El+Ni%C3%B1o" http://localhost:8000/search

Return minified JSON:
curl -X POST -H "Accept: application/json" -d "q=iMac" http://localhost:8000/search

Return an Apple Property List (.plist), XML format:
curl -X POST -H "Accept: application/x-plist" -d "q=iMac" http://localhost:8000/search

Return an Apple Property List (.plist), binary format:
curl -X POST -H "Accept: application/x-plist.binary" -d "q=iMac" http://localhost:8000/search

To get the next page, include the continuationToken from the previous search:
curl -X POST -d "q=iMac&continuationToken=..." http://localhost:8000/search

Search only for videos:
curl -X POST -d "q=iMac" http://localhost:8000/search/videos

Search only for channels:
curl -X POST -d "q=iMac" http://localhost:8000/search/channels

Search only for playlists:
curl -X POST -d "q=iMac" http://localhost:8000/search/playlists

Get the details of a video:
curl -X GET http://localhost:8000/video?id=dQw4w9WgXcQ

Get the details of a channel:
curl -X GET http://localhost:8000/channel?id=UCuAXFkgsw1L7xaCfnd5JJOw
curl -X GET http://localhost:8000/channel?handle=RickAstleyYT
curl -X GET http://localhost:8000/channel?slug=BlenderFoundation
curl -X GET http://localhost:8000/channel?user=65scribe
"#;

/// `GET/POST/any /` — fixed plain-text usage. Bypasses format negotiation.
pub(crate) async fn root() -> Response {
    response::text(StatusCode::OK, USAGE)
}

/// Central not-found response for unmatched paths.
pub(crate) async fn fallback() -> Response {
    response::text(StatusCode::NOT_FOUND, NOT_FOUND)
}

/// `POST /search[/videos|/channels|/playlists]` — paginated search.
///
/// The matched path selects which upstream search operation runs; the four
/// routes otherwise share this handler.
pub(crate) async fn search(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if method != Method::POST {
        return response::text(StatusCode::BAD_REQUEST, BAD_REQUEST);
    }
    let params = parse_post_params(&headers, &body);
    let Some(raw_query) = params.get("q") else {
        return response::text(
            StatusCode::BAD_REQUEST,
            "400 Bad Request: missing 'q' parameter.\n",
        );
    };
    let query = unquote_plus(raw_query);
    let continuation = params.get("continuationToken").map(String::as_str);

    let result = match uri.path() {
        "/search/videos" => state.platform.search_videos(&query, continuation).await,
        "/search/channels" => state.platform.search_channels(&query, continuation).await,
        "/search/playlists" => state.platform.search_playlists(&query, continuation).await,
        _ => state.platform.search(&query, continuation).await,
    };
    match result {
        Ok(page) => response::negotiated(StatusCode::OK, &adapt::paged_search_result(&page), &headers),
        Err(err) => upstream_failure(err),
    }
}

/// `GET /video?id=...` — full metadata for one video.
pub(crate) async fn video(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let params = parse_query(uri.query());
    let Some(raw_id) = params.get("id") else {
        return response::text(
            StatusCode::BAD_REQUEST,
            "400 Bad Request: missing 'id' query parameter.\n",
        );
    };
    let id = VideoId::new(unquote_plus(raw_id));
    match state.platform.video(&id).await {
        Ok(v) => response::negotiated(StatusCode::OK, &adapt::video(&v), &headers),
        Err(err) => upstream_failure(err),
    }
}

/// `GET /channel?id=|handle=|user=|slug=` — channel metadata by one of four
/// lookup keys. When several are present the first in `id`, `handle`,
/// `user`, `slug` order wins; the rest are ignored.
pub(crate) async fn channel(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let params = parse_query(uri.query());
    let selector = if let Some(raw) = params.get("id") {
        ChannelSelector::Id(ChannelId::new(unquote_plus(raw)))
    } else if let Some(raw) = params.get("handle") {
        ChannelSelector::Handle(ChannelHandle::new(unquote_plus(raw)))
    } else if let Some(raw) = params.get("user") {
        ChannelSelector::User(UserName::new(unquote_plus(raw)))
    } else if let Some(raw) = params.get("slug") {
        ChannelSelector::Slug(ChannelSlug::new(unquote_plus(raw)))
    } else {
        return response::text(StatusCode::BAD_REQUEST, BAD_REQUEST);
    };
    match state.platform.channel(&selector).await {
        Ok(c) => response::negotiated(StatusCode::OK, &adapt::channel(&c), &headers),
        Err(err) => upstream_failure(err),
    }
}

/// Upstream failures all map to a generic 502; the precise cause goes to
/// the log, never to the client.
fn upstream_failure(err: PlatformError) -> Response {
    tracing::error!(%err, "upstream platform call failed");
    response::text(StatusCode::BAD_GATEWAY, BAD_GATEWAY)
}
