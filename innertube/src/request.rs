//! InnerTube request-body builders.

use serde_json::{json, Value};

const WEB_CLIENT_NAME: &str = "WEB";
const WEB_CLIENT_VERSION: &str = "2.20240726.00.00";

/// Which entry kinds a search should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchFilter {
    All,
    Videos,
    Channels,
    Playlists,
}

impl SearchFilter {
    /// The protobuf-encoded `params` blob selecting a result-type filter.
    /// These values are fixed constants of the web client.
    fn params(self) -> Option<&'static str> {
        match self {
            SearchFilter::All => None,
            SearchFilter::Videos => Some("EgIQAQ%3D%3D"),
            SearchFilter::Channels => Some("EgIQAg%3D%3D"),
            SearchFilter::Playlists => Some("EgIQAw%3D%3D"),
        }
    }
}

fn context() -> Value {
    json!({
        "client": {
            "clientName": WEB_CLIENT_NAME,
            "clientVersion": WEB_CLIENT_VERSION,
        }
    })
}

/// Body for `/search`. A continuation token replaces the query and filter
/// entirely; the token already encodes both.
pub(crate) fn search_body(query: &str, filter: SearchFilter, continuation: Option<&str>) -> Value {
    match continuation {
        Some(token) => json!({
            "context": context(),
            "continuation": token,
        }),
        None => {
            let mut body = json!({
                "context": context(),
                "query": query,
            });
            if let Some(params) = filter.params() {
                body["params"] = json!(params);
            }
            body
        }
    }
}

/// Body for `/player`.
pub(crate) fn player_body(video_id: &str) -> Value {
    json!({
        "context": context(),
        "videoId": video_id,
    })
}

/// Body for `/browse`.
pub(crate) fn browse_body(browse_id: &str) -> Value {
    json!({
        "context": context(),
        "browseId": browse_id,
    })
}

/// Body for `/navigation/resolve_url`.
pub(crate) fn resolve_body(url: &str) -> Value {
    json!({
        "context": context(),
        "url": url,
    })
}
