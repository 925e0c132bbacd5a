//! HTTP gateway over a video-platform metadata/search client.
//!
//! # Overview
//! Translates REST-style requests into calls against a [`VideoPlatform`]
//! implementation and serializes the returned domain objects into a
//! client-selectable wire format (JSON, XML property list, or binary
//! property list) negotiated from the `Accept` header.
//!
//! # Design
//! - The router is an exact-path table; all methods reach the handler and
//!   method checking happens per endpoint.
//! - Handlers adapt domain objects into a neutral [`tree::Value`] once;
//!   each wire format renders that tree.
//! - The platform handle is injected at construction and shared read-only
//!   across requests; everything else is request-local.

use std::sync::Arc;

use axum::routing::any;
use axum::Router;
use tokio::net::TcpListener;
use tubegate_core::VideoPlatform;

pub mod adapt;
pub mod params;
pub mod render;
pub mod response;
pub mod tree;

mod handlers;

/// Shared request state: the one process-wide upstream client handle.
#[derive(Clone)]
pub struct AppState {
    pub platform: Arc<dyn VideoPlatform>,
}

/// Build the gateway router around an upstream platform client.
pub fn app(platform: Arc<dyn VideoPlatform>) -> Router {
    let state = AppState { platform };
    Router::new()
        .route("/", any(handlers::root))
        .route("/search", any(handlers::search))
        .route("/search/videos", any(handlers::search))
        .route("/search/channels", any(handlers::search))
        .route("/search/playlists", any(handlers::search))
        .route("/video", any(handlers::video))
        .route("/channel", any(handlers::channel))
        .fallback(handlers::fallback)
        .with_state(state)
}

/// Serve the gateway until the listener closes.
pub async fn run(
    listener: TcpListener,
    platform: Arc<dyn VideoPlatform>,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app(platform)).await
}
