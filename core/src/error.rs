//! Error taxonomy for upstream platform calls.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently
//! distinguish "the video/channel does not exist" from "the upstream
//! service misbehaved." Transport failures, non-success statuses, and
//! response-shape surprises each get their own variant so the gateway can
//! log a precise cause while returning a generic body to the client.

use thiserror::Error;

/// Errors returned by [`crate::VideoPlatform`] implementations.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The HTTP round-trip to the upstream service failed outright.
    #[error("upstream transport error: {0}")]
    Network(String),

    /// The upstream service answered with a non-success status.
    #[error("upstream returned HTTP {status}")]
    Status { status: u16, body: String },

    /// The upstream response body could not be decoded.
    #[error("could not decode upstream response: {0}")]
    Decode(String),

    /// The requested video or channel does not exist upstream.
    #[error("not found: {0}")]
    NotFound(String),

    /// The response decoded cleanly but did not carry the expected shape.
    #[error("unrecognized upstream payload: {0}")]
    Unrecognized(String),
}
