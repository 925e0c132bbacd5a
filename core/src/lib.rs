//! Domain model and platform seam for the tubegate HTTP gateway.
//!
//! # Overview
//! Defines the immutable, per-request value objects the gateway serializes
//! (videos, channels, paged search results), the strongly typed identifiers
//! the upstream platform expects, and the [`VideoPlatform`] trait that
//! abstracts the upstream metadata/search client.
//!
//! # Design
//! - Domain objects are plain owned snapshots; nothing in the gateway
//!   mutates them after the platform returns them.
//! - Search-result entries are a closed tagged union ([`SearchResult`]) so
//!   polymorphic dispatch is an exhaustive `match` with no fall-through.
//! - `VideoPlatform` is object-safe; the gateway holds one process-wide
//!   `Arc<dyn VideoPlatform>` constructed at startup and shared read-only
//!   across requests.

pub mod error;
pub mod ids;
pub mod platform;
pub mod types;

pub use error::PlatformError;
pub use ids::{ChannelHandle, ChannelId, ChannelSelector, ChannelSlug, PlaylistId, UserName, VideoId};
pub use platform::VideoPlatform;
pub use types::{
    Author, Channel, ChannelSearchResult, Engagement, PagedSearchResult, PlaylistSearchResult,
    SearchResult, Thumbnail, Video, VideoSearchResult,
};
