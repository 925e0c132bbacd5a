//! Domain value objects returned by the upstream platform.
//!
//! # Design
//! Every type here is a transient per-request snapshot: the platform builds
//! it, the gateway reads its fields to produce a serialization tree, and it
//! is dropped when the response goes out. Nothing is persisted or mutated.

use std::time::Duration;

use chrono::{DateTime, FixedOffset};

use crate::ids::{ChannelId, PlaylistId, VideoId};

/// A single thumbnail rendition of a video or channel avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl Thumbnail {
    /// Display form of the pixel resolution, e.g. `1280x720`.
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// The channel a video belongs to, as embedded in video metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub channel_id: ChannelId,
    pub channel_url: String,
    pub channel_title: String,
}

/// View/like/dislike counters for a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Engagement {
    pub view_count: u64,
    pub like_count: u64,
    pub dislike_count: u64,
}

/// Full metadata for a single video.
#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub id: VideoId,
    pub url: String,
    pub title: String,
    pub author: Author,
    pub upload_date: DateTime<FixedOffset>,
    pub description: String,
    pub thumbnails: Vec<Thumbnail>,
    pub keywords: Vec<String>,
    pub engagement: Engagement,
}

/// Full metadata for a single channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: ChannelId,
    pub url: String,
    pub title: String,
    pub thumbnails: Vec<Thumbnail>,
}

/// A video entry in a search page. Carries less detail than [`Video`];
/// `duration` is absent for live streams and premieres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSearchResult {
    pub id: VideoId,
    pub url: String,
    pub title: String,
    pub author: Author,
    pub duration: Option<Duration>,
    pub thumbnails: Vec<Thumbnail>,
}

/// A channel entry in a search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSearchResult {
    pub id: ChannelId,
    pub url: String,
    pub title: String,
    pub thumbnails: Vec<Thumbnail>,
}

/// A playlist entry in a search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistSearchResult {
    pub id: PlaylistId,
    pub url: String,
    pub title: String,
    pub author: Author,
    pub thumbnails: Vec<Thumbnail>,
}

/// One entry of a mixed search page.
///
/// A closed union: the upstream wire formats only ever carry these three
/// entry kinds, and modelling them as an enum makes the serialization
/// dispatch exhaustive at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    Video(VideoSearchResult),
    Channel(ChannelSearchResult),
    Playlist(PlaylistSearchResult),
}

/// One page of search results plus the opaque token for the next page.
/// `continuation_token` is `None` once the final page has been reached,
/// and the token for the first page is never needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedSearchResult {
    pub continuation_token: Option<String>,
    pub results: Vec<SearchResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_resolution_is_width_by_height() {
        let t = Thumbnail {
            url: "https://i.ytimg.com/vi/x/hqdefault.jpg".to_string(),
            width: 480,
            height: 360,
        };
        assert_eq!(t.resolution(), "480x360");
    }
}
