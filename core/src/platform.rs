//! The seam between the gateway and the upstream metadata/search client.

use async_trait::async_trait;

use crate::error::PlatformError;
use crate::ids::{ChannelSelector, VideoId};
use crate::types::{Channel, PagedSearchResult, Video};

/// Upstream video-platform client.
///
/// One implementation is constructed at process start and shared across all
/// requests; implementations must therefore be usable concurrently without
/// external locking. The gateway performs no retries — an `Err` from any
/// method fails the request that triggered the call.
///
/// `continuation` resumes pagination from a previous page's token; `None`
/// requests the first page.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// Mixed search across videos, channels, and playlists.
    async fn search(
        &self,
        query: &str,
        continuation: Option<&str>,
    ) -> Result<PagedSearchResult, PlatformError>;

    /// Search restricted to videos.
    async fn search_videos(
        &self,
        query: &str,
        continuation: Option<&str>,
    ) -> Result<PagedSearchResult, PlatformError>;

    /// Search restricted to channels.
    async fn search_channels(
        &self,
        query: &str,
        continuation: Option<&str>,
    ) -> Result<PagedSearchResult, PlatformError>;

    /// Search restricted to playlists.
    async fn search_playlists(
        &self,
        query: &str,
        continuation: Option<&str>,
    ) -> Result<PagedSearchResult, PlatformError>;

    /// Full metadata for one video.
    async fn video(&self, id: &VideoId) -> Result<Video, PlatformError>;

    /// Full metadata for one channel, looked up by whichever key the
    /// selector carries.
    async fn channel(&self, selector: &ChannelSelector) -> Result<Channel, PlatformError>;
}
