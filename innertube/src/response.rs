//! InnerTube response decoding into domain objects.
//!
//! The payloads are large and deeply nested. The decoders below first
//! navigate to the renderer arrays with JSON pointers, then deserialize
//! each renderer into a small typed DTO carrying only the fields the
//! domain model needs.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::Deserialize;
use serde_json::Value as Json;
use tubegate_core::{
    Author, Channel, ChannelId, ChannelSearchResult, Engagement, PagedSearchResult, PlatformError,
    PlaylistId, PlaylistSearchResult, SearchResult, Thumbnail, Video, VideoId, VideoSearchResult,
};

fn decode_err(err: impl std::fmt::Display) -> PlatformError {
    PlatformError::Decode(err.to_string())
}

// ---------------------------------------------------------------------------
// Shared DTO fragments
// ---------------------------------------------------------------------------

/// A text node, which the wire format encodes either as `{"simpleText"}`
/// or as `{"runs": [{"text", "navigationEndpoint"?}]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Text {
    Simple {
        #[serde(rename = "simpleText")]
        simple_text: String,
    },
    Runs {
        runs: Vec<Run>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Run {
    text: String,
    navigation_endpoint: Option<NavigationEndpoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NavigationEndpoint {
    browse_endpoint: Option<BrowseEndpoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowseEndpoint {
    browse_id: String,
    canonical_base_url: Option<String>,
}

impl Text {
    fn text(&self) -> &str {
        match self {
            Text::Simple { simple_text } => simple_text,
            Text::Runs { runs } => runs.first().map(|r| r.text.as_str()).unwrap_or(""),
        }
    }

    fn browse_endpoint(&self) -> Option<&BrowseEndpoint> {
        match self {
            Text::Simple { .. } => None,
            Text::Runs { runs } => runs.first()?.navigation_endpoint.as_ref()?.browse_endpoint.as_ref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ThumbnailSet {
    #[serde(default)]
    thumbnails: Vec<RawThumbnail>,
}

#[derive(Debug, Deserialize)]
struct RawThumbnail {
    url: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

fn convert_thumbs(set: ThumbnailSet) -> Vec<Thumbnail> {
    set.thumbnails
        .into_iter()
        .map(|t| Thumbnail {
            url: t.url,
            width: t.width,
            height: t.height,
        })
        .collect()
}

fn author_from(text: Option<&Text>) -> Result<Author, PlatformError> {
    let text = text.ok_or_else(|| PlatformError::Unrecognized("search entry carries no author".into()))?;
    let endpoint = text
        .browse_endpoint()
        .ok_or_else(|| PlatformError::Unrecognized("author carries no channel endpoint".into()))?;
    let channel_url = match endpoint.canonical_base_url.as_deref() {
        Some(path) => format!("https://www.youtube.com{path}"),
        None => format!("https://www.youtube.com/channel/{}", endpoint.browse_id),
    };
    Ok(Author {
        channel_id: ChannelId::new(endpoint.browse_id.clone()),
        channel_url,
        channel_title: text.text().to_string(),
    })
}

/// `"1:02:33"` / `"2:33"` from a length label.
fn parse_duration(text: &str) -> Option<Duration> {
    let mut secs: u64 = 0;
    for part in text.split(':') {
        secs = secs.checked_mul(60)?.checked_add(part.trim().parse().ok()?)?;
    }
    Some(Duration::from_secs(secs))
}

// ---------------------------------------------------------------------------
// Search pages
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoRenderer {
    video_id: String,
    title: Text,
    owner_text: Option<Text>,
    length_text: Option<Text>,
    #[serde(default)]
    thumbnail: ThumbnailSet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelRenderer {
    channel_id: String,
    title: Text,
    #[serde(default)]
    thumbnail: ThumbnailSet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaylistRenderer {
    playlist_id: String,
    title: Text,
    short_byline_text: Option<Text>,
    #[serde(default)]
    thumbnails: Vec<ThumbnailSet>,
}

pub(crate) fn parse_search_page(raw: &[u8]) -> Result<PagedSearchResult, PlatformError> {
    let doc: Json = serde_json::from_slice(raw).map_err(decode_err)?;
    let mut results = Vec::new();
    let mut continuation = None;
    for item in search_items(&doc)? {
        if let Some(renderer) = item.get("videoRenderer") {
            results.push(SearchResult::Video(video_entry(renderer)?));
        } else if let Some(renderer) = item.get("channelRenderer") {
            results.push(SearchResult::Channel(channel_entry(renderer)?));
        } else if let Some(renderer) = item.get("playlistRenderer") {
            results.push(SearchResult::Playlist(playlist_entry(renderer)?));
        } else if let Some(renderer) = item.get("continuationItemRenderer") {
            continuation = renderer
                .pointer("/continuationEndpoint/continuationCommand/token")
                .and_then(Json::as_str)
                .map(str::to_string);
        } else {
            // Shelves, ads, "did you mean" cards and whatever else the
            // frontend grows next.
            tracing::debug!("skipping unrecognized search entry");
        }
    }
    Ok(PagedSearchResult {
        continuation_token: continuation,
        results,
    })
}

/// Flatten the section list into renderer items. Fresh searches and
/// continuation responses wrap the same item shapes differently.
fn search_items(doc: &Json) -> Result<Vec<&Json>, PlatformError> {
    const FRESH: &str =
        "/contents/twoColumnSearchResultsRenderer/primaryContents/sectionListRenderer/contents";
    const CONTINUED: &str =
        "/onResponseReceivedCommands/0/appendContinuationItemsAction/continuationItems";
    let sections = doc
        .pointer(FRESH)
        .or_else(|| doc.pointer(CONTINUED))
        .and_then(Json::as_array)
        .ok_or_else(|| {
            PlatformError::Unrecognized("search response carries no result sections".into())
        })?;
    let mut items = Vec::new();
    for section in sections {
        match section.pointer("/itemSectionRenderer/contents").and_then(Json::as_array) {
            Some(contents) => items.extend(contents),
            // The continuation item sits at section level, not inside an
            // item section.
            None => items.push(section),
        }
    }
    Ok(items)
}

fn video_entry(raw: &Json) -> Result<VideoSearchResult, PlatformError> {
    let r: VideoRenderer = serde_json::from_value(raw.clone()).map_err(decode_err)?;
    let url = format!("https://www.youtube.com/watch?v={}", r.video_id);
    Ok(VideoSearchResult {
        url,
        title: r.title.text().to_string(),
        author: author_from(r.owner_text.as_ref())?,
        duration: r.length_text.as_ref().and_then(|t| parse_duration(t.text())),
        thumbnails: convert_thumbs(r.thumbnail),
        id: VideoId::new(r.video_id),
    })
}

fn channel_entry(raw: &Json) -> Result<ChannelSearchResult, PlatformError> {
    let r: ChannelRenderer = serde_json::from_value(raw.clone()).map_err(decode_err)?;
    let url = format!("https://www.youtube.com/channel/{}", r.channel_id);
    Ok(ChannelSearchResult {
        url,
        title: r.title.text().to_string(),
        thumbnails: convert_thumbs(r.thumbnail),
        id: ChannelId::new(r.channel_id),
    })
}

fn playlist_entry(raw: &Json) -> Result<PlaylistSearchResult, PlatformError> {
    let r: PlaylistRenderer = serde_json::from_value(raw.clone()).map_err(decode_err)?;
    let url = format!("https://www.youtube.com/playlist?list={}", r.playlist_id);
    Ok(PlaylistSearchResult {
        url,
        title: r.title.text().to_string(),
        author: author_from(r.short_byline_text.as_ref())?,
        thumbnails: r.thumbnails.into_iter().next().map(convert_thumbs).unwrap_or_default(),
        id: PlaylistId::new(r.playlist_id),
    })
}

// ---------------------------------------------------------------------------
// Player responses
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    video_details: Option<VideoDetails>,
    microformat: Option<Microformat>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayabilityStatus {
    status: String,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    video_id: String,
    title: String,
    author: String,
    channel_id: String,
    #[serde(default)]
    short_description: String,
    #[serde(default)]
    keywords: Vec<String>,
    view_count: Option<String>,
    #[serde(default)]
    thumbnail: ThumbnailSet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Microformat {
    player_microformat_renderer: Option<MicroformatRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MicroformatRenderer {
    upload_date: Option<String>,
    like_count: Option<String>,
    owner_profile_url: Option<String>,
}

pub(crate) fn parse_video(raw: &[u8]) -> Result<Video, PlatformError> {
    let doc: PlayerResponse = serde_json::from_slice(raw).map_err(decode_err)?;
    if let Some(status) = &doc.playability_status {
        if status.status == "ERROR" {
            let reason = status.reason.clone().unwrap_or_else(|| "video unavailable".to_string());
            return Err(PlatformError::NotFound(reason));
        }
    }
    let details = doc
        .video_details
        .ok_or_else(|| PlatformError::Unrecognized("player response carries no videoDetails".into()))?;
    let micro = doc.microformat.and_then(|m| m.player_microformat_renderer);

    let upload_date = micro
        .as_ref()
        .and_then(|m| m.upload_date.as_deref())
        .map(parse_upload_date)
        .transpose()?
        .ok_or_else(|| PlatformError::Unrecognized("player response carries no upload date".into()))?;
    let view_count = details.view_count.as_deref().and_then(|v| v.parse().ok()).unwrap_or(0);
    let like_count = micro
        .as_ref()
        .and_then(|m| m.like_count.as_deref())
        .and_then(|v| v.replace(',', "").parse().ok())
        .unwrap_or(0);
    let channel_url = micro
        .as_ref()
        .and_then(|m| m.owner_profile_url.clone())
        .unwrap_or_else(|| format!("https://www.youtube.com/channel/{}", details.channel_id));
    let url = format!("https://www.youtube.com/watch?v={}", details.video_id);

    Ok(Video {
        url,
        title: details.title,
        author: Author {
            channel_id: ChannelId::new(details.channel_id),
            channel_url,
            channel_title: details.author,
        },
        upload_date,
        description: details.short_description,
        thumbnails: convert_thumbs(details.thumbnail),
        keywords: details.keywords,
        // Dislike counts stopped being served upstream in 2021; likes only
        // appear through the microformat.
        engagement: Engagement {
            view_count,
            like_count,
            dislike_count: 0,
        },
        id: VideoId::new(details.video_id),
    })
}

/// Upload dates arrive as RFC 3339 on current payloads and as a bare
/// `YYYY-MM-DD` on older ones.
fn parse_upload_date(raw: &str) -> Result<DateTime<FixedOffset>, PlatformError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| PlatformError::Decode(format!("bad upload date {raw:?}: {e}")))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| PlatformError::Decode(format!("bad upload date {raw:?}")))?;
    Ok(midnight.and_utc().fixed_offset())
}

// ---------------------------------------------------------------------------
// Channel browse / url resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowseResponse {
    metadata: Option<BrowseMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrowseMetadata {
    channel_metadata_renderer: Option<ChannelMetadataRenderer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChannelMetadataRenderer {
    title: String,
    external_id: String,
    channel_url: Option<String>,
    avatar: Option<ThumbnailSet>,
}

pub(crate) fn parse_channel(raw: &[u8]) -> Result<Channel, PlatformError> {
    let doc: BrowseResponse = serde_json::from_slice(raw).map_err(decode_err)?;
    let meta = doc
        .metadata
        .and_then(|m| m.channel_metadata_renderer)
        .ok_or_else(|| PlatformError::NotFound("browse response carries no channel metadata".into()))?;
    let url = match meta.channel_url {
        Some(url) => url,
        None => format!("https://www.youtube.com/channel/{}", meta.external_id),
    };
    Ok(Channel {
        url,
        title: meta.title,
        thumbnails: meta.avatar.map(convert_thumbs).unwrap_or_default(),
        id: ChannelId::new(meta.external_id),
    })
}

pub(crate) fn parse_resolved_browse_id(raw: &[u8]) -> Result<String, PlatformError> {
    let doc: Json = serde_json::from_slice(raw).map_err(decode_err)?;
    doc.pointer("/endpoint/browseEndpoint/browseId")
        .and_then(Json::as_str)
        .map(str::to_string)
        .ok_or_else(|| PlatformError::NotFound("channel url did not resolve to a browse id".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"{
        "contents": {"twoColumnSearchResultsRenderer": {"primaryContents": {"sectionListRenderer": {"contents": [
            {"itemSectionRenderer": {"contents": [
                {"videoRenderer": {
                    "videoId": "dQw4w9WgXcQ",
                    "title": {"runs": [{"text": "Never Gonna Give You Up"}]},
                    "ownerText": {"runs": [{"text": "Rick Astley", "navigationEndpoint": {"browseEndpoint": {"browseId": "UCuAXFkgsw1L7xaCfnd5JJOw", "canonicalBaseUrl": "/@RickAstleyYT"}}}]},
                    "lengthText": {"simpleText": "3:33"},
                    "thumbnail": {"thumbnails": [{"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg", "width": 480, "height": 360}]}
                }},
                {"shelfRenderer": {"title": {"simpleText": "People also watched"}}},
                {"channelRenderer": {
                    "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                    "title": {"simpleText": "Rick Astley"},
                    "thumbnail": {"thumbnails": [{"url": "https://yt3.ggpht.com/x", "width": 88, "height": 88}]}
                }},
                {"playlistRenderer": {
                    "playlistId": "PL0146F7BEE4D2C1C3",
                    "title": {"simpleText": "80s hits"},
                    "shortBylineText": {"runs": [{"text": "Rick Astley", "navigationEndpoint": {"browseEndpoint": {"browseId": "UCuAXFkgsw1L7xaCfnd5JJOw"}}}]},
                    "thumbnails": [{"thumbnails": [{"url": "https://i.ytimg.com/vi/a/hqdefault.jpg", "width": 336, "height": 188}]}]
                }}
            ]}},
            {"continuationItemRenderer": {"continuationEndpoint": {"continuationCommand": {"token": "EpADEgRpTWFj"}}}}
        ]}}}}
    }"#;

    #[test]
    fn search_page_parses_all_three_variants_in_order() {
        let page = parse_search_page(SEARCH_PAGE.as_bytes()).unwrap();
        assert_eq!(page.continuation_token.as_deref(), Some("EpADEgRpTWFj"));
        assert_eq!(page.results.len(), 3);
        let SearchResult::Video(v) = &page.results[0] else {
            panic!("first entry should be a video");
        };
        assert_eq!(v.id.as_str(), "dQw4w9WgXcQ");
        assert_eq!(v.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(v.duration, Some(Duration::from_secs(213)));
        assert_eq!(v.author.channel_url, "https://www.youtube.com/@RickAstleyYT");
        let SearchResult::Channel(c) = &page.results[1] else {
            panic!("second entry should be a channel");
        };
        assert_eq!(c.title, "Rick Astley");
        let SearchResult::Playlist(p) = &page.results[2] else {
            panic!("third entry should be a playlist");
        };
        assert_eq!(p.url, "https://www.youtube.com/playlist?list=PL0146F7BEE4D2C1C3");
        assert_eq!(p.author.channel_id.as_str(), "UCuAXFkgsw1L7xaCfnd5JJOw");
    }

    #[test]
    fn continuation_page_parses_through_received_commands() {
        let raw = r#"{
            "onResponseReceivedCommands": [{"appendContinuationItemsAction": {"continuationItems": [
                {"itemSectionRenderer": {"contents": [
                    {"videoRenderer": {
                        "videoId": "jNQXAC9IVRw",
                        "title": {"runs": [{"text": "Me at the zoo"}]},
                        "ownerText": {"runs": [{"text": "jawed", "navigationEndpoint": {"browseEndpoint": {"browseId": "UC4QobU6STFB0P71PMvOGN5A"}}}]},
                        "lengthText": {"simpleText": "0:19"},
                        "thumbnail": {"thumbnails": []}
                    }}
                ]}}
            ]}}]
        }"#;
        let page = parse_search_page(raw.as_bytes()).unwrap();
        assert_eq!(page.results.len(), 1);
        // Final page: no further continuation item.
        assert!(page.continuation_token.is_none());
    }

    #[test]
    fn search_without_sections_is_unrecognized() {
        let err = parse_search_page(br#"{"contents": {}}"#).unwrap_err();
        assert!(matches!(err, PlatformError::Unrecognized(_)));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = parse_search_page(b"<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, PlatformError::Decode(_)));
    }

    const PLAYER_PAGE: &str = r#"{
        "playabilityStatus": {"status": "OK"},
        "videoDetails": {
            "videoId": "dQw4w9WgXcQ",
            "title": "Never Gonna Give You Up",
            "author": "Rick Astley",
            "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
            "shortDescription": "The official video",
            "keywords": ["rick astley", "80s"],
            "viewCount": "1400000000",
            "thumbnail": {"thumbnails": [{"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg", "width": 1280, "height": 720}]}
        },
        "microformat": {"playerMicroformatRenderer": {
            "uploadDate": "2009-10-24T23:57:33-07:00",
            "likeCount": "16000000",
            "ownerProfileUrl": "http://www.youtube.com/@RickAstleyYT"
        }}
    }"#;

    #[test]
    fn player_page_parses_into_video() {
        let v = parse_video(PLAYER_PAGE.as_bytes()).unwrap();
        assert_eq!(v.id.as_str(), "dQw4w9WgXcQ");
        assert_eq!(v.title, "Never Gonna Give You Up");
        assert_eq!(v.author.channel_title, "Rick Astley");
        assert_eq!(v.engagement.view_count, 1_400_000_000);
        assert_eq!(v.engagement.like_count, 16_000_000);
        assert_eq!(v.upload_date.to_rfc3339(), "2009-10-24T23:57:33-07:00");
        assert_eq!(v.keywords, vec!["rick astley", "80s"]);
        assert_eq!(v.thumbnails.len(), 1);
    }

    #[test]
    fn unavailable_video_maps_to_not_found() {
        let raw = r#"{"playabilityStatus": {"status": "ERROR", "reason": "Video unavailable"}}"#;
        let err = parse_video(raw.as_bytes()).unwrap_err();
        assert!(matches!(err, PlatformError::NotFound(reason) if reason == "Video unavailable"));
    }

    #[test]
    fn date_only_upload_dates_parse_as_utc_midnight() {
        let dt = parse_upload_date("2009-10-25").unwrap();
        assert_eq!(dt.to_rfc3339(), "2009-10-25T00:00:00+00:00");
    }

    #[test]
    fn browse_page_parses_into_channel() {
        let raw = r#"{
            "metadata": {"channelMetadataRenderer": {
                "title": "Rick Astley",
                "externalId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                "channelUrl": "https://www.youtube.com/channel/UCuAXFkgsw1L7xaCfnd5JJOw",
                "avatar": {"thumbnails": [{"url": "https://yt3.ggpht.com/x", "width": 900, "height": 900}]}
            }}
        }"#;
        let c = parse_channel(raw.as_bytes()).unwrap();
        assert_eq!(c.id.as_str(), "UCuAXFkgsw1L7xaCfnd5JJOw");
        assert_eq!(c.title, "Rick Astley");
        assert_eq!(c.thumbnails[0].width, 900);
    }

    #[test]
    fn browse_without_metadata_is_not_found() {
        let err = parse_channel(br#"{"responseContext": {}}"#).unwrap_err();
        assert!(matches!(err, PlatformError::NotFound(_)));
    }

    #[test]
    fn resolve_url_extracts_browse_id() {
        let raw = r#"{"endpoint": {"browseEndpoint": {"browseId": "UCuAXFkgsw1L7xaCfnd5JJOw"}}}"#;
        assert_eq!(
            parse_resolved_browse_id(raw.as_bytes()).unwrap(),
            "UCuAXFkgsw1L7xaCfnd5JJOw"
        );
    }

    #[test]
    fn unresolvable_url_is_not_found() {
        let raw = r#"{"endpoint": {"urlEndpoint": {"url": "https://www.youtube.com/"}}}"#;
        assert!(matches!(
            parse_resolved_browse_id(raw.as_bytes()).unwrap_err(),
            PlatformError::NotFound(_)
        ));
    }

    #[test]
    fn length_labels_parse_to_durations() {
        assert_eq!(parse_duration("3:33"), Some(Duration::from_secs(213)));
        assert_eq!(parse_duration("1:02:33"), Some(Duration::from_secs(3753)));
        assert_eq!(parse_duration("LIVE"), None);
    }
}
