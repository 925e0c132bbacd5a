//! Domain-object adapters: one pure function per upstream type.
//!
//! Every adapter emits a dictionary tagged with `__typename` so clients can
//! discriminate polymorphic search-result entries. Field names follow the
//! upstream library's property names (`Url`, `ViewCount`, ...), which is
//! the wire contract existing consumers rely on.

use std::time::Duration;

use tubegate_core::{
    Author, Channel, ChannelSearchResult, Engagement, PagedSearchResult, PlaylistSearchResult,
    SearchResult, Thumbnail, Video, VideoSearchResult,
};

use crate::tree::Value;

fn dict(entries: Vec<(&str, Value)>) -> Value {
    Value::Dict(entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

pub fn thumbnail(t: &Thumbnail) -> Value {
    dict(vec![
        ("__typename", "Thumbnail".into()),
        ("Url", t.url.as_str().into()),
        ("Resolution", t.resolution().into()),
    ])
}

fn thumbnails(list: &[Thumbnail]) -> Value {
    Value::Array(list.iter().map(thumbnail).collect())
}

pub fn author(a: &Author) -> Value {
    dict(vec![
        ("__typename", "Author".into()),
        ("ChannelId", a.channel_id.to_string().into()),
        ("ChannelUrl", a.channel_url.as_str().into()),
        ("ChannelTitle", a.channel_title.as_str().into()),
    ])
}

pub fn engagement(e: &Engagement) -> Value {
    dict(vec![
        ("__typename", "Engagement".into()),
        ("ViewCount", e.view_count.into()),
        ("LikeCount", e.like_count.into()),
        ("DislikeCount", e.dislike_count.into()),
    ])
}

pub fn video(v: &Video) -> Value {
    dict(vec![
        ("__typename", "Video".into()),
        ("Id", v.id.to_string().into()),
        ("Url", v.url.as_str().into()),
        ("Title", v.title.as_str().into()),
        ("Author", author(&v.author)),
        ("UploadDate", v.upload_date.to_rfc3339().into()),
        ("Description", v.description.as_str().into()),
        ("Thumbnails", thumbnails(&v.thumbnails)),
        (
            "Keywords",
            Value::Array(v.keywords.iter().map(|k| k.as_str().into()).collect()),
        ),
        ("Engagement", engagement(&v.engagement)),
    ])
}

pub fn channel(c: &Channel) -> Value {
    dict(vec![
        ("__typename", "Channel".into()),
        ("Id", c.id.to_string().into()),
        ("Url", c.url.as_str().into()),
        ("Title", c.title.as_str().into()),
        ("Thumbnails", thumbnails(&c.thumbnails)),
    ])
}

pub fn video_search_result(r: &VideoSearchResult) -> Value {
    dict(vec![
        ("__typename", "VideoSearchResult".into()),
        ("Id", r.id.to_string().into()),
        ("Url", r.url.as_str().into()),
        ("Title", r.title.as_str().into()),
        ("Author", author(&r.author)),
        ("Duration", r.duration.map(format_duration).into()),
        ("Thumbnails", thumbnails(&r.thumbnails)),
    ])
}

pub fn channel_search_result(r: &ChannelSearchResult) -> Value {
    dict(vec![
        ("__typename", "ChannelSearchResult".into()),
        ("Id", r.id.to_string().into()),
        ("Url", r.url.as_str().into()),
        ("Title", r.title.as_str().into()),
        ("Thumbnails", thumbnails(&r.thumbnails)),
    ])
}

pub fn playlist_search_result(r: &PlaylistSearchResult) -> Value {
    dict(vec![
        ("__typename", "PlaylistSearchResult".into()),
        ("Id", r.id.to_string().into()),
        ("Url", r.url.as_str().into()),
        ("Title", r.title.as_str().into()),
        ("Author", author(&r.author)),
        ("Thumbnails", thumbnails(&r.thumbnails)),
    ])
}

/// Polymorphic dispatch over the closed search-result union.
pub fn search_result(r: &SearchResult) -> Value {
    match r {
        SearchResult::Video(v) => video_search_result(v),
        SearchResult::Channel(c) => channel_search_result(c),
        SearchResult::Playlist(p) => playlist_search_result(p),
    }
}

pub fn paged_search_result(page: &PagedSearchResult) -> Value {
    dict(vec![
        ("__typename", "PagedSearchResult".into()),
        (
            "ContinuationToken",
            page.continuation_token.clone().into(),
        ),
        (
            "Results",
            Value::Array(page.results.iter().map(search_result).collect()),
        ),
    ])
}

/// `H:MM:SS`-style display form, matching the upstream library's duration
/// rendering.
fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    format!("{:02}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use tubegate_core::{ChannelId, PlaylistId, VideoId};

    fn field<'a>(tree: &'a Value, name: &str) -> &'a Value {
        let Value::Dict(entries) = tree else {
            panic!("expected dict, got {tree:?}");
        };
        &entries
            .iter()
            .find(|(k, _)| k == name)
            .unwrap_or_else(|| panic!("missing field {name}"))
            .1
    }

    fn sample_author() -> Author {
        Author {
            channel_id: ChannelId::new("UCuAXFkgsw1L7xaCfnd5JJOw"),
            channel_url: "https://www.youtube.com/channel/UCuAXFkgsw1L7xaCfnd5JJOw".to_string(),
            channel_title: "Rick Astley".to_string(),
        }
    }

    fn sample_thumbnail() -> Thumbnail {
        Thumbnail {
            url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string(),
            width: 480,
            height: 360,
        }
    }

    #[test]
    fn video_adapter_maps_all_fields() {
        let v = Video {
            id: VideoId::new("dQw4w9WgXcQ"),
            url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
            title: "Never Gonna Give You Up".to_string(),
            author: sample_author(),
            upload_date: DateTime::parse_from_rfc3339("2009-10-25T06:57:33+00:00").unwrap(),
            description: "Official video".to_string(),
            thumbnails: vec![sample_thumbnail()],
            keywords: vec!["rick".to_string(), "astley".to_string()],
            engagement: Engagement {
                view_count: 1_400_000_000,
                like_count: 16_000_000,
                dislike_count: 0,
            },
        };
        let tree = video(&v);
        assert_eq!(field(&tree, "__typename"), &Value::from("Video"));
        assert_eq!(field(&tree, "Id"), &Value::from("dQw4w9WgXcQ"));
        assert_eq!(
            field(&tree, "UploadDate"),
            &Value::from("2009-10-25T06:57:33+00:00")
        );
        assert_eq!(
            field(field(&tree, "Author"), "ChannelTitle"),
            &Value::from("Rick Astley")
        );
        assert_eq!(
            field(field(&tree, "Engagement"), "ViewCount"),
            &Value::UInt(1_400_000_000)
        );
        let Value::Array(thumbs) = field(&tree, "Thumbnails") else {
            panic!("Thumbnails is not an array");
        };
        assert_eq!(field(&thumbs[0], "Resolution"), &Value::from("480x360"));
    }

    #[test]
    fn mixed_page_adapts_each_variant_in_order() {
        let page = PagedSearchResult {
            continuation_token: Some("4qmFsgKA".to_string()),
            results: vec![
                SearchResult::Video(VideoSearchResult {
                    id: VideoId::new("dQw4w9WgXcQ"),
                    url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
                    title: "Never Gonna Give You Up".to_string(),
                    author: sample_author(),
                    duration: Some(Duration::from_secs(213)),
                    thumbnails: vec![sample_thumbnail()],
                }),
                SearchResult::Channel(ChannelSearchResult {
                    id: ChannelId::new("UCuAXFkgsw1L7xaCfnd5JJOw"),
                    url: "https://www.youtube.com/channel/UCuAXFkgsw1L7xaCfnd5JJOw".to_string(),
                    title: "Rick Astley".to_string(),
                    thumbnails: vec![],
                }),
                SearchResult::Playlist(PlaylistSearchResult {
                    id: PlaylistId::new("PL0146F7BEE4D2C1C3"),
                    url: "https://www.youtube.com/playlist?list=PL0146F7BEE4D2C1C3".to_string(),
                    title: "80s hits".to_string(),
                    author: sample_author(),
                    thumbnails: vec![],
                }),
            ],
        };
        let tree = paged_search_result(&page);
        assert_eq!(field(&tree, "__typename"), &Value::from("PagedSearchResult"));
        assert_eq!(field(&tree, "ContinuationToken"), &Value::from("4qmFsgKA"));
        let Value::Array(results) = field(&tree, "Results") else {
            panic!("Results is not an array");
        };
        let tags: Vec<&Value> = results.iter().map(|r| field(r, "__typename")).collect();
        assert_eq!(
            tags,
            vec![
                &Value::from("VideoSearchResult"),
                &Value::from("ChannelSearchResult"),
                &Value::from("PlaylistSearchResult"),
            ]
        );
        assert_eq!(field(&results[0], "Duration"), &Value::from("00:03:33"));
    }

    #[test]
    fn final_page_has_null_continuation_token() {
        let page = PagedSearchResult {
            continuation_token: None,
            results: vec![],
        };
        let tree = paged_search_result(&page);
        assert_eq!(field(&tree, "ContinuationToken"), &Value::Null);
    }

    #[test]
    fn missing_duration_is_null() {
        let r = VideoSearchResult {
            id: VideoId::new("jNQXAC9IVRw"),
            url: "https://www.youtube.com/watch?v=jNQXAC9IVRw".to_string(),
            title: "live stream".to_string(),
            author: sample_author(),
            duration: None,
            thumbnails: vec![],
        };
        assert_eq!(field(&video_search_result(&r), "Duration"), &Value::Null);
    }

    #[test]
    fn durations_format_as_hours_minutes_seconds() {
        assert_eq!(format_duration(Duration::from_secs(213)), "00:03:33");
        assert_eq!(format_duration(Duration::from_secs(3661)), "01:01:01");
        assert_eq!(format_duration(Duration::from_secs(59)), "00:00:59");
    }
}
