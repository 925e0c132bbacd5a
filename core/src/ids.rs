//! Strongly typed identifiers for upstream lookups.
//!
//! The upstream platform addresses videos and channels through several
//! distinct identifier kinds (a channel can be looked up by id, handle,
//! legacy user name, or custom-URL slug). Each kind gets its own newtype so
//! a handler cannot pass, say, a handle where an id is expected.

use std::fmt;

/// An eleven-character video id, e.g. `dQw4w9WgXcQ`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

/// A `UC`-prefixed channel id, e.g. `UCuAXFkgsw1L7xaCfnd5JJOw`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelId(String);

/// A channel handle without the leading `@`, e.g. `RickAstleyYT`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelHandle(String);

/// A legacy `/user/...` channel name, e.g. `65scribe`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

/// A custom-URL `/c/...` channel slug, e.g. `BlenderFoundation`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelSlug(String);

/// A playlist id, e.g. `PLFgquLnL59alCl_2TQvOiD5Vgm1hCaGSI`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistId(String);

macro_rules! identifier_impls {
    ($($name:ident),+) => {
        $(
            impl $name {
                pub fn new(raw: impl Into<String>) -> Self {
                    Self(raw.into())
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<&str> for $name {
                fn from(raw: &str) -> Self {
                    Self(raw.to_string())
                }
            }
        )+
    };
}

identifier_impls!(VideoId, ChannelId, ChannelHandle, UserName, ChannelSlug, PlaylistId);

/// The one lookup key a channel request resolves to.
///
/// The gateway's `/channel` endpoint accepts four alternative query
/// parameters; exactly one survives parameter precedence and is wrapped
/// here before reaching the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelSelector {
    Id(ChannelId),
    Handle(ChannelHandle),
    User(UserName),
    Slug(ChannelSlug),
}
