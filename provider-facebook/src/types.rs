//! Graph API value objects
//!
//! Data structures for deserializing album, photo and video resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Minimal pointer to another Graph object, e.g. the owner in `from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Reference {
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }
}

/// Size of the image returned by the `picture` connection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ImageType {
    Small,
    #[default]
    Normal,
    Large,
    Square,
}

impl ImageType {
    /// Value of the `type` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Small => "small",
            ImageType::Normal => "normal",
            ImageType::Large => "large",
            ImageType::Square => "square",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumType {
    Normal,
    Mobile,
    Profile,
    Wall,
    App,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Who can see an album
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Privacy {
    Everyone,
    FriendsOfFriends,
    Friends,
    Custom,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Photo album
///
/// See: https://developers.facebook.com/docs/reference/api/album/
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Album {
    pub id: String,

    /// Owner of the album
    pub from: Reference,

    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default, rename = "type")]
    pub album_type: AlbumType,

    #[serde(default)]
    pub privacy: Privacy,

    /// Number of photos in the album
    #[serde(default)]
    pub count: u32,

    #[serde(default, rename = "cover_photo")]
    pub cover_photo_id: Option<String>,

    #[serde(deserialize_with = "graph_time::deserialize")]
    pub created_time: DateTime<Utc>,

    #[serde(default, deserialize_with = "graph_time::deserialize_option")]
    pub updated_time: Option<DateTime<Utc>>,
}

/// A user tagged in a photo or video
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,

    /// Horizontal offset as a percentage of the image width
    #[serde(default)]
    pub x: Option<f64>,

    #[serde(default)]
    pub y: Option<f64>,

    #[serde(default, deserialize_with = "graph_time::deserialize_option")]
    pub created_time: Option<DateTime<Utc>>,
}

/// One of the renditions Facebook keeps of an uploaded photo
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Image {
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// See: https://developers.facebook.com/docs/reference/api/photo/
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Photo {
    pub id: String,

    pub from: Reference,

    /// Caption
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    /// Thumbnail URL
    #[serde(default)]
    pub picture: Option<String>,

    /// Full size image URL
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub height: Option<u32>,

    #[serde(default)]
    pub width: Option<u32>,

    /// Position within the album
    #[serde(default)]
    pub position: Option<u32>,

    #[serde(default, deserialize_with = "data_list")]
    pub tags: Vec<Tag>,

    #[serde(default)]
    pub images: Vec<Image>,

    #[serde(deserialize_with = "graph_time::deserialize")]
    pub created_time: DateTime<Utc>,

    #[serde(default, deserialize_with = "graph_time::deserialize_option")]
    pub updated_time: Option<DateTime<Utc>>,
}

/// See: https://developers.facebook.com/docs/reference/api/video/
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
    pub id: String,

    pub from: Reference,

    /// Title
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub picture: Option<String>,

    /// HTML snippet that embeds the player
    #[serde(default)]
    pub embed_html: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    /// URL of the raw video file
    #[serde(default)]
    pub source: Option<String>,

    #[serde(default, deserialize_with = "data_list")]
    pub tags: Vec<Tag>,

    #[serde(deserialize_with = "graph_time::deserialize")]
    pub created_time: DateTime<Utc>,

    #[serde(default, deserialize_with = "graph_time::deserialize_option")]
    pub updated_time: Option<DateTime<Utc>>,
}

/// Envelope of a connection listing: `{"data": [...]}`
#[derive(Debug, Deserialize)]
pub(crate) struct DataList<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Body returned by a successful publish
#[derive(Debug, Deserialize)]
pub(crate) struct PublishResponse {
    pub id: String,
}

fn data_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    DataList::<T>::deserialize(deserializer).map(|list| list.data)
}

/// Graph timestamps, e.g. `2011-03-24T21:36:06+0000`
pub(crate) mod graph_time {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_str(value, FORMAT)
            .or_else(|_| DateTime::parse_from_rfc3339(value))
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value)
            .ok_or_else(|| de::Error::custom(format!("invalid Graph timestamp '{}'", value)))
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) => parse(&value)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid Graph timestamp '{}'", value))),
            None => Ok(None),
        }
    }
}
