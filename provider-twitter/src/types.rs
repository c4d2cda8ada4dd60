//! Twitter API value objects

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A Twitter user as embedded in direct messages
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TwitterProfile {
    pub id: i64,
    pub screen_name: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "twitter_time::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectMessage {
    pub id: i64,
    pub text: String,
    pub sender: TwitterProfile,
    pub recipient: TwitterProfile,
    #[serde(deserialize_with = "twitter_time::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// Paging for message timelines. Unset fields are left out of the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    /// 1-based page number
    pub page: Option<u32>,
    /// Messages per page (the API caps this at 200)
    pub count: Option<u32>,
    /// Only messages newer than this id
    pub since_id: Option<i64>,
    /// Only messages older than or equal to this id
    pub max_id: Option<i64>,
}

impl PageParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn since_id(mut self, since_id: i64) -> Self {
        self.since_id = Some(since_id);
        self
    }

    pub fn max_id(mut self, max_id: i64) -> Self {
        self.max_id = Some(max_id);
        self
    }

    pub(crate) fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(count) = self.count {
            pairs.push(("count", count.to_string()));
        }
        if let Some(since_id) = self.since_id {
            pairs.push(("since_id", since_id.to_string()));
        }
        if let Some(max_id) = self.max_id {
            pairs.push(("max_id", max_id.to_string()));
        }
        pairs
    }
}

/// Timeline timestamps, e.g. `Tue Jul 13 17:38:21 +0000 2010`
pub(crate) mod twitter_time {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    const FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

    pub fn parse(value: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_str(value, FORMAT)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value)
            .ok_or_else(|| de::Error::custom(format!("invalid Twitter timestamp '{}'", value)))
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) => parse(&value).map(Some).ok_or_else(|| {
                de::Error::custom(format!("invalid Twitter timestamp '{}'", value))
            }),
            None => Ok(None),
        }
    }
}
