use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored prompt, as persisted in the blob and returned by the API.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub category: String,
    pub name: String,
    pub overview: String,
    pub content: String,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
    pub sort_order: i64,
}

/// The body of a save request. `updatedAt` is accepted for compatibility with
/// older clients but always replaced by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptDraft {
    pub id: String,
    pub category: String,
    pub name: String,
    pub overview: String,
    pub content: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

/// A record read back from the blob. Older blobs may lack `sortOrder`.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredPrompt {
    pub id: String,
    pub category: String,
    pub name: String,
    pub overview: String,
    pub content: String,
    /// `None` when the stored value is blank or not RFC 3339.
    #[serde(deserialize_with = "iso_millis::deserialize_lenient")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sort_order: Option<i64>,
}

impl PromptDraft {
    /// Turns the draft into a record stamped with `updated_at`.
    pub fn into_prompt(self, sort_order: i64, updated_at: DateTime<Utc>) -> Prompt {
        Prompt {
            id: self.id,
            category: self.category,
            name: self.name,
            overview: self.overview,
            content: self.content,
            updated_at,
            sort_order,
        }
    }
}

impl StoredPrompt {
    /// Fills a missing order with `fallback_order` and a missing timestamp with `now`.
    pub fn into_prompt(self, fallback_order: i64, now: DateTime<Utc>) -> Prompt {
        Prompt {
            id: self.id,
            category: self.category,
            name: self.name,
            overview: self.overview,
            content: self.content,
            updated_at: self.updated_at.unwrap_or(now),
            sort_order: self.sort_order.unwrap_or(fallback_order),
        }
    }
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc))
    }

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    /// Still requires a string, but maps blank or unparseable values to `None`.
    pub fn deserialize_lenient<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(parse(raw.trim()).ok())
    }
}
