use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One journal record. Clients see camelCase keys:
/// `{id, mood, emotions, notes, userId, createdAt}`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: String,
    pub emotions: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body for POST /moods and PUT /moods/:id. Every field tolerates a
/// non-string JSON value by treating it as absent, so a numeric `mood`
/// fails validation ("Mood is required") rather than body parsing.
#[derive(Debug, Default, Deserialize)]
pub struct MoodEntryRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub mood: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub emotions: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub notes: Option<String>,
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}
