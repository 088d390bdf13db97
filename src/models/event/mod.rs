// Event module
// Countdown/count-up event record and edit-boundary validation

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::models::image;

/// Unique identifier for countdown events. We start with a monotonic u64 so we
/// can serialize it easily and evolve to UUIDs later if needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub u64);

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Counting direction for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountMode {
    /// Counts down to a future target; becomes expired once passed.
    Countdown,
    /// Counts elapsed time since a fixed anchor; never expires.
    Countup,
}

impl CountMode {
    /// Display label shown next to the mode.
    pub fn label(&self) -> &'static str {
        match self {
            CountMode::Countdown => "カウントダウン",
            CountMode::Countup => "カウントアップ",
        }
    }
}

impl std::str::FromStr for CountMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "countdown" => Ok(CountMode::Countdown),
            "countup" => Ok(CountMode::Countup),
            other => Err(format!(
                "unknown count mode '{other}' (expected 'countdown' or 'countup')"
            )),
        }
    }
}

impl std::fmt::Display for CountMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountMode::Countdown => write!(f, "countdown"),
            CountMode::Countup => write!(f, "countup"),
        }
    }
}

/// Core persisted record for each countdown/count-up event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountdownEvent {
    pub id: EventId,
    pub title: String,
    pub target_at: DateTime<Local>,
    pub mode: CountMode,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
    #[serde(default = "default_image_id")]
    pub image_id: String,
    #[serde(default, with = "image_payload", skip_serializing_if = "Option::is_none")]
    pub custom_image: Option<Vec<u8>>,
}

pub(crate) fn default_image_id() -> String {
    image::default_sample().id.to_string()
}

/// Normalize a title at the edit boundary.
///
/// Trims surrounding whitespace and rejects empty results. Records inside the
/// store are assumed to already hold normalized titles.
pub fn normalize_title(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Event title cannot be empty".to_string());
    }
    Ok(trimmed.to_string())
}

/// Serde helper storing the optional image payload as base64 text so event
/// snapshots stay valid JSON.
mod image_payload {
    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(data) => serializer.serialize_some(&STANDARD.encode(data)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|value| STANDARD.decode(value).map_err(serde::de::Error::custom))
            .transpose()
    }
}
