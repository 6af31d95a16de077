//! Prayer request model.

use serde::{Deserialize, Serialize};

/// Lifecycle of a prayer request. Unrecognised values land in `Unknown`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PrayerStatus {
    #[default]
    Active,
    Answered,
    Completed,
    #[serde(other)]
    Unknown,
}

impl PrayerStatus {
    /// Statuses a filter may select.
    pub const KNOWN: [PrayerStatus; 3] = [
        PrayerStatus::Active,
        PrayerStatus::Answered,
        PrayerStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerStatus::Active => "active",
            PrayerStatus::Answered => "answered",
            PrayerStatus::Completed => "completed",
            PrayerStatus::Unknown => "unknown",
        }
    }
}

/// Audience a prayer request is shared with. Unrecognised values land in `Unknown`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PrayerVisibility {
    #[default]
    Public,
    Members,
    Private,
    #[serde(other)]
    Unknown,
}

impl PrayerVisibility {
    pub const KNOWN: [PrayerVisibility; 3] = [
        PrayerVisibility::Public,
        PrayerVisibility::Members,
        PrayerVisibility::Private,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerVisibility::Public => "public",
            PrayerVisibility::Members => "members",
            PrayerVisibility::Private => "private",
            PrayerVisibility::Unknown => "unknown",
        }
    }
}

/// A prayer request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prayer {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub status: PrayerStatus,
    #[serde(default)]
    pub visibility: PrayerVisibility,
    #[serde(default)]
    pub is_anonymous: bool,
    pub created_by: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prayer_period_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prayer_period_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_date: Option<String>,
    /// Comma-separated tag list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Prayer {
    /// Individual tags, trimmed, with empty entries dropped.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}
