//! Daily chat statistics, one entry per calendar day.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::{Collection, Record};

/// Aggregated figures for one day. Keyed by `date`, not by an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    #[serde(default)]
    pub total_chats: u64,
    #[serde(default)]
    pub active_chats: u64,
    #[serde(default)]
    pub closed_chats: u64,
    #[serde(default)]
    pub average_rating: f64,
    /// Average first response time in minutes.
    #[serde(default)]
    pub average_response_time: f64,
    #[serde(default)]
    pub total_messages: u64,
}

impl Analytics {
    /// Creates an all-zero entry for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            total_chats: 0,
            active_chats: 0,
            closed_chats: 0,
            average_rating: 0.0,
            average_response_time: 0.0,
            total_messages: 0,
        }
    }

    /// Closed chats as a share of all chats that day.
    pub fn resolution_rate(&self) -> Option<f64> {
        if self.total_chats == 0 {
            return None;
        }
        Some(self.closed_chats as f64 / self.total_chats as f64)
    }
}

impl Record for Analytics {
    const COLLECTION: Collection = Collection::Analytics;

    fn key(&self) -> Cow<'_, str> {
        Cow::Owned(self.date.format("%Y-%m-%d").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_key_matches_serialized_date() {
        let entry = Analytics::new(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["date"], json!(entry.key()));
        assert_eq!(entry.key(), "2024-01-05");
    }

    #[test]
    fn test_resolution_rate() {
        let mut entry = Analytics::new(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(entry.resolution_rate(), None);
        entry.total_chats = 120;
        entry.closed_chats = 98;
        let rate = entry.resolution_rate().unwrap();
        assert!((rate - 98.0 / 120.0).abs() < f64::EPSILON);
    }
}
