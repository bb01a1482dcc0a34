use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Usage history keyed by topic id.
///
/// A `BTreeMap` keeps the serialized file sorted, which makes diffs of the
/// history file readable.
pub type UsageHistory = BTreeMap<String, UsageRecord>;

/// Persisted usage of a single topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsageRecord {
    /// When the topic was last picked, `None` if never
    pub last_used: Option<DateTime<Utc>>,
    /// How many times the topic has been picked
    pub use_count: u32,
}

impl UsageRecord {
    /// Record one more use at `now`.
    ///
    /// `last_used` never moves backwards, even if the clock does.
    pub fn record_use(&mut self, now: DateTime<Utc>) {
        self.last_used = Some(self.last_used.map_or(now, |prev| prev.max(now)));
        self.use_count = self.use_count.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_record_use_from_never_used() {
        let now = Utc::now();
        let mut record = UsageRecord::default();

        record.record_use(now);

        assert_eq!(record.use_count, 1);
        assert_eq!(record.last_used, Some(now));
    }

    #[test]
    fn test_record_use_never_moves_backwards() {
        let now = Utc::now();
        let mut record = UsageRecord {
            last_used: Some(now),
            use_count: 4,
        };

        record.record_use(now - Duration::hours(3));

        assert_eq!(record.use_count, 5);
        assert_eq!(record.last_used, Some(now));
    }

    #[test]
    fn test_json_shape() {
        let record = UsageRecord::default();
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json, serde_json::json!({ "lastUsed": null, "useCount": 0 }));

        let parsed: UsageRecord =
            serde_json::from_str(r#"{ "lastUsed": "2024-05-01T10:00:00Z", "useCount": 3 }"#)
                .unwrap();
        assert_eq!(parsed.use_count, 3);
        assert!(parsed.last_used.is_some());

        // Missing fields fall back to defaults
        let parsed: UsageRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, UsageRecord::default());
    }
}
