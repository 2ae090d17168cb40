//! Festival data models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root of the festival dataset as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Festivals in source-file order
    pub festivals: Vec<Festival>,
    /// Regional events, served as-is
    pub regional_events: Vec<Value>,
    /// Provenance and version information, served as-is
    pub metadata: Map<String, Value>,
}

/// One calendar event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Festival {
    pub name: String,
    #[serde(rename = "type")]
    pub festival_type: String,
    pub description: String,
    /// Expected as `YYYY-MM-DD`; not checked at load time
    pub date: String,
    pub regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_holiday: Option<bool>,
    /// Any additional keys, kept so records round-trip unmodified
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Festival {
    /// Whether the record is flagged as a public holiday. Absent means no.
    pub fn is_public_holiday(&self) -> bool {
        self.public_holiday.unwrap_or(false)
    }

    /// Month component of `date`, or `None` when the date is not `YYYY-MM-DD` shaped.
    pub fn month(&self) -> Option<u32> {
        self.date.split('-').nth(1)?.trim().parse().ok()
    }
}

/// Error payload returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Plain message payload.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_public_holiday_is_false() {
        let festival: Festival = serde_json::from_value(json!({
            "name": "Pongal",
            "type": "Harvest Festival",
            "description": "Tamil harvest festival",
            "date": "2024-01-15",
            "regions": ["Tamil Nadu"]
        }))
        .unwrap();

        assert!(!festival.is_public_holiday());
        assert_eq!(festival.month(), Some(1));
    }

    #[test]
    fn test_record_serializes_unmodified() {
        let source = json!({
            "name": "Onam",
            "type": "Harvest Festival",
            "description": "Kerala harvest festival",
            "date": "2024-09-15",
            "regions": ["Kerala"],
            "duration_days": 10
        });

        let festival: Festival = serde_json::from_value(source.clone()).unwrap();
        assert_eq!(serde_json::to_value(&festival).unwrap(), source);
    }

    #[test]
    fn test_month_of_malformed_date() {
        let mut festival: Festival = serde_json::from_value(json!({
            "name": "Unknown",
            "type": "Other",
            "description": "",
            "date": "sometime",
            "regions": []
        }))
        .unwrap();
        assert_eq!(festival.month(), None);

        festival.date = "2024-xx-01".to_string();
        assert_eq!(festival.month(), None);
    }
}
