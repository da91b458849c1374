use serde::{Deserialize, Serialize};
use crate::api::types::Timestamp;
use crate::patterns::Pattern;
use crate::recognition::{ActionRecord, HistoryEntry};

/// Patterns section of an export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatternExport {
    /// Informational only; built-ins are never imported.
    pub built_in: Vec<Pattern>,
    pub custom: Vec<Pattern>,
}

/// Everything the engine hands to the host for storage.
/// The host picks the medium; the engine only produces and consumes this shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportData {
    pub patterns: PatternExport,
    /// Newest first.
    pub recognition_history: Vec<HistoryEntry>,
    /// Newest first. Absent in older exports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_history: Option<Vec<ActionRecord>>,
    pub exported_at: Timestamp,
}

impl ExportData {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_wire_shape() {
        let data = ExportData {
            exported_at: 1234,
            ..Default::default()
        };
        let json = data.to_json().unwrap();
        assert!(json.contains("\"recognitionHistory\""));
        assert!(json.contains("\"builtIn\""));
        assert!(json.contains("\"exportedAt\":1234"));
        assert!(!json.contains("actionHistory"));
    }

    #[test]
    fn missing_sections_default() {
        let data = ExportData::from_json(r#"{"patterns":{"custom":[]}}"#).unwrap();
        assert!(data.recognition_history.is_empty());
        assert!(data.action_history.is_none());
        assert_eq!(data.exported_at, 0);
    }

    #[test]
    fn history_entries_parse() {
        let json = r#"{
            "recognitionHistory": [
                {"patternId":"circle","score":0.9,"timestamp":10,"associatedAction":"open portal"}
            ]
        }"#;
        let data = ExportData::from_json(json).unwrap();
        assert_eq!(data.recognition_history[0].pattern_id, "circle");
    }
}
