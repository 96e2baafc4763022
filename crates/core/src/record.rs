//! The metadata field set attached to a file path.

use serde::{Deserialize, Serialize};

/// Free-form metadata fields a caller may attach to a file.
///
/// Every field is optional and unconstrained. An upsert always persists the
/// full set: fields left `None` are stored as NULL, so a record can exist
/// with every field blank — which is distinct from no record existing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    pub project_number: Option<String>,
    pub department: Option<String>,
    pub revision: Option<String>,
    /// Document type. Maps to the `type` column; `type` is reserved in Rust.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub area: Option<String>,
    pub progress: Option<String>,
    /// Multi-line notes.
    pub notes: Option<String>,
}

impl RecordFields {
    /// Field labels paired with values, in form display order.
    pub fn entries(&self) -> [(&'static str, Option<&str>); 7] {
        [
            ("Project #", self.project_number.as_deref()),
            ("Department", self.department.as_deref()),
            ("Revision", self.revision.as_deref()),
            ("Type", self.kind.as_deref()),
            ("Area", self.area.as_deref()),
            ("Progress", self.progress.as_deref()),
            ("Notes", self.notes.as_deref()),
        ]
    }

    /// True when every field is absent.
    pub fn is_blank(&self) -> bool {
        self.entries().iter().all(|(_, value)| value.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fields_are_blank() {
        assert!(RecordFields::default().is_blank());
    }

    #[test]
    fn empty_string_is_not_blank() {
        let fields = RecordFields {
            notes: Some(String::new()),
            ..Default::default()
        };
        assert!(!fields.is_blank());
    }

    #[test]
    fn kind_serializes_as_type() {
        let fields = RecordFields {
            kind: Some("Drawing".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&fields).unwrap();
        assert!(json.contains("\"type\":\"Drawing\""));

        let decoded: RecordFields = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.kind.as_deref(), Some("Drawing"));
    }
}
