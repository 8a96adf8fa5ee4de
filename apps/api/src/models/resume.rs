#![allow(dead_code)]

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Message carried by the soft-failure sentinel when no text could be read.
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract text from the file.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// One detected institution. `degree` and `major` are reserved and always `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub university: String,
    pub degree: Option<String>,
    pub major: Option<String>,
}

impl EducationEntry {
    pub fn institution(university: impl Into<String>) -> Self {
        Self {
            university: university.into(),
            degree: None,
            major: None,
        }
    }
}

/// Structured data extracted from a single resume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: Option<String>,
    pub contact: Contact,
    pub education: Vec<EducationEntry>,
    pub skills: BTreeSet<String>,
}

/// Result of analyzing one file: a populated record, or the soft-failure sentinel.
///
/// Serialized untagged so the JSON is either the record itself or
/// `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Record(ResumeRecord),
    Failed { error: String },
}

impl AnalysisOutcome {
    pub fn extraction_failed() -> Self {
        AnalysisOutcome::Failed {
            error: EXTRACTION_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn record(&self) -> Option<&ResumeRecord> {
        match self {
            AnalysisOutcome::Record(record) => Some(record),
            AnalysisOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AnalysisOutcome::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_record_serializes_nulls_and_empty_lists() {
        let value = serde_json::to_value(ResumeRecord::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": null,
                "contact": { "email": null, "phone": null },
                "education": [],
                "skills": []
            })
        );
    }

    #[test]
    fn test_education_entry_keeps_reserved_fields_null() {
        let value = serde_json::to_value(EducationEntry::institution("Stanford University")).unwrap();
        assert_eq!(
            value,
            json!({ "university": "Stanford University", "degree": null, "major": null })
        );
    }

    #[test]
    fn test_sentinel_serializes_as_bare_error_object() {
        let value = serde_json::to_value(AnalysisOutcome::extraction_failed()).unwrap();
        assert_eq!(value, json!({ "error": "Failed to extract text from the file." }));
    }

    #[test]
    fn test_record_outcome_serializes_without_wrapper() {
        let mut record = ResumeRecord::default();
        record.name = Some("Jane Doe".to_string());
        record.skills.insert("Python".to_string());
        let value = serde_json::to_value(AnalysisOutcome::Record(record)).unwrap();
        assert_eq!(value["name"], "Jane Doe");
        assert_eq!(value["skills"], json!(["Python"]));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_sentinel_round_trips_as_failed() {
        let outcome: AnalysisOutcome =
            serde_json::from_str(r#"{"error": "Failed to extract text from the file."}"#).unwrap();
        assert!(outcome.is_failed());
        assert!(outcome.record().is_none());
    }
}
