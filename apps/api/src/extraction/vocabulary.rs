//! Vocabulary — the data table behind skill and education matching.
//!
//! Maps each canonical skill term to its accepted variants, plus the keywords
//! that mark an organization as an educational institution. The built-in table
//! is embedded from `data/vocabulary.json`; `VOCABULARY_PATH` can point at a
//! replacement file with the same shape.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_VOCABULARY: &str = include_str!("../../data/vocabulary.json");

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Failed to read vocabulary file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid vocabulary JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Vocabulary contains an empty term (under '{0}')")]
    EmptyTerm(String),

    #[error("Vocabulary defines no skills")]
    NoSkills,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vocabulary {
    /// canonical term → extra variants. The canonical term always matches itself.
    pub skills: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub education_keywords: Vec<String>,
}

impl Vocabulary {
    /// The table compiled into the binary.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_VOCABULARY).expect("built-in vocabulary is valid")
    }

    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let vocabulary: Vocabulary = serde_json::from_str(json)?;
        vocabulary.validate()?;
        Ok(vocabulary)
    }

    pub fn from_file(path: &Path) -> Result<Self, VocabularyError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Every (canonical, variant) pair, canonical first for each term.
    pub fn skill_terms(&self) -> impl Iterator<Item = (&str, &str)> {
        self.skills.iter().flat_map(|(canonical, variants)| {
            std::iter::once(canonical.as_str())
                .chain(variants.iter().map(String::as_str))
                .map(move |variant| (canonical.as_str(), variant))
        })
    }

    fn validate(&self) -> Result<(), VocabularyError> {
        if self.skills.is_empty() {
            return Err(VocabularyError::NoSkills);
        }
        for (canonical, variants) in &self.skills {
            if canonical.trim().is_empty() || variants.iter().any(|v| v.trim().is_empty()) {
                return Err(VocabularyError::EmptyTerm(canonical.clone()));
            }
        }
        if self.education_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(VocabularyError::EmptyTerm("education_keywords".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_vocabulary_loads() {
        let vocabulary = Vocabulary::builtin();
        assert!(vocabulary.skills.contains_key("Python"));
        assert!(vocabulary.skills.contains_key("Machine Learning"));
        assert_eq!(
            vocabulary.education_keywords,
            vec!["university", "college", "institute", "school"]
        );
    }

    #[test]
    fn test_skill_terms_include_canonical_and_variants() {
        let vocabulary =
            Vocabulary::from_json(r#"{"skills": {"Kubernetes": ["k8s"]}}"#).unwrap();
        let terms: Vec<_> = vocabulary.skill_terms().collect();
        assert_eq!(terms, vec![("Kubernetes", "Kubernetes"), ("Kubernetes", "k8s")]);
    }

    #[test]
    fn test_missing_education_keywords_default_to_empty() {
        let vocabulary = Vocabulary::from_json(r#"{"skills": {"Rust": []}}"#).unwrap();
        assert!(vocabulary.education_keywords.is_empty());
    }

    #[test]
    fn test_rejects_empty_skill_table() {
        let err = Vocabulary::from_json(r#"{"skills": {}}"#).unwrap_err();
        assert!(matches!(err, VocabularyError::NoSkills));
    }

    #[test]
    fn test_rejects_blank_variant() {
        let err = Vocabulary::from_json(r#"{"skills": {"Rust": ["  "]}}"#).unwrap_err();
        assert!(matches!(err, VocabularyError::EmptyTerm(term) if term == "Rust"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Vocabulary::from_json("{skills:").unwrap_err();
        assert!(matches!(err, VocabularyError::Parse(_)));
    }

    #[test]
    fn test_loads_from_file() {
        let file = crate::extraction::loader::fixtures::temp_file(
            ".json",
            br#"{"skills": {"Go": ["golang"]}, "education_keywords": ["academy"]}"#,
        );
        let vocabulary = Vocabulary::from_file(file.path()).unwrap();
        assert_eq!(vocabulary.education_keywords, vec!["academy"]);
    }
}
