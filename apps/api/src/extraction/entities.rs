//! Named-entity types, the recognizer seam, and the two NER-backed extractors.
//!
//! `ResumeAnalyzer` holds an `Arc<dyn EntityRecognizer>`; the default is
//! `RuleBasedRecognizer`. Any backend must be safe for concurrent read-only
//! use. The recognizer runs once per document and both extractors read its
//! output.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Org,
}

/// A labelled span of the analyzed text. `start`/`end` are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    #[allow(dead_code)]
    pub start: usize,
    #[allow(dead_code)]
    pub end: usize,
}

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Text of {len} characters exceeds the recognizer limit of {max}")]
    InputTooLarge { len: usize, max: usize },
}

pub trait EntityRecognizer: Send + Sync {
    /// Entities in document order.
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, InferenceError>;

    /// Backend name, for logs.
    fn name(&self) -> &str;
}

/// Text of the first `Person` entity. No ranking beyond document order.
pub fn extract_name(entities: &[Entity]) -> Option<String> {
    entities
        .iter()
        .find(|e| e.label == EntityLabel::Person)
        .map(|e| e.text.clone())
}

/// `Org` entities mentioning one of `keywords` (case-insensitive), deduplicated
/// by exact text in first-seen order.
pub fn extract_education(entities: &[Entity], keywords: &[String]) -> Vec<String> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut found: Vec<String> = Vec::new();

    for entity in entities.iter().filter(|e| e.label == EntityLabel::Org) {
        let lower = entity.text.to_lowercase();
        if keywords.iter().any(|k| lower.contains(k.as_str())) && !found.contains(&entity.text) {
            found.push(entity.text.clone());
        }
    }

    found
}
