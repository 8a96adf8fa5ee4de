//! Pipeline Orchestrator — loader, then the independent field extractors,
//! then assembly into a `ResumeRecord`.
//!
//! The recognizer and the compiled skill table are built once and only read
//! afterwards. `analyze` uses a lazily built process-wide default; the server
//! builds its own instance from config at startup and shares it via `Arc`.

use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::debug;

use crate::extraction::entities::{
    extract_education, extract_name, EntityRecognizer, InferenceError,
};
use crate::extraction::fields::{extract_email, extract_phone};
use crate::extraction::loader;
use crate::extraction::recognizer::{RuleBasedRecognizer, DEFAULT_MAX_CHARS};
use crate::extraction::skills::{extract_skills, SkillMatcher};
use crate::extraction::vocabulary::Vocabulary;
use crate::models::resume::{AnalysisOutcome, Contact, EducationEntry, ResumeRecord};

static DEFAULT_ANALYZER: Lazy<ResumeAnalyzer> =
    Lazy::new(|| ResumeAnalyzer::rule_based(&Vocabulary::builtin(), DEFAULT_MAX_CHARS));

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Entity recognition failed: {0}")]
    Inference(#[from] InferenceError),
}

pub struct ResumeAnalyzer {
    recognizer: Arc<dyn EntityRecognizer>,
    skills: SkillMatcher,
    education_keywords: Vec<String>,
}

impl ResumeAnalyzer {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, vocabulary: &Vocabulary) -> Self {
        Self {
            recognizer,
            skills: SkillMatcher::new(vocabulary),
            education_keywords: vocabulary.education_keywords.clone(),
        }
    }

    /// The default setup: a `RuleBasedRecognizer` that also knows the
    /// vocabulary's institution keywords.
    pub fn rule_based(vocabulary: &Vocabulary, max_chars: usize) -> Self {
        let recognizer =
            RuleBasedRecognizer::new(max_chars).with_org_keywords(&vocabulary.education_keywords);
        Self::new(Arc::new(recognizer), vocabulary)
    }

    pub fn recognizer_name(&self) -> &str {
        self.recognizer.name()
    }

    pub fn skill_term_count(&self) -> usize {
        self.skills.len()
    }

    /// Analyzes the file at `path`.
    ///
    /// Unreadable or unsupported files yield the extraction-failed sentinel,
    /// not an error. Only a recognizer failure is returned as `Err`.
    pub fn analyze(&self, path: &Path) -> Result<AnalysisOutcome, PipelineError> {
        let text = loader::extract_text(path);
        if text.is_empty() {
            return Ok(AnalysisOutcome::extraction_failed());
        }
        Ok(AnalysisOutcome::Record(self.analyze_text(&text)?))
    }

    /// Runs every extractor over already-loaded text. One extractor finding
    /// nothing never affects the others.
    pub fn analyze_text(&self, text: &str) -> Result<ResumeRecord, PipelineError> {
        let entities = self.recognizer.recognize(text)?;

        let record = ResumeRecord {
            name: extract_name(&entities),
            contact: Contact {
                email: extract_email(text),
                phone: extract_phone(text),
            },
            education: extract_education(&entities, &self.education_keywords)
                .into_iter()
                .map(EducationEntry::institution)
                .collect(),
            skills: extract_skills(&self.skills, text),
        };

        debug!(
            name_found = record.name.is_some(),
            email_found = record.contact.email.is_some(),
            phone_found = record.contact.phone.is_some(),
            education = record.education.len(),
            skills = record.skills.len(),
            "Resume analyzed"
        );
        Ok(record)
    }
}

/// Analyzes `path` with the process-wide default analyzer, for callers that
/// do not hold their own `ResumeAnalyzer`.
#[allow(dead_code)]
pub fn analyze(path: &Path) -> Result<AnalysisOutcome, PipelineError> {
    DEFAULT_ANALYZER.analyze(path)
}
