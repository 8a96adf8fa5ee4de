//! Skill matching against the vocabulary table.
//!
//! Text and vocabulary terms go through the same tokenizer, so "Machine
//! Learning", "machine  learning" and "MACHINE\nLEARNING" all reduce to the
//! key `machine learning`. Matching scans left to right and prefers the
//! longest term at each position; matched tokens are consumed.

use std::collections::{BTreeSet, HashMap};

use crate::extraction::vocabulary::Vocabulary;

/// Characters that split tokens in addition to whitespace.
const SEPARATORS: &[char] = &[
    ',', ';', ':', '|', '/', '\\', '(', ')', '[', ']', '{', '}', '<', '>', '"', '•', '·', '▪',
    '●', '–', '—', '!', '?', '*',
];

/// Compiled form of the vocabulary's skill table.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    /// lowercased, space-joined variant → canonical term
    terms: HashMap<String, String>,
    max_tokens: usize,
}

impl SkillMatcher {
    pub fn new(vocabulary: &Vocabulary) -> Self {
        let mut terms = HashMap::new();
        let mut max_tokens = 1;

        for (canonical, variant) in vocabulary.skill_terms() {
            let tokens = tokenize(variant);
            if tokens.is_empty() {
                continue;
            }
            max_tokens = max_tokens.max(tokens.len());
            terms
                .entry(tokens.join(" "))
                .or_insert_with(|| canonical.to_string());
        }

        Self { terms, max_tokens }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Canonical names of every vocabulary skill mentioned in `text`.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let tokens = tokenize(text);
        let mut found = BTreeSet::new();

        let mut i = 0;
        while i < tokens.len() {
            let longest = self.max_tokens.min(tokens.len() - i);
            let matched = (1..=longest).rev().find_map(|n| {
                self.terms
                    .get(&tokens[i..i + n].join(" "))
                    .map(|canonical| (n, canonical))
            });

            match matched {
                Some((n, canonical)) => {
                    found.insert(canonical.clone());
                    i += n;
                }
                None => {
                    // "AWS-certified", "scikit-learn-based"
                    if tokens[i].contains('-') {
                        found.extend(self.extract(&tokens[i].replace('-', " ")));
                    }
                    i += 1;
                }
            }
        }

        found
    }
}

pub fn extract_skills(matcher: &SkillMatcher, text: &str) -> BTreeSet<String> {
    matcher.extract(text)
}

/// Lowercased tokens. Inner `.`, `+`, `#` and `-` are kept so terms such as
/// `node.js`, `c++` and `scikit-learn` survive; sentence punctuation at the
/// edges and a possessive `'s` are dropped.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| c.is_whitespace() || SEPARATORS.contains(&c))
        .map(|raw| strip_possessive(trim_edges(raw).to_lowercase()))
        .filter(|token| !token.is_empty())
        .collect()
}

fn trim_edges(raw: &str) -> &str {
    raw.trim_matches(|c: char| matches!(c, '.' | '\'' | '’' | '-' | '_'))
}

fn strip_possessive(token: String) -> String {
    if let Some(stem) = token.strip_suffix("'s").or_else(|| token.strip_suffix("’s")) {
        return trim_edges(stem).to_string();
    }
    token
}
