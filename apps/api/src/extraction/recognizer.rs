//! Rule-based entity recognizer.
//!
//! Works line by line. Capitalized words (Titlecase, ALL-CAPS or initials) are
//! grouped into spans, with short lowercase connectors ("of", "and", ...)
//! allowed between them. Separator punctuation and any non-capitalized word
//! close a span. Each span is then classified:
//!
//! - contains an organization keyword → `Org`, running from the proper name
//!   before the keyword through any "of X" chain after it. Degree words in
//!   front, a person name in front, and dates or places behind are split off.
//! - otherwise its leading run of name-like words, if 2–4 long → `Person`
//!
//! The lexicons below are the whole "model". It is built once and never
//! mutated, so a single instance is shared across threads.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extraction::entities::{Entity, EntityLabel, EntityRecognizer, InferenceError};

/// Largest input accepted, in characters.
pub const DEFAULT_MAX_CHARS: usize = 1_000_000;

const MIN_NAME_TOKENS: usize = 2;
const MAX_NAME_TOKENS: usize = 4;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("word pattern is valid"));

const CONNECTORS: &[&str] = &["of", "and", "the", "for", "de", "at"];

const ORG_KEYWORDS: &[&str] = &[
    "university", "college", "institute", "school", "academy", "polytechnic", "conservatory",
    "seminary", "inc", "corp", "corporation", "llc", "ltd", "limited", "plc", "gmbh", "company",
    "technologies", "labs", "laboratories", "laboratory", "group", "foundation", "bank",
    "association", "society", "agency", "hospital", "ministry", "council", "consulting",
    "solutions",
];

/// Section headings and filler that never start or end an entity.
const EDGE_WORDS: &[&str] = &[
    "resume", "résumé", "curriculum", "vitae", "cv", "education", "experience", "work",
    "professional", "employment", "history", "skills", "technical", "summary", "profile",
    "objective", "contact", "information", "projects", "project", "certifications",
    "certification", "achievements", "awards", "publications", "references", "interests",
    "languages", "activities", "volunteer", "leadership", "coursework", "relevant", "personal",
    "details", "about", "me", "career", "qualifications", "honors", "training", "academic",
    "background", "internships", "internship", "extracurricular", "attended", "graduated",
    "studied", "completed", "joined", "worked", "earned", "received", "pursuing", "currently",
    "mr", "mrs", "ms", "dr", "prof",
];

/// Words that rule a token out of a person name.
const NON_NAME_WORDS: &[&str] = &[
    // roles
    "engineer", "developer", "manager", "analyst", "scientist", "intern", "designer",
    "consultant", "architect", "administrator", "specialist", "director", "lead", "senior",
    "junior", "principal", "staff", "assistant", "associate", "officer", "coordinator",
    "technician", "programmer", "researcher", "student", "teacher", "professor", "president",
    "founder", "head", "software", "data", "full", "stack", "frontend", "backend", "web",
    "mobile", "cloud", "devops", "product", "marketing", "sales", "research", "teaching",
    "graduate", "undergraduate", "fellow", "team", "member",
    // technology and tools
    "python", "java", "javascript", "typescript", "sql", "git", "docker", "kubernetes", "aws",
    "azure", "gcp", "react", "node", "linux", "html", "css", "api", "rest", "machine",
    "learning", "deep", "tensorflow", "pytorch", "pandas", "numpy", "excel", "microsoft",
    "office", "google", "agile", "scrum", "analysis", "jira", "confluence", "jenkins",
    "postman", "figma", "tableau", "slack", "trello", "gitlab", "bitbucket", "jupyter",
    "vscode", "intellij", "eclipse", "selenium", "redis", "mongodb", "postgresql", "mysql",
    "kafka", "spark", "hadoop", "flask", "django", "spring", "angular", "vue", "kotlin",
    "ruby", "rails", "php", "matlab", "terraform", "ansible", "powerpoint", "word",
    // contact labels and filler
    "email", "e-mail", "phone", "tel", "address", "linkedin", "github", "portfolio",
    "website", "name", "the", "a", "an", "i", "my", "dear", "sir", "madam", "page",
];

/// Fields of study and degree names.
const ACADEMIC_WORDS: &[&str] = &[
    "computer", "science", "sciences", "engineering", "mathematics", "math", "physics",
    "chemistry", "biology", "economics", "finance", "business", "administration", "systems",
    "technology", "arts", "bachelor", "bachelors", "master", "masters", "doctor", "degree",
    "diploma", "major", "minor", "gpa", "dean", "list", "cum", "laude", "magna", "summa",
    "b.s", "b.a", "m.s", "m.a", "ph.d", "b.sc", "m.sc", "b.tech", "m.tech", "b.e", "m.e", "bs",
    "ba", "ms", "ma", "phd", "mba", "bsc", "msc", "btech", "mtech",
];

const DATE_WORDS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep",
    "sept", "oct", "nov", "dec", "present", "current", "spring", "summer", "fall", "winter",
];

const PLACE_WORDS: &[&str] = &[
    "street", "st", "avenue", "ave", "road", "rd", "city", "new", "york", "san", "francisco",
    "los", "angeles", "united", "states", "usa", "uk", "india", "remote", "seattle", "boston",
    "chicago", "houston", "atlanta", "philadelphia", "california", "texas", "london", "toronto",
    "bangalore", "bengaluru", "mumbai", "delhi", "hyderabad", "berlin", "paris", "tokyo",
    "singapore",
];

/// Two-letter codes, recognized only when written in capitals.
const US_STATE_CODES: &[&str] = &[
    "al", "ak", "az", "ar", "ca", "co", "ct", "de", "fl", "ga", "hi", "id", "il", "in", "ia",
    "ks", "ky", "la", "me", "md", "ma", "mi", "mn", "ms", "mo", "mt", "ne", "nv", "nh", "nj",
    "nm", "ny", "nc", "nd", "oh", "ok", "or", "pa", "ri", "sc", "sd", "tn", "tx", "ut", "vt",
    "va", "wa", "wv", "wi", "wy", "dc",
];

/// Words that sit between an institution's proper name and its keyword,
/// as in "Arizona State University" or "Harvard Business School".
const ORG_MODIFIERS: &[&str] = &[
    "high", "state", "community", "national", "technical", "medical", "law", "business",
    "art", "arts", "international", "public", "graduate", "middle", "primary", "secondary",
    "elementary", "catholic", "christian", "city", "central",
];

/// First words of two-word place names ("University of North Carolina").
const COMPOUND_PREFIXES: &[&str] = &[
    "north", "south", "east", "west", "northern", "southern", "eastern", "western", "central",
    "new", "san", "los", "las", "santa", "saint", "st", "rhode", "upper", "lower",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Capitalized,
    AllCaps,
    Initial,
    Lower,
    Other,
}

impl Shape {
    fn is_capitalized(self) -> bool {
        matches!(self, Shape::Capitalized | Shape::AllCaps | Shape::Initial)
    }
}

#[derive(Debug, Clone)]
struct Token<'a> {
    core: &'a str,
    /// lowercased, trailing '.' removed
    norm: String,
    start: usize,
    end: usize,
    shape: Shape,
    breaks_before: bool,
    breaks_after: bool,
}

/// A word split from a line, or a punctuation-only separator.
enum Piece<'a> {
    Word(Token<'a>),
    Separator,
}

#[derive(Debug, Clone)]
pub struct RuleBasedRecognizer {
    max_chars: usize,
    /// lowercased, in addition to `ORG_KEYWORDS`
    extra_org_keywords: Vec<String>,
}

impl Default for RuleBasedRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHARS)
    }
}

impl RuleBasedRecognizer {
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            extra_org_keywords: Vec::new(),
        }
    }

    /// Also treats each of `keywords` as an organization keyword.
    pub fn with_org_keywords(mut self, keywords: &[String]) -> Self {
        for keyword in keywords {
            let keyword = keyword.trim().to_lowercase();
            if !keyword.is_empty()
                && !ORG_KEYWORDS.contains(&keyword.as_str())
                && !self.extra_org_keywords.contains(&keyword)
            {
                self.extra_org_keywords.push(keyword);
            }
        }
        self
    }

    fn is_org_keyword(&self, token: &Token) -> bool {
        ORG_KEYWORDS.contains(&token.norm.as_str())
            || self.extra_org_keywords.iter().any(|k| *k == token.norm)
    }

    fn recognize_line(&self, text: &str, line: &str, offset: usize, entities: &mut Vec<Entity>) {
        let mut span: Vec<Token> = Vec::new();

        for m in WORD_RE.find_iter(line) {
            let token = match split_piece(m.as_str(), offset + m.start()) {
                Piece::Word(token) => token,
                Piece::Separator => {
                    self.close_span(text, &mut span, entities);
                    continue;
                }
            };

            if token.breaks_before {
                self.close_span(text, &mut span, entities);
            }

            let joins = token.shape.is_capitalized() || (!span.is_empty() && is_connector(&token));
            if !joins {
                self.close_span(text, &mut span, entities);
                continue;
            }

            let breaks_after = token.breaks_after;
            span.push(token);
            if breaks_after {
                self.close_span(text, &mut span, entities);
            }
        }

        self.close_span(text, &mut span, entities);
    }

    fn close_span(&self, text: &str, span: &mut Vec<Token>, entities: &mut Vec<Entity>) {
        if span.is_empty() {
            return;
        }
        let tokens = std::mem::take(span);
        self.classify(text, trim_edges(&tokens), entities);
    }

    fn classify(&self, text: &str, tokens: &[Token], entities: &mut Vec<Entity>) {
        if tokens.is_empty() {
            return;
        }

        match tokens.iter().position(|t| self.is_org_keyword(t)) {
            Some(first_kw) => self.classify_org(text, tokens, first_kw, entities),
            None => {
                let name_len = person_prefix_len(tokens, tokens.len());
                if name_len > 0 {
                    entities.push(entity(text, &tokens[..name_len], EntityLabel::Person));
                }
            }
        }
    }

    /// Splits a span holding an organization keyword into an optional leading
    /// person, the organization itself, and a remainder that is classified
    /// again. Degree and field words in front of the organization are dropped.
    fn classify_org(
        &self,
        text: &str,
        tokens: &[Token],
        first_kw: usize,
        entities: &mut Vec<Entity>,
    ) {
        let skip = degree_prefix_len(&tokens[..first_kw]);
        let tokens = &tokens[skip..];
        let first_kw = first_kw - skip;

        let pre = &tokens[..first_kw];
        let modifiers = pre
            .iter()
            .rev()
            .take_while(|t| ORG_MODIFIERS.contains(&t.norm.as_str()))
            .count();
        let person_len = person_prefix_len(pre, pre.len().saturating_sub(modifiers + 1));
        if person_len > 0 {
            entities.push(entity(text, &tokens[..person_len], EntityLabel::Person));
        }

        let last_kw = tokens
            .iter()
            .rposition(|t| self.is_org_keyword(t))
            .unwrap_or(first_kw);
        let end = org_tail_end(tokens, last_kw);
        entities.push(entity(text, &tokens[person_len..end], EntityLabel::Org));

        self.classify(text, trim_edges(&tokens[end..]), entities);
    }
}

impl EntityRecognizer for RuleBasedRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<Entity>, InferenceError> {
        let len = text.chars().count();
        if len > self.max_chars {
            return Err(InferenceError::InputTooLarge {
                len,
                max: self.max_chars,
            });
        }

        let mut entities = Vec::new();
        let mut offset = 0;
        for line in text.split('\n') {
            self.recognize_line(text, line, offset, &mut entities);
            offset += line.len() + 1;
        }
        Ok(entities)
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}

fn split_piece(raw: &str, start: usize) -> Piece<'_> {
    const OPENERS: &[char] = &['(', '[', '{', '<', '"', '\'', '“', '‘'];
    const CLOSERS: &[char] = &[
        ')', ']', '}', '>', '"', '\'', '”', '’', ',', ';', ':', '|', '!', '?',
    ];

    let leading = raw.trim_start_matches(OPENERS);
    let breaks_before = leading.len() < raw.len() && raw.starts_with(['(', '[', '{', '<']);
    let lead_bytes = raw.len() - leading.len();

    let mut core = leading.trim_end_matches(CLOSERS);
    let stripped = &leading[core.len()..];
    let mut breaks_after = stripped.contains([')', ']', '}', '>', ',', ';', ':', '|', '!', '?']);

    if core.ends_with('.') && !is_abbreviation(core) {
        core = core.trim_end_matches('.');
        breaks_after = true;
    }

    if !core.chars().any(char::is_alphanumeric) {
        return Piece::Separator;
    }

    let start = start + lead_bytes;
    Piece::Word(Token {
        core,
        norm: core.trim_end_matches('.').to_lowercase(),
        start,
        end: start + core.len(),
        shape: shape_of(core),
        breaks_before,
        breaks_after,
    })
}

/// "J." or "B.S." keep their final dot; "Doe." does not.
fn is_abbreviation(core: &str) -> bool {
    let body = core.trim_end_matches('.');
    body.chars().filter(|c| c.is_alphabetic()).count() == 1 || body.contains('.')
}

fn shape_of(core: &str) -> Shape {
    let first = match core.chars().next() {
        Some(c) => c,
        None => return Shape::Other,
    };
    if first.is_lowercase() {
        return Shape::Lower;
    }
    if !first.is_uppercase() {
        return Shape::Other;
    }

    let letters: Vec<char> = core.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.len() == 1 && core.ends_with('.') {
        Shape::Initial
    } else if letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase()) {
        Shape::AllCaps
    } else {
        Shape::Capitalized
    }
}

fn is_connector(token: &Token) -> bool {
    CONNECTORS.contains(&token.norm.as_str())
}

fn trim_edges<'t, 'a>(tokens: &'t [Token<'a>]) -> &'t [Token<'a>] {
    let is_edge = |t: &Token| is_connector(t) || EDGE_WORDS.contains(&t.norm.as_str());
    let start = tokens.iter().position(|t| !is_edge(t)).unwrap_or(tokens.len());
    let end = tokens.iter().rposition(|t| !is_edge(t)).map_or(start, |i| i + 1);
    &tokens[start..end.max(start)]
}

/// Length of the person name at the start of `tokens`, looking no further
/// than `limit` tokens; 0 when there is none.
fn person_prefix_len(tokens: &[Token], limit: usize) -> usize {
    let name_len = tokens
        .iter()
        .take_while(|t| is_name_token(t))
        .count()
        .min(limit);
    let name = &tokens[..name_len];
    let has_full_word = name.iter().any(|t| t.shape != Shape::Initial);
    if (MIN_NAME_TOKENS..=MAX_NAME_TOKENS).contains(&name_len) && has_full_word {
        name_len
    } else {
        0
    }
}

/// Leading degree and field words ("B.S. Computer Science") in front of an
/// institution name. Kept when nothing else precedes the keyword, so
/// "Business School" stays whole.
fn degree_prefix_len(pre: &[Token]) -> usize {
    let len = pre
        .iter()
        .take_while(|t| ACADEMIC_WORDS.contains(&t.norm.as_str()) || is_connector(t))
        .count();
    if len < pre.len() {
        len
    } else {
        0
    }
}

/// End of an organization whose last keyword is at `last_kw`. Only "of X"
/// style chains extend past the keyword; trailing dates and places do not.
fn org_tail_end(tokens: &[Token], last_kw: usize) -> usize {
    let is_head = |t: &Token| t.shape.is_capitalized() && !DATE_WORDS.contains(&t.norm.as_str());

    let mut end = last_kw + 1;
    let mut i = end;
    while tokens.get(i).is_some_and(is_connector) {
        while tokens.get(i).is_some_and(is_connector) {
            i += 1;
        }
        let head = match tokens.get(i) {
            Some(head) if is_head(head) => head,
            _ => break,
        };
        i += 1;
        if COMPOUND_PREFIXES.contains(&head.norm.as_str()) && tokens.get(i).is_some_and(is_head) {
            i += 1;
        }
        end = i;
    }
    end
}

fn is_name_token(token: &Token) -> bool {
    let norm = token.norm.as_str();
    token.shape.is_capitalized()
        && token
            .core
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '-' | '\'' | '’' | '.'))
        && !NON_NAME_WORDS.contains(&norm)
        && !ACADEMIC_WORDS.contains(&norm)
        && !DATE_WORDS.contains(&norm)
        && !PLACE_WORDS.contains(&norm)
        && !EDGE_WORDS.contains(&norm)
        && !(token.shape == Shape::AllCaps && US_STATE_CODES.contains(&norm))
}

fn entity(text: &str, tokens: &[Token], label: EntityLabel) -> Entity {
    let start = tokens[0].start;
    let end = tokens[tokens.len() - 1].end;
    Entity {
        text: text[start..end].to_string(),
        label,
        start,
        end,
    }
}
