use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::extraction::recognizer::DEFAULT_MAX_CHARS;

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory where uploads are staged while being analyzed.
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// Replacement for the built-in skill/education vocabulary.
    pub vocabulary_path: Option<PathBuf>,
    /// Recognizer input limit, in characters.
    pub max_text_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", DEFAULT_PORT)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            vocabulary_path: std::env::var("VOCABULARY_PATH").ok().map(PathBuf::from),
            max_text_chars: parse_env("MAX_TEXT_CHARS", DEFAULT_MAX_CHARS)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_value(key, std::env::var(key).ok(), default)
}

fn parse_value<T>(key: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
