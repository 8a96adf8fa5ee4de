// Resume extraction pipeline: document loader → field extractors → record.
// Everything here is synchronous and CPU-bound; async callers must run it
// inside tokio::task::spawn_blocking.

pub mod analyzer;
pub mod entities;
pub mod fields;
pub mod loader;
pub mod recognizer;
pub mod skills;
pub mod vocabulary;

pub use analyzer::{PipelineError, ResumeAnalyzer};
pub use vocabulary::Vocabulary;
