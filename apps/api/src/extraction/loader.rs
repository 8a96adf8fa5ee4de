//! Document Loader — turns a PDF or DOCX file into plain text.
//!
//! Failures never escape `extract_text`: an unsupported extension or a reader
//! error is logged and downgraded to empty text, which callers treat as
//! "no data".

use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Derives the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, LoaderError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(LoaderError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// The bytes of one uploaded document plus its declared format.
/// Lives only for the duration of a single extraction call.
#[derive(Debug)]
pub struct RawDocument {
    pub bytes: Vec<u8>,
    pub format: DocumentFormat,
}

impl RawDocument {
    /// Reads the whole file into memory. The file handle is closed before
    /// this returns.
    pub fn read(path: &Path) -> Result<Self, LoaderError> {
        let format = DocumentFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        Ok(Self { bytes, format })
    }

    pub fn extract_text(&self) -> Result<String, LoaderError> {
        match self.format {
            DocumentFormat::Pdf => extract_pdf(&self.bytes),
            DocumentFormat::Docx => extract_docx(&self.bytes),
        }
    }
}

/// Extracts plain text from the file at `path`.
///
/// Returns an empty string on any failure.
pub fn extract_text(path: &Path) -> String {
    match RawDocument::read(path).and_then(|doc| doc.extract_text()) {
        Ok(text) => {
            debug!("Extracted {} chars from {}", text.len(), path.display());
            text
        }
        Err(e) => {
            warn!("Error reading file {}: {e}", path.display());
            String::new()
        }
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, LoaderError> {
    // pdf-extract panics on some malformed font tables instead of erroring.
    let pages = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(bytes)
    }))
    .map_err(|_| LoaderError::Pdf("reader panicked on malformed document".to_string()))?
    .map_err(|e| LoaderError::Pdf(e.to_string()))?;

    Ok(join_pages(pages))
}

fn extract_docx(bytes: &[u8]) -> Result<String, LoaderError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| LoaderError::Docx(e.to_string()))?;

    let paragraphs = docx.document.children.iter().filter_map(|child| match child {
        docx_rs::DocumentChild::Paragraph(p) => Some(paragraph_text(&p.children)),
        _ => None,
    });

    Ok(join_paragraphs(paragraphs))
}

fn paragraph_text(children: &[docx_rs::ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(&mut text, &run.children),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                text.push_str(&paragraph_text(&link.children))
            }
            _ => {}
        }
    }
    text
}

fn push_run_text(text: &mut String, children: &[docx_rs::RunChild]) {
    for child in children {
        match child {
            docx_rs::RunChild::Text(t) => text.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => text.push('\t'),
            docx_rs::RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

/// Joins page texts in order. Blank pages contribute nothing; every other
/// page is trimmed and followed by exactly one newline.
pub fn join_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut text = String::new();
    for page in pages {
        let page = page.trim();
        if page.is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }
    text
}

/// Joins paragraph texts in order, one newline after each, empty ones included.
pub fn join_paragraphs<I>(paragraphs: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut text = String::new();
    for paragraph in paragraphs {
        text.push_str(&paragraph);
        text.push('\n');
    }
    text
}


#[cfg(test)]
mod tests {
    use super::fixtures::{docx_bytes, pdf_bytes, temp_file};
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("cv.pdf")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("/tmp/cv.DOCX")).unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_unsupported_extensions_rejected() {
        for name in ["cv.txt", "cv.doc", "cv", "pdf"] {
            assert!(matches!(
                DocumentFormat::from_path(Path::new(name)),
                Err(LoaderError::UnsupportedFormat(_))
            ));
        }
    }

    #[test]
    fn test_join_pages_skips_blank_pages() {
        let text = join_pages(vec!["Page one".to_string(), String::new()]);
        assert_eq!(text, "Page one\n");
    }

    #[test]
    fn test_join_pages_keeps_order_and_trims() {
        let text = join_pages(vec![
            "\n\nFirst\n".to_string(),
            "   \n".to_string(),
            "Second".to_string(),
        ]);
        assert_eq!(text, "First\nSecond\n");
    }

    #[test]
    fn test_join_paragraphs_keeps_empty_paragraphs() {
        let text = join_paragraphs(vec!["A".to_string(), String::new(), "B".to_string()]);
        assert_eq!(text, "A\n\nB\n");
    }

    #[test]
    fn test_docx_paragraphs_in_order() {
        let file = temp_file(".docx", &docx_bytes(&["Jane Doe", "jane@example.com", "Python"]));
        let text = extract_text(file.path());
        assert_eq!(text, "Jane Doe\njane@example.com\nPython\n");

        let segments: Vec<&str> = text.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(segments, vec!["Jane Doe", "jane@example.com", "Python"]);
    }

    #[test]
    fn test_docx_empty_paragraph_contributes_blank_line() {
        let file = temp_file(".docx", &docx_bytes(&["Header", "", "Body"]));
        assert_eq!(extract_text(file.path()), "Header\n\nBody\n");
    }

    #[test]
    fn test_pdf_blank_second_page_contributes_nothing() {
        let file = temp_file(".pdf", &pdf_bytes(&[Some("Hello Resume"), None]));
        let text = extract_text(file.path());
        assert!(text.contains("Hello"), "got {text:?}");
        assert!(text.ends_with('\n'));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn test_pdf_pages_in_order() {
        let file = temp_file(".pdf", &pdf_bytes(&[Some("Alpha"), Some("Omega")]));
        let text = extract_text(file.path());
        let alpha = text.find("Alpha").expect("first page text");
        let omega = text.find("Omega").expect("second page text");
        assert!(alpha < omega);
    }

    #[test]
    fn test_unsupported_extension_yields_empty_text() {
        let file = temp_file(".txt", b"Jane Doe jane@example.com");
        assert_eq!(extract_text(file.path()), "");
    }

    #[test]
    fn test_corrupt_pdf_yields_empty_text() {
        let file = temp_file(".pdf", b"definitely not a pdf");
        assert_eq!(extract_text(file.path()), "");
    }

    #[test]
    fn test_corrupt_docx_yields_empty_text() {
        let file = temp_file(".docx", b"PK\x03\x04 truncated");
        assert_eq!(extract_text(file.path()), "");
    }

    #[test]
    fn test_missing_file_yields_empty_text() {
        assert_eq!(extract_text(Path::new("/nonexistent/resume.pdf")), "");
    }

    #[test]
    fn test_raw_document_reports_unsupported_format() {
        let err = RawDocument::read(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, LoaderError::UnsupportedFormat(_)));
    }
}
