use serde::{Deserialize, Serialize};
use thiserror::Error;

use pdfreflow_core::assemble::{assemble_document, TextRun};
use pdfreflow_core::normalize::normalize_text;

use parser::backend::{LopdfBackend, PdfBackend};

pub mod parser;

#[cfg(test)]
mod testing;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF parsing error: {0}")]
    Parse(String),
    #[error("Document is encrypted")]
    Encrypted,
}

/// The only error surfaced by the text pipeline.
///
/// Finer-grained causes are logged at debug level and then discarded.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Failed to extract text from PDF. Please try a different file.")]
pub struct ExtractionFailed;

impl From<PdfError> for ExtractionFailed {
    fn from(e: PdfError) -> Self {
        log::debug!("text extraction failed: {}", e);
        ExtractionFailed
    }
}

/// The text runs of one page, in content-stream order.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub runs: Vec<TextRun>,
}

impl AsRef<[TextRun]> for Page {
    fn as_ref(&self) -> &[TextRun] {
        &self.runs
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub page_count: usize,
}

// ---------------------------------------------------------------------------
// Extraction adapter
// ---------------------------------------------------------------------------

/// Extract every page's runs, in page order.
///
/// All or nothing: the first failing page aborts the whole document.
pub fn extract_pages(backend: &dyn PdfBackend) -> Result<Vec<Page>, PdfError> {
    backend
        .pages()
        .into_iter()
        .map(|(number, page_id)| {
            let runs = parser::runs::extract_page_runs(backend, page_id)?;
            log::debug!("page {}: {} runs", number, runs.len());
            Ok(Page {
                number: number as usize,
                runs,
            })
        })
        .collect()
}

/// Parse PDF bytes and extract every page's runs.
pub fn extract(bytes: &[u8]) -> Result<Vec<Page>, PdfError> {
    let backend = LopdfBackend::load_bytes(bytes)?;
    extract_pages(&backend)
}

// ---------------------------------------------------------------------------
// Pipeline driver
// ---------------------------------------------------------------------------

/// Assemble pages into raw text and normalize it.
pub fn reflow(pages: &[Page]) -> String {
    normalize_text(&assemble_document(pages))
}

/// Text produced by one run of the pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Extraction {
    pub page_count: usize,
    pub text: String,
}

/// Run the pipeline against an already-loaded engine.
///
/// With `normalize` unset the assembled text is returned as is.
pub fn extract_from(
    backend: &dyn PdfBackend,
    normalize: bool,
) -> Result<Extraction, ExtractionFailed> {
    let pages = extract_pages(backend)?;
    let text = if normalize {
        reflow(&pages)
    } else {
        assemble_document(&pages)
    };

    if text.trim().is_empty() {
        log::info!("no extractable text in {} pages", pages.len());
    }

    Ok(Extraction {
        page_count: pages.len(),
        text,
    })
}

/// Parse PDF bytes and run the pipeline.
pub fn extract_document(bytes: &[u8], normalize: bool) -> Result<Extraction, ExtractionFailed> {
    let backend = LopdfBackend::load_bytes(bytes)?;
    extract_from(&backend, normalize)
}

/// Extract readable, normalized text from PDF bytes.
///
/// An empty string is a valid result (e.g. a scanned document without a text
/// layer); it is up to the caller to treat it as "no usable text".
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractionFailed> {
    extract_document(bytes, true).map(|extraction| extraction.text)
}

/// Extract the assembled text without normalization.
pub fn extract_raw_text(bytes: &[u8]) -> Result<String, ExtractionFailed> {
    extract_document(bytes, false).map(|extraction| extraction.text)
}

/// Page count and Info-dictionary metadata.
pub fn info(bytes: &[u8]) -> Result<DocumentInfo, PdfError> {
    let backend = LopdfBackend::load_bytes(bytes)?;
    let mut meta = backend.metadata();

    Ok(DocumentInfo {
        title: meta.remove("Title"),
        author: meta.remove("Author"),
        creator: meta.remove("Creator"),
        producer: meta.remove("Producer"),
        page_count: backend.page_count(),
    })
}
