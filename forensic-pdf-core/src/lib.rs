//! # forensic-pdf-core
//!
//! A forensic PDF analysis engine: opens a PDF once, walks it page by page,
//! and produces structured, queryable data about its text, structure,
//! metadata and security settings. Built on top of a pure Rust PDF parser
//! with zero external PDF dependencies.
//!
//! ## Features
//!
//! - **PDF Parsing**: Complete parser supporting object, xref and content
//!   stream reading, including xref-stream documents and basic RC4
//!   encryption handling.
//! - **Forensic Analysis**: Per-page text extraction with real glyph
//!   positions, font classification, bookmark/outline trees, security and
//!   permission extraction, and reference-tag detection.
//! - **Reader Pool**: One cached, shareable handle per PDF path for the
//!   lifetime of an ingestion or query run.
//! - **Recovery**: Raw-byte object and `%%EOF` scanning to label and work
//!   around malformed cross-reference structure.
//! - **Pure Rust**: No C dependencies or external libraries.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use forensic_pdf_core::parser::{PdfDocument, PdfReader};
//! use forensic_pdf_core::analysis::Analyzer;
//! use forensic_pdf_core::pool::FileStructureLabel;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::open("document.pdf")?;
//! let document = PdfDocument::new(reader);
//!
//! let analyzer = Analyzer::default();
//! let result = analyzer.analyze(&document, FileStructureLabel::Original)?;
//!
//! println!("pages: {}", result.document_info.page_count);
//! for page in &result.pages {
//!     println!("page {}: {} words", page.page_number, page.text_info.word_count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`parser`] - PDF object, xref, and content stream parsing
//!   - [`parser::PdfDocument`] - High-level document interface
//!   - [`parser::ParsedPage`] - Page representation with resources
//!   - [`parser::ContentParser`] - Content stream parsing
//!   - [`parser::PdfObject`] - Low-level PDF objects
//! - [`analysis`] - The forensic analyzer and its structured result types
//! - [`pool`] - Per-path cached reader handles
//! - [`recovery`] - Raw-byte corruption detection and xref recovery
//! - [`forensic`] - Incremental-update detection and pairwise PDF diffing
//! - [`cache`] - Durable `AnalysisResult` storage over SQLite
//! - [`query`] - Search-expression parsing and scoped evaluation
//! - [`ingest`] - Bounded worker-pool pipeline from paths to cache entries
//! - [`config`] - Runtime configuration assembled from the environment
//! - [`text`] - Standard-font metrics and character encoding tables
//! - [`fonts`] - Font descriptor flags used when classifying fonts
//! - [`encryption`] - Standard security handler (RC4) for encrypted PDFs

pub mod analysis;
pub mod cache;
pub mod config;
pub mod encryption;
pub mod error;
pub mod fonts;
pub mod forensic;
pub mod ingest;
pub mod objects;
pub mod parser;
pub mod pool;
pub mod query;
pub mod recovery;
pub mod text;

pub use analysis::{Analyzer, AnalysisResult, AnalyzerOptions};
pub use cache::{CacheEntry, CacheStats, CacheStore, ExtractionMode};
pub use config::RuntimeConfig;
pub use error::{AnalysisWarning, ForensicError, ForensicResult, PdfError, Result};
pub use forensic::{DiffReport, Differencer, IncrementalReport, SessionType};
pub use ingest::{IngestOptions, IngestOutcome, IngestPipeline, IngestSummary};
pub use query::{QueryEngine, QueryOptions, QueryResult, Scope as QueryScope};
pub use parser::{
    ContentOperation, ContentParser, ParseOptions, ParsedPage, PdfArray, PdfDictionary,
    PdfDocument, PdfName, PdfObject, PdfReader, PdfStream, PdfString,
};
pub use pool::{FileStructureLabel, ReaderPool};
pub use recovery::{
    detect_corruption, CorruptionReport, CorruptionType, ObjectScanner, ScanResult,
    ValidationError, ValidationResult,
};
pub use text::{measure_text, split_into_words, Font, FontFamily};

/// Current version of forensic-pdf-core
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported PDF versions
pub mod pdf_version {
    /// PDF 1.0 - 1.7 are fully supported
    pub const SUPPORTED_VERSIONS: &[&str] =
        &["1.0", "1.1", "1.2", "1.3", "1.4", "1.5", "1.6", "1.7"];
    /// PDF 2.0 support is planned
    pub const PLANNED_VERSIONS: &[&str] = &["2.0"];
}
