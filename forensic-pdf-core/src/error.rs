use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid PDF structure: {0}")]
    InvalidStructure(String),

    #[error("Invalid object reference: {0}")]
    InvalidReference(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Font error: {0}")]
    FontError(String),

    #[error("Compression error: {0}")]
    CompressionError(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid object reference: {0} {1} R")]
    InvalidObjectReference(u32, u16),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid page number: {0}")]
    InvalidPageNumber(u32),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Invalid header")]
    InvalidHeader,

    #[error("Content stream too large: {0} bytes")]
    ContentStreamTooLarge(usize),

    #[error("Operation cancelled")]
    OperationCancelled,
}

pub type Result<T> = std::result::Result<T, PdfError>;

/// Top-level error taxonomy for ingestion, caching, query and forensic diffing.
///
/// Variants map to the kinds a caller needs to branch on, not to the layer
/// that raised them: a `PdfError::InvalidHeader` deep in the parser surfaces
/// here as [`ForensicError::NotAPdf`], not as a wrapped parser error.
#[derive(Error, Debug)]
pub enum ForensicError {
    #[error("invalid argument: {0}")]
    UserInputError(String),

    #[error("file not found: {0}")]
    FileNotFound(std::path::PathBuf),

    #[error("not a PDF file: {0}")]
    NotAPdf(std::path::PathBuf),

    #[error("PDF is encrypted and no usable permissions are available: {0}")]
    Encrypted(std::path::PathBuf),

    #[error("no cache entry for {0}")]
    CacheMiss(String),

    #[error("analysis failed: {0}")]
    AnalysisError(String),

    #[error("store error: {0}")]
    StoreError(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Parser(#[from] crate::parser::ParseError),

    #[error(transparent)]
    Pdf(#[from] PdfError),

    #[error("store error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ForensicResult<T> = std::result::Result<T, ForensicError>;

/// A non-fatal problem recorded against a single page during analysis.
///
/// Per-page failures never abort the whole [`crate::analysis::AnalysisResult`];
/// they are attached here and surfaced to the caller as data, not as an `Err`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisWarning {
    pub page_number: Option<u32>,
    pub message: String,
}

impl AnalysisWarning {
    pub fn page(page_number: u32, message: impl Into<String>) -> Self {
        Self {
            page_number: Some(page_number),
            message: message.into(),
        }
    }

    pub fn document(message: impl Into<String>) -> Self {
        Self {
            page_number: None,
            message: message.into(),
        }
    }
}
