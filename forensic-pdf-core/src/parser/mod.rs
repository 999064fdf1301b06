//! PDF Parser Module
//! 
//! This module implements a native PDF parser for reading and parsing PDF files
//! according to the ISO 32000-1 (PDF 1.7) and ISO 32000-2 (PDF 2.0) specifications.

pub mod lexer;
pub mod objects;
pub mod header;
pub mod xref;
pub mod trailer;
pub mod reader;
pub mod filters;
pub mod page_tree;
pub mod content;
pub mod document;

pub mod encoding;
mod encryption_handler;
mod object_stream;
mod stack_safe;
mod xref_types;

#[cfg(test)]
mod test_helpers;

pub use self::reader::PdfReader;
pub use self::objects::{PdfObject, PdfDictionary, PdfArray, PdfName, PdfStream, PdfString};
pub use self::content::{ContentParser, ContentOperation};
pub use self::page_tree::ParsedPage;
pub use self::document::{PdfDocument, ResourceManager};

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Options controlling how tolerant the parser is of malformed input.
///
/// `strict()` (the default) surfaces every structural problem as an error;
/// `tolerant()`/`lenient()` trade correctness guarantees for the ability to
/// extract something from a damaged file, which is the common case for
/// forensic material pulled from the wild.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Strict mode enforces PDF specification compliance (default: true)
    pub strict_mode: bool,
    /// Attempt to recover from stream decoding errors (default: false)
    pub recover_from_stream_errors: bool,
    /// Skip corrupted streams instead of failing (default: false)
    pub ignore_corrupt_streams: bool,
    /// Allow partial content when full parsing fails (default: false)
    pub partial_content_allowed: bool,
    /// Maximum number of recovery attempts for corrupted data (default: 3)
    pub max_recovery_attempts: usize,
    /// Enable detailed logging of recovery attempts (default: false)
    pub log_recovery_details: bool,
    /// Enable lenient parsing for malformed streams with incorrect Length fields
    pub lenient_streams: bool,
    /// Maximum number of bytes to search ahead when recovering from stream errors
    pub max_recovery_bytes: usize,
    /// Collect warnings instead of failing on recoverable errors
    pub collect_warnings: bool,
    /// Enable lenient character encoding (use replacement characters for invalid sequences)
    pub lenient_encoding: bool,
    /// Preferred character encoding for text decoding
    pub preferred_encoding: Option<encoding::EncodingType>,
    /// Enable automatic syntax error recovery
    pub lenient_syntax: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict_mode: true,
            recover_from_stream_errors: false,
            ignore_corrupt_streams: false,
            partial_content_allowed: false,
            max_recovery_attempts: 3,
            log_recovery_details: false,
            lenient_streams: false,
            max_recovery_bytes: 1000,
            collect_warnings: false,
            lenient_encoding: true,
            preferred_encoding: None,
            lenient_syntax: false,
        }
    }
}

impl ParseOptions {
    /// Strict parsing: every structural problem is an error (same as `default()`).
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            recover_from_stream_errors: false,
            ignore_corrupt_streams: false,
            partial_content_allowed: false,
            max_recovery_attempts: 0,
            log_recovery_details: false,
            lenient_streams: false,
            max_recovery_bytes: 0,
            collect_warnings: false,
            lenient_encoding: false,
            preferred_encoding: None,
            lenient_syntax: false,
        }
    }

    /// Tolerant parsing that attempts recovery from common corruption.
    pub fn tolerant() -> Self {
        Self {
            strict_mode: false,
            recover_from_stream_errors: true,
            ignore_corrupt_streams: false,
            partial_content_allowed: true,
            max_recovery_attempts: 5,
            log_recovery_details: true,
            lenient_streams: true,
            max_recovery_bytes: 5000,
            collect_warnings: true,
            lenient_encoding: true,
            preferred_encoding: None,
            lenient_syntax: true,
        }
    }

    /// Alias for [`Self::tolerant`].
    pub fn lenient() -> Self {
        Self::tolerant()
    }

    /// Skip corrupted content rather than recovering or failing on it.
    pub fn skip_errors() -> Self {
        Self {
            strict_mode: false,
            recover_from_stream_errors: true,
            ignore_corrupt_streams: true,
            partial_content_allowed: true,
            max_recovery_attempts: 1,
            log_recovery_details: false,
            lenient_streams: true,
            max_recovery_bytes: 5000,
            collect_warnings: false,
            lenient_encoding: true,
            preferred_encoding: None,
            lenient_syntax: true,
        }
    }
}

/// A recoverable problem noticed during lenient parsing (see
/// [`ParseOptions::collect_warnings`]).
#[derive(Debug, Clone)]
pub enum ParseWarning {
    /// Stream length mismatch was corrected
    StreamLengthCorrected {
        declared_length: usize,
        actual_length: usize,
        object_id: Option<(u32, u16)>,
    },
    /// Invalid character encoding was recovered
    InvalidEncoding {
        position: usize,
        recovered_text: String,
        encoding_used: Option<encoding::EncodingType>,
        replacement_count: usize,
    },
    /// Missing required key with fallback used
    MissingKeyWithFallback { key: String, fallback_value: String },
    /// Syntax error was recovered
    SyntaxErrorRecovered {
        position: usize,
        expected: String,
        found: String,
        recovery_action: String,
    },
    /// Invalid object reference was skipped
    InvalidReferenceSkipped {
        object_id: (u32, u16),
        reason: String,
    },
}

/// PDF Parser errors
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    
    #[error("Invalid PDF header")]
    InvalidHeader,
    
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),
    
    #[error("Syntax error at position {position}: {message}")]
    SyntaxError {
        position: usize,
        message: String,
    },
    
    #[error("Unexpected token: expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
    },
    
    #[error("Invalid object reference: {0} {1} R")]
    InvalidReference(u32, u16),
    
    #[error("Missing required key: {0}")]
    MissingKey(String),
    
    #[error("Invalid xref table")]
    InvalidXRef,
    
    #[error("Invalid trailer")]
    InvalidTrailer,
    
    #[error("Circular reference detected")]
    CircularReference,
    
    #[error("Stream decode error: {0}")]
    StreamDecodeError(String),
    
    #[error("Encryption not supported")]
    EncryptionNotSupported,
}
