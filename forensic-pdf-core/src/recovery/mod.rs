//! Raw-byte recovery primitives used to detect and work around malformed
//! cross-reference structure.
//!
//! This module deliberately exposes only the read-side scanning used by
//! the [`crate::pool::ReaderPool`] (to label a handle's file structure as
//! "original" or "rebuilt") and by the [`crate::forensic`] differencer (to
//! enumerate `%%EOF` markers and recover an object map from raw bytes). It
//! does not attempt to reconstruct and re-serialize a repaired PDF.

pub mod corruption;
pub mod scanner;
pub mod validator;
pub mod xref_recovery;

pub use corruption::{detect_corruption, CorruptionReport, CorruptionType};
pub use scanner::{ObjectScanner, ScanResult};
pub use validator::{validate_pdf, ValidationError, ValidationResult};
pub use xref_recovery::{needs_xref_recovery, recover_xref, XRefRecovery};
