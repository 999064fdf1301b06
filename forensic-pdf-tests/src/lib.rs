//! Test Suite for forensic-pdf
//!
//! Shared fixtures and corpus utilities for the integration tests in
//! `tests/`, kept out of `forensic-pdf-core` itself so the core crate's
//! dependency footprint stays narrow.

/// Common test utilities
pub mod utils {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Get the path to the test fixtures directory
    pub fn fixtures_dir() -> PathBuf {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        PathBuf::from(manifest_dir).join("fixtures")
    }

    /// Read a test PDF file
    pub fn read_test_pdf<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<u8>> {
        let full_path = fixtures_dir().join(path);
        Ok(fs::read(full_path)?)
    }

    /// Create a temporary directory for test outputs
    pub fn create_test_output_dir() -> anyhow::Result<tempfile::TempDir> {
        Ok(tempfile::tempdir()?)
    }
}
