//! The Analyzer: walks an open PDF handle page by page and produces a
//! structured [`model::AnalysisResult`].

pub mod analyzer;
pub mod bands;
pub mod collector;
pub mod model;
pub mod references;

pub use analyzer::Analyzer;
pub use bands::AnalyzerOptions;
pub use model::AnalysisResult;
