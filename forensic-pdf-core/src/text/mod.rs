pub mod encoding;
pub mod extraction;
pub mod font;
pub mod metrics;

pub use encoding::TextEncoding;
pub use extraction::{ExtractedText, ExtractionOptions, TextExtractor, TextFragment};
pub use font::{Font, FontFamily};
pub use metrics::{measure_char, measure_text, split_into_words};
