//! Document-reference extraction: a regex pass over extracted page text
//! identifying fixed-form identifiers such as process numbers and
//! attachment tags.
//!
//! Grounded on the teacher's general use of `regex` for structural
//! scanning (`recovery::scanner` byte-pattern searches); the patterns
//! themselves are new, since the teacher never parsed document text for
//! domain identifiers.

use regex::Regex;
use std::sync::OnceLock;

fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            // Process/case numbers, e.g. "1234567-89.2024.8.26.0100"
            Regex::new(r"\b\d{7}-\d{2}\.\d{4}\.\d\.\d{2}\.\d{4}\b").unwrap(),
            // Attachment tags, e.g. "Att. 12" or "Anexo 3"
            Regex::new(r"(?i)\b(?:att|anexo|attachment)\.?\s*\d+\b").unwrap(),
            // Inter-document references, e.g. "Doc. 45" or "fls. 12"
            Regex::new(r"(?i)\b(?:doc|fls)\.?\s*\d+\b").unwrap(),
        ]
    })
}

/// Returns the set of distinct matches across all patterns, in first-seen
/// order.
pub fn extract(page_text: &str) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    let mut out = Vec::new();
    for pattern in patterns() {
        for m in pattern.find_iter(page_text) {
            let matched = m.as_str().to_string();
            if seen.insert(matched.clone()) {
                out.push(matched);
            }
        }
    }
    out
}
