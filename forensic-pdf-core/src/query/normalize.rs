//! `~term~` normalization: Unicode NFD decomposition, combining-mark strip,
//! case fold to lowercase.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub fn normalize(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents() {
        assert_eq!(normalize("café"), "cafe");
    }

    #[test]
    fn folds_case() {
        assert_eq!(normalize("RELATÓRIO"), "relatorio");
    }

    #[test]
    fn leaves_plain_ascii_unchanged_but_lowercased() {
        assert_eq!(normalize("Invoice"), "invoice");
    }
}
