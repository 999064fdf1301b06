//! Header/footer extraction restricted to a configurable top/bottom band
//! of the page, reusing the same collected lines the text collector
//! already produced instead of re-walking the content stream.

use super::model::LineInfo;

#[derive(Debug, Clone, Copy)]
pub struct AnalyzerOptions {
    /// Fraction of page height counted as the header/footer band on each
    /// edge. Default 0.10 (top 10%, bottom 10%), per the documented
    /// default; left as an open question whether headers/footers should
    /// be configurable independently — resolved here as a single shared
    /// fraction for both edges.
    pub band_fraction: f64,
    pub line_tolerance: f64,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            band_fraction: 0.10,
            line_tolerance: 0.5,
        }
    }
}

/// Lines whose normalized top (`1 - ny1`, since PDF y grows upward) falls
/// within `band_fraction` of the page top, in visual (top-to-bottom) order.
pub fn headers(lines: &[LineInfo], options: &AnalyzerOptions) -> Vec<String> {
    let mut matches: Vec<&LineInfo> = lines
        .iter()
        .filter(|l| 1.0 - l.bbox.ny1 <= options.band_fraction)
        .collect();
    matches.sort_by(|a, b| b.bbox.ny1.partial_cmp(&a.bbox.ny1).unwrap());
    matches.into_iter().map(|l| l.text.clone()).collect()
}

/// Lines whose normalized bottom falls within `band_fraction` of the page
/// bottom, in visual (top-to-bottom) order.
pub fn footers(lines: &[LineInfo], options: &AnalyzerOptions) -> Vec<String> {
    let mut matches: Vec<&LineInfo> = lines
        .iter()
        .filter(|l| l.bbox.ny0 <= options.band_fraction)
        .collect();
    matches.sort_by(|a, b| b.bbox.ny1.partial_cmp(&a.bbox.ny1).unwrap());
    matches.into_iter().map(|l| l.text.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::{BBox, StyleFlags, TextStateParams};

    fn line(text: &str, ny0: f64, ny1: f64) -> LineInfo {
        LineInfo {
            text: text.to_string(),
            bbox: BBox {
                x0: 0.0,
                y0: 0.0,
                x1: 1.0,
                y1: 1.0,
                nx0: 0.0,
                ny0,
                nx1: 1.0,
                ny1,
            },
            font_name: "Helvetica".into(),
            font_size: 10.0,
            style: StyleFlags::default(),
            state: TextStateParams::default(),
        }
    }

    #[test]
    fn header_band_captures_top_lines_only() {
        let lines = vec![line("Header", 0.93, 0.98), line("Body", 0.4, 0.5), line("Footer", 0.01, 0.05)];
        let options = AnalyzerOptions::default();
        assert_eq!(headers(&lines, &options), vec!["Header".to_string()]);
        assert_eq!(footers(&lines, &options), vec!["Footer".to_string()]);
    }

    #[test]
    fn empty_bands_produce_empty_lists() {
        let lines = vec![line("Body", 0.4, 0.5)];
        let options = AnalyzerOptions::default();
        assert!(headers(&lines, &options).is_empty());
        assert!(footers(&lines, &options).is_empty());
    }
}
