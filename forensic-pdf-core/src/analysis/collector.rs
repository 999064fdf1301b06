//! Canvas-event listener that walks a page's content stream once and
//! collects positioned glyph runs, grouping them into words and lines.
//!
//! Grounded on [`crate::text::extraction::TextExtractor`] for the
//! text-state/matrix tracking idiom, generalized to emit real bounding
//! boxes (via [`crate::text::metrics::measure_text`]) instead of the
//! teacher's `calculate_text_width` approximation, and to additionally
//! track per-font observed sizes for [`super::model::FontInfo`].

use super::model::{
    BBox, FontInfo, FontType, LineInfo, StyleFlags, TextStateParams, WordInfo,
};
use crate::fonts::font_descriptor::FontFlags;
use crate::parser::content::{ContentOperation, ContentParser, TextElement};
use crate::parser::objects::{PdfDictionary, PdfObject};
use crate::parser::ParseResult;
use crate::text::font::Font;
use crate::text::metrics::measure_text;
use std::collections::BTreeMap;

#[derive(Clone)]
struct RunState {
    text_matrix: [f64; 6],
    text_line_matrix: [f64; 6],
    leading: f64,
    char_space: f64,
    word_space: f64,
    horizontal_scale: f64,
    text_rise: f64,
    font_size: f64,
    font_name: Option<String>,
    render_mode: u8,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            text_matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            text_line_matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            leading: 0.0,
            char_space: 0.0,
            word_space: 0.0,
            horizontal_scale: 100.0,
            text_rise: 0.0,
            font_size: 0.0,
            font_name: None,
            render_mode: 0,
        }
    }
}

/// One decoded glyph run with its device-space origin and advance width,
/// emitted before word/line grouping.
struct GlyphRun {
    text: String,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    font_name: String,
    font_size: f64,
    state: TextStateParams,
}

pub struct CollectedText {
    pub words: Vec<WordInfo>,
    pub lines: Vec<LineInfo>,
    pub fonts: Vec<FontInfo>,
}

/// Legacy extraction ignores text-state parameters beyond the text matrix;
/// selected by `RuntimeConfig::text_legacy`. Both paths share one parser.
pub fn collect(
    streams: &[Vec<u8>],
    page_width: f64,
    page_height: f64,
    resources: Option<&PdfDictionary>,
    legacy: bool,
) -> ParseResult<CollectedText> {
    let mut runs = Vec::new();
    let mut state = RunState::default();
    let mut in_text_object = false;
    let mut observed_sizes: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for stream in streams {
        let operations = ContentParser::parse_content(stream)?;
        for op in operations {
            match op {
                ContentOperation::BeginText => {
                    in_text_object = true;
                    state.text_matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                    state.text_line_matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                }
                ContentOperation::EndText => in_text_object = false,
                ContentOperation::SetTextMatrix(a, b, c, d, e, f) => {
                    state.text_matrix = [a as f64, b as f64, c as f64, d as f64, e as f64, f as f64];
                    state.text_line_matrix = state.text_matrix;
                }
                ContentOperation::MoveText(tx, ty) => {
                    let m = multiply(&[1.0, 0.0, 0.0, 1.0, tx as f64, ty as f64], &state.text_line_matrix);
                    state.text_matrix = m;
                    state.text_line_matrix = m;
                }
                ContentOperation::MoveTextSetLeading(tx, ty) => {
                    state.leading = -(ty as f64);
                    let m = multiply(&[1.0, 0.0, 0.0, 1.0, tx as f64, ty as f64], &state.text_line_matrix);
                    state.text_matrix = m;
                    state.text_line_matrix = m;
                }
                ContentOperation::NextLine => {
                    let m = multiply(&[1.0, 0.0, 0.0, 1.0, 0.0, -state.leading], &state.text_line_matrix);
                    state.text_matrix = m;
                    state.text_line_matrix = m;
                }
                ContentOperation::SetFont(name, size) => {
                    state.font_name = Some(name);
                    state.font_size = size as f64;
                }
                ContentOperation::SetLeading(l) if !legacy => state.leading = l as f64,
                ContentOperation::SetCharSpacing(s) if !legacy => state.char_space = s as f64,
                ContentOperation::SetWordSpacing(s) if !legacy => state.word_space = s as f64,
                ContentOperation::SetHorizontalScaling(s) if !legacy => state.horizontal_scale = s as f64,
                ContentOperation::SetTextRise(r) if !legacy => state.text_rise = r as f64,
                ContentOperation::SetTextRenderMode(m) if !legacy => state.render_mode = m as u8,
                ContentOperation::ShowText(bytes) => {
                    if in_text_object {
                        emit_run(&bytes, &mut state, resources, &mut runs, &mut observed_sizes);
                    }
                }
                ContentOperation::ShowTextArray(items) => {
                    if in_text_object {
                        for item in items {
                            match item {
                                TextElement::Text(bytes) => {
                                    emit_run(&bytes, &mut state, resources, &mut runs, &mut observed_sizes);
                                }
                                TextElement::Spacing(adj) if !legacy => {
                                    let tx = -(adj as f64) / 1000.0 * state.font_size;
                                    state.text_matrix = multiply(&[1.0, 0.0, 0.0, 1.0, tx, 0.0], &state.text_matrix);
                                }
                                TextElement::Spacing(_) => {}
                            }
                        }
                    }
                }
                ContentOperation::NextLineShowText(bytes) => {
                    let m = multiply(&[1.0, 0.0, 0.0, 1.0, 0.0, -state.leading], &state.text_line_matrix);
                    state.text_matrix = m;
                    state.text_line_matrix = m;
                    if in_text_object {
                        emit_run(&bytes, &mut state, resources, &mut runs, &mut observed_sizes);
                    }
                }
                _ => {}
            }
        }
    }

    let words = group_into_words(&runs, page_width, page_height);
    let lines = group_into_lines(&words, page_width, page_height);
    let fonts = build_font_infos(resources, &observed_sizes);

    Ok(CollectedText { words, lines, fonts })
}

fn emit_run(
    bytes: &[u8],
    state: &mut RunState,
    resources: Option<&PdfDictionary>,
    runs: &mut Vec<GlyphRun>,
    observed_sizes: &mut BTreeMap<String, Vec<f64>>,
) {
    let decoded = decode_with_font(bytes, state.font_name.as_deref(), resources);
    if decoded.is_empty() {
        return;
    }

    let (x, y) = transform_point(0.0, state.text_rise, &state.text_matrix);
    let base_font = resolve_standard_font(state.font_name.as_deref(), resources);
    let width = match base_font {
        Some(font) => measure_text(&decoded, font, state.font_size),
        None => decoded.chars().count() as f64 * state.font_size * 0.5,
    };
    let height = state.font_size.max(1.0);

    if let Some(name) = &state.font_name {
        observed_sizes.entry(name.clone()).or_default().push(state.font_size);
    }

    runs.push(GlyphRun {
        text: decoded,
        x,
        y,
        width,
        height,
        font_name: state.font_name.clone().unwrap_or_default(),
        font_size: state.font_size,
        state: TextStateParams {
            render_mode: state.render_mode,
            char_spacing: state.char_space,
            word_spacing: state.word_space,
            horizontal_scaling: state.horizontal_scale,
            rise: state.text_rise,
        },
    });

    let tx = width * state.horizontal_scale / 100.0;
    state.text_matrix = multiply(&[1.0, 0.0, 0.0, 1.0, tx, 0.0], &state.text_matrix);
}

fn decode_with_font(bytes: &[u8], font_name: Option<&str>, resources: Option<&PdfDictionary>) -> String {
    use crate::text::encoding::TextEncoding;
    let encoding = if let Some(name) = font_name {
        match name.to_lowercase().as_str() {
            n if n.contains("macroman") => TextEncoding::MacRomanEncoding,
            n if n.contains("winansi") => TextEncoding::WinAnsiEncoding,
            n if n.contains("pdfdoc") => TextEncoding::PdfDocEncoding,
            _ => TextEncoding::WinAnsiEncoding,
        }
    } else {
        TextEncoding::WinAnsiEncoding
    };
    let _ = resources; // embedded-font custom encodings are a known gap (see DESIGN.md)
    encoding.decode(bytes)
}

/// Map a content-stream font resource name to one of the standard 14 fonts
/// when the page's `/Font` resource dictionary's `/BaseFont` matches a
/// known standard name (after stripping an `ABCDEF+` subset prefix).
fn resolve_standard_font(font_name: Option<&str>, resources: Option<&PdfDictionary>) -> Option<Font> {
    let font_name = font_name?;
    let resources = resources?;
    let fonts_dict = resources.get("Font")?.as_dict()?;
    let font_ref = fonts_dict.get(font_name)?;
    let base_name = match font_ref {
        PdfObject::Dictionary(d) => d.get("BaseFont").and_then(|o| o.as_name()).map(|n| n.0.clone()),
        _ => None,
    }?;
    let demangled = demangle_subset(&base_name);
    standard_font_from_name(&demangled)
}

/// Strips a six-uppercase-letter subset prefix (e.g. `ABCDEF+Helvetica`).
pub fn demangle_subset(name: &str) -> String {
    let bytes = name.as_bytes();
    if bytes.len() > 7
        && bytes[6] == b'+'
        && bytes[..6].iter().all(|b| b.is_ascii_uppercase())
    {
        name[7..].to_string()
    } else {
        name.to_string()
    }
}

fn standard_font_from_name(name: &str) -> Option<Font> {
    Some(match name {
        "Helvetica" => Font::Helvetica,
        "Helvetica-Bold" => Font::HelveticaBold,
        "Helvetica-Oblique" => Font::HelveticaOblique,
        "Helvetica-BoldOblique" => Font::HelveticaBoldOblique,
        "Times-Roman" => Font::TimesRoman,
        "Times-Bold" => Font::TimesBold,
        "Times-Italic" => Font::TimesItalic,
        "Times-BoldItalic" => Font::TimesBoldItalic,
        "Courier" => Font::Courier,
        "Courier-Bold" => Font::CourierBold,
        "Courier-Oblique" => Font::CourierOblique,
        "Courier-BoldOblique" => Font::CourierBoldOblique,
        "Symbol" => Font::Symbol,
        "ZapfDingbats" => Font::ZapfDingbats,
        _ => return None,
    })
}

/// Heuristic: any character outside Latin/common ranges that belongs to a
/// known right-to-left block.
fn looks_bidi(text: &str) -> bool {
    text.chars().any(|c| {
        let cp = c as u32;
        (0x0590..=0x05FF).contains(&cp) // Hebrew
            || (0x0600..=0x06FF).contains(&cp) // Arabic
            || (0x0750..=0x077F).contains(&cp)
    })
}

fn group_into_words(runs: &[GlyphRun], page_width: f64, page_height: f64) -> Vec<WordInfo> {
    let mut words = Vec::new();
    for run in runs {
        for token in run.text.split_whitespace() {
            if token.is_empty() {
                continue;
            }
            // Approximate token extent as a fraction of the run's full width,
            // proportional to the token's share of characters.
            let fraction = token.chars().count() as f64 / run.text.chars().count().max(1) as f64;
            let width = run.width * fraction;
            words.push(WordInfo {
                text: token.to_string(),
                bbox: BBox::new(run.x, run.y, run.x + width, run.y + run.height, page_width, page_height),
                font_name: run.font_name.clone(),
                font_size: run.font_size,
                style: style_flags_for(&run.font_name),
                state: run.state.clone(),
                possible_bidi: looks_bidi(token),
            });
        }
    }
    words
}

/// Lines are formed by grouping words whose baselines fall within a
/// tolerance of 0.5 × median glyph height of all words on the page.
fn group_into_lines(words: &[WordInfo], page_width: f64, page_height: f64) -> Vec<LineInfo> {
    if words.is_empty() {
        return Vec::new();
    }
    let mut heights: Vec<f64> = words.iter().map(|w| w.bbox.y1 - w.bbox.y0).collect();
    heights.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let median_height = heights[heights.len() / 2].max(1.0);
    let tolerance = 0.5 * median_height;

    let mut ordered: Vec<&WordInfo> = words.iter().collect();
    ordered.sort_by(|a, b| {
        b.bbox.y0
            .partial_cmp(&a.bbox.y0)
            .unwrap()
            .then(a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap())
    });

    let mut lines: Vec<Vec<&WordInfo>> = Vec::new();
    for word in ordered {
        if let Some(last) = lines.last_mut() {
            let baseline = last[0].bbox.y0;
            if (word.bbox.y0 - baseline).abs() <= tolerance {
                last.push(word);
                continue;
            }
        }
        lines.push(vec![word]);
    }

    lines
        .into_iter()
        .map(|mut line_words| {
            line_words.sort_by(|a, b| a.bbox.x0.partial_cmp(&b.bbox.x0).unwrap());
            let text = line_words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let x0 = line_words.iter().map(|w| w.bbox.x0).fold(f64::INFINITY, f64::min);
            let y0 = line_words.iter().map(|w| w.bbox.y0).fold(f64::INFINITY, f64::min);
            let x1 = line_words.iter().map(|w| w.bbox.x1).fold(f64::NEG_INFINITY, f64::max);
            let y1 = line_words.iter().map(|w| w.bbox.y1).fold(f64::NEG_INFINITY, f64::max);
            let first = &line_words[0];
            LineInfo {
                text,
                bbox: BBox::new(x0, y0, x1, y1, page_width, page_height),
                font_name: first.font_name.clone(),
                font_size: first.font_size,
                style: first.style.clone(),
                state: first.state.clone(),
            }
        })
        .collect()
}

fn style_flags_for(font_name: &str) -> StyleFlags {
    let lower = font_name.to_lowercase();
    StyleFlags {
        bold: lower.contains("bold"),
        italic: lower.contains("italic") || lower.contains("oblique"),
        underline: false,
    }
}

fn build_font_infos(
    resources: Option<&PdfDictionary>,
    observed_sizes: &BTreeMap<String, Vec<f64>>,
) -> Vec<FontInfo> {
    let mut infos = Vec::new();
    let Some(resources) = resources else {
        return infos;
    };
    let Some(fonts_dict) = resources.get("Font").and_then(|o| o.as_dict()) else {
        return infos;
    };

    for (resource_name, font_obj) in &fonts_dict.0 {
        let Some(font_dict) = font_obj.as_dict() else {
            continue;
        };
        let base_name = font_dict
            .get("BaseFont")
            .and_then(|o| o.as_name())
            .map(|n| demangle_subset(&n.0))
            .unwrap_or_else(|| resource_name.0.clone());
        let subtype = font_dict.get("Subtype").and_then(|o| o.as_name()).map(|n| n.0.as_str());
        let font_type = match subtype {
            Some("Type1") => FontType::Type1,
            Some("TrueType") => FontType::TrueType,
            Some("Type0") => FontType::Type0,
            Some("Type3") => FontType::Type3,
            Some("CIDFontType0") | Some("CIDFontType2") => FontType::CIDFont,
            _ => FontType::Unknown,
        };
        let embedded = font_dict.get("FontDescriptor").is_some();
        let flags = font_dict
            .get("FontDescriptor")
            .and_then(|o| o.as_dict())
            .and_then(|d| d.get("Flags"))
            .and_then(|o| o.as_integer())
            .map(|bits| FontFlags::from_bits_truncate(bits as u32))
            .unwrap_or(FontFlags::NONSYMBOLIC);

        let sizes = observed_sizes.get(&resource_name.0).cloned();
        let size_unobserved = sizes.is_none();
        infos.push(FontInfo {
            base_name,
            font_type,
            embedded,
            style: StyleFlags {
                bold: flags.contains(FontFlags::FORCE_BOLD) || style_flags_for(&resource_name.0).bold,
                italic: flags.contains(FontFlags::ITALIC),
                underline: false,
            },
            sizes: sizes.unwrap_or_else(|| vec![12.0]),
            size_unobserved,
        });
    }
    infos
}

fn multiply(a: &[f64; 6], b: &[f64; 6]) -> [f64; 6] {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
        a[4] * b[0] + a[5] * b[2] + b[4],
        a[4] * b[1] + a[5] * b[3] + b[5],
    ]
}

fn transform_point(x: f64, y: f64, matrix: &[f64; 6]) -> (f64, f64) {
    (
        matrix[0] * x + matrix[2] * y + matrix[4],
        matrix[1] * x + matrix[3] * y + matrix[5],
    )
}
