//! Top-level analyzer: produces one [`AnalysisResult`] from one open PDF
//! handle.
//!
//! Grounded on `operations::page_analysis::PageContentAnalyzer`'s
//! defensive dictionary-walk idiom for XObjects/resources, and on
//! `text::extraction::TextExtractor` for the content-stream traversal this
//! module generalizes into [`super::collector`].

use super::bands::{footers, headers, AnalyzerOptions};
use super::model::*;
use super::references;
use crate::error::{AnalysisWarning, ForensicResult};
use crate::parser::document::PdfDocument;
use crate::parser::objects::PdfObject;
use crate::pool::FileStructureLabel;
use std::collections::BTreeMap;
use std::io::{Read, Seek};

pub struct Analyzer {
    pub options: AnalyzerOptions,
    pub text_legacy: bool,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            options: AnalyzerOptions::default(),
            text_legacy: false,
        }
    }
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions, text_legacy: bool) -> Self {
        Self { options, text_legacy }
    }

    pub fn analyze<R: Read + Seek>(
        &self,
        document: &PdfDocument<R>,
        file_structure: FileStructureLabel,
    ) -> ForensicResult<AnalysisResult> {
        let mut warnings = Vec::new();
        let mut metadata = self.extract_metadata(document);
        let page_count = document.page_count()?;

        let catalog = document.catalog().ok();
        let has_acroform = catalog
            .as_ref()
            .and_then(|c| c.get("AcroForm"))
            .is_some();
        let has_xfa = catalog
            .as_ref()
            .and_then(|c| c.get("AcroForm"))
            .and_then(|o| document.resolve(o).ok())
            .and_then(|o| o.as_dict().cloned())
            .map(|d| d.get("XFA").is_some())
            .unwrap_or(false);

        let mut pages = Vec::with_capacity(page_count as usize);
        let mut all_fonts: BTreeMap<String, FontInfo> = BTreeMap::new();
        let mut total_images = 0u32;
        let mut total_annotations = 0u32;
        let mut pages_with_tables = 0u32;
        let mut pages_with_columns = 0u32;
        let mut pages_with_images = 0u32;
        let mut total_characters = 0u64;
        let mut total_words = 0u64;
        let mut total_lines = 0u64;

        for index in 0..page_count {
            match self.analyze_page(document, index) {
                Ok(page) => {
                    total_characters += page.text_info.character_count;
                    total_words += page.text_info.word_count;
                    total_lines += page.text_info.line_count;
                    total_images += page.resources.images.len() as u32;
                    total_annotations += page.annotations.len() as u32;
                    if page.text_info.has_tables {
                        pages_with_tables += 1;
                    }
                    if page.text_info.has_columns {
                        pages_with_columns += 1;
                    }
                    if !page.resources.images.is_empty() {
                        pages_with_images += 1;
                    }
                    for font in &page.text_info.fonts {
                        all_fonts.entry(font.base_name.clone()).or_insert_with(|| font.clone());
                    }
                    pages.push(page);
                }
                Err(e) => {
                    warnings.push(AnalysisWarning::page(index + 1, e.to_string()));
                    pages.push(empty_page(index + 1));
                }
            }
        }

        let permission_bits = document.permission_bits().unwrap_or(-1);
        let security = Security {
            encryption_mode: document.is_encrypted().then(|| "standard".to_string()),
            permission_bits,
            can_print: permission_bit(permission_bits, 3),
            can_modify: permission_bit(permission_bits, 4),
            can_copy: permission_bit(permission_bits, 5),
            can_annotate: permission_bit(permission_bits, 6),
        };

        let resources_summary = ResourcesSummary {
            total_images,
            form_count: if has_acroform { 1 } else { 0 },
            has_javascript: catalog
                .as_ref()
                .map(|c| c.get("Names").is_some() && has_acroform)
                .unwrap_or(false),
            has_attachments: catalog
                .as_ref()
                .and_then(|c| c.get("Names"))
                .is_some(),
        };

        let statistics = Statistics {
            total_characters,
            total_words,
            total_lines,
            total_images,
            total_annotations,
            unique_fonts: all_fonts.len() as u32,
            pages_with_tables,
            pages_with_columns,
            pages_with_images,
        };

        let document_info = DocumentInfo {
            page_count,
            encrypted: document.is_encrypted(),
            linearized: false,
            has_acroform,
            has_xfa,
            file_structure,
        };

        let bookmarks = catalog
            .as_ref()
            .map(|c| self.extract_bookmarks(document, c, page_count))
            .unwrap_or_default();

        let signatures = catalog
            .as_ref()
            .map(|c| extract_signatures(document, c))
            .unwrap_or_default();

        let mut color_profiles = Vec::new();
        let mut seen_color_spaces = std::collections::BTreeSet::new();
        for index in 0..page_count {
            if let Ok(page) = document.get_page(index) {
                extract_color_profiles(
                    document,
                    page.get_resources(),
                    &mut seen_color_spaces,
                    &mut color_profiles,
                );
            }
        }

        let accessibility = catalog
            .as_ref()
            .and_then(|c| extract_accessibility(document, c));
        metadata.tagged = accessibility.as_ref().map(|a| a.tagged).unwrap_or(false);

        let layers = catalog
            .as_ref()
            .map(|c| extract_layers(document, c))
            .unwrap_or_default();

        Ok(AnalysisResult {
            metadata,
            document_info,
            pages,
            security,
            resources_summary,
            statistics,
            bookmarks,
            signatures,
            color_profiles,
            accessibility,
            layers,
            warnings,
        })
    }

    fn analyze_page<R: Read + Seek>(
        &self,
        document: &PdfDocument<R>,
        index: u32,
    ) -> ForensicResult<PageAnalysis> {
        let page = document.get_page(index)?;
        let size = PageSize::from_points(page.width(), page.height());
        let resources = page.get_resources();
        let streams = document.get_page_content_streams(&page)?;

        let collected = super::collector::collect(
            &streams,
            size.width_pt,
            size.height_pt,
            resources,
            self.text_legacy,
        )?;

        let page_text = collected
            .lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let character_count = page_text.chars().count() as u64;
        let word_count = collected.words.len() as u64;
        let line_count = collected.lines.len() as u64;
        let average_line_length = if line_count > 0 {
            character_count as f64 / line_count as f64
        } else {
            0.0
        };

        let images = extract_images(document, resources);
        let form_field_count = resources
            .and_then(|r| r.get("XObject"))
            .and_then(|o| o.as_dict())
            .map(|d| d.0.len() as u32)
            .unwrap_or(0);

        let annotations = extract_annotations(document, &page);
        let document_references = references::extract(&page_text);

        let text_info = TextInfo {
            page_text,
            character_count,
            word_count,
            line_count,
            languages: BTreeMap::new(),
            has_tables: detect_tables(&collected.words),
            has_columns: detect_columns(&collected.lines),
            average_line_length,
            fonts: collected.fonts,
            lines: collected.lines.clone(),
            words: collected.words,
        };

        Ok(PageAnalysis {
            page_number: index + 1,
            size,
            rotation: page.rotation,
            headers: headers(&collected.lines, &self.options),
            footers: footers(&collected.lines, &self.options),
            text_info,
            resources: PageResources { images, form_field_count },
            annotations,
            document_references,
        })
    }

    fn extract_metadata<R: Read + Seek>(&self, document: &PdfDocument<R>) -> Metadata {
        let raw = document.metadata().unwrap_or_else(|_| crate::parser::reader::DocumentMetadata {
            title: None,
            author: None,
            subject: None,
            keywords: None,
            creator: None,
            producer: None,
            creation_date: None,
            modification_date: None,
            version: "1.4".to_string(),
            page_count: None,
        });
        Metadata {
            title: raw.title,
            author: raw.author,
            subject: raw.subject,
            keywords: raw.keywords,
            creator: raw.creator,
            producer: raw.producer,
            creation_date: raw.creation_date.as_deref().and_then(parse_pdf_date),
            modification_date: raw.modification_date.as_deref().and_then(parse_pdf_date),
            pdf_version: raw.version,
            tagged: false,
        }
    }

    fn extract_bookmarks<R: Read + Seek>(
        &self,
        document: &PdfDocument<R>,
        catalog: &crate::parser::objects::PdfDictionary,
        page_count: u32,
    ) -> BookmarkTree {
        let mut items = Vec::new();
        let Some(outlines_ref) = catalog.get("Outlines") else {
            return BookmarkTree { items };
        };
        let Ok(outlines) = document.resolve(outlines_ref) else {
            return BookmarkTree { items };
        };
        let Some(outlines_dict) = outlines.as_dict() else {
            return BookmarkTree { items };
        };
        let Some(first) = outlines_dict.get("First") else {
            return BookmarkTree { items };
        };
        let mut visited = std::collections::HashSet::new();
        walk_outline(document, first, None, 0, page_count, &mut items, &mut visited);
        BookmarkTree { items }
    }
}

/// A six-uppercase-letter-plus outline walk, defensive against cyclic
/// `/Next` chains via a visited-reference set (outlines in the wild
/// occasionally point back at an ancestor).
fn walk_outline<R: Read + Seek>(
    document: &PdfDocument<R>,
    node_ref: &PdfObject,
    parent_id: Option<usize>,
    level: u32,
    page_count: u32,
    items: &mut Vec<BookmarkItem>,
    visited: &mut std::collections::HashSet<(u32, u16)>,
) {
    let Some(reference) = node_ref.as_reference() else {
        return;
    };
    if !visited.insert(reference) {
        return;
    }
    let Ok(node) = document.resolve(node_ref) else {
        return;
    };
    let Some(dict) = node.as_dict() else {
        return;
    };

    let title = dict
        .get("Title")
        .and_then(|o| o.as_string())
        .map(|s| s.as_str().unwrap_or_default().to_string())
        .unwrap_or_default();

    let destination = dict
        .get("Dest")
        .and_then(|d| parse_destination(document, page_count, d));
    let action = dict
        .get("A")
        .and_then(|a| document.resolve(a).ok())
        .and_then(|a| a.as_dict().cloned())
        .map(|a| BookmarkAction {
            kind: a.get("S").and_then(|o| o.as_name()).map(|n| n.0.clone()).unwrap_or_default(),
            uri: a.get("URI").and_then(|o| o.as_string()).and_then(|s| s.as_str().ok()).map(|s| s.to_string()),
        });

    let id = items.len();
    items.push(BookmarkItem {
        id,
        parent: parent_id,
        title,
        level,
        destination,
        action,
    });

    if let Some(first_child) = dict.get("First") {
        walk_outline(document, first_child, Some(id), level + 1, page_count, items, visited);
    }
    if let Some(next) = dict.get("Next") {
        walk_outline(document, next, parent_id, level, page_count, items, visited);
    }
}

/// Resolve a `/Dest` entry (`[page /Fit]`, `[page /XYZ x y z]`, ...) to a
/// 1-based page number. Named destinations (string/name, requiring a walk of
/// the catalog's `/Names/Dests` tree) are left unresolved.
fn parse_destination<R: Read + Seek>(
    document: &PdfDocument<R>,
    page_count: u32,
    obj: &PdfObject,
) -> Option<Destination> {
    let array = obj.as_array()?;
    let page_ref = array.0.first()?;
    let page_number = resolve_page_number(document, page_count, page_ref)?;
    let view = array
        .0
        .get(1)
        .and_then(|o| o.as_name())
        .map(|n| n.0.clone())
        .unwrap_or_else(|| "Fit".to_string());
    Some(Destination { page_number, view })
}

fn resolve_page_number<R: Read + Seek>(
    document: &PdfDocument<R>,
    page_count: u32,
    page_ref: &PdfObject,
) -> Option<u32> {
    let target = page_ref.as_reference()?;
    for index in 0..page_count {
        if let Ok(page) = document.get_page(index) {
            if page.obj_ref == target {
                return Some(index + 1);
            }
        }
    }
    None
}

fn detect_tables(words: &[WordInfo]) -> bool {
    if words.len() < 6 {
        return false;
    }
    let mut rows: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for word in words {
        let row_key = (word.bbox.ny0 * 200.0).round() as i64;
        rows.entry(row_key).or_default().push(word.bbox.nx0);
    }
    if rows.len() < 3 {
        return false;
    }

    let mut bands: Vec<f64> = Vec::new();
    let mut candidate_rows = 0;
    for xs in rows.values() {
        if xs.len() < 3 {
            continue;
        }
        candidate_rows += 1;
        if bands.is_empty() {
            bands = xs.clone();
            bands.sort_by(|a, b| a.partial_cmp(b).unwrap());
        }
    }
    if candidate_rows < 3 || bands.len() < 3 {
        return false;
    }

    let aligned_rows = rows
        .values()
        .filter(|xs| {
            if xs.len() < bands.len() {
                return false;
            }
            let mut xs = (*xs).clone();
            xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let matches = bands
                .iter()
                .zip(xs.iter())
                .filter(|(b, x)| (*b - *x).abs() < 0.02)
                .count();
            matches >= bands.len().saturating_sub(1)
        })
        .count();

    aligned_rows >= 3
}

fn extract_signatures<R: Read + Seek>(
    document: &PdfDocument<R>,
    catalog: &crate::parser::objects::PdfDictionary,
) -> Vec<SignatureInfo> {
    let mut out = Vec::new();
    let Some(acroform) = catalog
        .get("AcroForm")
        .and_then(|o| document.resolve(o).ok())
    else {
        return out;
    };
    let Some(acroform_dict) = acroform.as_dict() else {
        return out;
    };
    let Some(fields) = acroform_dict.get("Fields").and_then(|o| o.as_array()) else {
        return out;
    };
    let mut visited = std::collections::HashSet::new();
    for field in &fields.0 {
        walk_field_for_signature(document, field, None, &mut out, &mut visited);
    }
    out
}

fn walk_field_for_signature<R: Read + Seek>(
    document: &PdfDocument<R>,
    field_ref: &PdfObject,
    inherited_name: Option<String>,
    out: &mut Vec<SignatureInfo>,
    visited: &mut std::collections::HashSet<(u32, u16)>,
) {
    if let Some(r) = field_ref.as_reference() {
        if !visited.insert(r) {
            return;
        }
    }
    let Ok(resolved) = document.resolve(field_ref) else {
        return;
    };
    let Some(dict) = resolved.as_dict() else {
        return;
    };

    let name = dict
        .get("T")
        .and_then(|o| o.as_string())
        .and_then(|s| s.as_str().ok())
        .map(|s| s.to_string())
        .or_else(|| inherited_name.clone());

    let field_type = dict.get("FT").and_then(|o| o.as_name()).map(|n| n.0.clone());

    if field_type.as_deref() == Some("Sig") {
        if let Some(sig_value) = dict
            .get("V")
            .and_then(|o| document.resolve(o).ok())
            .and_then(|o| o.as_dict().cloned())
        {
            let signer = sig_value
                .get("Name")
                .and_then(|o| o.as_string())
                .and_then(|s| s.as_str().ok())
                .map(|s| s.to_string());
            let signing_time = sig_value
                .get("M")
                .and_then(|o| o.as_string())
                .and_then(|s| s.as_str().ok())
                .and_then(parse_pdf_date);
            let reason = sig_value
                .get("Reason")
                .and_then(|o| o.as_string())
                .and_then(|s| s.as_str().ok())
                .map(|s| s.to_string());
            out.push(SignatureInfo {
                field_name: name.clone().unwrap_or_default(),
                signer,
                signing_time,
                reason,
            });
        }
    }

    if let Some(kids) = dict.get("Kids").and_then(|o| o.as_array()) {
        for kid in &kids.0 {
            walk_field_for_signature(document, kid, name.clone(), out, visited);
        }
    }
}

fn extract_color_profiles<R: Read + Seek>(
    document: &PdfDocument<R>,
    resources: Option<&crate::parser::objects::PdfDictionary>,
    seen: &mut std::collections::BTreeSet<String>,
    out: &mut Vec<ColorProfile>,
) {
    let Some(resources) = resources else {
        return;
    };
    let Some(color_spaces) = resources
        .get("ColorSpace")
        .and_then(|o| document.resolve(o).ok())
    else {
        return;
    };
    let Some(cs_dict) = color_spaces.as_dict() else {
        return;
    };
    for (key, value) in cs_dict.0.iter() {
        let key = key.0.clone();
        let Ok(resolved) = document.resolve(value) else {
            continue;
        };
        let Some(arr) = resolved.as_array() else {
            continue;
        };
        let is_icc = arr
            .0
            .first()
            .and_then(|o| o.as_name())
            .map(|n| n.0 == "ICCBased")
            .unwrap_or(false);
        if !is_icc || !seen.insert(key.clone()) {
            continue;
        }
        let components = arr
            .0
            .get(1)
            .and_then(|o| document.resolve(o).ok())
            .and_then(|o| o.as_stream().cloned())
            .and_then(|s| s.dict.get("N").and_then(|o| o.as_integer()));
        let color_space = match components {
            Some(1) => "ICCBased(Gray)",
            Some(3) => "ICCBased(RGB)",
            Some(4) => "ICCBased(CMYK)",
            _ => "ICCBased",
        }
        .to_string();
        out.push(ColorProfile {
            name: key,
            color_space,
        });
    }
}

fn extract_accessibility<R: Read + Seek>(
    document: &PdfDocument<R>,
    catalog: &crate::parser::objects::PdfDictionary,
) -> Option<AccessibilityInfo> {
    let marked = catalog
        .get("MarkInfo")
        .and_then(|o| document.resolve(o).ok())
        .and_then(|o| o.as_dict().cloned())
        .and_then(|d| d.get("Marked").and_then(|o| o.as_bool()))
        .unwrap_or(false);

    let struct_root = catalog
        .get("StructTreeRoot")
        .and_then(|o| document.resolve(o).ok());
    let Some(struct_root) = struct_root else {
        return if marked {
            Some(AccessibilityInfo {
                tagged: true,
                ..Default::default()
            })
        } else {
            None
        };
    };
    let Some(root_dict) = struct_root.as_dict() else {
        return Some(AccessibilityInfo {
            tagged: marked,
            ..Default::default()
        });
    };

    let role_map: BTreeMap<String, String> = root_dict
        .get("RoleMap")
        .and_then(|o| document.resolve(o).ok())
        .and_then(|o| o.as_dict().cloned())
        .map(|d| {
            d.0.iter()
                .filter_map(|(k, v)| v.as_name().map(|n| (k.0.clone(), n.0.clone())))
                .collect()
        })
        .unwrap_or_default();

    let mut info = AccessibilityInfo {
        tagged: true,
        role_map,
        ..Default::default()
    };

    let mut visited = std::collections::HashSet::new();
    if let Some(k) = root_dict.get("K") {
        walk_struct_elem(document, k, &mut info, &mut visited);
    }
    Some(info)
}

fn walk_struct_elem<R: Read + Seek>(
    document: &PdfDocument<R>,
    node: &PdfObject,
    info: &mut AccessibilityInfo,
    visited: &mut std::collections::HashSet<(u32, u16)>,
) {
    match node {
        PdfObject::Array(arr) => {
            for item in &arr.0 {
                walk_struct_elem(document, item, info, visited);
            }
        }
        PdfObject::Reference(obj_num, gen_num) => {
            if !visited.insert((*obj_num, *gen_num)) {
                return;
            }
            if let Ok(resolved) = document.resolve(node) {
                walk_struct_elem_dict(document, &resolved, info, visited);
            }
        }
        PdfObject::Dictionary(_) => {
            walk_struct_elem_dict(document, node, info, visited);
        }
        _ => {}
    }
}

fn walk_struct_elem_dict<R: Read + Seek>(
    document: &PdfDocument<R>,
    node: &PdfObject,
    info: &mut AccessibilityInfo,
    visited: &mut std::collections::HashSet<(u32, u16)>,
) {
    let Some(dict) = node.as_dict() else {
        return;
    };
    if let Some(tag) = dict.get("S").and_then(|o| o.as_name()).map(|n| n.0.clone()) {
        match tag.as_str() {
            "H" | "H1" | "H2" | "H3" | "H4" | "H5" | "H6" => info.heading_count += 1,
            "L" => info.list_count += 1,
            "Table" => info.table_count += 1,
            "Figure" => info.figure_count += 1,
            _ => {}
        }
    }
    if let Some(lang) = dict
        .get("Lang")
        .and_then(|o| o.as_string())
        .and_then(|s| s.as_str().ok())
    {
        let lang = lang.to_string();
        if !info.languages.contains(&lang) {
            info.languages.push(lang);
        }
    }
    if let Some(k) = dict.get("K") {
        walk_struct_elem(document, k, info, visited);
    }
}

fn extract_layers<R: Read + Seek>(
    document: &PdfDocument<R>,
    catalog: &crate::parser::objects::PdfDictionary,
) -> Vec<LayerInfo> {
    let mut out = Vec::new();
    let Some(oc_props) = catalog
        .get("OCProperties")
        .and_then(|o| document.resolve(o).ok())
    else {
        return out;
    };
    let Some(oc_dict) = oc_props.as_dict() else {
        return out;
    };
    let Some(ocgs) = oc_dict.get("OCGs").and_then(|o| o.as_array()) else {
        return out;
    };

    let off_refs: std::collections::HashSet<(u32, u16)> = oc_dict
        .get("D")
        .and_then(|o| document.resolve(o).ok())
        .and_then(|o| o.as_dict().cloned())
        .and_then(|d| d.get("OFF").and_then(|o| o.as_array().cloned()))
        .map(|arr| arr.0.iter().filter_map(|o| o.as_reference()).collect())
        .unwrap_or_default();

    for ocg_ref in &ocgs.0 {
        let visible = ocg_ref
            .as_reference()
            .map(|r| !off_refs.contains(&r))
            .unwrap_or(true);
        let Ok(resolved) = document.resolve(ocg_ref) else {
            continue;
        };
        let Some(dict) = resolved.as_dict() else {
            continue;
        };
        let name = dict
            .get("Name")
            .and_then(|o| o.as_string())
            .and_then(|s| s.as_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();
        out.push(LayerInfo {
            name,
            visible_by_default: visible,
        });
    }
    out
}

fn parse_pdf_date(raw: &str) -> Option<chrono::NaiveDateTime> {
    let s = raw.strip_prefix("D:").unwrap_or(raw);
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() < 8 {
        return None;
    }
    let year: i32 = digits[0..4].parse().ok()?;
    let month: u32 = digits[4..6].parse().ok()?;
    let day: u32 = digits[6..8].parse().ok()?;
    let hour: u32 = digits.get(8..10).and_then(|s| s.parse().ok()).unwrap_or(0);
    let minute: u32 = digits.get(10..12).and_then(|s| s.parse().ok()).unwrap_or(0);
    let second: u32 = digits.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);
    chrono::NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

fn permission_bit(bits: i64, bit_number: u32) -> bool {
    if bits < 0 {
        return true;
    }
    (bits >> (bit_number - 1)) & 1 == 1
}

fn detect_columns(lines: &[LineInfo]) -> bool {
    if lines.len() < 4 {
        return false;
    }
    let mut xs: Vec<f64> = lines.iter().map(|l| l.bbox.nx0).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let distinct_bands = xs.windows(2).filter(|w| (w[1] - w[0]).abs() > 0.25).count();
    distinct_bands >= 1
}

fn extract_images<R: Read + Seek>(
    document: &PdfDocument<R>,
    resources: Option<&crate::parser::objects::PdfDictionary>,
) -> Vec<ImageInfo> {
    let mut images = Vec::new();
    let Some(resources) = resources else {
        return images;
    };
    let Some(PdfObject::Dictionary(xobjects)) = resources.get("XObject") else {
        return images;
    };
    for obj_ref in xobjects.0.values() {
        let Some((obj_num, gen_num)) = obj_ref.as_reference() else {
            continue;
        };
        let Ok(resolved) = document.get_object(obj_num, gen_num) else {
            continue;
        };
        let Some(stream) = resolved.as_stream() else {
            continue;
        };
        let is_image = stream
            .dict
            .get("Subtype")
            .and_then(|o| o.as_name())
            .map(|n| n.0 == "Image")
            .unwrap_or(false);
        if !is_image {
            continue;
        }
        let width = stream.dict.get("Width").and_then(|o| o.as_integer()).unwrap_or(0) as u32;
        let height = stream.dict.get("Height").and_then(|o| o.as_integer()).unwrap_or(0) as u32;
        let bpc = stream
            .dict
            .get("BitsPerComponent")
            .and_then(|o| o.as_integer())
            .unwrap_or(8) as u32;
        let color_space = stream
            .dict
            .get("ColorSpace")
            .and_then(|o| o.as_name())
            .map(|n| n.0.clone())
            .unwrap_or_else(|| "DeviceGray".to_string());
        let filter = stream
            .dict
            .get("Filter")
            .and_then(|o| o.as_name())
            .map(|n| n.0.clone());
        images.push(ImageInfo {
            width,
            height,
            bits_per_component: bpc,
            color_space,
            filter,
        });
    }
    images
}

fn extract_annotations<R: Read + Seek>(
    document: &PdfDocument<R>,
    page: &crate::parser::page_tree::ParsedPage,
) -> Vec<AnnotationInfo> {
    let Some(annots) = &page.annotations else {
        return Vec::new();
    };
    let mut out = Vec::new();
    for entry in &annots.0 {
        let Ok(resolved) = document.resolve(entry) else {
            continue;
        };
        let Some(dict) = resolved.as_dict() else {
            continue;
        };
        let subtype = dict
            .get("Subtype")
            .and_then(|o| o.as_name())
            .map(|n| n.0.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let contents = dict
            .get("Contents")
            .and_then(|o| o.as_string())
            .and_then(|s| s.as_str().ok())
            .map(|s| s.to_string());
        let rect = dict.get("Rect").and_then(|o| o.as_array()).and_then(|a| {
            if a.0.len() == 4 {
                Some((
                    a.0[0].as_real().or_else(|| a.0[0].as_integer().map(|i| i as f64))?,
                    a.0[1].as_real().or_else(|| a.0[1].as_integer().map(|i| i as f64))?,
                    a.0[2].as_real().or_else(|| a.0[2].as_integer().map(|i| i as f64))?,
                    a.0[3].as_real().or_else(|| a.0[3].as_integer().map(|i| i as f64))?,
                ))
            } else {
                None
            }
        });
        out.push(AnnotationInfo { subtype, contents, rect });
    }
    out
}

fn empty_page(page_number: u32) -> PageAnalysis {
    PageAnalysis {
        page_number,
        size: PageSize::from_points(612.0, 792.0),
        rotation: 0,
        text_info: TextInfo::default(),
        resources: PageResources::default(),
        annotations: Vec::new(),
        headers: Vec::new(),
        footers: Vec::new(),
        document_references: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_bit_defaults_to_allowed_when_unencrypted() {
        assert!(permission_bit(-1, 3));
        assert!(permission_bit(-1, 4));
    }

    #[test]
    fn permission_bit_reads_print_bit() {
        // bit 3 (print) set, all else clear
        let bits: i64 = 0b0000_0100;
        assert!(permission_bit(bits, 3));
        assert!(!permission_bit(bits, 4));
    }

    #[test]
    fn parse_pdf_date_handles_full_timestamp() {
        let dt = parse_pdf_date("D:20240115093045").unwrap();
        assert_eq!(dt.to_string(), "2024-01-15 09:30:45");
    }

    #[test]
    fn parse_pdf_date_rejects_malformed_input() {
        assert!(parse_pdf_date("not-a-date").is_none());
        assert!(parse_pdf_date("D:2024").is_none());
    }

    fn word_at(nx0: f64, ny0: f64) -> WordInfo {
        WordInfo {
            text: "x".to_string(),
            bbox: BBox::new(nx0 * 600.0, ny0 * 800.0, nx0 * 600.0 + 20.0, ny0 * 800.0 + 10.0, 600.0, 800.0),
            font_name: "Helvetica".to_string(),
            font_size: 10.0,
            style: StyleFlags::default(),
            state: TextStateParams::default(),
            possible_bidi: false,
        }
    }

    #[test]
    fn detect_tables_flags_repeated_aligned_columns() {
        let mut words = Vec::new();
        for row in 0..5 {
            let y = 0.1 + row as f64 * 0.1;
            words.push(word_at(0.1, y));
            words.push(word_at(0.4, y));
            words.push(word_at(0.7, y));
        }
        assert!(detect_tables(&words));
    }

    #[test]
    fn detect_tables_ignores_ordinary_paragraph_text() {
        let words = vec![
            word_at(0.1, 0.1),
            word_at(0.15, 0.1),
            word_at(0.2, 0.12),
            word_at(0.1, 0.2),
        ];
        assert!(!detect_tables(&words));
    }
}
