//! The Forensic Differencer (component E): detects incremental updates
//! inside one PDF's raw byte stream, and produces pairwise diffs between
//! two related PDFs.
//!
//! Grounded on [`crate::recovery::scanner::ObjectScanner`] for raw-byte
//! object enumeration and `%%EOF` splitting, and on
//! [`crate::parser::content::ContentOperation`] for line-shape diffing.

pub mod eof_scan;

use crate::analysis::Analyzer;
use crate::error::{ForensicError, ForensicResult};
use crate::parser::objects::PdfObject;
use crate::parser::{ContentOperation, ContentParser, PdfDocument, PdfReader};
use crate::recovery::scanner::{ObjectScanner, ScannedObject};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Cursor;

type MemDoc = PdfDocument<Cursor<Vec<u8>>>;

/// Terminal classification from the §4.E.3 state machine. `Fresh` and
/// `Incremental` are the two entry states; `Incremental` resolves to either
/// `NoEffectiveChange` or `Modified` once the object graphs are compared,
/// which [`IncrementalReport::has_modifications`] captures without needing a
/// fourth enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    /// Exactly one `%%EOF`: the file was written in a single session.
    SingleSession,
    /// More than one `%%EOF`: the file was saved at least twice.
    Incremental,
}

impl Default for SessionType {
    fn default() -> Self {
        SessionType::SingleSession
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectChange {
    Added,
    Modified,
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectDiff {
    pub object_id: u32,
    pub change: ObjectChange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageTextAddition {
    pub page_number: u32,
    pub added_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineShapeAddition {
    pub page_number: u32,
    pub bbox: (f64, f64, f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAddition {
    pub page_number: u32,
    pub width: u32,
    pub height: u32,
    pub bits_per_component: u32,
    pub filter: Option<String>,
    pub byte_len: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFieldAddition {
    pub name: String,
    pub field_type: String,
    pub value: Option<String>,
    pub page_number: Option<u32>,
    pub rect: Option<(f64, f64, f64, f64)>,
}

/// Result of running §4.E.1 over one PDF's raw bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncrementalReport {
    pub session_type: SessionType,
    pub has_modifications: bool,
    pub modifications: Vec<ObjectDiff>,
    pub affected_pages: Vec<u32>,
    pub text_additions: Vec<PageTextAddition>,
}

/// Result of a pairwise A-vs-B diff (§4.E.2).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffReport {
    pub text_additions: Vec<PageTextAddition>,
    pub line_shape_additions: Vec<LineShapeAddition>,
    pub image_additions: Vec<ImageAddition>,
    pub form_field_additions: Vec<FormFieldAddition>,
}

/// Result of `enhanced-last-session`: the incremental report plus the
/// form-field and image additions between the previous and current version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnhancedLastSessionReport {
    pub incremental: IncrementalReport,
    pub form_field_additions: Vec<FormFieldAddition>,
    pub image_additions: Vec<ImageAddition>,
}

/// Result of `ts-last-session`: objects grouped by modification timestamp
/// (or, lacking one, by generation number), reporting the most recent group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimestampSessionReport {
    pub session_count: usize,
    pub most_recent_session_objects: Vec<u32>,
    pub most_recent_session_texts: Vec<PageTextAddition>,
}

pub struct Differencer {
    analyzer: Analyzer,
}

impl Default for Differencer {
    fn default() -> Self {
        Self {
            analyzer: Analyzer::default(),
        }
    }
}

impl Differencer {
    pub fn new(analyzer: Analyzer) -> Self {
        Self { analyzer }
    }

    /// §4.E.1 + §4.E.3: classify one PDF's raw bytes as a fresh single
    /// session or an incremental update, and if incremental, compute the
    /// object-level diff between the previous and current version.
    pub fn analyze_incremental(&self, bytes: &[u8]) -> ForensicResult<IncrementalReport> {
        let _ = &self.analyzer; // reserved for future per-page re-analysis of diffs
        let eof_positions = eof_scan::find_eof_positions(bytes);
        if eof_positions.len() <= 1 {
            return Ok(IncrementalReport::default());
        }

        let penultimate_end = eof_positions[eof_positions.len() - 2] + eof_scan::EOF_MARKER.len();
        let previous_bytes = &bytes[..penultimate_end];

        let mut previous_scanner = ObjectScanner::new();
        let previous_scan = previous_scanner.scan_bytes(previous_bytes)?;
        let mut current_scanner = ObjectScanner::new();
        let current_scan = current_scanner.scan_bytes(bytes)?;

        let previous_by_id: BTreeMap<u32, &ScannedObject> =
            previous_scan.objects.iter().map(|o| (o.id, o)).collect();
        let current_by_id: BTreeMap<u32, &ScannedObject> =
            current_scan.objects.iter().map(|o| (o.id, o)).collect();
        let previous_ids: BTreeSet<u32> = previous_by_id.keys().copied().collect();
        let current_ids: BTreeSet<u32> = current_by_id.keys().copied().collect();

        let mut modifications = Vec::new();
        for id in current_ids.difference(&previous_ids) {
            modifications.push(ObjectDiff {
                object_id: *id,
                change: ObjectChange::Added,
            });
        }
        for id in previous_ids.difference(&current_ids) {
            modifications.push(ObjectDiff {
                object_id: *id,
                change: ObjectChange::Deleted,
            });
        }
        for id in previous_ids.intersection(&current_ids) {
            let previous_obj = previous_by_id[id];
            let current_obj = current_by_id[id];
            if object_slice(previous_bytes, previous_obj.offset)
                != object_slice(bytes, current_obj.offset)
            {
                modifications.push(ObjectDiff {
                    object_id: *id,
                    change: ObjectChange::Modified,
                });
            }
        }
        modifications.sort_by_key(|m| m.object_id);

        if modifications.is_empty() {
            return Ok(IncrementalReport {
                session_type: SessionType::Incremental,
                has_modifications: false,
                modifications,
                affected_pages: Vec::new(),
                text_additions: Vec::new(),
            });
        }

        let current_doc = open_bytes(bytes)?;
        let previous_doc = open_bytes(previous_bytes)?;

        let changed_ids: BTreeSet<u32> = modifications.iter().map(|m| m.object_id).collect();
        let affected_pages = affected_page_numbers(&current_doc, &changed_ids);

        let mut text_additions = Vec::new();
        for &page_number in &affected_pages {
            let previous_text = page_text(&previous_doc, page_number).unwrap_or_default();
            let current_text = page_text(&current_doc, page_number).unwrap_or_default();
            let added = text_addition(&previous_text, &current_text);
            if !added.is_empty() {
                text_additions.push(PageTextAddition {
                    page_number,
                    added_text: added,
                });
            }
        }

        Ok(IncrementalReport {
            session_type: SessionType::Incremental,
            has_modifications: true,
            modifications,
            affected_pages,
            text_additions,
        })
    }

    /// `last-session`: an alias for [`Self::analyze_incremental`].
    pub fn last_session(&self, bytes: &[u8]) -> ForensicResult<IncrementalReport> {
        self.analyze_incremental(bytes)
    }

    /// `enhanced-last-session`: the incremental report plus form-field and
    /// image additions between the previous and current version.
    pub fn enhanced_last_session(&self, bytes: &[u8]) -> ForensicResult<EnhancedLastSessionReport> {
        let incremental = self.analyze_incremental(bytes)?;
        if !incremental.has_modifications {
            return Ok(EnhancedLastSessionReport {
                incremental,
                ..Default::default()
            });
        }

        let eof_positions = eof_scan::find_eof_positions(bytes);
        let penultimate_end = eof_positions[eof_positions.len() - 2] + eof_scan::EOF_MARKER.len();
        let previous_bytes = &bytes[..penultimate_end];

        let previous_doc = open_bytes(previous_bytes)?;
        let current_doc = open_bytes(bytes)?;

        let form_field_additions = form_field_additions(&previous_doc, &current_doc);

        let mut image_additions = Vec::new();
        for &page_number in &incremental.affected_pages {
            let previous_images = page_images(&previous_doc, page_number).unwrap_or_default();
            let current_images = page_images(&current_doc, page_number).unwrap_or_default();
            for image in &current_images {
                if !previous_images.contains(image) {
                    image_additions.push(image.clone());
                }
            }
        }

        Ok(EnhancedLastSessionReport {
            incremental,
            form_field_additions,
            image_additions,
        })
    }

    /// `ts-last-session`: group objects by modification timestamp (falling
    /// back to generation number when no `/M` entry is present) and report
    /// the most recent group.
    pub fn timestamp_last_session(&self, bytes: &[u8]) -> ForensicResult<TimestampSessionReport> {
        let document = open_bytes(bytes)?;
        let mut scanner = ObjectScanner::new();
        let scan = scanner.scan_bytes(bytes)?;

        let mut groups: BTreeMap<String, Vec<u32>> = BTreeMap::new();
        for obj in &scan.objects {
            let key = document
                .get_object(obj.id, obj.generation)
                .ok()
                .and_then(|o| o.as_dict().cloned())
                .and_then(|d| {
                    d.get("M")
                        .and_then(|o| o.as_string())
                        .and_then(|s| s.as_str().ok())
                        .map(|s| s.to_string())
                })
                .unwrap_or_else(|| format!("gen:{:010}", obj.generation));
            groups.entry(key).or_default().push(obj.id);
        }

        let Some((_, object_ids)) = groups.iter().max_by_key(|(key, _)| (*key).clone()) else {
            return Ok(TimestampSessionReport::default());
        };

        let changed: BTreeSet<u32> = object_ids.iter().copied().collect();
        let mut texts = Vec::new();
        let page_count = document.page_count().unwrap_or(0);
        for index in 0..page_count {
            let page_number = index + 1;
            let Ok(page) = document.get_page(index) else {
                continue;
            };
            let touches_page = changed.contains(&page.obj_ref.0)
                || references_changed_object(page.dict.get("Contents"), &changed);
            if touches_page {
                if let Some(text) = page_text(&document, page_number) {
                    if !text.is_empty() {
                        texts.push(PageTextAddition {
                            page_number,
                            added_text: text,
                        });
                    }
                }
            }
        }

        Ok(TimestampSessionReport {
            session_count: groups.len(),
            most_recent_session_objects: object_ids.clone(),
            most_recent_session_texts: texts,
        })
    }

    /// §4.E.2: pairwise diff of two PDFs' raw bytes. A failure opening `a`
    /// fails the whole operation; a failure opening `b` yields an
    /// empty-diff report.
    pub fn diff_pair(
        &self,
        a_bytes: &[u8],
        b_bytes: &[u8],
        enhanced: bool,
    ) -> ForensicResult<DiffReport> {
        let doc_a = open_bytes(a_bytes)?;
        let doc_b = match open_bytes(b_bytes) {
            Ok(doc) => doc,
            Err(_) => return Ok(DiffReport::default()),
        };

        let page_count = doc_a.page_count().unwrap_or(0).max(doc_b.page_count().unwrap_or(0));

        let mut report = DiffReport::default();
        for index in 0..page_count {
            let page_number = index + 1;

            let text_a = page_text(&doc_a, page_number).unwrap_or_default();
            let text_b = page_text(&doc_b, page_number).unwrap_or_default();
            report
                .text_additions
                .extend(line_additions(page_number, &text_a, &text_b));

            let shapes_a = page_line_shapes(&doc_a, page_number).unwrap_or_default();
            let shapes_b = page_line_shapes(&doc_b, page_number).unwrap_or_default();
            for bbox in &shapes_b {
                if !shapes_a.contains(bbox) {
                    report.line_shape_additions.push(LineShapeAddition {
                        page_number,
                        bbox: *bbox,
                    });
                }
            }

            let images_a = page_images(&doc_a, page_number).unwrap_or_default();
            let images_b = page_images(&doc_b, page_number).unwrap_or_default();
            for image in &images_b {
                if !images_a.contains(image) {
                    report.image_additions.push(image.clone());
                }
            }
        }

        if enhanced {
            report.form_field_additions = form_field_additions(&doc_a, &doc_b);
        }

        Ok(report)
    }
}

fn open_bytes(bytes: &[u8]) -> ForensicResult<MemDoc> {
    let reader = PdfReader::new(Cursor::new(bytes.to_vec()))?;
    if reader.is_encrypted() && !reader.is_unlocked() {
        return Err(ForensicError::Encrypted(std::path::PathBuf::from("<in-memory>")));
    }
    Ok(reader.into_document())
}

fn object_slice(bytes: &[u8], offset: u64) -> &[u8] {
    let start = offset as usize;
    if start >= bytes.len() {
        return &[];
    }
    let region = &bytes[start..];
    match region.windows(6).position(|w| w == b"endobj") {
        Some(pos) => &region[..pos + 6],
        None => region,
    }
}

fn affected_page_numbers(document: &MemDoc, changed_ids: &BTreeSet<u32>) -> Vec<u32> {
    let mut pages = BTreeSet::new();
    let Ok(page_count) = document.page_count() else {
        return Vec::new();
    };
    for index in 0..page_count {
        let Ok(page) = document.get_page(index) else {
            continue;
        };
        let page_number = index + 1;
        if changed_ids.contains(&page.obj_ref.0) {
            pages.insert(page_number);
            continue;
        }
        if references_changed_object(page.dict.get("Contents"), changed_ids) {
            pages.insert(page_number);
            continue;
        }
        if let Some(annots) = &page.annotations {
            let touches = annots.0.iter().any(|o| {
                o.as_reference()
                    .map(|(id, _)| changed_ids.contains(&id))
                    .unwrap_or(false)
            });
            if touches {
                pages.insert(page_number);
            }
        }
    }
    pages.into_iter().collect()
}

fn references_changed_object(obj: Option<&PdfObject>, changed_ids: &BTreeSet<u32>) -> bool {
    match obj {
        Some(PdfObject::Reference(id, _)) => changed_ids.contains(id),
        Some(PdfObject::Array(arr)) => arr
            .0
            .iter()
            .any(|o| matches!(o, PdfObject::Reference(id, _) if changed_ids.contains(id))),
        _ => false,
    }
}

/// If `previous` is empty, the whole of `current` is new. Otherwise the
/// longest common prefix is stripped and the remainder reported; if the
/// texts share no prefix, the entire current text is reported.
fn text_addition(previous: &str, current: &str) -> String {
    if previous.is_empty() {
        return current.to_string();
    }
    let prefix_len = previous
        .chars()
        .zip(current.chars())
        .take_while(|(a, b)| a == b)
        .count();
    let byte_offset = current
        .char_indices()
        .nth(prefix_len)
        .map(|(i, _)| i)
        .unwrap_or(current.len());
    current[byte_offset..].to_string()
}

fn line_additions(page_number: u32, text_a: &str, text_b: &str) -> Vec<PageTextAddition> {
    let lines_a: BTreeSet<&str> = text_a.lines().map(str::trim).collect();
    text_b
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !lines_a.contains(line))
        .map(|line| PageTextAddition {
            page_number,
            added_text: line.to_string(),
        })
        .collect()
}

fn page_text(document: &MemDoc, page_number: u32) -> Option<String> {
    let index = page_number.checked_sub(1)?;
    let page = document.get_page(index).ok()?;
    let streams = document.get_page_content_streams(&page).ok()?;
    let collected = crate::analysis::collector::collect(
        &streams,
        page.width(),
        page.height(),
        page.get_resources(),
        false,
    )
    .ok()?;
    Some(
        collected
            .lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

fn page_line_shapes(document: &MemDoc, page_number: u32) -> Option<Vec<(f64, f64, f64, f64)>> {
    let index = page_number.checked_sub(1)?;
    let page = document.get_page(index).ok()?;
    let streams = document.get_page_content_streams(&page).ok()?;

    let mut shapes = Vec::new();
    for stream in &streams {
        let Ok(ops) = ContentParser::parse_content(stream) else {
            continue;
        };
        let mut path_points: Vec<(f64, f64)> = Vec::new();
        for op in ops {
            match op {
                ContentOperation::MoveTo(x, y) | ContentOperation::LineTo(x, y) => {
                    path_points.push((x as f64, y as f64));
                }
                ContentOperation::Rectangle(x, y, w, h) => {
                    shapes.push((x as f64, y as f64, (x + w) as f64, (y + h) as f64));
                }
                ContentOperation::Stroke
                | ContentOperation::CloseStroke
                | ContentOperation::Fill
                | ContentOperation::FillEvenOdd
                | ContentOperation::FillStroke
                | ContentOperation::FillStrokeEvenOdd
                | ContentOperation::CloseFillStroke
                | ContentOperation::CloseFillStrokeEvenOdd
                | ContentOperation::EndPath => {
                    if path_points.len() >= 2 {
                        shapes.push(bbox_of(&path_points));
                    }
                    path_points.clear();
                }
                _ => {}
            }
        }
    }
    Some(shapes)
}

fn bbox_of(points: &[(f64, f64)]) -> (f64, f64, f64, f64) {
    let x0 = points.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
    let y0 = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let x1 = points.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
    let y1 = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
    (x0, y0, x1, y1)
}

fn page_images(document: &MemDoc, page_number: u32) -> Option<Vec<ImageAddition>> {
    let index = page_number.checked_sub(1)?;
    let page = document.get_page(index).ok()?;
    let resources = page.get_resources()?;
    let Some(PdfObject::Dictionary(xobjects)) = resources.get("XObject") else {
        return Some(Vec::new());
    };

    let mut out = Vec::new();
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
        let bits_per_component = stream
            .dict
            .get("BitsPerComponent")
            .and_then(|o| o.as_integer())
            .unwrap_or(8) as u32;
        let filter = stream.dict.get("Filter").and_then(|o| o.as_name()).map(|n| n.0.clone());
        out.push(ImageAddition {
            page_number,
            width,
            height,
            bits_per_component,
            filter,
            byte_len: stream.data.len(),
        });
    }
    Some(out)
}

fn array_to_rect(arr: &crate::parser::objects::PdfArray) -> Option<(f64, f64, f64, f64)> {
    if arr.0.len() != 4 {
        return None;
    }
    let v = |o: &PdfObject| o.as_real().or_else(|| o.as_integer().map(|i| i as f64));
    Some((v(&arr.0[0])?, v(&arr.0[1])?, v(&arr.0[2])?, v(&arr.0[3])?))
}

fn form_field_additions(previous: &MemDoc, current: &MemDoc) -> Vec<FormFieldAddition> {
    let fields_a = collect_form_fields(previous);
    let fields_b = collect_form_fields(current);
    fields_b
        .into_iter()
        .filter(|b| !fields_a.iter().any(|a| a.name == b.name))
        .collect()
}

fn collect_form_fields(document: &MemDoc) -> Vec<FormFieldAddition> {
    let mut out = Vec::new();
    let Ok(catalog) = document.catalog() else {
        return out;
    };
    let Some(acroform) = catalog.get("AcroForm").and_then(|o| document.resolve(o).ok()) else {
        return out;
    };
    let Some(acroform_dict) = acroform.as_dict() else {
        return out;
    };
    let Some(fields) = acroform_dict.get("Fields").and_then(|o| o.as_array()) else {
        return out;
    };
    let page_count = document.page_count().unwrap_or(0);
    let mut visited = std::collections::HashSet::new();
    for field in &fields.0 {
        walk_field(document, field, None, page_count, &mut out, &mut visited);
    }
    out
}

fn walk_field(
    document: &MemDoc,
    field_ref: &PdfObject,
    inherited_name: Option<String>,
    page_count: u32,
    out: &mut Vec<FormFieldAddition>,
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
    let value = dict
        .get("V")
        .and_then(|o| o.as_string())
        .and_then(|s| s.as_str().ok())
        .map(|s| s.to_string());
    let rect = dict.get("Rect").and_then(|o| o.as_array()).and_then(array_to_rect);

    if let (Some(name), Some(field_type)) = (name.clone(), field_type) {
        let page_number = field_ref
            .as_reference()
            .and_then(|target| page_number_for_object(document, page_count, target));
        out.push(FormFieldAddition {
            name,
            field_type,
            value,
            page_number,
            rect,
        });
    }

    if let Some(kids) = dict.get("Kids").and_then(|o| o.as_array()) {
        for kid in &kids.0 {
            walk_field(document, kid, name.clone(), page_count, out, visited);
        }
    }
}

fn page_number_for_object(document: &MemDoc, page_count: u32, target: (u32, u16)) -> Option<u32> {
    for index in 0..page_count {
        if let Ok(page) = document.get_page(index) {
            if let Some(annots) = &page.annotations {
                if annots.0.iter().any(|o| o.as_reference() == Some(target)) {
                    return Some(index + 1);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_addition_reports_whole_text_when_previous_empty() {
        assert_eq!(text_addition("", "Alpha Beta"), "Alpha Beta");
    }

    #[test]
    fn text_addition_strips_common_prefix() {
        assert_eq!(text_addition("Alpha Beta", "Alpha Beta Gamma"), " Gamma");
    }

    #[test]
    fn text_addition_reports_all_when_no_common_prefix() {
        assert_eq!(text_addition("Alpha", "Zulu"), "Zulu");
    }

    #[test]
    fn line_additions_skips_lines_present_in_a() {
        let additions = line_additions(1, "one\ntwo", "one\ntwo\nthree");
        assert_eq!(additions.len(), 1);
        assert_eq!(additions[0].added_text, "three");
    }

    #[test]
    fn line_additions_trims_whitespace_before_comparing() {
        let additions = line_additions(1, "one  ", "  one\ntwo");
        assert_eq!(additions.len(), 1);
        assert_eq!(additions[0].added_text, "two");
    }

    #[test]
    fn fresh_session_has_no_modifications() {
        let differencer = Differencer::default();
        let report = differencer.analyze_incremental(b"%PDF-1.4\n...\n%%EOF").unwrap();
        assert_eq!(report.session_type, SessionType::SingleSession);
        assert!(!report.has_modifications);
    }

    #[test]
    fn bbox_of_covers_all_points() {
        let bbox = bbox_of(&[(1.0, 2.0), (5.0, 0.5), (3.0, 7.0)]);
        assert_eq!(bbox, (1.0, 0.5, 5.0, 7.0));
    }
}
