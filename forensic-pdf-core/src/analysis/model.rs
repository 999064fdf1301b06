//! Data model produced by the [`super::analyzer::Analyzer`].
//!
//! One [`AnalysisResult`] per ingested document; owned by the cache store
//! and lent read-only to the query engine and the forensic differencer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metadata: Metadata,
    pub document_info: DocumentInfo,
    pub pages: Vec<PageAnalysis>,
    pub security: Security,
    pub resources_summary: ResourcesSummary,
    pub statistics: Statistics,
    pub bookmarks: BookmarkTree,
    pub signatures: Vec<SignatureInfo>,
    pub color_profiles: Vec<ColorProfile>,
    pub accessibility: Option<AccessibilityInfo>,
    pub layers: Vec<LayerInfo>,
    pub warnings: Vec<crate::error::AnalysisWarning>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub creation_date: Option<chrono::NaiveDateTime>,
    pub modification_date: Option<chrono::NaiveDateTime>,
    pub pdf_version: String,
    pub tagged: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub page_count: u32,
    pub encrypted: bool,
    pub linearized: bool,
    pub has_acroform: bool,
    pub has_xfa: bool,
    pub file_structure: crate::pool::FileStructureLabel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Security {
    pub encryption_mode: Option<String>,
    pub permission_bits: i64,
    pub can_print: bool,
    pub can_modify: bool,
    pub can_copy: bool,
    pub can_annotate: bool,
}

impl Default for Security {
    fn default() -> Self {
        Self {
            encryption_mode: None,
            permission_bits: -1,
            can_print: true,
            can_modify: true,
            can_copy: true,
            can_annotate: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesSummary {
    pub total_images: u32,
    pub form_count: u32,
    pub has_javascript: bool,
    pub has_attachments: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub total_characters: u64,
    pub total_words: u64,
    pub total_lines: u64,
    pub total_images: u32,
    pub total_annotations: u32,
    pub unique_fonts: u32,
    pub pages_with_tables: u32,
    pub pages_with_columns: u32,
    pub pages_with_images: u32,
}

/// Bookmarks are stored flat with explicit parent links (an arena) rather
/// than as a recursive `Vec<BookmarkItem>` tree, since outline dictionaries
/// in the wild occasionally contain cyclic `/Parent`/`/Next` references and
/// an owned recursive structure has no way to represent that defensively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookmarkTree {
    pub items: Vec<BookmarkItem>,
}

impl BookmarkTree {
    pub fn roots(&self) -> impl Iterator<Item = &BookmarkItem> {
        self.items.iter().filter(|i| i.parent.is_none())
    }

    pub fn children_of(&self, id: usize) -> impl Iterator<Item = &BookmarkItem> {
        self.items.iter().filter(move |i| i.parent == Some(id))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkItem {
    pub id: usize,
    pub parent: Option<usize>,
    pub title: String,
    pub level: u32,
    pub destination: Option<Destination>,
    pub action: Option<BookmarkAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destination {
    pub page_number: u32,
    pub view: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkAction {
    pub kind: String,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureInfo {
    pub field_name: String,
    pub signer: Option<String>,
    pub signing_time: Option<chrono::NaiveDateTime>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorProfile {
    pub name: String,
    pub color_space: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessibilityInfo {
    pub tagged: bool,
    pub heading_count: u32,
    pub list_count: u32,
    pub table_count: u32,
    pub figure_count: u32,
    pub role_map: std::collections::BTreeMap<String, String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerInfo {
    pub name: String,
    pub visible_by_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAnalysis {
    pub page_number: u32,
    pub size: PageSize,
    pub rotation: i32,
    pub text_info: TextInfo,
    pub resources: PageResources,
    pub annotations: Vec<AnnotationInfo>,
    pub headers: Vec<String>,
    pub footers: Vec<String>,
    pub document_references: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSize {
    pub width_pt: f64,
    pub height_pt: f64,
    pub width_in: f64,
    pub height_in: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl PageSize {
    pub fn from_points(width_pt: f64, height_pt: f64) -> Self {
        Self {
            width_pt,
            height_pt,
            width_in: width_pt / 72.0,
            height_in: height_pt / 72.0,
            width_mm: width_pt * 25.4 / 72.0,
            height_mm: height_pt * 25.4 / 72.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextInfo {
    pub page_text: String,
    pub character_count: u64,
    pub word_count: u64,
    pub line_count: u64,
    pub languages: std::collections::BTreeMap<String, u32>,
    pub has_tables: bool,
    pub has_columns: bool,
    pub average_line_length: f64,
    pub fonts: Vec<FontInfo>,
    pub lines: Vec<LineInfo>,
    pub words: Vec<WordInfo>,
}

/// Device-space and page-normalized bounding box.
///
/// Invariant: `x0 <= x1`, `y0 <= y1`, and `nx0..ny1` are `x0..y1` divided by
/// the page's (post-rotation) width/height, so both always agree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub nx0: f64,
    pub ny0: f64,
    pub nx1: f64,
    pub ny1: f64,
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64, page_width: f64, page_height: f64) -> Self {
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        let pw = if page_width > 0.0 { page_width } else { 1.0 };
        let ph = if page_height > 0.0 { page_height } else { 1.0 };
        Self {
            x0,
            y0,
            x1,
            y1,
            nx0: (x0 / pw).clamp(0.0, 1.0),
            ny0: (y0 / ph).clamp(0.0, 1.0),
            nx1: (x1 / pw).clamp(0.0, 1.0),
            ny1: (y1 / ph).clamp(0.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleFlags {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextStateParams {
    pub render_mode: u8,
    pub char_spacing: f64,
    pub word_spacing: f64,
    pub horizontal_scaling: f64,
    pub rise: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordInfo {
    pub text: String,
    pub bbox: BBox,
    pub font_name: String,
    pub font_size: f64,
    pub style: StyleFlags,
    pub state: TextStateParams,
    /// Heuristic flag: word's glyph order may not match logical reading
    /// order (right-to-left/bidi script detected by character ranges).
    /// Word order is never silently reordered; this only annotates it.
    pub possible_bidi: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineInfo {
    pub text: String,
    pub bbox: BBox,
    pub font_name: String,
    pub font_size: f64,
    pub style: StyleFlags,
    pub state: TextStateParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontType {
    Type1,
    TrueType,
    Type0,
    CIDFont,
    Type3,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontInfo {
    pub base_name: String,
    pub font_type: FontType,
    pub embedded: bool,
    pub style: StyleFlags,
    pub sizes: Vec<f64>,
    pub size_unobserved: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageResources {
    pub images: Vec<ImageInfo>,
    pub form_field_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bits_per_component: u32,
    pub color_space: String,
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationInfo {
    pub subtype: String,
    pub contents: Option<String>,
    pub rect: Option<(f64, f64, f64, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_normalizes_against_page_size() {
        let bbox = BBox::new(10.0, 20.0, 110.0, 40.0, 200.0, 400.0);
        assert_eq!((bbox.x0, bbox.x1), (10.0, 110.0));
        assert_eq!(bbox.nx0, 0.05);
        assert_eq!(bbox.nx1, 0.55);
        assert_eq!(bbox.ny0, 0.05);
        assert_eq!(bbox.ny1, 0.1);
    }

    #[test]
    fn bbox_reorders_swapped_corners() {
        let bbox = BBox::new(50.0, 50.0, 10.0, 10.0, 100.0, 100.0);
        assert!(bbox.x0 <= bbox.x1);
        assert!(bbox.y0 <= bbox.y1);
    }

    #[test]
    fn page_size_derives_inches_and_mm() {
        let size = PageSize::from_points(612.0, 792.0);
        assert!((size.width_in - 8.5).abs() < 1e-9);
        assert!((size.height_mm - 279.4).abs() < 0.1);
    }

    #[test]
    fn bookmark_tree_finds_roots_and_children() {
        let tree = BookmarkTree {
            items: vec![
                BookmarkItem {
                    id: 0,
                    parent: None,
                    title: "Chapter 1".into(),
                    level: 0,
                    destination: None,
                    action: None,
                },
                BookmarkItem {
                    id: 1,
                    parent: Some(0),
                    title: "Section 1.1".into(),
                    level: 1,
                    destination: None,
                    action: None,
                },
            ],
        };
        assert_eq!(tree.roots().count(), 1);
        assert_eq!(tree.children_of(0).count(), 1);
    }
}
