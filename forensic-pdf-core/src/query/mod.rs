//! The Query Engine (component D): evaluates a search expression against a
//! chosen scope over one or more cached [`crate::analysis::AnalysisResult`]s.

pub mod expr;
pub mod normalize;

use crate::analysis::AnalysisResult;
use crate::cache::CacheStore;
use crate::error::{ForensicError, ForensicResult};
use expr::Expr;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    Pages,
    Documents,
    Words,
    Bookmarks,
    Annotations,
    Fonts,
    Metadata,
    Headers,
    Footers,
}

#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub scope: Scope,
    pub not_words: Vec<String>,
    pub limit: Option<usize>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            scope: Scope::Pages,
            not_words: Vec::new(),
            limit: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryMatch {
    pub cache_id: i64,
    pub page_number: Option<u32>,
    pub label: String,
    pub match_reasons: Vec<String>,
}

/// Result of running a query over a set of requested cache ids: matches
/// found, plus the ids that had no cache entry at all (a soft error per
/// §4.D — reported, not aborted on).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    pub matches: Vec<QueryMatch>,
    pub missing_cache_ids: Vec<i64>,
}

pub struct QueryEngine<'a> {
    store: &'a CacheStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a CacheStore) -> Self {
        Self { store }
    }

    /// Parse and run `expression` over `cache_ids` within `options.scope`.
    /// An unparseable expression is a hard error; a missing cache id is
    /// recorded in [`QueryResult::missing_cache_ids`] and the remaining ids
    /// still get processed.
    pub fn search(
        &self,
        cache_ids: &[i64],
        expression: &str,
        options: &QueryOptions,
    ) -> ForensicResult<QueryResult> {
        let expr = expr::parse(expression).map_err(ForensicError::UserInputError)?;
        let not_words: Vec<Expr> = options
            .not_words
            .iter()
            .map(|w| expr::parse(w))
            .collect::<Result<_, _>>()
            .map_err(ForensicError::UserInputError)?;

        let mut matches = Vec::new();
        let mut missing_cache_ids = Vec::new();

        for &cache_id in cache_ids {
            let analysis = match self.store.get(&cache_id.to_string()) {
                Ok(analysis) => analysis,
                Err(ForensicError::CacheMiss(_)) => {
                    missing_cache_ids.push(cache_id);
                    continue;
                }
                Err(other) => return Err(other),
            };

            matches.extend(self.search_one(cache_id, &analysis, &expr, &not_words, options.scope));
        }

        if let Some(limit) = options.limit {
            matches.truncate(limit);
        }

        Ok(QueryResult {
            matches,
            missing_cache_ids,
        })
    }

    fn search_one(
        &self,
        cache_id: i64,
        analysis: &AnalysisResult,
        expr: &Expr,
        not_words: &[Expr],
        scope: Scope,
    ) -> Vec<QueryMatch> {
        let excluded = |haystack: &str| not_words.iter().any(|n| n.is_match(haystack));

        match scope {
            Scope::Pages | Scope::Documents => analysis
                .pages
                .iter()
                .filter(|page| {
                    expr.is_match(&page.text_info.page_text) && !excluded(&page.text_info.page_text)
                })
                .map(|page| QueryMatch {
                    cache_id,
                    page_number: Some(page.page_number),
                    label: format!("page {}", page.page_number),
                    match_reasons: vec!["text".to_string()],
                })
                .collect(),

            Scope::Words => analysis
                .pages
                .iter()
                .flat_map(|page| {
                    page.text_info
                        .words
                        .iter()
                        .filter(|w| expr.is_match(&w.text) && !excluded(&w.text))
                        .map(move |w| QueryMatch {
                            cache_id,
                            page_number: Some(page.page_number),
                            label: w.text.clone(),
                            match_reasons: vec!["word".to_string()],
                        })
                })
                .collect(),

            Scope::Bookmarks => analysis
                .bookmarks
                .items
                .iter()
                .filter(|item| expr.is_match(&item.title) && !excluded(&item.title))
                .map(|item| QueryMatch {
                    cache_id,
                    page_number: item.destination.as_ref().map(|d| d.page_number),
                    label: item.title.clone(),
                    match_reasons: vec!["bookmark".to_string()],
                })
                .collect(),

            Scope::Annotations => analysis
                .pages
                .iter()
                .flat_map(|page| {
                    page.annotations.iter().filter_map(move |a| {
                        let contents = a.contents.as_deref().unwrap_or("");
                        if expr.is_match(contents) && !excluded(contents) {
                            Some(QueryMatch {
                                cache_id,
                                page_number: Some(page.page_number),
                                label: a.subtype.clone(),
                                match_reasons: vec!["annotation".to_string()],
                            })
                        } else {
                            None
                        }
                    })
                })
                .collect(),

            Scope::Fonts => analysis
                .pages
                .iter()
                .flat_map(|page| {
                    page.text_info.fonts.iter().filter_map(move |f| {
                        if expr.is_match(&f.base_name) && !excluded(&f.base_name) {
                            Some(QueryMatch {
                                cache_id,
                                page_number: Some(page.page_number),
                                label: f.base_name.clone(),
                                match_reasons: vec!["font".to_string()],
                            })
                        } else {
                            None
                        }
                    })
                })
                .collect(),

            Scope::Headers => analysis
                .pages
                .iter()
                .flat_map(|page| {
                    page.headers.iter().filter(move |h| {
                        expr.is_match(h) && !excluded(h)
                    }).map(move |h| QueryMatch {
                        cache_id,
                        page_number: Some(page.page_number),
                        label: h.clone(),
                        match_reasons: vec!["header".to_string()],
                    })
                })
                .collect(),

            Scope::Footers => analysis
                .pages
                .iter()
                .flat_map(|page| {
                    page.footers.iter().filter(move |f| {
                        expr.is_match(f) && !excluded(f)
                    }).map(move |f| QueryMatch {
                        cache_id,
                        page_number: Some(page.page_number),
                        label: f.clone(),
                        match_reasons: vec!["footer".to_string()],
                    })
                })
                .collect(),

            Scope::Metadata => {
                let fields = [
                    ("title", &analysis.metadata.title),
                    ("author", &analysis.metadata.author),
                    ("subject", &analysis.metadata.subject),
                    ("keywords", &analysis.metadata.keywords),
                ];
                fields
                    .into_iter()
                    .filter_map(|(field, value)| {
                        let value = value.as_deref()?;
                        if expr.is_match(value) && !excluded(value) {
                            Some(QueryMatch {
                                cache_id,
                                page_number: None,
                                label: value.to_string(),
                                match_reasons: vec![field.to_string()],
                            })
                        } else {
                            None
                        }
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::{DocumentInfo, Metadata, PageAnalysis, PageSize, TextInfo};
    use crate::cache::ExtractionMode;
    use std::path::Path;

    fn analysis_with_pages(texts: &[&str]) -> AnalysisResult {
        let pages = texts
            .iter()
            .enumerate()
            .map(|(i, text)| PageAnalysis {
                page_number: (i + 1) as u32,
                size: PageSize::from_points(612.0, 792.0),
                rotation: 0,
                text_info: TextInfo {
                    page_text: text.to_string(),
                    character_count: text.chars().count() as u64,
                    word_count: 0,
                    line_count: 0,
                    languages: Default::default(),
                    has_tables: false,
                    has_columns: false,
                    average_line_length: 0.0,
                    fonts: Vec::new(),
                    lines: Vec::new(),
                    words: Vec::new(),
                },
                resources: Default::default(),
                annotations: Vec::new(),
                headers: Vec::new(),
                footers: Vec::new(),
                document_references: Vec::new(),
            })
            .collect();

        AnalysisResult {
            metadata: Metadata {
                title: Some("Quarterly Report".to_string()),
                author: None,
                subject: None,
                keywords: None,
                creator: None,
                producer: None,
                creation_date: None,
                modification_date: None,
                pdf_version: "1.7".to_string(),
                tagged: false,
            },
            document_info: DocumentInfo {
                page_count: texts.len() as u32,
                encrypted: false,
                linearized: false,
                has_acroform: false,
                has_xfa: false,
                file_structure: crate::pool::FileStructureLabel::Original,
            },
            pages,
            security: Default::default(),
            resources_summary: Default::default(),
            statistics: Default::default(),
            bookmarks: Default::default(),
            signatures: Vec::new(),
            color_profiles: Vec::new(),
            accessibility: None,
            layers: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[test]
    fn finds_matching_pages_and_skips_non_matching() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let analysis = analysis_with_pages(&["Invoice total due", "Nothing relevant here"]);
        let id = store
            .put(Path::new("/tmp/a.pdf"), 10, "hash", ExtractionMode::Text, &analysis)
            .unwrap();

        let engine = QueryEngine::new(&store);
        let result = engine
            .search(&[id], "Invoice", &QueryOptions::default())
            .unwrap();

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].page_number, Some(1));
    }

    #[test]
    fn not_words_excludes_matches() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let analysis = analysis_with_pages(&["Invoice total due, draft copy"]);
        let id = store
            .put(Path::new("/tmp/a.pdf"), 10, "hash", ExtractionMode::Text, &analysis)
            .unwrap();

        let engine = QueryEngine::new(&store);
        let options = QueryOptions {
            not_words: vec!["draft".to_string()],
            ..Default::default()
        };
        let result = engine.search(&[id], "Invoice", &options).unwrap();
        assert!(result.matches.is_empty());
    }

    #[test]
    fn missing_cache_id_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let engine = QueryEngine::new(&store);
        let result = engine.search(&[42], "anything", &QueryOptions::default()).unwrap();
        assert_eq!(result.missing_cache_ids, vec![42]);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn unparseable_expression_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let engine = QueryEngine::new(&store);
        let result = engine.search(&[], "~unterminated", &QueryOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn metadata_scope_matches_title() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let analysis = analysis_with_pages(&["irrelevant"]);
        let id = store
            .put(Path::new("/tmp/a.pdf"), 10, "hash", ExtractionMode::Text, &analysis)
            .unwrap();

        let engine = QueryEngine::new(&store);
        let options = QueryOptions {
            scope: Scope::Metadata,
            ..Default::default()
        };
        let result = engine.search(&[id], "Quarterly", &options).unwrap();
        assert_eq!(result.matches.len(), 1);
    }
}
