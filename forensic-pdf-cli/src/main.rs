//! # forensic-pdf-cli
//!
//! Command-line interface for `forensic-pdf-core`: a forensic PDF analysis,
//! caching, search and revision-diffing engine.
//!
//! ## Quick Start
//!
//! ```bash
//! fpdf document.pdf info --detailed
//! fpdf document.pdf extract-text -p 0
//! fpdf - load --input-dir ./cases --num-workers 4
//! fpdf 1-20 find --text "Invoice" -F json
//! fpdf - diff --template original.pdf --target revised.pdf
//! ```
//!
//! ## Exit Codes
//!
//! - 0: success
//! - 1: user error (bad arguments, missing file, malformed range)
//! - 2: internal error (uncaught failure during analysis)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use forensic_pdf_core::analysis::AnalyzerOptions;
use forensic_pdf_core::cache::{CacheEntry, CacheStore, ExtractionMode, TopValue};
use forensic_pdf_core::forensic::{EnhancedLastSessionReport, TimestampSessionReport};
use forensic_pdf_core::pool::FileStructureLabel;
use forensic_pdf_core::{
    Analyzer, DiffReport, Differencer, ForensicError, IncrementalReport, IngestOptions,
    IngestOutcome, IngestPipeline, IngestSummary, PdfDocument, PdfReader, QueryEngine,
    QueryOptions, QueryResult, QueryScope, RuntimeConfig,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// `fpdf <selector> <command> [options]`.
///
/// The selector's meaning depends on the subcommand: a PDF path for
/// `info`/`extract-text`/`last-session`-family commands, a cache id /
/// range expression / wildcard pattern for `find` and most `cache`
/// actions, and unused (the command takes its own file flags instead)
/// for `load`, `diff`, `true-diff` and `pipeline-tjpb`.
#[derive(Parser)]
#[command(name = "fpdf", about = "Forensic PDF analysis tool", version, author)]
struct Cli {
    selector: Option<String>,

    #[command(subcommand)]
    command: Commands,

    /// Override `FPDF_CACHE_DIR`.
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    /// Override `FPDF_DEBUG`.
    #[arg(long, global = true)]
    debug: bool,

    /// Override `FPDF_TEXT_LEGACY`.
    #[arg(long, global = true)]
    text_legacy: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print document and page metadata extracted from the forensic analyzer.
    Info {
        #[arg(short, long)]
        detailed: bool,
    },

    /// Extract text content from the PDF.
    ExtractText {
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Page number to extract (0-based index, extracts all pages if absent).
        #[arg(short = 'p', long)]
        page: Option<usize>,
    },

    /// Analyze and cache one file or every `.pdf` file in a directory.
    Load {
        #[arg(value_enum, default_value = "text")]
        mode: CliExtractionMode,
        #[arg(long)]
        input_file: Option<PathBuf>,
        #[arg(long)]
        input_dir: Option<PathBuf>,
        #[arg(long)]
        num_workers: Option<usize>,
    },

    /// Inspect or manage the cache store.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Full-text search over one or more cached documents.
    Find {
        #[arg(long)]
        text: String,
        /// Search page headers instead of full page text.
        #[arg(long)]
        header: bool,
        /// Search page footers instead of full page text.
        #[arg(long)]
        footer: bool,
        /// Search document metadata (title/author/subject/keywords).
        #[arg(long)]
        docs: bool,
        /// Restrict matches to an inclusive page range, e.g. `3-9`.
        #[arg(long)]
        pages: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        #[arg(short = 'F', long, value_enum, default_value = "txt")]
        format: OutputFormat,
    },

    /// Pairwise text/shape/image diff between two PDFs.
    Diff {
        #[arg(long)]
        template: PathBuf,
        #[arg(long)]
        target: PathBuf,
    },

    /// Enhanced pairwise diff: adds form-field additions.
    TrueDiff {
        #[arg(long = "a")]
        a: PathBuf,
        #[arg(long = "b")]
        b: PathBuf,
    },

    /// Detect and report the most recent incremental-update session within one PDF.
    LastSession {
        #[arg(short = 'F', long, value_enum, default_value = "txt")]
        format: OutputFormat,
    },

    /// `last-session`, plus form-field and image additions.
    EnhancedLastSession {
        #[arg(short = 'F', long, value_enum, default_value = "txt")]
        format: OutputFormat,
    },

    /// Group objects by modification timestamp and report the most recent group.
    TsLastSession {
        #[arg(short = 'F', long, value_enum, default_value = "txt")]
        format: OutputFormat,
    },

    /// Batch-ingest a directory, optionally splitting attachment ("anexo")
    /// files into their own ingestion pass.
    PipelineTjpb {
        #[arg(long)]
        input_dir: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        split_anexos: bool,
        #[arg(long)]
        pg_uri: Option<String>,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    List,
    Stats,
    /// Destructive: deletes every cache entry. Requires `--confirm`.
    Clear {
        #[arg(long)]
        confirm: bool,
    },
    /// Remove the entries the top-level selector resolves to.
    Remove,
    /// Print the entries the top-level selector resolves to.
    Find,
    Top {
        #[arg(long)]
        field: String,
        #[arg(long, default_value_t = 10)]
        top: usize,
        #[arg(long, default_value_t = 3)]
        sample: usize,
        /// Restrict to the N most recently ingested caches.
        #[arg(long)]
        last: Option<usize>,
        /// Restrict to caches created at or after this RFC 3339 timestamp.
        #[arg(long)]
        since: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum CliExtractionMode {
    Ultra,
    Text,
    Custom,
    ImagesOnly,
    Base64Only,
}

impl From<CliExtractionMode> for ExtractionMode {
    fn from(value: CliExtractionMode) -> Self {
        match value {
            CliExtractionMode::Ultra => ExtractionMode::Ultra,
            CliExtractionMode::Text => ExtractionMode::Text,
            CliExtractionMode::Custom => ExtractionMode::Custom,
            CliExtractionMode::ImagesOnly => ExtractionMode::ImagesOnly,
            CliExtractionMode::Base64Only => ExtractionMode::Base64Only,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
#[value(rename_all = "lowercase")]
enum OutputFormat {
    Txt,
    Json,
    Csv,
    Count,
    Raw,
    Md,
    Xml,
}

/// Marker type for exit-code-1 failures (bad arguments, missing files,
/// malformed ranges). Anything else surfaces as exit code 2.
#[derive(Debug)]
struct UserError(String);

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for UserError {}

fn user_error(message: impl Into<String>) -> anyhow::Error {
    anyhow::Error::new(UserError(message.into()))
}

fn to_anyhow(err: ForensicError) -> anyhow::Error {
    match &err {
        ForensicError::UserInputError(_)
        | ForensicError::FileNotFound(_)
        | ForensicError::NotAPdf(_)
        | ForensicError::Encrypted(_)
        | ForensicError::CacheMiss(_) => user_error(err.to_string()),
        _ => anyhow::Error::new(err),
    }
}

fn build_config(cli: &Cli) -> RuntimeConfig {
    let mut config = RuntimeConfig::from_env();
    if let Some(dir) = &cli.cache_dir {
        config.cache_dir = dir.clone();
    }
    if cli.debug {
        config.debug = true;
    }
    if cli.text_legacy {
        config.text_legacy = true;
    }
    config
}

fn init_tracing(config: &RuntimeConfig) {
    let filter = if config.debug {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn check_allowed(config: &RuntimeConfig, path: &Path) -> Result<()> {
    if config.check_path_allowed(path) {
        Ok(())
    } else {
        Err(user_error(format!(
            "{} is outside the directories permitted by FPDF_ALLOWED_DIRS",
            path.display()
        )))
    }
}

fn open_store(config: &RuntimeConfig) -> Result<CacheStore> {
    CacheStore::open(&config.cache_dir).map_err(to_anyhow)
}

fn cli_selector(selector: &Option<String>) -> Result<String> {
    selector
        .clone()
        .ok_or_else(|| user_error("this command requires a selector"))
}

fn cli_selector_path(selector: &Option<String>) -> Result<PathBuf> {
    Ok(PathBuf::from(cli_selector(selector)?))
}

/// Resolve a selector to cache ids: first as a range expression (`N`,
/// `A-B`, comma union, `:odd`/`:even`, `all`, `0`), falling back to a
/// `*`/`?` wildcard match against cached file names.
fn resolve_selector(store: &CacheStore, selector: &str) -> Result<Vec<i64>> {
    match store.resolve(selector) {
        Ok(resolved) => Ok(resolved.cache_ids),
        Err(ForensicError::UserInputError(_)) => {
            let pattern = forensic_pdf_core::query::expr::wildcard_regex(selector);
            let entries = store.list().map_err(to_anyhow)?;
            Ok(entries
                .into_iter()
                .filter(|e| pattern.is_match(&e.original_name))
                .map(|e| e.id)
                .collect())
        }
        Err(e) => Err(to_anyhow(e)),
    }
}

fn parse_page_range(spec: &str) -> Result<(u32, u32)> {
    let (lo, hi) = spec
        .split_once('-')
        .ok_or_else(|| user_error(format!("invalid page range '{spec}', expected A-B")))?;
    let lo: u32 = lo
        .parse()
        .map_err(|_| user_error(format!("invalid page range '{spec}'")))?;
    let hi: u32 = hi
        .parse()
        .map_err(|_| user_error(format!("invalid page range '{spec}'")))?;
    if lo > hi {
        return Err(user_error(format!(
            "invalid page range '{spec}': start after end"
        )));
    }
    Ok((lo, hi))
}

fn gather_pdf_paths(input_file: Option<&Path>, input_dir: Option<&Path>) -> Result<Vec<PathBuf>> {
    match (input_file, input_dir) {
        (Some(_), Some(_)) => Err(user_error("pass either --input-file or --input-dir, not both")),
        (Some(file), None) => Ok(vec![file.to_path_buf()]),
        (None, Some(dir)) => {
            let mut paths = Vec::new();
            for entry in std::fs::read_dir(dir)
                .with_context(|| format!("failed to read directory {}", dir.display()))?
            {
                let path = entry?.path();
                let is_pdf = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .map(|e| e.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false);
                if is_pdf {
                    paths.push(path);
                }
            }
            paths.sort();
            Ok(paths)
        }
        (None, None) => Err(user_error("this command requires --input-file or --input-dir")),
    }
}

fn csv_quote(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn print_ingest_summary(store: &CacheStore, summary: &IngestSummary) {
    let mut warnings = 0usize;
    for result in &summary.results {
        match result {
            IngestOutcome::Success { path, cache_id, .. } => {
                if let Ok(analysis) = store.get(&cache_id.to_string()) {
                    warnings += analysis.warnings.len();
                }
                println!("ok        {} -> cache id {}", path.display(), cache_id);
            }
            IngestOutcome::Failed { path, error, .. } => {
                println!("error     {}: {}", path.display(), error);
            }
            IngestOutcome::Cancelled { path } => {
                println!("cancelled {}", path.display());
            }
        }
    }
    println!(
        "ok={} warnings={} errors={} cancelled={}",
        summary.successful, warnings, summary.failed, summary.cancelled
    );
}

fn print_cache_entries(entries: &[CacheEntry]) {
    for entry in entries {
        println!(
            "{}\t{}\t{} pages\t{}\t{}",
            entry.id, entry.original_name, entry.page_count, entry.extraction_mode, entry.created_at
        );
    }
}

fn top_values_since(
    store: &CacheStore,
    field: &str,
    top: usize,
    sample: usize,
    since: &str,
) -> Result<Vec<TopValue>> {
    let entries = store.list().map_err(to_anyhow)?;
    let mut grouped: std::collections::HashMap<String, Vec<i64>> = std::collections::HashMap::new();
    for entry in entries.iter().filter(|e| e.created_at.as_str() >= since) {
        let value = match field {
            "title" => entry.title.clone(),
            "author" => entry.author.clone(),
            "extraction_mode" => Some(entry.extraction_mode.clone()),
            other => return Err(user_error(format!("unknown top field '{other}'"))),
        };
        if let Some(value) = value {
            grouped.entry(value).or_default().push(entry.id);
        }
    }

    let mut values: Vec<TopValue> = grouped
        .into_iter()
        .map(|(value, mut ids)| {
            ids.sort_unstable_by(|a, b| b.cmp(a));
            let count = ids.len() as u64;
            ids.truncate(sample.max(1));
            TopValue {
                value,
                count,
                sample_cache_ids: ids,
            }
        })
        .collect();
    values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    values.truncate(top.max(1));
    Ok(values)
}

fn print_query_result(result: &QueryResult, format: OutputFormat) {
    match format {
        OutputFormat::Count => println!("{}", result.matches.len()),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Csv => {
            println!("cache_id,page_number,label,match_reasons");
            for m in &result.matches {
                println!(
                    "{},{},{},{}",
                    m.cache_id,
                    m.page_number.map(|p| p.to_string()).unwrap_or_default(),
                    csv_quote(&m.label),
                    csv_quote(&m.match_reasons.join(";")),
                );
            }
        }
        OutputFormat::Raw => {
            for m in &result.matches {
                println!(
                    "{}|{}|{}",
                    m.cache_id,
                    m.page_number.map(|p| p.to_string()).unwrap_or_default(),
                    m.label
                );
            }
        }
        OutputFormat::Md => {
            println!("| cache id | page | match |");
            println!("|---|---|---|");
            for m in &result.matches {
                println!(
                    "| {} | {} | {} |",
                    m.cache_id,
                    m.page_number.map(|p| p.to_string()).unwrap_or_default(),
                    m.label
                );
            }
        }
        OutputFormat::Xml => {
            println!("<matches>");
            for m in &result.matches {
                println!(
                    "  <match cache_id=\"{}\" page=\"{}\">{}</match>",
                    m.cache_id,
                    m.page_number.unwrap_or(0),
                    xml_escape(&m.label)
                );
            }
            println!("</matches>");
        }
        OutputFormat::Txt => {
            for m in &result.matches {
                println!(
                    "[{}] page {}: {}",
                    m.cache_id,
                    m.page_number
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    m.label
                );
            }
        }
    }
    if !result.missing_cache_ids.is_empty() {
        eprintln!("warning: missing cache ids: {:?}", result.missing_cache_ids);
    }
}

fn print_diff_report(report: &DiffReport, format: OutputFormat) {
    if let OutputFormat::Json = format {
        println!(
            "{}",
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        );
        return;
    }
    println!("text additions: {}", report.text_additions.len());
    for t in &report.text_additions {
        println!("  page {}: {}", t.page_number, t.added_text);
    }
    println!("line shape additions: {}", report.line_shape_additions.len());
    println!("image additions: {}", report.image_additions.len());
    println!("form field additions: {}", report.form_field_additions.len());
    for f in &report.form_field_additions {
        println!("  {} ({})", f.name, f.field_type);
    }
}

fn print_incremental_report(report: &IncrementalReport, format: OutputFormat) {
    if let OutputFormat::Json = format {
        println!(
            "{}",
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        );
        return;
    }
    println!("session type: {:?}", report.session_type);
    println!("has modifications: {}", report.has_modifications);
    println!("affected pages: {:?}", report.affected_pages);
    for t in &report.text_additions {
        println!("  page {}: {}", t.page_number, t.added_text);
    }
}

fn print_enhanced_report(report: &EnhancedLastSessionReport, format: OutputFormat) {
    if let OutputFormat::Json = format {
        println!(
            "{}",
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        );
        return;
    }
    print_incremental_report(&report.incremental, format);
    println!("form field additions: {}", report.form_field_additions.len());
    println!("image additions: {}", report.image_additions.len());
}

fn print_timestamp_report(report: &TimestampSessionReport, format: OutputFormat) {
    if let OutputFormat::Json = format {
        println!(
            "{}",
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        );
        return;
    }
    println!("session count: {}", report.session_count);
    println!(
        "most recent session objects: {:?}",
        report.most_recent_session_objects
    );
    for t in &report.most_recent_session_texts {
        println!("  page {}: {}", t.page_number, t.added_text);
    }
}

fn run(cli: Cli, config: RuntimeConfig) -> Result<()> {
    match cli.command {
        Commands::Info { detailed } => {
            let path = cli_selector_path(&cli.selector)?;
            check_allowed(&config, &path)?;
            let reader = PdfReader::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let document = PdfDocument::new(reader);
            let analyzer = Analyzer::new(AnalyzerOptions::default(), config.text_legacy);
            let result = analyzer
                .analyze(&document, FileStructureLabel::Original)
                .map_err(to_anyhow)?;

            println!("Forensic Information for: {}", path.display());
            println!("==========================================");
            println!("PDF Version: {}", result.metadata.pdf_version);
            println!("Pages: {}", result.document_info.page_count);
            if let Some(title) = &result.metadata.title {
                println!("Title: {title}");
            }
            if let Some(author) = &result.metadata.author {
                println!("Author: {author}");
            }
            println!("Encrypted: {}", result.document_info.encrypted);
            println!("Bookmarks: {}", result.bookmarks.items.len());

            if detailed {
                println!("\nPage Information:");
                println!("-----------------");
                for page in &result.pages {
                    println!(
                        "Page {}: {:.0}x{:.0} pts, {} words",
                        page.page_number, page.size.width_pt, page.size.height_pt, page.text_info.word_count,
                    );
                }
            }
        }

        Commands::ExtractText { output, page } => {
            let path = cli_selector_path(&cli.selector)?;
            check_allowed(&config, &path)?;
            let reader = PdfReader::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            let document = PdfDocument::new(reader);
            let analyzer = Analyzer::new(AnalyzerOptions::default(), config.text_legacy);
            let result = analyzer
                .analyze(&document, FileStructureLabel::Original)
                .map_err(to_anyhow)?;

            let pages: Vec<_> = match page {
                Some(n) => result.pages.iter().filter(|p| p.page_number as usize == n).collect(),
                None => result.pages.iter().collect(),
            };
            let full_text = pages
                .iter()
                .map(|p| p.text_info.page_text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");

            match output {
                Some(path) => {
                    std::fs::write(&path, &full_text)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("text extracted to: {}", path.display());
                }
                None => println!("{full_text}"),
            }
        }

        Commands::Load {
            mode,
            input_file,
            input_dir,
            num_workers,
        } => {
            if let Some(p) = &input_file {
                check_allowed(&config, p)?;
            }
            if let Some(p) = &input_dir {
                check_allowed(&config, p)?;
            }
            let paths = gather_pdf_paths(input_file.as_deref(), input_dir.as_deref())?;
            if paths.is_empty() {
                return Err(user_error("no PDF files found to load"));
            }

            let store = open_store(&config)?;
            let analyzer = Analyzer::new(AnalyzerOptions::default(), config.text_legacy);
            let options = IngestOptions::default()
                .with_num_workers(num_workers.unwrap_or(config.num_workers))
                .with_extraction_mode(mode.into());
            let pipeline = IngestPipeline::new(&store, analyzer, options);
            let summary = pipeline.run(paths);
            print_ingest_summary(&store, &summary);

            if summary.failed > 0 {
                return Err(anyhow::anyhow!(
                    "{} of {} files failed to load",
                    summary.failed,
                    summary.total
                ));
            }
        }

        Commands::Cache { action } => {
            let store = open_store(&config)?;
            match action {
                CacheAction::List => {
                    print_cache_entries(&store.list().map_err(to_anyhow)?);
                }
                CacheAction::Stats => {
                    let stats = store.stats().map_err(to_anyhow)?;
                    println!("caches: {}", stats.total_caches);
                    println!("pages: {}", stats.total_pages);
                    println!("bytes stored: {}", stats.total_bytes_stored);
                    println!("encrypted: {}", stats.encrypted_count);
                }
                CacheAction::Clear { confirm } => {
                    if !confirm {
                        return Err(user_error(
                            "cache clear is destructive; pass --confirm to proceed",
                        ));
                    }
                    store.clear().map_err(to_anyhow)?;
                    println!("cache cleared");
                }
                CacheAction::Remove => {
                    let selector = cli_selector(&cli.selector)?;
                    let ids = resolve_selector(&store, &selector)?;
                    let mut removed = 0;
                    for id in &ids {
                        if store.remove(&id.to_string()).map_err(to_anyhow)? {
                            removed += 1;
                        }
                    }
                    println!("removed {removed} of {} matched entries", ids.len());
                }
                CacheAction::Find => {
                    let selector = cli_selector(&cli.selector)?;
                    let ids = resolve_selector(&store, &selector)?;
                    let entries = store.list().map_err(to_anyhow)?;
                    let matched: Vec<_> = entries.into_iter().filter(|e| ids.contains(&e.id)).collect();
                    print_cache_entries(&matched);
                }
                CacheAction::Top {
                    field,
                    top,
                    sample,
                    last,
                    since,
                } => {
                    let values = match since {
                        Some(since) => top_values_since(&store, &field, top, sample, &since)?,
                        None => store
                            .top_values(&field, top, sample, last.unwrap_or(0))
                            .map_err(to_anyhow)?,
                    };
                    for v in values {
                        println!("{}\t{}\t{:?}", v.value, v.count, v.sample_cache_ids);
                    }
                }
            }
        }

        Commands::Find {
            text,
            header,
            footer,
            docs,
            pages,
            limit,
            format,
        } => {
            let store = open_store(&config)?;
            let selector = cli_selector(&cli.selector)?;
            let ids = resolve_selector(&store, &selector)?;

            let scope = if header {
                QueryScope::Headers
            } else if footer {
                QueryScope::Footers
            } else if docs {
                QueryScope::Metadata
            } else {
                QueryScope::Pages
            };

            let options = QueryOptions {
                scope,
                not_words: Vec::new(),
                limit,
            };
            let engine = QueryEngine::new(&store);
            let mut result = engine.search(&ids, &text, &options).map_err(to_anyhow)?;

            if let Some(range) = &pages {
                let (lo, hi) = parse_page_range(range)?;
                result
                    .matches
                    .retain(|m| m.page_number.map(|p| p >= lo && p <= hi).unwrap_or(false));
            }

            print_query_result(&result, format);
        }

        Commands::Diff { template, target } => {
            check_allowed(&config, &template)?;
            check_allowed(&config, &target)?;
            let a_bytes = std::fs::read(&template)
                .with_context(|| format!("failed to read {}", template.display()))?;
            let b_bytes = std::fs::read(&target)
                .with_context(|| format!("failed to read {}", target.display()))?;
            let differencer = Differencer::new(Analyzer::new(AnalyzerOptions::default(), config.text_legacy));
            let report = differencer.diff_pair(&a_bytes, &b_bytes, false).map_err(to_anyhow)?;
            print_diff_report(&report, OutputFormat::Txt);
        }

        Commands::TrueDiff { a, b } => {
            check_allowed(&config, &a)?;
            check_allowed(&config, &b)?;
            let a_bytes = std::fs::read(&a).with_context(|| format!("failed to read {}", a.display()))?;
            let b_bytes = std::fs::read(&b).with_context(|| format!("failed to read {}", b.display()))?;
            let differencer = Differencer::new(Analyzer::new(AnalyzerOptions::default(), config.text_legacy));
            let report = differencer.diff_pair(&a_bytes, &b_bytes, true).map_err(to_anyhow)?;
            print_diff_report(&report, OutputFormat::Txt);
        }

        Commands::LastSession { format } => {
            let path = cli_selector_path(&cli.selector)?;
            check_allowed(&config, &path)?;
            let bytes = std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
            let differencer = Differencer::new(Analyzer::new(AnalyzerOptions::default(), config.text_legacy));
            let report = differencer.last_session(&bytes).map_err(to_anyhow)?;
            print_incremental_report(&report, format);
        }

        Commands::EnhancedLastSession { format } => {
            let path = cli_selector_path(&cli.selector)?;
            check_allowed(&config, &path)?;
            let bytes = std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
            let differencer = Differencer::new(Analyzer::new(AnalyzerOptions::default(), config.text_legacy));
            let report = differencer.enhanced_last_session(&bytes).map_err(to_anyhow)?;
            print_enhanced_report(&report, format);
        }

        Commands::TsLastSession { format } => {
            let path = cli_selector_path(&cli.selector)?;
            check_allowed(&config, &path)?;
            let bytes = std::fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
            let differencer = Differencer::new(Analyzer::new(AnalyzerOptions::default(), config.text_legacy));
            let report = differencer.timestamp_last_session(&bytes).map_err(to_anyhow)?;
            print_timestamp_report(&report, format);
        }

        Commands::PipelineTjpb {
            input_dir,
            output,
            split_anexos,
            pg_uri,
        } => {
            if pg_uri.is_some() {
                return Err(user_error(
                    "--pg-uri is not supported in this build: no synchronous Postgres client \
                     is part of this engine's dependency stack",
                ));
            }
            check_allowed(&config, &input_dir)?;
            let paths = gather_pdf_paths(None, Some(input_dir.as_path()))?;
            if paths.is_empty() {
                return Err(user_error(format!("no PDF files found under {}", input_dir.display())));
            }

            let (anexos, principal): (Vec<PathBuf>, Vec<PathBuf>) = if split_anexos {
                paths.into_iter().partition(|p| {
                    p.file_stem()
                        .and_then(|s| s.to_str())
                        .map(|s| s.to_lowercase().contains("anexo"))
                        .unwrap_or(false)
                })
            } else {
                (Vec::new(), paths)
            };

            let store = open_store(&config)?;
            let analyzer = Analyzer::new(AnalyzerOptions::default(), config.text_legacy);
            let options = IngestOptions::default().with_num_workers(config.num_workers);
            let pipeline = IngestPipeline::new(&store, analyzer, options);

            let principal_summary = pipeline.run(principal);
            let anexos_summary = if split_anexos {
                Some(pipeline.run(anexos))
            } else {
                None
            };

            let to_json = |s: &IngestSummary| {
                serde_json::json!({
                    "total": s.total,
                    "successful": s.successful,
                    "failed": s.failed,
                    "cancelled": s.cancelled,
                })
            };
            let report = serde_json::json!({
                "principal": to_json(&principal_summary),
                "anexos": anexos_summary.as_ref().map(to_json),
            });
            let rendered = serde_json::to_string_pretty(&report)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("pipeline report written to {}", path.display());
                }
                None => println!("{rendered}"),
            }

            if principal_summary.failed > 0 || anexos_summary.as_ref().map(|s| s.failed > 0).unwrap_or(false) {
                return Err(anyhow::anyhow!("one or more files failed to ingest"));
            }
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(&config);

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            if e.downcast_ref::<UserError>().is_some() {
                ExitCode::from(1)
            } else {
                ExitCode::from(2)
            }
        }
    }
}
