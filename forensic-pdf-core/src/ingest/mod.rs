//! Ingestion pipeline (component F, §5 concurrency/resource model): a
//! bounded worker pool that opens, analyzes and caches many PDFs at once.
//!
//! Grounded on the teacher's `batch::{worker, progress, result}` triad: a
//! channel-fed thread pool, atomic progress counters, and a `JobResult`
//! shaped outcome enum. Generalized so each worker pulls one PDF path at a
//! time from the [`crate::pool::ReaderPool`] instead of one `BatchJob`
//! variant, analyzes it with [`Analyzer`], and commits the result through
//! [`CacheStore::put`]. Uses `std::thread::scope` rather than `Arc`-wrapping
//! every collaborator, since the pipeline already only lives for the
//! duration of one `run` call.

use crate::analysis::Analyzer;
use crate::cache::{CacheStore, ExtractionMode};
use crate::pool::ReaderPool;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// Options for one ingestion run.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Worker count, clamped to `[1, 16]` per §5; defaults to the host's
    /// hardware thread count.
    pub num_workers: usize,
    pub extraction_mode: ExtractionMode,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get().clamp(1, 16),
            extraction_mode: ExtractionMode::Text,
        }
    }
}

impl IngestOptions {
    pub fn with_num_workers(mut self, n: usize) -> Self {
        self.num_workers = n.clamp(1, 16);
        self
    }

    pub fn with_extraction_mode(mut self, mode: ExtractionMode) -> Self {
        self.extraction_mode = mode;
        self
    }
}

/// Outcome of ingesting a single path.
#[derive(Debug, Clone)]
pub enum IngestOutcome {
    Success {
        path: PathBuf,
        cache_id: i64,
        duration: Duration,
    },
    Failed {
        path: PathBuf,
        duration: Duration,
        error: String,
    },
    /// The cancellation token was set before or during this PDF's analysis.
    /// No cache row was committed for it.
    Cancelled { path: PathBuf },
}

impl IngestOutcome {
    pub fn path(&self) -> &Path {
        match self {
            IngestOutcome::Success { path, .. }
            | IngestOutcome::Failed { path, .. }
            | IngestOutcome::Cancelled { path } => path,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, IngestOutcome::Success { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, IngestOutcome::Failed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, IngestOutcome::Cancelled { .. })
    }
}

/// Point-in-time snapshot of an ingestion run's progress.
#[derive(Debug, Clone)]
pub struct IngestProgressInfo {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub running: usize,
}

impl IngestProgressInfo {
    pub fn is_complete(&self) -> bool {
        self.completed + self.failed + self.cancelled >= self.total
    }
}

/// Lock-free progress counters shared between the run loop and its workers.
pub struct IngestProgress {
    total: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
    cancelled: AtomicUsize,
    running: AtomicUsize,
}

impl Default for IngestProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestProgress {
    pub fn new() -> Self {
        Self {
            total: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            cancelled: AtomicUsize::new(0),
            running: AtomicUsize::new(0),
        }
    }

    fn add_job(&self) {
        self.total.fetch_add(1, Ordering::SeqCst);
    }

    fn start_job(&self) {
        self.running.fetch_add(1, Ordering::SeqCst);
    }

    fn complete_job(&self) {
        self.running.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
    }

    fn fail_job(&self) {
        self.running.fetch_sub(1, Ordering::SeqCst);
        self.failed.fetch_add(1, Ordering::SeqCst);
    }

    fn cancel_job(&self, was_running: bool) {
        if was_running {
            self.running.fetch_sub(1, Ordering::SeqCst);
        }
        self.cancelled.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get_info(&self) -> IngestProgressInfo {
        IngestProgressInfo {
            total: self.total.load(Ordering::SeqCst),
            completed: self.completed.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            cancelled: self.cancelled.load(Ordering::SeqCst),
            running: self.running.load(Ordering::SeqCst),
        }
    }
}

/// Summary of a finished ingestion run. `results` is ordered to match the
/// input path order, independent of the non-deterministic completion order
/// across workers (§5).
#[derive(Debug, Clone)]
pub struct IngestSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub duration: Duration,
    pub results: Vec<IngestOutcome>,
}

enum IngestError {
    Failed(String),
    Cancelled,
}

/// The worker-pool ingestion pipeline.
pub struct IngestPipeline<'a> {
    store: &'a CacheStore,
    reader_pool: ReaderPool,
    analyzer: Analyzer,
    options: IngestOptions,
    cancelled: Arc<AtomicBool>,
    progress: Arc<IngestProgress>,
}

impl<'a> IngestPipeline<'a> {
    pub fn new(store: &'a CacheStore, analyzer: Analyzer, options: IngestOptions) -> Self {
        Self {
            store,
            reader_pool: ReaderPool::new(),
            analyzer,
            options,
            cancelled: Arc::new(AtomicBool::new(false)),
            progress: Arc::new(IngestProgress::new()),
        }
    }

    /// Signal every worker to stop picking up new PDFs and to abandon the
    /// one it currently holds once it's done with the current page. Already
    /// committed cache entries are unaffected.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn progress(&self) -> IngestProgressInfo {
        self.progress.get_info()
    }

    /// Ingest every path in `paths`, blocking until each has either been
    /// cached, failed, or been cancelled. Worker count is
    /// `options.num_workers`, clamped to the number of paths given.
    pub fn run(&self, paths: Vec<PathBuf>) -> IngestSummary {
        let start = Instant::now();
        let total = paths.len();
        for _ in 0..total {
            self.progress.add_job();
        }

        if total == 0 {
            return IngestSummary {
                total: 0,
                successful: 0,
                failed: 0,
                cancelled: 0,
                duration: start.elapsed(),
                results: Vec::new(),
            };
        }

        let num_workers = self.options.num_workers.min(total).max(1);
        let (job_tx, job_rx) = mpsc::channel::<(usize, PathBuf)>();
        let job_rx = Mutex::new(job_rx);
        let (result_tx, result_rx) = mpsc::channel::<(usize, IngestOutcome)>();

        for (idx, path) in paths.into_iter().enumerate() {
            let _ = job_tx.send((idx, path));
        }
        drop(job_tx);

        thread::scope(|scope| {
            for _ in 0..num_workers {
                let job_rx = &job_rx;
                let result_tx = result_tx.clone();
                let cancelled = Arc::clone(&self.cancelled);
                let progress = Arc::clone(&self.progress);
                let store = self.store;
                let reader_pool = &self.reader_pool;
                let analyzer = &self.analyzer;
                let extraction_mode = self.options.extraction_mode;

                scope.spawn(move || loop {
                    let next = job_rx.lock().unwrap().recv();
                    let (idx, path) = match next {
                        Ok(job) => job,
                        Err(_) => break,
                    };

                    if cancelled.load(Ordering::SeqCst) {
                        progress.cancel_job(false);
                        let _ = result_tx.send((idx, IngestOutcome::Cancelled { path }));
                        continue;
                    }

                    progress.start_job();
                    let job_start = Instant::now();
                    let outcome = ingest_one(
                        store,
                        reader_pool,
                        analyzer,
                        &path,
                        extraction_mode,
                        &cancelled,
                    );
                    let duration = job_start.elapsed();

                    let outcome = match outcome {
                        Ok(cache_id) => {
                            progress.complete_job();
                            IngestOutcome::Success {
                                path,
                                cache_id,
                                duration,
                            }
                        }
                        Err(IngestError::Cancelled) => {
                            progress.cancel_job(true);
                            IngestOutcome::Cancelled { path }
                        }
                        Err(IngestError::Failed(error)) => {
                            progress.fail_job();
                            IngestOutcome::Failed {
                                path,
                                duration,
                                error,
                            }
                        }
                    };
                    let _ = result_tx.send((idx, outcome));
                });
            }

            drop(result_tx);

            let mut ordered: Vec<Option<IngestOutcome>> = (0..total).map(|_| None).collect();
            for (idx, outcome) in result_rx {
                ordered[idx] = Some(outcome);
            }

            let results: Vec<IngestOutcome> = ordered.into_iter().flatten().collect();
            let successful = results.iter().filter(|r| r.is_success()).count();
            let failed = results.iter().filter(|r| r.is_failed()).count();
            let cancelled_count = results.iter().filter(|r| r.is_cancelled()).count();

            IngestSummary {
                total,
                successful,
                failed,
                cancelled: cancelled_count,
                duration: start.elapsed(),
                results,
            }
        })
    }
}

fn ingest_one(
    store: &CacheStore,
    reader_pool: &ReaderPool,
    analyzer: &Analyzer,
    path: &Path,
    extraction_mode: ExtractionMode,
    cancelled: &AtomicBool,
) -> Result<i64, IngestError> {
    let (handle, label) = reader_pool
        .open(path)
        .map_err(|e| IngestError::Failed(e.to_string()))?;

    if cancelled.load(Ordering::SeqCst) {
        return Err(IngestError::Cancelled);
    }

    let analysis = analyzer
        .analyze(&handle, label)
        .map_err(|e| IngestError::Failed(e.to_string()))?;

    if cancelled.load(Ordering::SeqCst) {
        return Err(IngestError::Cancelled);
    }

    let (content_hash, size) =
        content_hash_and_size(path).map_err(|e| IngestError::Failed(e.to_string()))?;

    store
        .put(path, size, &content_hash, extraction_mode, &analysis)
        .map_err(|e| IngestError::Failed(e.to_string()))
}

/// A cheap, non-cryptographic content fingerprint: good enough to notice
/// "this is the same bytes I cached before" for `put`'s idempotency check,
/// not a tamper-evidence guarantee.
fn content_hash_and_size(path: &Path) -> std::io::Result<(String, u64)> {
    let bytes = std::fs::read(path)?;
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    Ok((format!("{:016x}", hasher.finish()), bytes.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_pdf_bytes() -> Vec<u8> {
        let header = b"%PDF-1.4\n";
        let obj1_start = header.len();
        let obj1 = b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n";
        let obj2_start = obj1_start + obj1.len();
        let obj2 = b"2 0 obj\n<< /Type /Pages /Kids [] /Count 0 >>\nendobj\n";
        let xref_start = obj2_start + obj2.len();
        let xref = format!(
            "xref\n0 3\n0000000000 65535 f \n{:010} 00000 n \n{:010} 00000 n \ntrailer\n<< /Size 3 /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
            obj1_start, obj2_start, xref_start
        );

        let mut content = Vec::new();
        content.extend_from_slice(header);
        content.extend_from_slice(obj1);
        content.extend_from_slice(obj2);
        content.extend_from_slice(xref.as_bytes());
        content
    }

    #[test]
    fn ingest_options_default_bounds_workers_between_one_and_sixteen() {
        let options = IngestOptions::default();
        assert!(options.num_workers >= 1 && options.num_workers <= 16);
    }

    #[test]
    fn with_num_workers_clamps_out_of_range_values() {
        assert_eq!(IngestOptions::default().with_num_workers(0).num_workers, 1);
        assert_eq!(
            IngestOptions::default().with_num_workers(999).num_workers,
            16
        );
    }

    #[test]
    fn run_with_no_paths_returns_empty_summary() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let pipeline = IngestPipeline::new(&store, Analyzer::default(), IngestOptions::default());
        let summary = pipeline.run(Vec::new());
        assert_eq!(summary.total, 0);
        assert!(summary.results.is_empty());
    }

    #[test]
    fn run_ingests_a_minimal_pdf_and_commits_to_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let pdf_path = dir.path().join("minimal.pdf");
        std::fs::write(&pdf_path, minimal_pdf_bytes()).unwrap();

        let pipeline = IngestPipeline::new(
            &store,
            Analyzer::default(),
            IngestOptions::default().with_num_workers(2),
        );
        let summary = pipeline.run(vec![pdf_path.clone()]);

        assert_eq!(summary.total, 1);
        assert_eq!(summary.successful, 1);
        assert_eq!(summary.failed, 0);
        match &summary.results[0] {
            IngestOutcome::Success { path, .. } => assert_eq!(path, &pdf_path),
            other => panic!("expected Success, got {other:?}"),
        }

        let info = pipeline.progress();
        assert!(info.is_complete());
    }

    #[test]
    fn run_reports_failure_for_nonexistent_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let pipeline = IngestPipeline::new(&store, Analyzer::default(), IngestOptions::default());
        let summary = pipeline.run(vec![dir.path().join("does-not-exist.pdf")]);

        assert_eq!(summary.total, 1);
        assert_eq!(summary.failed, 1);
        assert!(summary.results[0].is_failed());
    }

    #[test]
    fn pre_cancelled_pipeline_reports_every_path_as_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let store = CacheStore::open(dir.path()).unwrap();
        let pdf_path = dir.path().join("minimal.pdf");
        std::fs::write(&pdf_path, minimal_pdf_bytes()).unwrap();

        let pipeline = IngestPipeline::new(&store, Analyzer::default(), IngestOptions::default());
        pipeline.cancel();
        let summary = pipeline.run(vec![pdf_path]);

        assert_eq!(summary.cancelled, 1);
        assert_eq!(summary.successful, 0);
    }
}
