//! Runtime configuration assembled once at process start.
//!
//! The source kept configuration as a process-wide singleton; this crate
//! threads a single [`RuntimeConfig`] value through ingestion and query
//! entry points instead (see design note on process-wide singletons).

use std::path::PathBuf;

/// Effective configuration for one `fpdf` invocation.
///
/// Built by the CLI from environment variables layered under explicit
/// flags (flags win). Library code never reads the process environment
/// directly; it only consumes this struct.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// `FPDF_DEBUG`
    pub debug: bool,
    /// `FPDF_ALLOWED_DIRS`, colon-separated. Empty means unrestricted.
    pub allowed_dirs: Vec<PathBuf>,
    /// `FPDF_DEFAULT_WORKERS` / `--num-workers`, resolved and clamped to [1, 16].
    pub num_workers: usize,
    /// `FPDF_CACHE_DIR`
    pub cache_dir: PathBuf,
    /// `FPDF_TEXT_LEGACY`
    pub text_legacy: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            debug: false,
            allowed_dirs: Vec::new(),
            num_workers: default_worker_count(),
            cache_dir: PathBuf::from(".fpdf-cache"),
            text_legacy: false,
        }
    }
}

/// Hardware-thread count bounded to [1, 16], per the concurrency model.
pub fn default_worker_count() -> usize {
    num_cpus::get().clamp(1, 16)
}

impl RuntimeConfig {
    /// Build a config from the current process environment, with no CLI
    /// overrides applied. The CLI binary calls this first, then overwrites
    /// fields with any flags the user passed explicitly.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if std::env::var("FPDF_DEBUG").as_deref() == Ok("1") {
            config.debug = true;
        }

        if let Ok(dirs) = std::env::var("FPDF_ALLOWED_DIRS") {
            config.allowed_dirs = dirs
                .split(':')
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
        }

        if let Ok(workers) = std::env::var("FPDF_DEFAULT_WORKERS") {
            if let Ok(n) = workers.parse::<usize>() {
                config.num_workers = n.clamp(1, 16);
            }
        }

        if let Ok(dir) = std::env::var("FPDF_CACHE_DIR") {
            config.cache_dir = PathBuf::from(dir);
        }

        if std::env::var("FPDF_TEXT_LEGACY").as_deref() == Ok("1") {
            config.text_legacy = true;
        }

        config
    }

    /// Validate that `path` is inside one of `allowed_dirs`. When
    /// `allowed_dirs` is empty, path validation is a no-op (per §6: "path
    /// validation is either off or limited to the current working
    /// directory according to configuration" — this crate's default is
    /// off).
    pub fn check_path_allowed(&self, path: &std::path::Path) -> bool {
        if self.allowed_dirs.is_empty() {
            return true;
        }
        let Ok(canonical) = path.canonicalize() else {
            return false;
        };
        self.allowed_dirs.iter().any(|dir| {
            dir.canonicalize()
                .map(|d| canonical.starts_with(d))
                .unwrap_or(false)
        })
    }
}
