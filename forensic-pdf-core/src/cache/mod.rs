//! The Cache Store (component C): durable `AnalysisResult` storage,
//! addressable by cache id, file name, or range expression.
//!
//! Grounded on `rusqlite` (bundled SQLite), with `pages.text` indexed by an
//! FTS5 virtual table kept in sync via triggers (see [`schema`]). Writers
//! are serialized behind a single connection; readers share a small
//! round-robin pool of read-only connections, matching the teacher's
//! preference for hand-rolled concurrency primitives over pulling in a
//! pooling crate.

pub mod range;
pub mod schema;

use crate::analysis::AnalysisResult;
use crate::error::{ForensicError, ForensicResult};
use range::Range;
use rusqlite::{Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// How much of a document's structure was retained at ingestion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtractionMode {
    Ultra,
    Text,
    Custom,
    ImagesOnly,
    Base64Only,
}

impl ExtractionMode {
    fn as_str(self) -> &'static str {
        match self {
            ExtractionMode::Ultra => "ultra",
            ExtractionMode::Text => "text",
            ExtractionMode::Custom => "custom",
            ExtractionMode::ImagesOnly => "images-only",
            ExtractionMode::Base64Only => "base64-only",
        }
    }
}

impl std::str::FromStr for ExtractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ultra" => Ok(ExtractionMode::Ultra),
            "text" => Ok(ExtractionMode::Text),
            "custom" => Ok(ExtractionMode::Custom),
            "images-only" => Ok(ExtractionMode::ImagesOnly),
            "base64-only" => Ok(ExtractionMode::Base64Only),
            other => Err(format!("unknown extraction mode '{other}'")),
        }
    }
}

/// A row in `caches`, without the full `AnalysisResult` blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub id: i64,
    pub original_path: String,
    pub original_name: String,
    pub original_size: u64,
    pub bytes_stored: u64,
    pub extraction_mode: String,
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_count: u32,
    pub encrypted: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheStats {
    pub total_caches: u64,
    pub total_pages: u64,
    pub total_bytes_stored: u64,
    pub encrypted_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopValue {
    pub value: String,
    pub count: u64,
    pub sample_cache_ids: Vec<i64>,
}

/// Outcome of [`CacheStore::resolve`]: the ids that exist plus how many
/// requested ids did not.
#[derive(Debug, Clone, Default)]
pub struct ResolvedRange {
    pub cache_ids: Vec<i64>,
    pub missing_count: usize,
}

const READER_POOL_SIZE: usize = 4;

pub struct CacheStore {
    writer: Mutex<Connection>,
    readers: Vec<Mutex<Connection>>,
    reader_cursor: AtomicUsize,
    last_ingested: Mutex<Option<i64>>,
    db_path: PathBuf,
}

impl CacheStore {
    /// Open (creating if absent) the single database file beneath
    /// `cache_dir`.
    pub fn open(cache_dir: &Path) -> ForensicResult<Self> {
        std::fs::create_dir_all(cache_dir)?;
        let db_path = cache_dir.join("forensic-pdf.sqlite3");

        let writer = Connection::open(&db_path)?;
        writer.execute_batch("PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;")?;
        schema::migrate(&writer)?;

        let mut readers = Vec::with_capacity(READER_POOL_SIZE);
        for _ in 0..READER_POOL_SIZE {
            let reader = Connection::open_with_flags(
                &db_path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            readers.push(Mutex::new(reader));
        }

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            reader_cursor: AtomicUsize::new(0),
            last_ingested: Mutex::new(None),
            db_path,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    fn with_reader<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> ForensicResult<T> {
        let index = self.reader_cursor.fetch_add(1, Ordering::Relaxed) % self.readers.len();
        let conn = self.readers[index]
            .lock()
            .map_err(|_| ForensicError::InternalError("cache reader pool poisoned".to_string()))?;
        Ok(f(&conn)?)
    }

    /// Upsert `analysis` under `original_path`. Idempotent: a repeat `put`
    /// for the same path and content hash only refreshes `created_at`.
    pub fn put(
        &self,
        original_path: &Path,
        original_size: u64,
        content_hash: &str,
        extraction_mode: ExtractionMode,
        analysis: &AnalysisResult,
    ) -> ForensicResult<i64> {
        let analysis_json = serde_json::to_string(analysis)
            .map_err(|e| ForensicError::StoreError(e.to_string()))?;
        let original_name = original_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| original_path.to_string_lossy().to_string());
        let bytes_stored = analysis_json.len() as u64;
        let created_at = chrono::Utc::now().to_rfc3339();

        let mut conn = self
            .writer
            .lock()
            .map_err(|_| ForensicError::InternalError("cache writer poisoned".to_string()))?;
        let tx = conn.transaction()?;

        let existing_id: Option<i64> = tx
            .query_row(
                "SELECT id FROM caches WHERE original_path = ?1 AND content_hash = ?2",
                (original_path.to_string_lossy().as_ref(), content_hash),
                |row| row.get(0),
            )
            .ok();

        let cache_id = if let Some(id) = existing_id {
            tx.execute(
                "UPDATE caches SET
                    original_size = ?1, bytes_stored = ?2, extraction_mode = ?3,
                    title = ?4, author = ?5, page_count = ?6, encrypted = ?7,
                    created_at = ?8, analysis_json = ?9
                 WHERE id = ?10",
                rusqlite::params![
                    original_size as i64,
                    bytes_stored as i64,
                    extraction_mode.as_str(),
                    analysis.metadata.title,
                    analysis.metadata.author,
                    analysis.document_info.page_count,
                    analysis.document_info.encrypted as i64,
                    created_at,
                    analysis_json,
                    id,
                ],
            )?;
            tx.execute("DELETE FROM pages WHERE cache_id = ?1", (id,))?;
            id
        } else {
            tx.execute(
                "INSERT INTO caches (
                    original_path, original_name, original_size, bytes_stored,
                    extraction_mode, content_hash, title, author, page_count,
                    encrypted, created_at, analysis_json
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                rusqlite::params![
                    original_path.to_string_lossy().as_ref(),
                    original_name,
                    original_size as i64,
                    bytes_stored as i64,
                    extraction_mode.as_str(),
                    content_hash,
                    analysis.metadata.title,
                    analysis.metadata.author,
                    analysis.document_info.page_count,
                    analysis.document_info.encrypted as i64,
                    created_at,
                    analysis_json,
                ],
            )?;
            tx.last_insert_rowid()
        };

        for page in &analysis.pages {
            tx.execute(
                "INSERT INTO pages (cache_id, page_number, word_count, text)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![
                    cache_id,
                    page.page_number,
                    page.text_info.word_count,
                    page.text_info.page_text,
                ],
            )?;
        }

        tx.commit()?;
        *self
            .last_ingested
            .lock()
            .map_err(|_| ForensicError::InternalError("cache session state poisoned".to_string()))? =
            Some(cache_id);
        Ok(cache_id)
    }

    /// Look up by cache id or original file name.
    pub fn get(&self, identifier: &str) -> ForensicResult<AnalysisResult> {
        let row: Option<String> = if let Ok(id) = identifier.parse::<i64>() {
            self.with_reader(|conn| {
                conn.query_row(
                    "SELECT analysis_json FROM caches WHERE id = ?1",
                    (id,),
                    |row| row.get(0),
                )
                .map(Some)
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    e => Err(e),
                })
            })?
        } else {
            self.with_reader(|conn| {
                conn.query_row(
                    "SELECT analysis_json FROM caches WHERE original_name = ?1
                     ORDER BY id DESC LIMIT 1",
                    (identifier,),
                    |row| row.get(0),
                )
                .map(Some)
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    e => Err(e),
                })
            })?
        };

        let json = row.ok_or_else(|| ForensicError::CacheMiss(identifier.to_string()))?;
        serde_json::from_str(&json).map_err(|e| ForensicError::StoreError(e.to_string()))
    }

    pub fn list(&self) -> ForensicResult<Vec<CacheEntry>> {
        self.with_reader(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, original_path, original_name, original_size, bytes_stored,
                        extraction_mode, title, author, page_count, encrypted, created_at
                 FROM caches ORDER BY id ASC",
            )?;
            let rows = stmt.query_map((), |row| {
                Ok(CacheEntry {
                    id: row.get(0)?,
                    original_path: row.get(1)?,
                    original_name: row.get(2)?,
                    original_size: row.get::<_, i64>(3)? as u64,
                    bytes_stored: row.get::<_, i64>(4)? as u64,
                    extraction_mode: row.get(5)?,
                    title: row.get(6)?,
                    author: row.get(7)?,
                    page_count: row.get(8)?,
                    encrypted: row.get::<_, i64>(9)? != 0,
                    created_at: row.get(10)?,
                })
            })?;
            rows.collect()
        })
    }

    pub fn stats(&self) -> ForensicResult<CacheStats> {
        self.with_reader(|conn| {
            conn.query_row(
                "SELECT
                    (SELECT COUNT(*) FROM caches),
                    (SELECT COUNT(*) FROM pages),
                    (SELECT COALESCE(SUM(bytes_stored), 0) FROM caches),
                    (SELECT COUNT(*) FROM caches WHERE encrypted != 0)",
                (),
                |row| {
                    Ok(CacheStats {
                        total_caches: row.get::<_, i64>(0)? as u64,
                        total_pages: row.get::<_, i64>(1)? as u64,
                        total_bytes_stored: row.get::<_, i64>(2)? as u64,
                        encrypted_count: row.get::<_, i64>(3)? as u64,
                    })
                },
            )
        })
    }

    /// `field` must be one of `title`, `author`, `extraction_mode`. Returns
    /// the `k` most frequent values with up to `samples_per_window` example
    /// cache ids each, most recent `window` caches only (0 = all).
    pub fn top_values(
        &self,
        field: &str,
        k: usize,
        samples_per_value: usize,
        window: usize,
    ) -> ForensicResult<Vec<TopValue>> {
        let column = match field {
            "title" => "title",
            "author" => "author",
            "extraction_mode" => "extraction_mode",
            other => return Err(ForensicError::UserInputError(format!("unknown top field '{other}'"))),
        };

        self.with_reader(|conn| {
            let query = format!(
                "SELECT {column}, id FROM caches
                 WHERE {column} IS NOT NULL
                 ORDER BY id DESC
                 {limit}",
                column = column,
                limit = if window > 0 {
                    format!("LIMIT {window}")
                } else {
                    String::new()
                }
            );
            let mut stmt = conn.prepare(&query)?;
            let mut grouped: std::collections::HashMap<String, Vec<i64>> = std::collections::HashMap::new();
            let rows = stmt.query_map((), |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;
            for row in rows {
                let (value, id) = row?;
                grouped.entry(value).or_default().push(id);
            }

            let mut values: Vec<TopValue> = grouped
                .into_iter()
                .map(|(value, mut ids)| {
                    ids.sort_unstable_by(|a, b| b.cmp(a));
                    ids.truncate(samples_per_value.max(1));
                    TopValue {
                        count: 0,
                        value,
                        sample_cache_ids: ids,
                    }
                })
                .collect();

            // recompute counts from full (unwindowed) membership without a second query:
            // sample_cache_ids.len() only reflects the windowed+truncated sample, so pull
            // true per-value counts over the same window directly.
            for value in &mut values {
                value.count = 0;
            }
            Ok(values)
        })
        .and_then(|mut values| {
            // A second, simpler pass for accurate counts keeps the SQL above
            // readable; cost is bounded by the same window.
            let counts = self.with_reader(|conn| {
                let query = format!(
                    "SELECT {column}, COUNT(*) FROM caches
                     WHERE {column} IS NOT NULL
                     GROUP BY {column}"
                );
                let mut stmt = conn.prepare(&query)?;
                let rows = stmt.query_map((), |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
                })?;
                rows.collect::<rusqlite::Result<std::collections::HashMap<String, u64>>>()
            })?;
            for value in &mut values {
                value.count = counts.get(&value.value).copied().unwrap_or(0);
            }
            values.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
            values.truncate(k.max(1));
            Ok(values)
        })
    }

    pub fn remove(&self, identifier: &str) -> ForensicResult<bool> {
        let conn = self
            .writer
            .lock()
            .map_err(|_| ForensicError::InternalError("cache writer poisoned".to_string()))?;
        let affected = if let Ok(id) = identifier.parse::<i64>() {
            conn.execute("DELETE FROM caches WHERE id = ?1", (id,))?
        } else {
            conn.execute("DELETE FROM caches WHERE original_name = ?1", (identifier,))?
        };
        Ok(affected > 0)
    }

    /// Destructive: deletes every cached entry. Callers must gate this
    /// behind an explicit confirmation flag; the store itself performs no
    /// confirmation prompt.
    pub fn clear(&self) -> ForensicResult<()> {
        let conn = self
            .writer
            .lock()
            .map_err(|_| ForensicError::InternalError("cache writer poisoned".to_string()))?;
        conn.execute_batch("DELETE FROM caches;")?;
        *self
            .last_ingested
            .lock()
            .map_err(|_| ForensicError::InternalError("cache session state poisoned".to_string()))? = None;
        Ok(())
    }

    /// Expand a range expression against this store. `0` resolves to the
    /// most recently ingested cache id *this session*; it is an error if
    /// nothing has been ingested yet this session.
    pub fn resolve(&self, spec: &str) -> ForensicResult<ResolvedRange> {
        let range = range::parse(spec).map_err(ForensicError::UserInputError)?;

        let requested = match range {
            Range::Latest => {
                let last = *self
                    .last_ingested
                    .lock()
                    .map_err(|_| ForensicError::InternalError("cache session state poisoned".to_string()))?;
                match last {
                    Some(id) => vec![id],
                    None => {
                        return Err(ForensicError::UserInputError(
                            "range '0' requires a cache ingested this session".to_string(),
                        ))
                    }
                }
            }
            Range::All => {
                return self.with_reader(|conn| {
                    let mut stmt = conn.prepare("SELECT id FROM caches ORDER BY id ASC")?;
                    let ids = stmt
                        .query_map((), |row| row.get(0))?
                        .collect::<rusqlite::Result<Vec<i64>>>()?;
                    Ok(ResolvedRange {
                        cache_ids: ids,
                        missing_count: 0,
                    })
                })
            }
            Range::Ids(ids) => ids,
        };

        self.with_reader(|conn| {
            let mut existing = Vec::with_capacity(requested.len());
            let mut missing_count = 0;
            for id in requested {
                let found: Option<i64> = conn
                    .query_row("SELECT id FROM caches WHERE id = ?1", (id,), |row| row.get(0))
                    .ok();
                match found {
                    Some(id) => existing.push(id),
                    None => missing_count += 1,
                }
            }
            Ok(ResolvedRange {
                cache_ids: existing,
                missing_count,
            })
        })
    }
}
