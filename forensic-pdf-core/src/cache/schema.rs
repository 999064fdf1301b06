//! Cache store DDL and schema version gate.
//!
//! The full `AnalysisResult` is stored as a JSON blob per cache row (its
//! substructures already round-trip through `serde`); `pages` is kept as a
//! separate normalized table purely so `page_fts` can index page text
//! without deserializing the blob on every search.

use rusqlite::Connection;

/// Bumped whenever a migration below changes column shape in a way old
/// readers can't tolerate. Stored in `schema_meta` so `CacheStore::open`
/// can refuse to operate on a store from a future/incompatible version.
pub const CURRENT_VERSION: i64 = 1;

pub fn migrate(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS schema_meta (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS caches (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            original_path   TEXT NOT NULL,
            original_name   TEXT NOT NULL,
            original_size   INTEGER NOT NULL,
            bytes_stored    INTEGER NOT NULL,
            extraction_mode TEXT NOT NULL,
            content_hash    TEXT NOT NULL,
            title           TEXT,
            author          TEXT,
            page_count      INTEGER NOT NULL,
            encrypted       INTEGER NOT NULL,
            created_at      TEXT NOT NULL,
            analysis_json   TEXT NOT NULL,
            UNIQUE(original_path, content_hash)
        );

        CREATE TABLE IF NOT EXISTS processes (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name_stem  TEXT NOT NULL UNIQUE
        );

        CREATE TABLE IF NOT EXISTS documents (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            cache_id   INTEGER NOT NULL REFERENCES caches(id) ON DELETE CASCADE,
            label      TEXT NOT NULL,
            doc_type   TEXT,
            page_start INTEGER NOT NULL,
            page_end   INTEGER NOT NULL
        );

        CREATE TABLE IF NOT EXISTS pages (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            cache_id    INTEGER NOT NULL REFERENCES caches(id) ON DELETE CASCADE,
            page_number INTEGER NOT NULL,
            word_count  INTEGER NOT NULL,
            text        TEXT NOT NULL,
            UNIQUE(cache_id, page_number)
        );

        CREATE VIRTUAL TABLE IF NOT EXISTS page_fts USING fts5(
            text,
            content='pages',
            content_rowid='id'
        );

        CREATE TRIGGER IF NOT EXISTS pages_ai AFTER INSERT ON pages BEGIN
            INSERT INTO page_fts(rowid, text) VALUES (new.id, new.text);
        END;

        CREATE TRIGGER IF NOT EXISTS pages_ad AFTER DELETE ON pages BEGIN
            INSERT INTO page_fts(page_fts, rowid, text) VALUES ('delete', old.id, old.text);
        END;

        CREATE TRIGGER IF NOT EXISTS pages_au AFTER UPDATE ON pages BEGIN
            INSERT INTO page_fts(page_fts, rowid, text) VALUES ('delete', old.id, old.text);
            INSERT INTO page_fts(rowid, text) VALUES (new.id, new.text);
        END;
        ",
    )?;

    conn.execute(
        "INSERT INTO schema_meta (key, value) VALUES ('schema_version', ?1)
         ON CONFLICT(key) DO NOTHING",
        (CURRENT_VERSION.to_string(),),
    )?;

    Ok(())
}

pub fn stored_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    conn.query_row(
        "SELECT value FROM schema_meta WHERE key = 'schema_version'",
        (),
        |row| row.get::<_, String>(0),
    )
    .map(|v| v.parse().ok())
    .or(Ok(None))
}
