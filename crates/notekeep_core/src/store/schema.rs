//! Connection bootstrap for the `kv` table.
//!
//! # Invariants
//! - `PRAGMA user_version` is `0` (fresh file) or `SCHEMA_VERSION`.
//! - A fresh database gets the table and version stamp in one transaction.

use super::{StoreError, StoreResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// `user_version` stamped on databases holding the `kv` table.
pub const SCHEMA_VERSION: u32 = 1;

const KV_SCHEMA: &str = include_str!("kv_schema.sql");

/// Opens a database file, creating the `kv` table when missing.
pub fn open_connection(path: impl AsRef<Path>) -> StoreResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// Opens a private in-memory database with the `kv` table.
pub fn open_in_memory_connection() -> StoreResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

/// Reads `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

fn open_with(
    mode: &'static str,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StoreResult<Connection> {
    let started_at = Instant::now();
    let conn = open()
        .map_err(StoreError::from)
        .and_then(|conn| ensure_schema(&conn).map(|()| conn));

    match conn {
        Ok(conn) => {
            info!(
                "event=store_open module=store status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=store_open module=store status=error mode={mode} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn ensure_schema(conn: &Connection) -> StoreResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    match schema_version(conn)? {
        SCHEMA_VERSION => Ok(()),
        0 => {
            let tx = conn.unchecked_transaction()?;
            tx.execute_batch(KV_SCHEMA)?;
            tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
            tx.commit()?;
            Ok(())
        }
        found => Err(StoreError::UnsupportedSchemaVersion {
            found,
            supported: SCHEMA_VERSION,
        }),
    }
}
