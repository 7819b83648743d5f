//! Connection pool with scoped checkout
//!
//! The pool is the only long-lived storage object. Operations call
//! `pool.get()` and hold the returned [`PooledConnection`] for their own
//! duration; dropping it hands the connection back, on error paths as well.

use std::path::Path;
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use rusqlite::functions::FunctionFlags;

use crate::Result;

/// SQL function lower-casing with full Unicode rules (SQLite's `lower` is ASCII-only)
pub const UNICODE_LOWER: &str = "unicode_lower";

/// Process-wide pool of SQLite connections to one database file
pub type ConnectionPool = r2d2::Pool<SqliteConnectionManager>;

/// A connection checked out of the pool for one operation
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Pool tuning knobs
#[derive(Debug, Clone)]
pub struct PoolOptions {
    /// Upper bound on open connections
    pub max_size: u32,
    /// How long a connection waits on a locked database before failing
    pub busy_timeout: Duration,
    /// How long a checkout waits for a free or new connection
    pub connection_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 4,
            busy_timeout: Duration::from_millis(5000),
            connection_timeout: Duration::from_secs(10),
        }
    }
}

/// Open a pool on a database file (creates the file if it doesn't exist).
///
/// One connection is established before returning, so an unreachable
/// database fails here rather than on the first query.
pub fn open_pool(path: &Path, options: &PoolOptions) -> Result<ConnectionPool> {
    let busy_timeout = options.busy_timeout;
    let manager = SqliteConnectionManager::file(path)
        .with_init(move |conn| configure_connection(conn, busy_timeout));

    let pool = r2d2::Pool::builder()
        .max_size(options.max_size.max(1))
        .min_idle(Some(1))
        .connection_timeout(options.connection_timeout)
        .build(manager)?;

    tracing::debug!("Opened connection pool on {}", path.display());
    Ok(pool)
}

/// Per-connection setup: busy timeout, WAL and the `unicode_lower` function
fn configure_connection(conn: &mut Connection, busy_timeout: Duration) -> rusqlite::Result<()> {
    conn.busy_timeout(busy_timeout)?;
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|v| v.to_lowercase()))
        },
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_pool(max_size: u32) -> (tempfile::TempDir, ConnectionPool) {
        let dir = tempfile::tempdir().unwrap();
        let options = PoolOptions {
            max_size,
            connection_timeout: Duration::from_millis(500),
            ..Default::default()
        };
        let pool = open_pool(&dir.path().join("pool.db"), &options).unwrap();
        (dir, pool)
    }

    #[test]
    fn test_connection_returns_on_drop() {
        let (_dir, pool) = temp_pool(1);

        {
            let _held = pool.get().unwrap();
            // The only connection is checked out
            assert!(pool.get_timeout(Duration::from_millis(50)).is_err());
        }

        assert!(pool.get().is_ok());
    }

    #[test]
    fn test_connections_are_bounded() {
        let (_dir, pool) = temp_pool(2);
        let _a = pool.get().unwrap();
        let _b = pool.get().unwrap();

        assert!(pool.get_timeout(Duration::from_millis(50)).is_err());
        assert!(pool.state().connections <= 2);
    }

    #[test]
    fn test_connection_returns_on_error_path() {
        let (_dir, pool) = temp_pool(1);

        let failing = || -> Result<()> {
            let conn = pool.get()?;
            conn.execute("SELECT * FROM no_such_table", [])?;
            Ok(())
        };

        assert!(failing().is_err());
        assert!(pool.get_timeout(Duration::from_millis(50)).is_ok());
    }

    #[test]
    fn test_connections_use_wal() {
        let (_dir, pool) = temp_pool(1);
        let conn = pool.get().unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_unicode_lower_function() {
        let (_dir, pool) = temp_pool(2);
        let conn = pool.get().unwrap();

        let lowered: String = conn
            .query_row("SELECT unicode_lower('ÉCOLE Qubee')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(lowered, "école qubee");

        let null: Option<String> = conn
            .query_row("SELECT unicode_lower(NULL)", [], |row| row.get(0))
            .unwrap();
        assert_eq!(null, None);
    }

    #[test]
    fn test_open_unreachable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("nested").join("db.sqlite");
        let options = PoolOptions {
            connection_timeout: Duration::from_millis(200),
            ..Default::default()
        };
        assert!(open_pool(&path, &options).is_err());
    }
}
