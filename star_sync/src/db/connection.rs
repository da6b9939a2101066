//! SQLite connection helpers.
//!
//! Connection strings may be a bare path (`analytics.db`), `sqlite://path`,
//! `sqlite:path`, or `:memory:`. Server URLs (`postgres://`, `mysql://`, ...) are
//! rejected with [`SyncError::UnsupportedUrl`].
//!
//! [`connect_sqlite`] is for the star-schema store it owns; [`connect_source`]
//! opens the operational database without altering it.
//!
//! Example:
//! ```no_run
//! use star_sync::db::connection::connect_sqlite;
//!
//! let _conn = connect_sqlite("sqlite://analytics.db").expect("open sqlite");
//! ```

use diesel::{Connection, SqliteConnection, connection::SimpleConnection};

use crate::error::SyncError;

/// Resolve a connection string to the path diesel's SQLite driver expects.
pub fn sqlite_path(url: &str) -> Result<&str, SyncError> {
    if let Some(rest) = url.strip_prefix("sqlite://") {
        return Ok(rest);
    }
    if let Some(rest) = url.strip_prefix("sqlite:") {
        return Ok(rest);
    }
    if url.contains("://") || url.is_empty() {
        return Err(SyncError::UnsupportedUrl(url.to_string()));
    }
    Ok(url)
}

/// Open a SQLite connection and apply connection-wide PRAGMAs.
pub fn connect_sqlite(url: &str) -> anyhow::Result<SqliteConnection> {
    let path = sqlite_path(url)?;
    let mut conn = SqliteConnection::establish(path)?;

    // WAL keeps readers unblocked while a sync transaction is open
    conn.batch_execute(
        "PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON; PRAGMA busy_timeout=5000;",
    )?;
    Ok(conn)
}

/// Open the operational database for reading.
///
/// Only per-connection PRAGMAs are set (`query_only`, `busy_timeout`): the
/// journal mode is a property of the file and stays whatever the owner chose.
pub fn connect_source(url: &str) -> anyhow::Result<SqliteConnection> {
    let path = sqlite_path(url)?;
    let mut conn = SqliteConnection::establish(path)?;
    conn.batch_execute("PRAGMA query_only=ON; PRAGMA busy_timeout=5000;")?;
    Ok(conn)
}
