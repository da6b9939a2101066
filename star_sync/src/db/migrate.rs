//! Star schema migrations.

use anyhow::anyhow;
use diesel::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::db::connection::connect_sqlite;

/// Embedded Diesel migrations bundled with this crate.
///
/// These create the star schema and the `sync_state` watermark table.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Applies pending migrations on an open connection and returns how many ran.
pub fn run_pending(conn: &mut SqliteConnection) -> anyhow::Result<usize> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!(e))?;
    Ok(applied.len())
}

/// Runs pending migrations on the SQLite database behind `url`.
///
/// Accepts every connection string form understood by [`connect_sqlite`].
pub fn run_sqlite(url: &str) -> anyhow::Result<usize> {
    let mut conn = connect_sqlite(url)?;
    run_pending(&mut conn)
}
