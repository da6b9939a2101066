//! Per-table high-watermark persisted in `sync_state`.
//!
//! A table that was never synced reads as [`epoch`]. Writes go through
//! [`set`], which stores `max(existing, observed)` so the watermark of a table
//! never moves backwards.

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::{SqliteConnection, insert_into};

use crate::models::target::SyncState;
use crate::schema::target::sync_state;

/// `1970-01-01 00:00:00`, the watermark of a never-synced table.
pub fn epoch() -> NaiveDateTime {
    DateTime::<Utc>::UNIX_EPOCH.naive_utc()
}

/// Stored watermark for `table`, if any.
pub fn find(conn: &mut SqliteConnection, table: &str) -> QueryResult<Option<NaiveDateTime>> {
    sync_state::table
        .find(table)
        .select(sync_state::last_synced)
        .first(conn)
        .optional()
}

/// Stored watermark for `table`, or [`epoch`].
pub fn get(conn: &mut SqliteConnection, table: &str) -> QueryResult<NaiveDateTime> {
    Ok(find(conn, table)?.unwrap_or_else(epoch))
}

/// Record `observed` for `table` and return what is now stored.
///
/// An `observed` older than the stored value leaves the row unchanged.
pub fn set(
    conn: &mut SqliteConnection,
    table: &str,
    observed: NaiveDateTime,
) -> QueryResult<NaiveDateTime> {
    let next = match find(conn, table)? {
        Some(existing) if existing > observed => return Ok(existing),
        _ => observed,
    };
    insert_into(sync_state::table)
        .values((
            sync_state::table_name.eq(table),
            sync_state::last_synced.eq(next),
        ))
        .on_conflict(sync_state::table_name)
        .do_update()
        .set(sync_state::last_synced.eq(next))
        .execute(conn)?;
    Ok(next)
}

/// Seed an epoch row for each table that has none; returns how many were created.
pub fn ensure<'a, I>(conn: &mut SqliteConnection, tables: I) -> QueryResult<usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut n = 0;
    for table in tables {
        n += insert_into(sync_state::table)
            .values((
                sync_state::table_name.eq(table),
                sync_state::last_synced.eq(epoch()),
            ))
            .on_conflict(sync_state::table_name)
            .do_nothing()
            .execute(conn)?;
    }
    Ok(n)
}

/// Every stored watermark, ordered by table name.
pub fn all(conn: &mut SqliteConnection) -> QueryResult<Vec<SyncState>> {
    sync_state::table
        .select(SyncState::as_select())
        .order(sync_state::table_name.asc())
        .load(conn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrate::run_pending;
    use chrono::NaiveDate;

    fn target() -> SqliteConnection {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        run_pending(&mut conn).unwrap();
        conn
    }

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn unknown_table_reads_epoch() {
        let mut conn = target();
        assert_eq!(find(&mut conn, "film").unwrap(), None);
        assert_eq!(get(&mut conn, "film").unwrap(), epoch());
        assert_eq!(epoch().to_string(), "1970-01-01 00:00:00");
    }

    #[test]
    fn set_never_moves_backwards() {
        let mut conn = target();
        assert_eq!(set(&mut conn, "film", at(5)).unwrap(), at(5));
        assert_eq!(set(&mut conn, "film", at(3)).unwrap(), at(5));
        assert_eq!(get(&mut conn, "film").unwrap(), at(5));
        assert_eq!(set(&mut conn, "film", at(9)).unwrap(), at(9));
        assert_eq!(get(&mut conn, "film").unwrap(), at(9));
    }

    #[test]
    fn ensure_keeps_existing_rows() {
        let mut conn = target();
        set(&mut conn, "actor", at(2)).unwrap();
        assert_eq!(ensure(&mut conn, ["actor", "film"]).unwrap(), 1);
        assert_eq!(ensure(&mut conn, ["actor", "film"]).unwrap(), 0);

        let rows = all(&mut conn).unwrap();
        assert_eq!(
            rows,
            vec![
                SyncState { table_name: "actor".into(), last_synced: at(2) },
                SyncState { table_name: "film".into(), last_synced: epoch() },
            ]
        );
    }
}
