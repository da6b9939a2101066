//! Watermark-driven change capture, one transaction per table.

use anyhow::Context;
use chrono::NaiveDateTime;
use diesel::SqliteConnection;
use tracing::{info, warn};

use crate::source::SourceStore;
use crate::sync::plan::{PlanStep, SYNC_PLAN};
use crate::sync::{SyncMode, SyncOptions, SyncReport, TableOutcome, TableStatus};
use crate::warehouse::{sink, watermark};

/// Sync every planned table from its watermark forward.
///
/// For each table, in plan order and inside its own immediate transaction:
/// read the watermark `w`, extract rows with `last_update >= w`, upsert their
/// records and store `max(w, newest last_update seen)`. The `>=` bound re-reads
/// rows sitting exactly on the watermark; upserts make that harmless.
///
/// An error inside a table rolls back that table only and is reported as
/// [`TableStatus::Failed`]. The function itself only errors if it cannot run at
/// all.
pub fn incremental(
    source: &mut dyn SourceStore,
    target: &mut SqliteConnection,
    opt: SyncOptions,
) -> anyhow::Result<SyncReport> {
    info!(dry_run = opt.dry_run, "incremental sync started");

    let mut outcomes = Vec::with_capacity(SYNC_PLAN.len());
    for step in SYNC_PLAN {
        let table = step.table.name();
        let status = match sync_table(source, target, step, opt) {
            Ok(Some((rows, from, to))) => {
                info!(table, rows, %from, %to, "table advanced");
                TableStatus::Advanced { rows, from, to }
            }
            Ok(None) => {
                info!(table, "no changes");
                TableStatus::Unchanged
            }
            Err(e) => {
                let error = format!("{e:#}");
                warn!(table, error = %error, "table sync failed, rolled back");
                TableStatus::Failed { error }
            }
        };
        outcomes.push(TableOutcome { table: step.table, status });
    }

    let report = SyncReport {
        mode: SyncMode::Incremental,
        dry_run: opt.dry_run,
        outcomes,
    };
    info!(
        rows = report.total_rows(),
        failed = report.failed().count(),
        "incremental sync finished"
    );
    Ok(report)
}

/// One table in one transaction; `None` when nothing changed.
fn sync_table(
    source: &mut dyn SourceStore,
    target: &mut SqliteConnection,
    step: PlanStep,
    opt: SyncOptions,
) -> anyhow::Result<Option<(usize, NaiveDateTime, NaiveDateTime)>> {
    let table = step.table.name();
    target.immediate_transaction::<_, anyhow::Error, _>(|conn| {
        let from = watermark::get(conn, table).context("reading watermark")?;
        let batch = (step.load)(source, Some(from)).context("extracting delta")?;
        if batch.rows == 0 {
            return Ok(None);
        }
        let observed = batch.max_ts.map_or(from, |ts| ts.max(from));
        if opt.dry_run {
            return Ok(Some((batch.rows, from, observed)));
        }
        sink::upsert_all(conn, &batch.records)?;
        let to = watermark::set(conn, table, observed).context("writing watermark")?;
        Ok(Some((batch.rows, from, to)))
    })
}
