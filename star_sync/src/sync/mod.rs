//! Source → star-schema synchronization.
//!
//! ## What this does
//! - [`full::full_load`] re-reads every planned table and upserts it into the
//!   target inside one **`BEGIN IMMEDIATE`** transaction: all tables land or none do.
//! - [`incremental::incremental`] reads only rows with `last_update >=` the
//!   table's watermark, and gives **each table its own** immediate transaction.
//!   A failing table is rolled back, logged at WARN and reported as
//!   [`TableStatus::Failed`]; the remaining tables still run.
//!
//! Both walk [`plan::SYNC_PLAN`] in order (dimensions, bridges, facts) and share
//! the transformers and the upsert sink, so a row gets the same surrogate key
//! whichever path wrote it.
//!
//! ## Dry-run
//! With [`SyncOptions::dry_run`], extraction and transformation run as usual but
//! nothing is written and watermarks stay put. The report shows what would change.

pub mod full;
pub mod incremental;
pub mod plan;

use std::fmt;

use chrono::NaiveDateTime;

use crate::sync::plan::SourceTable;

/// Options for a sync run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// If true, extract and transform but write nothing.
    pub dry_run: bool,
}

/// Which orchestrator produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// All rows, one transaction.
    Full,
    /// Watermark deltas, one transaction per table.
    Incremental,
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SyncMode::Full => "full load",
            SyncMode::Incremental => "incremental",
        })
    }
}

/// Terminal state of one table in a run.
#[derive(Debug, Clone, PartialEq)]
pub enum TableStatus {
    /// Rows were synced and the watermark moved from `from` to `to` (`to >= from`).
    Advanced {
        /// Source rows read.
        rows: usize,
        /// Watermark before the run.
        from: NaiveDateTime,
        /// Watermark after the run.
        to: NaiveDateTime,
    },
    /// No rows at or after the watermark.
    Unchanged,
    /// The table's transaction was rolled back.
    Failed {
        /// Rendered error chain.
        error: String,
    },
}

/// Outcome of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOutcome {
    /// Source table.
    pub table: SourceTable,
    /// What happened to it.
    pub status: TableStatus,
}

/// Per-table outcomes of a run, in plan order.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Orchestrator that ran.
    pub mode: SyncMode,
    /// Whether writes were suppressed.
    pub dry_run: bool,
    /// One entry per planned table.
    pub outcomes: Vec<TableOutcome>,
}

impl SyncReport {
    /// Outcome for `table`, if it was part of the run.
    pub fn status(&self, table: SourceTable) -> Option<&TableStatus> {
        self.outcomes
            .iter()
            .find(|o| o.table == table)
            .map(|o| &o.status)
    }

    /// Tables that advanced.
    pub fn advanced(&self) -> impl Iterator<Item = SourceTable> + '_ {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TableStatus::Advanced { .. }))
            .map(|o| o.table)
    }

    /// Tables that failed.
    pub fn failed(&self) -> impl Iterator<Item = SourceTable> + '_ {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, TableStatus::Failed { .. }))
            .map(|o| o.table)
    }

    /// True when no table failed.
    pub fn is_clean(&self) -> bool {
        self.failed().next().is_none()
    }

    /// Total source rows read across advanced tables.
    pub fn total_rows(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                TableStatus::Advanced { rows, .. } => rows,
                _ => 0,
            })
            .sum()
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mode)?;
        if self.dry_run {
            write!(f, " (dry run)")?;
        }
        writeln!(f)?;
        for o in &self.outcomes {
            write!(f, "  {:<14}", o.table.name())?;
            match &o.status {
                TableStatus::Advanced { rows, from, to } => {
                    writeln!(f, "advanced   {rows:>6} rows  {from} -> {to}")?
                }
                TableStatus::Unchanged => writeln!(f, "unchanged")?,
                TableStatus::Failed { error } => writeln!(f, "FAILED     {error}")?,
            }
        }
        let failed = self.failed().count();
        write!(
            f,
            "{} rows, {} advanced, {} failed",
            self.total_rows(),
            self.advanced().count(),
            failed
        )
    }
}
