//! Writes and reads against the star-schema store.
//!
//! - [`sink`]: merge-by-primary-key upserts of transformed [`crate::models::Record`]s.
//! - [`watermark`]: the per-table `sync_state` high-watermark.
//! - [`stats`]: aggregates the reconciliation validator compares with the source.
//!
//! Everything here takes the caller's `&mut SqliteConnection` and never opens
//! its own transaction, so writes join whatever scope the orchestrator holds.

pub mod sink;
pub mod stats;
pub mod watermark;
