//! Replicates a normalized rental-store database into a star schema.
//!
//! The sync reads the operational tables through [`source::SourceStore`],
//! transforms each row into a dimension, bridge or fact record
//! ([`transform`]) keyed by deterministic surrogate keys ([`keys`]), and
//! upserts them into the analytics store ([`warehouse`]). Two orchestrators
//! drive it:
//!
//! - [`sync::full::full_load`]: every row, one transaction;
//! - [`sync::incremental::incremental`]: rows at/after each table's watermark,
//!   one transaction per table.
//!
//! [`validate`] reconciles aggregates between the two stores afterwards.
//!
//! ```no_run
//! use star_sync::db::{connection::connect_sqlite, migrate};
//! use star_sync::sync::{SyncOptions, incremental::incremental};
//!
//! # fn main() -> anyhow::Result<()> {
//! migrate::run_sqlite("analytics.db")?;
//! let mut source = connect_sqlite("sakila.db")?;
//! let mut target = connect_sqlite("analytics.db")?;
//! let report = incremental(&mut source, &mut target, SyncOptions::default())?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dates;
pub mod db;
pub mod error;
pub mod keys;
pub mod models;
pub mod schema;
pub mod source;
pub mod sync;
pub mod transform;
pub mod validate;
pub mod warehouse;
