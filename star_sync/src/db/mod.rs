//! Database utilities for connections and schema migrations.
//!
//! This module provides:
//! - SQLite connection helpers: [`connection::connect_sqlite`] resolves a connection
//!   string and applies WAL, foreign_keys=ON, and a 5000ms busy_timeout.
//! - Embedded Diesel migrations for the star schema: [`migrate::run_sqlite`] and
//!   [`migrate::run_pending`] (for an already open connection).
//!
//! Example:
//! ```no_run
//! use star_sync::db::{connection, migrate};
//!
//! let db_path = std::env::temp_dir().join("star_sync_example.db");
//! migrate::run_sqlite(db_path.to_str().unwrap()).expect("migrations");
//! let _conn = connection::connect_sqlite(db_path.to_str().unwrap()).expect("connect");
//! ```

pub mod connection;
pub mod migrate;
