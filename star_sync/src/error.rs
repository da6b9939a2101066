//! Domain errors.
//!
//! Data-layer failures travel as [`diesel::result::Error`] and are wrapped in
//! `anyhow` context by the orchestrators; the variants here name the failures
//! that belong to this crate.

/// Errors raised by configuration, URL handling and value parsing.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    /// The connection string names a backend this crate cannot open.
    #[error("unsupported database url: {0} (expected a SQLite path, `sqlite://` or `sqlite:` url)")]
    UnsupportedUrl(String),

    /// No source connection string was configured.
    #[error("no source database configured (use --source, STAR_SYNC_SOURCE_URL or `source_url`)")]
    MissingSource,

    /// A string could not be read as a calendar date.
    #[error("not a recognizable date: {0:?}")]
    InvalidDate(String),

    /// An environment variable required by the caller is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),
}
