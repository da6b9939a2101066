//! Diesel table definitions for both sides of the sync.
//!
//! - [`source`]: the normalized operational schema the sync reads from.
//! - [`target`]: the star schema written by the sync (created by the embedded migrations).

pub mod source;
pub mod target;
