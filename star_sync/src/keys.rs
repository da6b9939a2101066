//! Surrogate key derivation.
//!
//! Every dimension and fact row is keyed by `natural_id * multiplier + 1`.
//! The function is pure, so full load and incremental sync always land on the
//! same target row for the same natural id, and it is injective for a fixed
//! multiplier, so two natural ids never share a key within one table.

/// Multiplier for dimension and bridge keys (`film_id * 100 + 1`).
pub const DIMENSION_MULTIPLIER: i64 = 100;

/// Multiplier for fact keys (`rental_id * 10 + 1`).
pub const FACT_MULTIPLIER: i64 = 10;

/// Derive a surrogate key; an absent natural id (optional FK) stays absent.
pub fn derive_key(natural_id: Option<i32>, multiplier: i64) -> Option<i64> {
    natural_id.map(|id| i64::from(id) * multiplier + 1)
}

/// Dimension key for a present natural id.
pub fn dimension_key(natural_id: i32) -> i64 {
    i64::from(natural_id) * DIMENSION_MULTIPLIER + 1
}

/// Fact key for a present natural id.
pub fn fact_key(natural_id: i32) -> i64 {
    i64::from(natural_id) * FACT_MULTIPLIER + 1
}
