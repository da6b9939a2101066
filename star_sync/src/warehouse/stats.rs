//! Target-side aggregates for reconciliation.
//!
//! Fact windows are expressed as `YYYYMMDD` date keys, the granularity the star
//! schema keeps.

use diesel::dsl::{count_star, sum};
use diesel::prelude::*;

use crate::schema::target::{dim_film, fact_payment, fact_rental};

/// Rows in `dim_film`.
pub fn film_count(conn: &mut SqliteConnection) -> QueryResult<i64> {
    dim_film::table.select(count_star()).first(conn)
}

/// Rentals whose `date_key_rented >= from_key`.
pub fn rental_count_since_key(conn: &mut SqliteConnection, from_key: i32) -> QueryResult<i64> {
    fact_rental::table
        .filter(fact_rental::date_key_rented.ge(from_key))
        .select(count_star())
        .first(conn)
}

/// Count and summed amount of payments whose `date_key_paid >= from_key`.
pub fn payment_totals_since_key(
    conn: &mut SqliteConnection,
    from_key: i32,
) -> QueryResult<(i64, f64)> {
    let (n, total): (i64, Option<f64>) = fact_payment::table
        .filter(fact_payment::date_key_paid.ge(from_key))
        .select((count_star(), sum(fact_payment::amount)))
        .first(conn)?;
    Ok((n, total.unwrap_or(0.0)))
}
