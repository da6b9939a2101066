//! upsert statements
use anyhow::Context;
use diesel::prelude::*;
use diesel::{SqliteConnection, insert_into};

use crate::models::Record;
use crate::schema::target::{
    bridge_film_actor as bfa, bridge_film_category as bfc, dim_actor, dim_category, dim_customer,
    dim_date, dim_film, dim_store, fact_payment, fact_rental,
};

/// Insert or fully replace one star-schema row.
///
/// Dimensions and facts use `ON CONFLICT (pk) DO UPDATE` over every non-key
/// column (NULLs included). Bridge rows are all key, so a conflict is a no-op.
pub fn upsert(conn: &mut SqliteConnection, record: &Record) -> QueryResult<usize> {
    match record {
        Record::Date(r) => insert_into(dim_date::table)
            .values(r)
            .on_conflict(dim_date::date_key)
            .do_update()
            .set(r)
            .execute(conn),
        Record::Film(r) => insert_into(dim_film::table)
            .values(r)
            .on_conflict(dim_film::film_key)
            .do_update()
            .set(r)
            .execute(conn),
        Record::Actor(r) => insert_into(dim_actor::table)
            .values(r)
            .on_conflict(dim_actor::actor_key)
            .do_update()
            .set(r)
            .execute(conn),
        Record::Category(r) => insert_into(dim_category::table)
            .values(r)
            .on_conflict(dim_category::category_key)
            .do_update()
            .set(r)
            .execute(conn),
        Record::Store(r) => insert_into(dim_store::table)
            .values(r)
            .on_conflict(dim_store::store_key)
            .do_update()
            .set(r)
            .execute(conn),
        Record::Customer(r) => insert_into(dim_customer::table)
            .values(r)
            .on_conflict(dim_customer::customer_key)
            .do_update()
            .set(r)
            .execute(conn),
        Record::FilmActor(r) => insert_into(bfa::table)
            .values(r)
            .on_conflict((bfa::film_key, bfa::actor_key))
            .do_nothing()
            .execute(conn),
        Record::FilmCategory(r) => insert_into(bfc::table)
            .values(r)
            .on_conflict((bfc::film_key, bfc::category_key))
            .do_nothing()
            .execute(conn),
        Record::Rental(r) => insert_into(fact_rental::table)
            .values(r)
            .on_conflict(fact_rental::fact_rental_key)
            .do_update()
            .set(r)
            .execute(conn),
        Record::Payment(r) => insert_into(fact_payment::table)
            .values(r)
            .on_conflict(fact_payment::fact_payment_key)
            .do_update()
            .set(r)
            .execute(conn),
    }
}

/// Upsert a slice of records in order; returns the summed affected-row count.
///
/// A failure names the target table of the record that failed.
pub fn upsert_all(conn: &mut SqliteConnection, records: &[Record]) -> anyhow::Result<usize> {
    let mut n = 0;
    for r in records {
        n += upsert(conn, r).with_context(|| format!("upserting into {}", r.table_name()))?;
    }
    Ok(n)
}
