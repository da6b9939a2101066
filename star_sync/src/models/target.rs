//! Star-schema (target) rows.
//!
//! Dimension and fact structs are keyed by surrogate keys from [`crate::keys`].
//! `AsChangeset` skips the primary key and, with `treat_none_as_null`, writes
//! `None` fields as NULL so an upsert fully replaces the stored row.
//! Bridge rows consist only of their composite key and are never updated.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::schema::target::{
    bridge_film_actor, bridge_film_category, dim_actor, dim_category, dim_customer, dim_date,
    dim_film, dim_store, fact_payment, fact_rental, sync_state,
};

/// A row in [`dim_date`]: one calendar day, keyed `YYYYMMDD`.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = dim_date, primary_key(date_key), check_for_backend(diesel::sqlite::Sqlite))]
pub struct DimDate {
    /// `year * 10000 + month * 100 + day`.
    pub date_key: i32,
    /// The calendar day itself.
    pub calendar_date: NaiveDate,
    /// Calendar year.
    pub year: i32,
    /// 1..=4.
    pub quarter: i32,
    /// 1..=12.
    pub month: i32,
    /// 1..=31.
    pub day_of_month: i32,
    /// Monday = 0 .. Sunday = 6.
    pub day_of_week: i32,
    /// Saturday or Sunday.
    pub is_weekend: bool,
}

/// A row in [`dim_film`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = dim_film, primary_key(film_key), treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DimFilm {
    /// Surrogate key (`film_id * 100 + 1`).
    pub film_key: i64,
    /// Natural key (unique).
    pub film_id: i32,
    /// Title.
    pub title: Option<String>,
    /// Rating.
    pub rating: Option<String>,
    /// Running time in minutes.
    pub length: Option<i32>,
    /// Resolved language name; `None` when the language is unknown.
    pub language: Option<String>,
    /// Release year.
    pub release_year: Option<i32>,
    /// Source change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`dim_actor`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = dim_actor, primary_key(actor_key), treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DimActor {
    /// Surrogate key.
    pub actor_key: i64,
    /// Natural key (unique).
    pub actor_id: i32,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Source change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`dim_category`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = dim_category, primary_key(category_key), treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DimCategory {
    /// Surrogate key.
    pub category_key: i64,
    /// Natural key (unique).
    pub category_id: i32,
    /// Category name.
    pub name: Option<String>,
    /// Source change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`dim_store`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = dim_store, primary_key(store_key), treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DimStore {
    /// Surrogate key.
    pub store_key: i64,
    /// Natural key (unique).
    pub store_id: i32,
    /// City resolved through the store's address.
    pub city: Option<String>,
    /// Country resolved through the city.
    pub country: Option<String>,
    /// Source change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`dim_customer`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = dim_customer, primary_key(customer_key), treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DimCustomer {
    /// Surrogate key.
    pub customer_key: i64,
    /// Natural key (unique).
    pub customer_id: i32,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// 1 when active.
    pub active: Option<i32>,
    /// City resolved through the customer's address.
    pub city: Option<String>,
    /// Country resolved through the city.
    pub country: Option<String>,
    /// Source change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`bridge_film_actor`].
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = bridge_film_actor, check_for_backend(diesel::sqlite::Sqlite))]
pub struct BridgeFilmActor {
    /// Film surrogate key.
    pub film_key: i64,
    /// Actor surrogate key.
    pub actor_key: i64,
}

/// A row in [`bridge_film_category`].
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = bridge_film_category, check_for_backend(diesel::sqlite::Sqlite))]
pub struct BridgeFilmCategory {
    /// Film surrogate key.
    pub film_key: i64,
    /// Category surrogate key.
    pub category_key: i64,
}

/// A row in [`fact_rental`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = fact_rental, primary_key(fact_rental_key), treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FactRental {
    /// Surrogate key (`rental_id * 10 + 1`).
    pub fact_rental_key: i64,
    /// Natural key (unique).
    pub rental_id: i32,
    /// [`DimDate`] key of the rental date.
    pub date_key_rented: Option<i32>,
    /// [`DimDate`] key of the return date.
    pub date_key_returned: Option<i32>,
    /// Film resolved through the inventory item.
    pub film_key: Option<i64>,
    /// Store resolved through the inventory item.
    pub store_key: Option<i64>,
    /// Renting customer.
    pub customer_key: Option<i64>,
    /// Degenerate staff id.
    pub staff_id: Option<i32>,
    /// Whole days between rental and return.
    pub rental_duration_days: Option<i32>,
}

/// A row in [`fact_payment`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = fact_payment, primary_key(fact_payment_key), treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FactPayment {
    /// Surrogate key (`payment_id * 10 + 1`).
    pub fact_payment_key: i64,
    /// Natural key (unique).
    pub payment_id: i32,
    /// [`DimDate`] key of the payment date.
    pub date_key_paid: Option<i32>,
    /// Paying customer.
    pub customer_key: Option<i64>,
    /// Always `None`: the source payment row carries no store link.
    pub store_key: Option<i64>,
    /// Degenerate staff id.
    pub staff_id: Option<i32>,
    /// Amount paid.
    pub amount: Option<f64>,
}

/// A row in [`sync_state`]: the watermark of one source table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = sync_state, check_for_backend(diesel::sqlite::Sqlite))]
pub struct SyncState {
    /// Source table name (e.g., "film").
    pub table_name: String,
    /// Highest `last_update` synced so far.
    pub last_synced: NaiveDateTime,
}
