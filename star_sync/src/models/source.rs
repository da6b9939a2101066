//! Operational (source) rows.
//!
//! Every struct maps one table of [`crate::schema::source`]. All non-key columns
//! are nullable, matching the source DDL; `last_update` drives change capture.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::schema::source::{
    actor, address, category, city, country, customer, film, film_actor, film_category, inventory,
    language, payment, rental, store,
};

/// A row in [`language`]: looked up by films.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = language, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Language {
    /// Natural key.
    pub language_id: i32,
    /// Display name (e.g., "English").
    pub name: Option<String>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`film`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = film, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Film {
    /// Natural key.
    pub film_id: i32,
    /// Title.
    pub title: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Release year.
    pub release_year: Option<i32>,
    /// FK to [`Language::language_id`].
    pub language_id: Option<i32>,
    /// Default rental period in days.
    pub rental_duration: Option<i32>,
    /// Rental price.
    pub rental_rate: Option<f64>,
    /// Running time in minutes.
    pub length: Option<i32>,
    /// MPAA rating (e.g., "PG").
    pub rating: Option<String>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`actor`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = actor, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Actor {
    /// Natural key.
    pub actor_id: i32,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`category`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = category, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Category {
    /// Natural key.
    pub category_id: i32,
    /// Category name (e.g., "Comedy").
    pub name: Option<String>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`film_actor`]: actor × film.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = film_actor, check_for_backend(diesel::sqlite::Sqlite))]
pub struct FilmActor {
    /// FK to [`Actor::actor_id`].
    pub actor_id: i32,
    /// FK to [`Film::film_id`].
    pub film_id: i32,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`film_category`]: film × category.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = film_category, check_for_backend(diesel::sqlite::Sqlite))]
pub struct FilmCategory {
    /// FK to [`Film::film_id`].
    pub film_id: i32,
    /// FK to [`Category::category_id`].
    pub category_id: i32,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`address`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = address, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Address {
    /// Natural key.
    pub address_id: i32,
    /// Street line (SQL column `address`).
    pub address_line: Option<String>,
    /// FK to [`City::city_id`].
    pub city_id: Option<i32>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`city`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = city, check_for_backend(diesel::sqlite::Sqlite))]
pub struct City {
    /// Natural key.
    pub city_id: i32,
    /// City name (SQL column `city`).
    pub city_name: Option<String>,
    /// FK to [`Country::country_id`].
    pub country_id: Option<i32>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`country`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = country, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Country {
    /// Natural key.
    pub country_id: i32,
    /// Country name (SQL column `country`).
    pub country_name: Option<String>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`store`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = store, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Store {
    /// Natural key.
    pub store_id: i32,
    /// Managing staff member.
    pub manager_staff_id: Option<i32>,
    /// FK to [`Address::address_id`].
    pub address_id: Option<i32>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`customer`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = customer, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Customer {
    /// Natural key.
    pub customer_id: i32,
    /// Home store.
    pub store_id: Option<i32>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// 1 when active, 0 otherwise.
    pub active: Option<i32>,
    /// Account creation time.
    pub create_date: Option<NaiveDateTime>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
    /// FK to [`Address::address_id`].
    pub address_id: Option<i32>,
}

/// A row in [`inventory`]: one physical copy of a film at a store.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = inventory, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Inventory {
    /// Natural key.
    pub inventory_id: i32,
    /// FK to [`Film::film_id`].
    pub film_id: Option<i32>,
    /// Owning store.
    pub store_id: Option<i32>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`rental`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = rental, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Rental {
    /// Natural key.
    pub rental_id: i32,
    /// When the copy left the store.
    pub rental_date: Option<NaiveDateTime>,
    /// FK to [`Inventory::inventory_id`].
    pub inventory_id: Option<i32>,
    /// FK to [`Customer::customer_id`].
    pub customer_id: Option<i32>,
    /// When the copy came back; `None` while outstanding.
    pub return_date: Option<NaiveDateTime>,
    /// Staff member who processed the rental.
    pub staff_id: Option<i32>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}

/// A row in [`payment`].
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable)]
#[diesel(table_name = payment, check_for_backend(diesel::sqlite::Sqlite))]
pub struct Payment {
    /// Natural key.
    pub payment_id: i32,
    /// FK to [`Customer::customer_id`].
    pub customer_id: Option<i32>,
    /// Staff member who took the payment.
    pub staff_id: Option<i32>,
    /// FK to [`Rental::rental_id`].
    pub rental_id: Option<i32>,
    /// Amount paid.
    pub amount: Option<f64>,
    /// When the payment was taken.
    pub payment_date: Option<NaiveDateTime>,
    /// Change timestamp.
    pub last_update: Option<NaiveDateTime>,
}
