//! Read-only access to the operational database.
//!
//! [`SourceStore`] is the query surface the sync needs from the source:
//! - point gets by primary key for the lookup tables (a miss is `Ok(None)`),
//! - ascending scans of each synced table, optionally bounded by
//!   `last_update >= since` (the `>=` bound re-reads the boundary row on purpose),
//! - the aggregates used by [`crate::validate`].
//!
//! The SQLite implementation lives directly on [`SqliteConnection`].

use chrono::NaiveDateTime;
use diesel::dsl::{count_star, sum};
use diesel::prelude::*;

use crate::models::source::{
    Actor, Address, Category, City, Country, Customer, Film, FilmActor, FilmCategory, Inventory,
    Language, Payment, Rental, Store,
};
use crate::schema::source::{
    actor, address, category, city, country, customer, film, film_actor, film_category, inventory,
    language, payment, rental, store,
};

/// Query capability over the normalized source schema.
pub trait SourceStore {
    /// Point get on `language`.
    fn language(&mut self, id: i32) -> QueryResult<Option<Language>>;
    /// Point get on `address`.
    fn address(&mut self, id: i32) -> QueryResult<Option<Address>>;
    /// Point get on `city`.
    fn city(&mut self, id: i32) -> QueryResult<Option<City>>;
    /// Point get on `country`.
    fn country(&mut self, id: i32) -> QueryResult<Option<Country>>;
    /// Point get on `inventory`.
    fn inventory(&mut self, id: i32) -> QueryResult<Option<Inventory>>;

    /// Films changed at/after `since` (all films when `None`), oldest first.
    fn films(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Film>>;
    /// Actors changed at/after `since`, oldest first.
    fn actors(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Actor>>;
    /// Categories changed at/after `since`, oldest first.
    fn categories(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Category>>;
    /// Film/actor links changed at/after `since`, oldest first.
    fn film_actors(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<FilmActor>>;
    /// Film/category links changed at/after `since`, oldest first.
    fn film_categories(&mut self, since: Option<NaiveDateTime>)
    -> QueryResult<Vec<FilmCategory>>;
    /// Stores changed at/after `since`, oldest first.
    fn stores(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Store>>;
    /// Customers changed at/after `since`, oldest first.
    fn customers(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Customer>>;
    /// Inventory items changed at/after `since`, oldest first.
    fn inventories(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Inventory>>;
    /// Rentals changed at/after `since`, oldest first.
    fn rentals(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Rental>>;
    /// Payments changed at/after `since`, oldest first.
    fn payments(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Payment>>;

    /// Number of films.
    fn film_count(&mut self) -> QueryResult<i64>;
    /// Number of rentals with `rental_date >= from`.
    fn rental_count_since(&mut self, from: NaiveDateTime) -> QueryResult<i64>;
    /// Number and total amount of payments with `payment_date >= from`.
    fn payment_totals_since(&mut self, from: NaiveDateTime) -> QueryResult<(i64, f64)>;
}

impl SourceStore for SqliteConnection {
    fn language(&mut self, id: i32) -> QueryResult<Option<Language>> {
        language::table
            .find(id)
            .select(Language::as_select())
            .first(self)
            .optional()
    }

    fn address(&mut self, id: i32) -> QueryResult<Option<Address>> {
        address::table
            .find(id)
            .select(Address::as_select())
            .first(self)
            .optional()
    }

    fn city(&mut self, id: i32) -> QueryResult<Option<City>> {
        city::table
            .find(id)
            .select(City::as_select())
            .first(self)
            .optional()
    }

    fn country(&mut self, id: i32) -> QueryResult<Option<Country>> {
        country::table
            .find(id)
            .select(Country::as_select())
            .first(self)
            .optional()
    }

    fn inventory(&mut self, id: i32) -> QueryResult<Option<Inventory>> {
        inventory::table
            .find(id)
            .select(Inventory::as_select())
            .first(self)
            .optional()
    }

    fn films(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Film>> {
        let mut q = film::table
            .select(Film::as_select())
            .order((film::last_update.asc(), film::film_id.asc()))
            .into_boxed();
        if let Some(ts) = since {
            q = q.filter(film::last_update.ge(ts));
        }
        q.load(self)
    }

    fn actors(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Actor>> {
        let mut q = actor::table
            .select(Actor::as_select())
            .order((actor::last_update.asc(), actor::actor_id.asc()))
            .into_boxed();
        if let Some(ts) = since {
            q = q.filter(actor::last_update.ge(ts));
        }
        q.load(self)
    }

    fn categories(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Category>> {
        let mut q = category::table
            .select(Category::as_select())
            .order((category::last_update.asc(), category::category_id.asc()))
            .into_boxed();
        if let Some(ts) = since {
            q = q.filter(category::last_update.ge(ts));
        }
        q.load(self)
    }

    fn film_actors(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<FilmActor>> {
        let mut q = film_actor::table
            .select(FilmActor::as_select())
            .order((
                film_actor::last_update.asc(),
                film_actor::actor_id.asc(),
                film_actor::film_id.asc(),
            ))
            .into_boxed();
        if let Some(ts) = since {
            q = q.filter(film_actor::last_update.ge(ts));
        }
        q.load(self)
    }

    fn film_categories(
        &mut self,
        since: Option<NaiveDateTime>,
    ) -> QueryResult<Vec<FilmCategory>> {
        let mut q = film_category::table
            .select(FilmCategory::as_select())
            .order((
                film_category::last_update.asc(),
                film_category::film_id.asc(),
                film_category::category_id.asc(),
            ))
            .into_boxed();
        if let Some(ts) = since {
            q = q.filter(film_category::last_update.ge(ts));
        }
        q.load(self)
    }

    fn stores(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Store>> {
        let mut q = store::table
            .select(Store::as_select())
            .order((store::last_update.asc(), store::store_id.asc()))
            .into_boxed();
        if let Some(ts) = since {
            q = q.filter(store::last_update.ge(ts));
        }
        q.load(self)
    }

    fn customers(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Customer>> {
        let mut q = customer::table
            .select(Customer::as_select())
            .order((customer::last_update.asc(), customer::customer_id.asc()))
            .into_boxed();
        if let Some(ts) = since {
            q = q.filter(customer::last_update.ge(ts));
        }
        q.load(self)
    }

    fn inventories(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Inventory>> {
        let mut q = inventory::table
            .select(Inventory::as_select())
            .order((inventory::last_update.asc(), inventory::inventory_id.asc()))
            .into_boxed();
        if let Some(ts) = since {
            q = q.filter(inventory::last_update.ge(ts));
        }
        q.load(self)
    }

    fn rentals(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Rental>> {
        let mut q = rental::table
            .select(Rental::as_select())
            .order((rental::last_update.asc(), rental::rental_id.asc()))
            .into_boxed();
        if let Some(ts) = since {
            q = q.filter(rental::last_update.ge(ts));
        }
        q.load(self)
    }

    fn payments(&mut self, since: Option<NaiveDateTime>) -> QueryResult<Vec<Payment>> {
        let mut q = payment::table
            .select(Payment::as_select())
            .order((payment::last_update.asc(), payment::payment_id.asc()))
            .into_boxed();
        if let Some(ts) = since {
            q = q.filter(payment::last_update.ge(ts));
        }
        q.load(self)
    }

    fn film_count(&mut self) -> QueryResult<i64> {
        film::table.select(count_star()).first(self)
    }

    fn rental_count_since(&mut self, from: NaiveDateTime) -> QueryResult<i64> {
        rental::table
            .filter(rental::rental_date.ge(from))
            .select(count_star())
            .first(self)
    }

    fn payment_totals_since(&mut self, from: NaiveDateTime) -> QueryResult<(i64, f64)> {
        let (n, total): (i64, Option<f64>) = payment::table
            .filter(payment::payment_date.ge(from))
            .select((count_star(), sum(payment::amount)))
            .first(self)?;
        Ok((n, total.unwrap_or(0.0)))
    }
}
