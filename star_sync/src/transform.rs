//! Row transformers: one operational row in, one star-schema row out.
//!
//! Lookups go through [`SourceStore`] point gets. A missing referenced row is
//! "no data" and leaves the dependent field NULL; only data-layer errors
//! propagate. Fact transformers also emit the [`DimDate`] rows their date keys
//! refer to, see [`Transformed`].

use chrono::NaiveDateTime;
use diesel::QueryResult;

use crate::dates::{date_key_of, dim_date};
use crate::keys::{DIMENSION_MULTIPLIER, derive_key, dimension_key, fact_key};
use crate::models::source::{
    Actor, Category, Customer, Film, FilmActor, FilmCategory, Payment, Rental, Store,
};
use crate::models::target::{
    BridgeFilmActor, BridgeFilmCategory, DimActor, DimCategory, DimCustomer, DimDate, DimFilm,
    DimStore, FactPayment, FactRental,
};
use crate::source::SourceStore;

/// A transformed row plus the calendar rows it references.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed<T> {
    /// The dimension/fact record.
    pub record: T,
    /// Calendar rows for every date key set on `record`.
    pub dates: Vec<DimDate>,
}

/// City and country resolved from an address id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// City name.
    pub city: Option<String>,
    /// Country name.
    pub country: Option<String>,
}

/// Follow `address → city → country`; any broken link yields `None` from there on.
pub fn resolve_location(
    src: &mut dyn SourceStore,
    address_id: Option<i32>,
) -> QueryResult<Location> {
    let mut loc = Location::default();
    let Some(address_id) = address_id else {
        return Ok(loc);
    };
    let Some(city_id) = src.address(address_id)?.and_then(|a| a.city_id) else {
        return Ok(loc);
    };
    let Some(city) = src.city(city_id)? else {
        return Ok(loc);
    };
    loc.city = city.city_name;
    if let Some(country_id) = city.country_id {
        loc.country = src.country(country_id)?.and_then(|c| c.country_name);
    }
    Ok(loc)
}

/// Film → [`DimFilm`], resolving the language name.
pub fn dim_film(src: &mut dyn SourceStore, row: &Film) -> QueryResult<DimFilm> {
    let language = match row.language_id {
        Some(id) => src.language(id)?.and_then(|l| l.name),
        None => None,
    };
    Ok(DimFilm {
        film_key: dimension_key(row.film_id),
        film_id: row.film_id,
        title: row.title.clone(),
        rating: row.rating.clone(),
        length: row.length,
        language,
        release_year: row.release_year,
        last_update: row.last_update,
    })
}

/// Actor → [`DimActor`].
pub fn dim_actor(row: &Actor) -> DimActor {
    DimActor {
        actor_key: dimension_key(row.actor_id),
        actor_id: row.actor_id,
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        last_update: row.last_update,
    }
}

/// Category → [`DimCategory`].
pub fn dim_category(row: &Category) -> DimCategory {
    DimCategory {
        category_key: dimension_key(row.category_id),
        category_id: row.category_id,
        name: row.name.clone(),
        last_update: row.last_update,
    }
}

/// FilmActor → [`BridgeFilmActor`].
pub fn bridge_film_actor(row: &FilmActor) -> BridgeFilmActor {
    BridgeFilmActor {
        film_key: dimension_key(row.film_id),
        actor_key: dimension_key(row.actor_id),
    }
}

/// FilmCategory → [`BridgeFilmCategory`].
pub fn bridge_film_category(row: &FilmCategory) -> BridgeFilmCategory {
    BridgeFilmCategory {
        film_key: dimension_key(row.film_id),
        category_key: dimension_key(row.category_id),
    }
}

/// Store → [`DimStore`], resolving city/country through the address.
pub fn dim_store(src: &mut dyn SourceStore, row: &Store) -> QueryResult<DimStore> {
    let loc = resolve_location(src, row.address_id)?;
    Ok(DimStore {
        store_key: dimension_key(row.store_id),
        store_id: row.store_id,
        city: loc.city,
        country: loc.country,
        last_update: row.last_update,
    })
}

/// Customer → [`DimCustomer`], resolving city/country through the address.
pub fn dim_customer(src: &mut dyn SourceStore, row: &Customer) -> QueryResult<DimCustomer> {
    let loc = resolve_location(src, row.address_id)?;
    Ok(DimCustomer {
        customer_key: dimension_key(row.customer_id),
        customer_id: row.customer_id,
        first_name: row.first_name.clone(),
        last_name: row.last_name.clone(),
        active: row.active,
        city: loc.city,
        country: loc.country,
        last_update: row.last_update,
    })
}

/// Whole days from `rented` to `returned`; `None` unless both are known.
pub fn rental_duration_days(
    rented: Option<NaiveDateTime>,
    returned: Option<NaiveDateTime>,
) -> Option<i32> {
    match (rented, returned) {
        (Some(out), Some(back)) => i32::try_from((back - out).num_days()).ok(),
        _ => None,
    }
}

fn dates_of(stamps: &[Option<NaiveDateTime>]) -> Vec<DimDate> {
    stamps.iter().flatten().map(|ts| dim_date(ts.date())).collect()
}

/// Rental → [`FactRental`], resolving film and store through the inventory item.
pub fn fact_rental(
    src: &mut dyn SourceStore,
    row: &Rental,
) -> QueryResult<Transformed<FactRental>> {
    let inv = match row.inventory_id {
        Some(id) => src.inventory(id)?,
        None => None,
    };
    let (film_id, store_id) = inv.map_or((None, None), |i| (i.film_id, i.store_id));

    let record = FactRental {
        fact_rental_key: fact_key(row.rental_id),
        rental_id: row.rental_id,
        date_key_rented: date_key_of(row.rental_date),
        date_key_returned: date_key_of(row.return_date),
        film_key: derive_key(film_id, DIMENSION_MULTIPLIER),
        store_key: derive_key(store_id, DIMENSION_MULTIPLIER),
        customer_key: derive_key(row.customer_id, DIMENSION_MULTIPLIER),
        staff_id: row.staff_id,
        rental_duration_days: rental_duration_days(row.rental_date, row.return_date),
    };
    Ok(Transformed {
        record,
        dates: dates_of(&[row.rental_date, row.return_date]),
    })
}

/// Payment → [`FactPayment`].
///
/// `store_key` stays `None`: the payment row has no store link of its own.
pub fn fact_payment(row: &Payment) -> Transformed<FactPayment> {
    let record = FactPayment {
        fact_payment_key: fact_key(row.payment_id),
        payment_id: row.payment_id,
        date_key_paid: date_key_of(row.payment_date),
        customer_key: derive_key(row.customer_id, DIMENSION_MULTIPLIER),
        store_key: None,
        staff_id: row.staff_id,
        amount: row.amount,
    };
    Transformed {
        record,
        dates: dates_of(&[row.payment_date]),
    }
}
