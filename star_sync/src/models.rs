//! Diesel models mapping to both schemas.
//!
//! - [`source`]: one `Queryable`/`Selectable` struct per operational table in
//!   [`crate::schema::source`]. They are also `Insertable` so fixtures and
//!   tooling can seed a source database with the same types the sync reads.
//! - [`target`]: star-schema records in [`crate::schema::target`]. Dimension and
//!   fact structs derive `AsChangeset` with `treat_none_as_null` so an upsert
//!   replaces every non-key column, NULLs included.
//!
//! [`Record`] is the unit handed from the transformers to the upsert sink.

pub mod source;
pub mod target;

use target::{
    BridgeFilmActor, BridgeFilmCategory, DimActor, DimCategory, DimCustomer, DimDate, DimFilm,
    DimStore, FactPayment, FactRental,
};

/// One fully-formed star-schema row, ready for [`crate::warehouse::sink::upsert`].
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Calendar dimension row.
    Date(DimDate),
    /// Film dimension row.
    Film(DimFilm),
    /// Actor dimension row.
    Actor(DimActor),
    /// Category dimension row.
    Category(DimCategory),
    /// Store dimension row.
    Store(DimStore),
    /// Customer dimension row.
    Customer(DimCustomer),
    /// Film ↔ actor bridge row.
    FilmActor(BridgeFilmActor),
    /// Film ↔ category bridge row.
    FilmCategory(BridgeFilmCategory),
    /// Rental fact row.
    Rental(FactRental),
    /// Payment fact row.
    Payment(FactPayment),
}

impl Record {
    /// Target table this record is written to.
    pub fn table_name(&self) -> &'static str {
        match self {
            Record::Date(_) => "dim_date",
            Record::Film(_) => "dim_film",
            Record::Actor(_) => "dim_actor",
            Record::Category(_) => "dim_category",
            Record::Store(_) => "dim_store",
            Record::Customer(_) => "dim_customer",
            Record::FilmActor(_) => "bridge_film_actor",
            Record::FilmCategory(_) => "bridge_film_category",
            Record::Rental(_) => "fact_rental",
            Record::Payment(_) => "fact_payment",
        }
    }
}
