//! The static sync plan: which source tables are synced, in which order, and
//! how each one is extracted and transformed.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::QueryResult;

use crate::models::Record;
use crate::source::SourceStore;
use crate::transform::{
    self, Transformed, bridge_film_actor, bridge_film_category, dim_actor, dim_category,
    fact_payment,
};

/// A source table tracked by a watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceTable {
    /// `actor`
    Actor,
    /// `category`
    Category,
    /// `film`
    Film,
    /// `film_actor`
    FilmActor,
    /// `film_category`
    FilmCategory,
    /// `store`
    Store,
    /// `customer`
    Customer,
    /// `inventory`
    Inventory,
    /// `rental`
    Rental,
    /// `payment`
    Payment,
}

impl SourceTable {
    /// Source table name, also the `sync_state` key.
    pub fn name(self) -> &'static str {
        match self {
            SourceTable::Actor => "actor",
            SourceTable::Category => "category",
            SourceTable::Film => "film",
            SourceTable::FilmActor => "film_actor",
            SourceTable::FilmCategory => "film_category",
            SourceTable::Store => "store",
            SourceTable::Customer => "customer",
            SourceTable::Inventory => "inventory",
            SourceTable::Rental => "rental",
            SourceTable::Payment => "payment",
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceTable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SYNC_PLAN
            .iter()
            .map(|step| step.table)
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown source table: {s}"))
    }
}

/// Extracted and transformed rows of one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
    /// Source rows read.
    pub rows: usize,
    /// Highest `last_update` among them; `None` if none carried one.
    pub max_ts: Option<NaiveDateTime>,
    /// Records to upsert, calendar rows ahead of the facts that use them.
    pub records: Vec<Record>,
}

impl Batch {
    fn observe(&mut self, ts: Option<NaiveDateTime>) {
        self.rows += 1;
        self.max_ts = self.max_ts.max(ts);
    }

    fn push_with_dates<T>(&mut self, t: Transformed<T>, wrap: fn(T) -> Record) {
        self.records.extend(t.dates.into_iter().map(Record::Date));
        self.records.push(wrap(t.record));
    }
}

/// Reads the rows of one table changed at/after `since` (all rows on `None`)
/// and turns them into records.
pub type Loader = fn(&mut dyn SourceStore, Option<NaiveDateTime>) -> QueryResult<Batch>;

/// One entry of [`SYNC_PLAN`].
#[derive(Clone, Copy)]
pub struct PlanStep {
    /// Table this step syncs.
    pub table: SourceTable,
    /// Extract + transform for the table.
    pub load: Loader,
}

impl fmt::Debug for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlanStep").field("table", &self.table).finish()
    }
}

/// Tables in dependency order: dimensions, then bridges, then facts.
pub const SYNC_PLAN: [PlanStep; 10] = [
    PlanStep { table: SourceTable::Actor, load: load_actors },
    PlanStep { table: SourceTable::Category, load: load_categories },
    PlanStep { table: SourceTable::Film, load: load_films },
    PlanStep { table: SourceTable::FilmActor, load: load_film_actors },
    PlanStep { table: SourceTable::FilmCategory, load: load_film_categories },
    PlanStep { table: SourceTable::Store, load: load_stores },
    PlanStep { table: SourceTable::Customer, load: load_customers },
    PlanStep { table: SourceTable::Inventory, load: load_inventory },
    PlanStep { table: SourceTable::Rental, load: load_rentals },
    PlanStep { table: SourceTable::Payment, load: load_payments },
];

/// Names of every planned table, in plan order.
pub fn table_names() -> impl Iterator<Item = &'static str> {
    SYNC_PLAN.iter().map(|s| s.table.name())
}

fn load_actors(src: &mut dyn SourceStore, since: Option<NaiveDateTime>) -> QueryResult<Batch> {
    let mut b = Batch::default();
    for row in src.actors(since)? {
        b.observe(row.last_update);
        b.records.push(Record::Actor(dim_actor(&row)));
    }
    Ok(b)
}

fn load_categories(src: &mut dyn SourceStore, since: Option<NaiveDateTime>) -> QueryResult<Batch> {
    let mut b = Batch::default();
    for row in src.categories(since)? {
        b.observe(row.last_update);
        b.records.push(Record::Category(dim_category(&row)));
    }
    Ok(b)
}

fn load_films(src: &mut dyn SourceStore, since: Option<NaiveDateTime>) -> QueryResult<Batch> {
    let mut b = Batch::default();
    for row in src.films(since)? {
        b.observe(row.last_update);
        b.records.push(Record::Film(transform::dim_film(src, &row)?));
    }
    Ok(b)
}

fn load_film_actors(src: &mut dyn SourceStore, since: Option<NaiveDateTime>) -> QueryResult<Batch> {
    let mut b = Batch::default();
    for row in src.film_actors(since)? {
        b.observe(row.last_update);
        b.records.push(Record::FilmActor(bridge_film_actor(&row)));
    }
    Ok(b)
}

fn load_film_categories(
    src: &mut dyn SourceStore,
    since: Option<NaiveDateTime>,
) -> QueryResult<Batch> {
    let mut b = Batch::default();
    for row in src.film_categories(since)? {
        b.observe(row.last_update);
        b.records.push(Record::FilmCategory(bridge_film_category(&row)));
    }
    Ok(b)
}

fn load_stores(src: &mut dyn SourceStore, since: Option<NaiveDateTime>) -> QueryResult<Batch> {
    let mut b = Batch::default();
    for row in src.stores(since)? {
        b.observe(row.last_update);
        b.records.push(Record::Store(transform::dim_store(src, &row)?));
    }
    Ok(b)
}

fn load_customers(src: &mut dyn SourceStore, since: Option<NaiveDateTime>) -> QueryResult<Batch> {
    let mut b = Batch::default();
    for row in src.customers(since)? {
        b.observe(row.last_update);
        b.records.push(Record::Customer(transform::dim_customer(src, &row)?));
    }
    Ok(b)
}

// Inventory has no target table; it only advances its watermark.
fn load_inventory(src: &mut dyn SourceStore, since: Option<NaiveDateTime>) -> QueryResult<Batch> {
    let mut b = Batch::default();
    for row in src.inventories(since)? {
        b.observe(row.last_update);
    }
    Ok(b)
}

fn load_rentals(src: &mut dyn SourceStore, since: Option<NaiveDateTime>) -> QueryResult<Batch> {
    let mut b = Batch::default();
    for row in src.rentals(since)? {
        b.observe(row.last_update);
        let t = transform::fact_rental(src, &row)?;
        b.push_with_dates(t, Record::Rental);
    }
    Ok(b)
}

fn load_payments(src: &mut dyn SourceStore, since: Option<NaiveDateTime>) -> QueryResult<Batch> {
    let mut b = Batch::default();
    for row in src.payments(since)? {
        b.observe(row.last_update);
        b.push_with_dates(fact_payment(&row), Record::Payment);
    }
    Ok(b)
}
