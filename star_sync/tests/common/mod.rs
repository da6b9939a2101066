#![allow(dead_code)]

use chrono::NaiveDateTime;
use diesel::QueryableByName;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};
use diesel::{insert_into, sql_query};
use std::path::PathBuf;
use tempfile::TempDir;

use star_sync::db::{connection, migrate};
use star_sync::models::source::*;
use star_sync::models::target::*;
use star_sync::schema::{source as s, target as t};
use star_sync::sync::plan;
use star_sync::warehouse::watermark;

/// Seed timestamp of every fixture row.
pub const T0: &str = "2024-01-01 00:00:00";
/// A later change.
pub const T1: &str = "2024-02-01 00:00:00";

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}
#[derive(QueryableByName)]
struct ForeignKeys {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}
#[derive(QueryableByName)]
struct BusyTimeout {
    #[diesel(sql_type = Integer, column_name = "timeout")]
    busy_timeout: i32,
}

/// A source and a migrated target, both temp files.
pub struct TestEnv {
    _dir: TempDir, // keep alive for the life of the test
    pub source_path: String,
    pub target_path: String,
    pub source: SqliteConnection,
    pub target: SqliteConnection,
}

/// Empty source, migrated target with epoch watermarks (what `init` does).
pub fn setup() -> TestEnv {
    let dir = TempDir::new().expect("tempdir");
    let path_of = |name: &str| {
        let mut p = PathBuf::from(dir.path());
        p.push(name);
        p.to_string_lossy().to_string()
    };
    let source_path = path_of("source.db");
    let target_path = path_of("target.db");

    // fixture writer; the sync itself reads through `connect_source`
    let mut source = SqliteConnection::establish(&source_path).expect("connect source");
    source
        .batch_execute(include_str!("source_schema.sql"))
        .expect("source schema");

    migrate::run_sqlite(&target_path).expect("migrations");
    let mut target = connection::connect_sqlite(&target_path).expect("connect target");
    watermark::ensure(&mut target, plan::table_names()).expect("seed watermarks");

    TestEnv {
        _dir: dir,
        source_path,
        target_path,
        source,
        target,
    }
}

/// [`setup`] plus the [`seed`] fixture.
pub fn setup_seeded() -> TestEnv {
    let mut env = setup();
    seed(&mut env.source);
    env
}

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("timestamp")
}

pub fn film(id: i32, title: &str, language_id: Option<i32>, last_update: &str) -> Film {
    Film {
        film_id: id,
        title: Some(title.into()),
        description: None,
        release_year: Some(2006),
        language_id,
        rental_duration: Some(3),
        rental_rate: Some(0.99),
        length: Some(86),
        rating: Some("PG".into()),
        last_update: Some(ts(last_update)),
    }
}

pub fn category(id: i32, name: &str, last_update: &str) -> Category {
    Category {
        category_id: id,
        name: Some(name.into()),
        last_update: Some(ts(last_update)),
    }
}

pub fn insert_film(conn: &mut SqliteConnection, row: &Film) {
    insert_into(s::film::table).values(row).execute(conn).expect("insert film");
}

pub fn insert_category(conn: &mut SqliteConnection, row: &Category) {
    insert_into(s::category::table)
        .values(row)
        .execute(conn)
        .expect("insert category");
}

/// Two films, two actors, two categories, one store, two customers (one with a
/// dangling address), two rentals (one outstanding) and two payments.
pub fn seed(conn: &mut SqliteConnection) {
    let at = Some(ts(T0));
    insert_into(s::language::table)
        .values(&Language { language_id: 1, name: Some("English".into()), last_update: at })
        .execute(conn)
        .unwrap();
    insert_into(s::country::table)
        .values(&Country { country_id: 1, country_name: Some("Canada".into()), last_update: at })
        .execute(conn)
        .unwrap();
    insert_into(s::city::table)
        .values(&City {
            city_id: 1,
            city_name: Some("Lethbridge".into()),
            country_id: Some(1),
            last_update: at,
        })
        .execute(conn)
        .unwrap();
    insert_into(s::address::table)
        .values(&vec![
            Address {
                address_id: 1,
                address_line: Some("47 MySakila Drive".into()),
                city_id: Some(1),
                last_update: at,
            },
            Address {
                address_id: 2,
                address_line: Some("1913 Hanoi Way".into()),
                city_id: Some(99),
                last_update: at,
            },
        ])
        .execute(conn)
        .unwrap();

    insert_film(conn, &film(1, "ACADEMY DINOSAUR", Some(1), T0));
    insert_film(conn, &film(2, "ACE GOLDFINGER", None, T0));

    insert_into(s::actor::table)
        .values(&vec![
            Actor {
                actor_id: 1,
                first_name: Some("PENELOPE".into()),
                last_name: Some("GUINESS".into()),
                last_update: at,
            },
            Actor {
                actor_id: 2,
                first_name: Some("NICK".into()),
                last_name: Some("WAHLBERG".into()),
                last_update: at,
            },
        ])
        .execute(conn)
        .unwrap();
    insert_category(conn, &category(1, "Action", T0));
    insert_category(conn, &category(2, "Comedy", T0));

    insert_into(s::film_actor::table)
        .values(&vec![
            FilmActor { actor_id: 1, film_id: 1, last_update: at },
            FilmActor { actor_id: 2, film_id: 1, last_update: at },
            FilmActor { actor_id: 1, film_id: 2, last_update: at },
        ])
        .execute(conn)
        .unwrap();
    insert_into(s::film_category::table)
        .values(&vec![
            FilmCategory { film_id: 1, category_id: 1, last_update: at },
            FilmCategory { film_id: 2, category_id: 2, last_update: at },
        ])
        .execute(conn)
        .unwrap();

    insert_into(s::store::table)
        .values(&Store { store_id: 1, manager_staff_id: Some(1), address_id: Some(1), last_update: at })
        .execute(conn)
        .unwrap();
    insert_into(s::customer::table)
        .values(&vec![
            Customer {
                customer_id: 1,
                store_id: Some(1),
                first_name: Some("MARY".into()),
                last_name: Some("SMITH".into()),
                email: None,
                active: Some(1),
                create_date: at,
                last_update: at,
                address_id: Some(1),
            },
            Customer {
                customer_id: 2,
                store_id: Some(1),
                first_name: Some("PATRICIA".into()),
                last_name: Some("JOHNSON".into()),
                email: None,
                active: Some(1),
                create_date: at,
                last_update: at,
                address_id: Some(2),
            },
        ])
        .execute(conn)
        .unwrap();
    insert_into(s::inventory::table)
        .values(&vec![
            Inventory { inventory_id: 1, film_id: Some(1), store_id: Some(1), last_update: at },
            Inventory { inventory_id: 2, film_id: Some(2), store_id: Some(1), last_update: at },
        ])
        .execute(conn)
        .unwrap();

    insert_into(s::rental::table)
        .values(&vec![
            Rental {
                rental_id: 1,
                rental_date: Some(ts("2024-01-02 10:00:00")),
                inventory_id: Some(1),
                customer_id: Some(1),
                return_date: Some(ts("2024-01-05 09:00:00")),
                staff_id: Some(1),
                last_update: at,
            },
            Rental {
                rental_id: 2,
                rental_date: Some(ts("2024-01-03 15:30:00")),
                inventory_id: Some(2),
                customer_id: Some(2),
                return_date: None,
                staff_id: Some(2),
                last_update: at,
            },
        ])
        .execute(conn)
        .unwrap();
    insert_into(s::payment::table)
        .values(&vec![
            Payment {
                payment_id: 1,
                customer_id: Some(1),
                staff_id: Some(1),
                rental_id: Some(1),
                amount: Some(2.5),
                payment_date: Some(ts("2024-01-02 10:05:00")),
                last_update: at,
            },
            Payment {
                payment_id: 2,
                customer_id: Some(2),
                staff_id: Some(2),
                rental_id: Some(2),
                amount: Some(5.5),
                payment_date: Some(ts("2024-01-03 15:35:00")),
                last_update: at,
            },
        ])
        .execute(conn)
        .unwrap();
}

/// Every row of every target table, for whole-store comparisons.
#[derive(Debug, PartialEq)]
pub struct TargetSnapshot {
    pub dates: Vec<DimDate>,
    pub films: Vec<DimFilm>,
    pub actors: Vec<DimActor>,
    pub categories: Vec<DimCategory>,
    pub stores: Vec<DimStore>,
    pub customers: Vec<DimCustomer>,
    pub film_actors: Vec<BridgeFilmActor>,
    pub film_categories: Vec<BridgeFilmCategory>,
    pub rentals: Vec<FactRental>,
    pub payments: Vec<FactPayment>,
}

pub fn snapshot(conn: &mut SqliteConnection) -> TargetSnapshot {
    TargetSnapshot {
        dates: t::dim_date::table
            .order(t::dim_date::date_key)
            .select(DimDate::as_select())
            .load(conn)
            .unwrap(),
        films: t::dim_film::table
            .order(t::dim_film::film_key)
            .select(DimFilm::as_select())
            .load(conn)
            .unwrap(),
        actors: t::dim_actor::table
            .order(t::dim_actor::actor_key)
            .select(DimActor::as_select())
            .load(conn)
            .unwrap(),
        categories: t::dim_category::table
            .order(t::dim_category::category_key)
            .select(DimCategory::as_select())
            .load(conn)
            .unwrap(),
        stores: t::dim_store::table
            .order(t::dim_store::store_key)
            .select(DimStore::as_select())
            .load(conn)
            .unwrap(),
        customers: t::dim_customer::table
            .order(t::dim_customer::customer_key)
            .select(DimCustomer::as_select())
            .load(conn)
            .unwrap(),
        film_actors: t::bridge_film_actor::table
            .order((t::bridge_film_actor::film_key, t::bridge_film_actor::actor_key))
            .select(BridgeFilmActor::as_select())
            .load(conn)
            .unwrap(),
        film_categories: t::bridge_film_category::table
            .order((t::bridge_film_category::film_key, t::bridge_film_category::category_key))
            .select(BridgeFilmCategory::as_select())
            .load(conn)
            .unwrap(),
        rentals: t::fact_rental::table
            .order(t::fact_rental::fact_rental_key)
            .select(FactRental::as_select())
            .load(conn)
            .unwrap(),
        payments: t::fact_payment::table
            .order(t::fact_payment::fact_payment_key)
            .select(FactPayment::as_select())
            .load(conn)
            .unwrap(),
    }
}

pub fn film_row(conn: &mut SqliteConnection, film_key: i64) -> Option<DimFilm> {
    t::dim_film::table
        .find(film_key)
        .select(DimFilm::as_select())
        .first(conn)
        .optional()
        .unwrap()
}

pub fn journal_mode(conn: &mut SqliteConnection) -> String {
    let jm: JournalMode = sql_query("PRAGMA journal_mode;").get_result(conn).unwrap();
    jm.journal_mode.to_lowercase()
}

pub fn assert_sqlite_pragmas(conn: &mut SqliteConnection) {
    let jm: JournalMode = sql_query("PRAGMA journal_mode;").get_result(conn).unwrap();
    assert_eq!(jm.journal_mode.to_lowercase(), "wal"); // WAL is persistent per DB file

    let fk: ForeignKeys = sql_query("PRAGMA foreign_keys;").get_result(conn).unwrap();
    assert_eq!(fk.foreign_keys, 1);

    let bt: BusyTimeout = sql_query("PRAGMA busy_timeout;").get_result(conn).unwrap();
    assert_eq!(bt.busy_timeout, 5000);
}
