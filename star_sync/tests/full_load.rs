mod common;
use common::{T0, setup, setup_seeded, snapshot, ts};

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use star_sync::schema::{source as s, target as t};
use star_sync::sync::full::full_load;
use star_sync::sync::plan::SourceTable;
use star_sync::sync::{SyncMode, TableStatus};
use star_sync::warehouse::watermark;

#[test]
fn full_load_builds_the_star_schema() {
    let mut env = setup_seeded();
    let report = full_load(&mut env.source, &mut env.target).expect("full load");
    assert_eq!(report.mode, SyncMode::Full);
    assert!(report.is_clean());
    assert_eq!(report.outcomes.len(), 10);

    let snap = snapshot(&mut env.target);
    assert_eq!(snap.films.len(), 2);
    assert_eq!(snap.actors.len(), 2);
    assert_eq!(snap.categories.len(), 2);
    assert_eq!(snap.stores.len(), 1);
    assert_eq!(snap.customers.len(), 2);
    assert_eq!(snap.film_actors.len(), 3);
    assert_eq!(snap.film_categories.len(), 2);
    assert_eq!(snap.rentals.len(), 2);
    assert_eq!(snap.payments.len(), 2);
    let date_keys: Vec<i32> = snap.dates.iter().map(|d| d.date_key).collect();
    assert_eq!(date_keys, vec![20240102, 20240103, 20240105]);

    // language resolved on film 1, absent on film 2
    assert_eq!(snap.films[0].film_key, 101);
    assert_eq!(snap.films[0].language.as_deref(), Some("English"));
    assert_eq!(snap.films[1].language, None);

    // customer 2 points at a city that does not exist
    assert_eq!(snap.customers[0].city.as_deref(), Some("Lethbridge"));
    assert_eq!(snap.customers[0].country.as_deref(), Some("Canada"));
    assert_eq!(snap.customers[1].city, None);
    assert_eq!(snap.customers[1].country, None);
    assert_eq!(snap.stores[0].city.as_deref(), Some("Lethbridge"));

    let returned = &snap.rentals[0];
    assert_eq!(returned.fact_rental_key, 11);
    assert_eq!(returned.film_key, Some(101));
    assert_eq!(returned.store_key, Some(101));
    assert_eq!(returned.customer_key, Some(101));
    assert_eq!(returned.rental_duration_days, Some(2));
    let outstanding = &snap.rentals[1];
    assert_eq!(outstanding.date_key_returned, None);
    assert_eq!(outstanding.rental_duration_days, None);

    assert!(snap.payments.iter().all(|p| p.store_key.is_none()));

    for name in ["film", "rental", "payment", "inventory"] {
        assert_eq!(watermark::get(&mut env.target, name).unwrap(), ts(T0), "{name}");
    }
    assert_eq!(
        report.status(SourceTable::Film),
        Some(&TableStatus::Advanced { rows: 2, from: watermark::epoch(), to: ts(T0) })
    );
}

#[test]
fn full_load_is_idempotent() {
    let mut env = setup_seeded();
    full_load(&mut env.source, &mut env.target).unwrap();
    let first = snapshot(&mut env.target);
    let marks = watermark::all(&mut env.target).unwrap();

    full_load(&mut env.source, &mut env.target).unwrap();
    assert_eq!(snapshot(&mut env.target), first);
    assert_eq!(watermark::all(&mut env.target).unwrap(), marks);
}

#[test]
fn failing_table_rolls_back_everything() {
    let mut env = setup_seeded();
    env.target.batch_execute("DROP TABLE fact_payment").unwrap();

    let err = full_load(&mut env.source, &mut env.target).unwrap_err();
    assert!(format!("{err:#}").contains("loading payment"), "{err:#}");

    // earlier tables were written in the same transaction and are gone too
    assert_eq!(surviving_rows(&mut env.target), 0);
    for name in ["actor", "film", "rental"] {
        assert_eq!(
            watermark::get(&mut env.target, name).unwrap(),
            watermark::epoch(),
            "{name}"
        );
    }
}

fn surviving_rows(conn: &mut SqliteConnection) -> i64 {
    let films: i64 = t::dim_film::table.count().get_result(conn).unwrap();
    let actors: i64 = t::dim_actor::table.count().get_result(conn).unwrap();
    let rentals: i64 = t::fact_rental::table.count().get_result(conn).unwrap();
    let dates: i64 = t::dim_date::table.count().get_result(conn).unwrap();
    films + actors + rentals + dates
}

#[test]
fn rows_without_timestamps_are_loaded_and_do_not_move_watermarks() {
    let mut env = setup();
    let mut f = common::film(7, "NO TIMESTAMP", None, T0);
    f.last_update = None;
    common::insert_film(&mut env.source, &f);

    let report = full_load(&mut env.source, &mut env.target).unwrap();
    assert!(common::film_row(&mut env.target, 701).is_some());
    assert_eq!(
        report.status(SourceTable::Film),
        Some(&TableStatus::Advanced {
            rows: 1,
            from: watermark::epoch(),
            to: watermark::epoch()
        })
    );
    assert_eq!(report.status(SourceTable::Actor), Some(&TableStatus::Unchanged));
    assert_eq!(watermark::get(&mut env.target, "film").unwrap(), watermark::epoch());
}

#[test]
fn full_load_never_lowers_a_watermark() {
    let mut env = setup_seeded();
    watermark::set(&mut env.target, "film", ts("2030-01-01 00:00:00")).unwrap();
    full_load(&mut env.source, &mut env.target).unwrap();
    assert_eq!(
        watermark::get(&mut env.target, "film").unwrap(),
        ts("2030-01-01 00:00:00")
    );
}

#[test]
fn source_updates_overwrite_including_nulls() {
    let mut env = setup_seeded();
    full_load(&mut env.source, &mut env.target).unwrap();

    diesel::update(s::film::table.find(1))
        .set((
            s::film::title.eq("ACADEMY DINOSAUR II"),
            s::film::rating.eq(None::<String>),
        ))
        .execute(&mut env.source)
        .unwrap();
    full_load(&mut env.source, &mut env.target).unwrap();

    let row = common::film_row(&mut env.target, 101).unwrap();
    assert_eq!(row.title.as_deref(), Some("ACADEMY DINOSAUR II"));
    assert_eq!(row.rating, None);
}
