//! Star schema written by the sync.
//!
//! Mirrors `migrations/2025-01-01-000000_create_star_schema/up.sql`.

diesel::table! {
    dim_date (date_key) {
        date_key -> Integer,
        calendar_date -> Date,
        year -> Integer,
        quarter -> Integer,
        month -> Integer,
        day_of_month -> Integer,
        day_of_week -> Integer,
        is_weekend -> Bool,
    }
}

diesel::table! {
    dim_film (film_key) {
        film_key -> BigInt,
        film_id -> Integer,
        title -> Nullable<Text>,
        rating -> Nullable<Text>,
        length -> Nullable<Integer>,
        language -> Nullable<Text>,
        release_year -> Nullable<Integer>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    dim_actor (actor_key) {
        actor_key -> BigInt,
        actor_id -> Integer,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    dim_category (category_key) {
        category_key -> BigInt,
        category_id -> Integer,
        name -> Nullable<Text>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    dim_store (store_key) {
        store_key -> BigInt,
        store_id -> Integer,
        city -> Nullable<Text>,
        country -> Nullable<Text>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    dim_customer (customer_key) {
        customer_key -> BigInt,
        customer_id -> Integer,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        active -> Nullable<Integer>,
        city -> Nullable<Text>,
        country -> Nullable<Text>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    bridge_film_actor (film_key, actor_key) {
        film_key -> BigInt,
        actor_key -> BigInt,
    }
}

diesel::table! {
    bridge_film_category (film_key, category_key) {
        film_key -> BigInt,
        category_key -> BigInt,
    }
}

diesel::table! {
    fact_rental (fact_rental_key) {
        fact_rental_key -> BigInt,
        rental_id -> Integer,
        date_key_rented -> Nullable<Integer>,
        date_key_returned -> Nullable<Integer>,
        film_key -> Nullable<BigInt>,
        store_key -> Nullable<BigInt>,
        customer_key -> Nullable<BigInt>,
        staff_id -> Nullable<Integer>,
        rental_duration_days -> Nullable<Integer>,
    }
}

diesel::table! {
    fact_payment (fact_payment_key) {
        fact_payment_key -> BigInt,
        payment_id -> Integer,
        date_key_paid -> Nullable<Integer>,
        customer_key -> Nullable<BigInt>,
        store_key -> Nullable<BigInt>,
        staff_id -> Nullable<Integer>,
        amount -> Nullable<Double>,
    }
}

diesel::table! {
    sync_state (table_name) {
        table_name -> Text,
        last_synced -> Timestamp,
    }
}

diesel::allow_tables_to_appear_in_same_query!(
    dim_date,
    dim_film,
    dim_actor,
    dim_category,
    dim_store,
    dim_customer,
    bridge_film_actor,
    bridge_film_category,
    fact_rental,
    fact_payment,
    sync_state,
);
