//! Normalized operational schema (read-only for this crate).
//!
//! Columns that share their table's name are exposed under a different Rust name
//! (`address.address` → `address_line`, `city.city` → `city_name`,
//! `country.country` → `country_name`).

diesel::table! {
    language (language_id) {
        language_id -> Integer,
        name -> Nullable<Text>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    film (film_id) {
        film_id -> Integer,
        title -> Nullable<Text>,
        description -> Nullable<Text>,
        release_year -> Nullable<Integer>,
        language_id -> Nullable<Integer>,
        rental_duration -> Nullable<Integer>,
        rental_rate -> Nullable<Double>,
        length -> Nullable<Integer>,
        rating -> Nullable<Text>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    actor (actor_id) {
        actor_id -> Integer,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    category (category_id) {
        category_id -> Integer,
        name -> Nullable<Text>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    film_actor (actor_id, film_id) {
        actor_id -> Integer,
        film_id -> Integer,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    film_category (film_id, category_id) {
        film_id -> Integer,
        category_id -> Integer,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    address (address_id) {
        address_id -> Integer,
        #[sql_name = "address"]
        address_line -> Nullable<Text>,
        city_id -> Nullable<Integer>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    city (city_id) {
        city_id -> Integer,
        #[sql_name = "city"]
        city_name -> Nullable<Text>,
        country_id -> Nullable<Integer>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    country (country_id) {
        country_id -> Integer,
        #[sql_name = "country"]
        country_name -> Nullable<Text>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    store (store_id) {
        store_id -> Integer,
        manager_staff_id -> Nullable<Integer>,
        address_id -> Nullable<Integer>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    customer (customer_id) {
        customer_id -> Integer,
        store_id -> Nullable<Integer>,
        first_name -> Nullable<Text>,
        last_name -> Nullable<Text>,
        email -> Nullable<Text>,
        active -> Nullable<Integer>,
        create_date -> Nullable<Timestamp>,
        last_update -> Nullable<Timestamp>,
        address_id -> Nullable<Integer>,
    }
}

diesel::table! {
    inventory (inventory_id) {
        inventory_id -> Integer,
        film_id -> Nullable<Integer>,
        store_id -> Nullable<Integer>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    rental (rental_id) {
        rental_id -> Integer,
        rental_date -> Nullable<Timestamp>,
        inventory_id -> Nullable<Integer>,
        customer_id -> Nullable<Integer>,
        return_date -> Nullable<Timestamp>,
        staff_id -> Nullable<Integer>,
        last_update -> Nullable<Timestamp>,
    }
}

diesel::table! {
    payment (payment_id) {
        payment_id -> Integer,
        customer_id -> Nullable<Integer>,
        staff_id -> Nullable<Integer>,
        rental_id -> Nullable<Integer>,
        amount -> Nullable<Double>,
        payment_date -> Nullable<Timestamp>,
        last_update -> Nullable<Timestamp>,
    }
}
