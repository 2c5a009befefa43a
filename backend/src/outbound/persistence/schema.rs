//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command can regenerate them from a live database.

diesel::table! {
    /// The two tracked users.
    ///
    /// `id` is constrained to `rola` or `hussein`.
    users (id) {
        id -> Text,
        /// Display name (max 32 characters).
        name -> Varchar,
        /// Target weight in kilograms, always positive.
        goal_weight -> Float8,
    }
}

diesel::table! {
    /// Dated weight measurements; never updated in place.
    weight_entries (id) {
        /// Primary key generated by the database.
        id -> Uuid,
        user_id -> Text,
        /// Recorded instant, defaulting to the insert time.
        date -> Timestamptz,
        /// Measured weight in kilograms, always positive.
        weight -> Float8,
    }
}

diesel::joinable!(weight_entries -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, weight_entries);
