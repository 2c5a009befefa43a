//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{users, weight_entries};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: String,
    pub name: String,
    pub goal_weight: f64,
}

/// Insertable struct for seeding user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub goal_weight: f64,
}

/// Row struct for reading from the weight_entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = weight_entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct WeightEntryRow {
    pub id: Uuid,
    pub user_id: String,
    pub date: DateTime<Utc>,
    pub weight: f64,
}

/// Insertable struct for new entries.
///
/// A `None` date is written as `DEFAULT`, i.e. the database's `now()`.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = weight_entries)]
pub(crate) struct NewWeightEntryRow<'a> {
    pub user_id: &'a str,
    pub date: Option<DateTime<Utc>>,
    pub weight: f64,
}
