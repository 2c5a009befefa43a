//! PostgreSQL-backed `JourneyRepository` implementation using Diesel ORM.
//!
//! Users live in `users` keyed by their fixed identifier; entries live in
//! `weight_entries` with database-generated ids and timestamps.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{JourneyRepository, JourneyRepositoryError, SeedingResult};
use crate::domain::{
    DisplayName, SeedData, User, UserId, Weight, WeightEntry, WeightEntryId, order_for_display,
};

use super::journey_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, NewWeightEntryRow, UserRow, WeightEntryRow};
use super::pool::DbPool;
use super::schema::{users, weight_entries};

/// Diesel-backed implementation of the `JourneyRepository` port.
#[derive(Clone)]
pub struct DieselJourneyRepository {
    pool: DbPool,
}

impl DieselJourneyRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use weight_journey::outbound::persistence::{DbPool, DieselJourneyRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/journey")).await?;
    /// let repository = DieselJourneyRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn corrupt_row(message: String) -> JourneyRepositoryError {
    warn!(%message, "rejected stored row");
    JourneyRepositoryError::query(message)
}

fn row_to_entry(row: WeightEntryRow) -> Result<WeightEntry, JourneyRepositoryError> {
    let weight = Weight::new(row.weight)
        .map_err(|error| corrupt_row(format!("entry {}: {error}", row.id)))?;
    let id = WeightEntryId::new(row.id.to_string())
        .map_err(|error| corrupt_row(format!("entry {}: {error}", row.id)))?;
    Ok(WeightEntry {
        id,
        date: row.date,
        weight,
    })
}

fn assemble_users(
    user_rows: Vec<UserRow>,
    entry_rows: Vec<WeightEntryRow>,
) -> Result<Vec<User>, JourneyRepositoryError> {
    let mut histories: HashMap<String, Vec<WeightEntry>> = HashMap::new();
    for row in entry_rows {
        let user_id = row.user_id.clone();
        histories.entry(user_id).or_default().push(row_to_entry(row)?);
    }

    let mut assembled = Vec::with_capacity(user_rows.len());
    for row in user_rows {
        let id = UserId::from_str(&row.id)
            .map_err(|error| corrupt_row(format!("user {}: {error}", row.id)))?;
        let name = DisplayName::new(row.name)
            .map_err(|error| corrupt_row(format!("user {id}: {error}")))?;
        let goal_weight = Weight::new(row.goal_weight)
            .map_err(|error| corrupt_row(format!("user {id}: {error}")))?;
        let history = histories.remove(&row.id).unwrap_or_default();
        assembled.push(User::new(id, name, goal_weight, history));
    }
    order_for_display(&mut assembled);
    Ok(assembled)
}

#[async_trait]
impl JourneyRepository for DieselJourneyRepository {
    async fn fetch_all_users(&self) -> Result<Vec<User>, JourneyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Goals and histories come from one snapshot.
        let loaded: Result<(Vec<UserRow>, Vec<WeightEntryRow>), diesel::result::Error> = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let user_rows = users::table
                        .select(UserRow::as_select())
                        .load(conn)
                        .await?;
                    let entry_rows = weight_entries::table
                        .select(WeightEntryRow::as_select())
                        .order_by(weight_entries::date.asc())
                        .load(conn)
                        .await?;
                    Ok((user_rows, entry_rows))
                }
                .scope_boxed()
            })
            .await;
        let (user_rows, entry_rows) = loaded.map_err(|error| map_diesel_error(error, "*"))?;

        assemble_users(user_rows, entry_rows)
    }

    async fn seed_if_empty(
        &self,
        seed: &SeedData,
    ) -> Result<SeedingResult, JourneyRepositoryError> {
        let user_rows: Vec<NewUserRow<'_>> = seed
            .users()
            .iter()
            .map(|user| NewUserRow {
                id: user.id.as_str(),
                name: user.name.as_ref(),
                goal_weight: user.goal_weight.kilograms(),
            })
            .collect();
        let entry_rows: Vec<NewWeightEntryRow<'_>> = seed
            .users()
            .iter()
            .flat_map(|user| {
                user.entries.iter().map(move |entry| NewWeightEntryRow {
                    user_id: user.id.as_str(),
                    date: Some(entry.date),
                    weight: entry.weight.kilograms(),
                })
            })
            .collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let seeded: Result<SeedingResult, diesel::result::Error> = conn
            .transaction(|conn| {
                async move {
                    diesel::sql_query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
                        .execute(conn)
                        .await?;
                    let existing: i64 = users::table.count().get_result(conn).await?;
                    if existing > 0 {
                        return Ok(SeedingResult::AlreadySeeded);
                    }

                    diesel::insert_into(users::table)
                        .values(&user_rows)
                        .execute(conn)
                        .await?;
                    if !entry_rows.is_empty() {
                        diesel::insert_into(weight_entries::table)
                            .values(&entry_rows)
                            .execute(conn)
                            .await?;
                    }
                    Ok(SeedingResult::Applied)
                }
                .scope_boxed()
            })
            .await;
        seeded.map_err(|error| map_diesel_error(error, "*"))
    }

    async fn append_weight(
        &self,
        user_id: UserId,
        weight: Weight,
    ) -> Result<(), JourneyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(weight_entries::table)
            .values(&NewWeightEntryRow {
                user_id: user_id.as_str(),
                date: None,
                weight: weight.kilograms(),
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| map_diesel_error(error, user_id.as_str()))
    }

    async fn set_goal_weight(
        &self,
        user_id: UserId,
        goal_weight: Weight,
    ) -> Result<(), JourneyRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(users::table.filter(users::id.eq(user_id.as_str())))
            .set(users::goal_weight.eq(goal_weight.kilograms()))
            .execute(&mut conn)
            .await
            .map_err(|error| map_diesel_error(error, user_id.as_str()))?;
        if updated == 0 {
            return Err(JourneyRepositoryError::user_not_found(user_id.as_str()));
        }
        Ok(())
    }

    async fn remove_weight(
        &self,
        user_id: UserId,
        entry_id: &WeightEntryId,
    ) -> Result<(), JourneyRepositoryError> {
        let not_found = || JourneyRepositoryError::entry_not_found(entry_id.to_string());
        let id = Uuid::parse_str(entry_id.as_ref()).map_err(|_| not_found())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            weight_entries::table
                .filter(weight_entries::id.eq(id))
                .filter(weight_entries::user_id.eq(user_id.as_str())),
        )
        .execute(&mut conn)
        .await
        .map_err(|error| map_diesel_error(error, user_id.as_str()))?;
        if deleted == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Row assembly coverage; store round trips live in `tests/`.
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    fn user_row(id: &str, name: &str, goal_weight: f64) -> UserRow {
        UserRow {
            id: id.to_owned(),
            name: name.to_owned(),
            goal_weight,
        }
    }

    fn entry_row(user_id: &str, day: u32, weight: f64) -> WeightEntryRow {
        WeightEntryRow {
            id: Uuid::new_v4(),
            user_id: user_id.to_owned(),
            date: Utc
                .with_ymd_and_hms(2025, 1, day, 8, 0, 0)
                .single()
                .expect("valid date"),
            weight,
        }
    }

    #[rstest]
    fn assembles_users_in_display_order() {
        let users = assemble_users(
            vec![
                user_row("hussein", "Hussein", 85.0),
                user_row("rola", "Rola", 65.0),
            ],
            vec![
                entry_row("hussein", 2, 97.5),
                entry_row("rola", 1, 75.0),
                entry_row("hussein", 1, 98.0),
            ],
        )
        .expect("assemble");

        assert_eq!(users[0].id(), UserId::Rola);
        assert_eq!(users[1].id(), UserId::Hussein);
        let hussein: Vec<f64> = users[1]
            .weight_history()
            .iter()
            .map(|entry| entry.weight.kilograms())
            .collect();
        assert_eq!(hussein, vec![98.0, 97.5]);
        assert_eq!(users[0].weight_history().len(), 1);
    }

    #[rstest]
    fn user_without_entries_gets_empty_history() {
        let users = assemble_users(vec![user_row("rola", "Rola", 65.0)], Vec::new())
            .expect("assemble");
        assert!(users[0].weight_history().is_empty());
    }

    #[rstest]
    #[case::unknown_id(user_row("sam", "Sam", 70.0))]
    #[case::blank_name(user_row("rola", "  ", 65.0))]
    #[case::bad_goal(user_row("rola", "Rola", 0.0))]
    fn corrupt_user_rows_are_query_errors(#[case] row: UserRow) {
        let error = assemble_users(vec![row], Vec::new()).expect_err("corrupt row");
        assert!(matches!(error, JourneyRepositoryError::Query { .. }));
    }

    #[rstest]
    fn corrupt_entry_rows_are_query_errors() {
        let error = assemble_users(
            vec![user_row("rola", "Rola", 65.0)],
            vec![entry_row("rola", 1, -3.0)],
        )
        .expect_err("corrupt entry");
        assert!(matches!(error, JourneyRepositoryError::Query { .. }));
    }
}
