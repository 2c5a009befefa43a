//! Process-local record store.
//!
//! Backs the journey ports when no database is configured but an ephemeral
//! store was requested, and drives the HTTP and behaviour tests. Data is lost
//! when the process exits.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{JourneyRepository, JourneyRepositoryError, SeedingResult};
use crate::domain::{
    DisplayName, SeedData, User, UserId, Weight, WeightEntry, WeightEntryId, order_for_display,
};

#[derive(Debug, Clone)]
struct StoredUser {
    name: DisplayName,
    goal_weight: Weight,
    entries: Vec<WeightEntry>,
}

/// In-memory implementation of [`JourneyRepository`].
///
/// Entry timestamps come from the injected clock, so tests can pin "now".
#[derive(Clone)]
pub struct InMemoryJourneyRepository {
    users: Arc<Mutex<BTreeMap<UserId, StoredUser>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryJourneyRepository {
    /// Create an empty store stamping entries with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Arc::new(Mutex::new(BTreeMap::new())),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<UserId, StoredUser>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn new_entry_id() -> Result<WeightEntryId, JourneyRepositoryError> {
        WeightEntryId::new(Uuid::new_v4().to_string())
            .map_err(|error| JourneyRepositoryError::query(error.to_string()))
    }
}

#[async_trait]
impl JourneyRepository for InMemoryJourneyRepository {
    async fn fetch_all_users(&self) -> Result<Vec<User>, JourneyRepositoryError> {
        let mut users: Vec<User> = self
            .lock()
            .iter()
            .map(|(id, stored)| {
                User::new(
                    *id,
                    stored.name.clone(),
                    stored.goal_weight,
                    stored.entries.clone(),
                )
            })
            .collect();
        order_for_display(&mut users);
        Ok(users)
    }

    async fn seed_if_empty(
        &self,
        seed: &SeedData,
    ) -> Result<SeedingResult, JourneyRepositoryError> {
        let mut users = self.lock();
        if !users.is_empty() {
            return Ok(SeedingResult::AlreadySeeded);
        }
        let mut seeded = BTreeMap::new();
        for seed_user in seed.users() {
            let entries = seed_user
                .entries
                .iter()
                .map(|entry| {
                    Ok(WeightEntry {
                        id: Self::new_entry_id()?,
                        date: entry.date,
                        weight: entry.weight,
                    })
                })
                .collect::<Result<Vec<_>, JourneyRepositoryError>>()?;
            seeded.insert(
                seed_user.id,
                StoredUser {
                    name: seed_user.name.clone(),
                    goal_weight: seed_user.goal_weight,
                    entries,
                },
            );
        }
        *users = seeded;
        Ok(SeedingResult::Applied)
    }

    async fn append_weight(
        &self,
        user_id: UserId,
        weight: Weight,
    ) -> Result<(), JourneyRepositoryError> {
        let id = Self::new_entry_id()?;
        let date = self.clock.utc();
        let mut users = self.lock();
        let stored = users
            .get_mut(&user_id)
            .ok_or_else(|| JourneyRepositoryError::user_not_found(user_id.as_str()))?;
        stored.entries.push(WeightEntry { id, date, weight });
        Ok(())
    }

    async fn set_goal_weight(
        &self,
        user_id: UserId,
        goal_weight: Weight,
    ) -> Result<(), JourneyRepositoryError> {
        let mut users = self.lock();
        let stored = users
            .get_mut(&user_id)
            .ok_or_else(|| JourneyRepositoryError::user_not_found(user_id.as_str()))?;
        stored.goal_weight = goal_weight;
        Ok(())
    }

    async fn remove_weight(
        &self,
        user_id: UserId,
        entry_id: &WeightEntryId,
    ) -> Result<(), JourneyRepositoryError> {
        let mut users = self.lock();
        let entries = users
            .get_mut(&user_id)
            .map(|stored| &mut stored.entries)
            .ok_or_else(|| JourneyRepositoryError::user_not_found(user_id.as_str()))?;
        let position = entries
            .iter()
            .position(|entry| &entry.id == entry_id)
            .ok_or_else(|| JourneyRepositoryError::entry_not_found(entry_id.to_string()))?;
        entries.remove(position);
        Ok(())
    }
}
