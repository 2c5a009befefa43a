//! Driven port for the record store holding both users and their entries.
//!
//! Adapters translate between store rows and domain types. Every fetch returns
//! complete users with histories ordered by date ascending; the reconciler
//! never patches what it receives.

use async_trait::async_trait;

use crate::domain::{SeedData, User, UserId, Weight, WeightEntryId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum JourneyRepositoryError {
        /// No store has been configured for this process.
        NotConfigured { message: String } =>
            "record store is not configured: {message}",
        /// Store connection could not be established.
        Connection { message: String } =>
            "record store connection failed: {message}",
        /// The store refused access.
        PermissionDenied { message: String } =>
            "record store permission denied: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "record store query failed: {message}",
        /// The user row is missing.
        UserNotFound { user_id: String } =>
            "user {user_id} does not exist",
        /// No entry with this id belongs to the user.
        EntryNotFound { entry_id: String } =>
            "weight entry {entry_id} does not exist",
    }
}

/// Result of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// The store was empty and now holds the seed users.
    Applied,
    /// The store already held users; nothing was written.
    AlreadySeeded,
}

/// Port for reading and mutating the two tracked users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JourneyRepository: Send + Sync {
    /// Fetch both users with histories ordered by date ascending.
    async fn fetch_all_users(&self) -> Result<Vec<User>, JourneyRepositoryError>;

    /// Create both users from `seed` when the store holds no users.
    ///
    /// The emptiness check and the inserts run atomically.
    async fn seed_if_empty(&self, seed: &SeedData)
    -> Result<SeedingResult, JourneyRepositoryError>;

    /// Append an entry stamped with the store's current time.
    async fn append_weight(
        &self,
        user_id: UserId,
        weight: Weight,
    ) -> Result<(), JourneyRepositoryError>;

    /// Replace the user's goal weight.
    async fn set_goal_weight(
        &self,
        user_id: UserId,
        goal_weight: Weight,
    ) -> Result<(), JourneyRepositoryError>;

    /// Delete one of the user's entries.
    ///
    /// An id that is unknown, or that belongs to the other user, yields
    /// [`JourneyRepositoryError::EntryNotFound`].
    async fn remove_weight(
        &self,
        user_id: UserId,
        entry_id: &WeightEntryId,
    ) -> Result<(), JourneyRepositoryError>;
}

/// Repository used when no store is configured; every call fails with
/// [`JourneyRepositoryError::NotConfigured`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredJourneyRepository;

impl UnconfiguredJourneyRepository {
    fn error() -> JourneyRepositoryError {
        JourneyRepositoryError::not_configured(
            "set JOURNEY_DATABASE_URL or enable JOURNEY_IN_MEMORY_STORE",
        )
    }
}

#[async_trait]
impl JourneyRepository for UnconfiguredJourneyRepository {
    async fn fetch_all_users(&self) -> Result<Vec<User>, JourneyRepositoryError> {
        Err(Self::error())
    }

    async fn seed_if_empty(
        &self,
        _seed: &SeedData,
    ) -> Result<SeedingResult, JourneyRepositoryError> {
        Err(Self::error())
    }

    async fn append_weight(
        &self,
        _user_id: UserId,
        _weight: Weight,
    ) -> Result<(), JourneyRepositoryError> {
        Err(Self::error())
    }

    async fn set_goal_weight(
        &self,
        _user_id: UserId,
        _goal_weight: Weight,
    ) -> Result<(), JourneyRepositoryError> {
        Err(Self::error())
    }

    async fn remove_weight(
        &self,
        _user_id: UserId,
        _entry_id: &WeightEntryId,
    ) -> Result<(), JourneyRepositoryError> {
        Err(Self::error())
    }
}
