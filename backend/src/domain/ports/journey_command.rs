//! Driving port for the three mutating intents.
//!
//! Each intent is applied to the store and followed by a full reload. Input
//! that fails validation comes back as [`Submission::Declined`] rather than an
//! error.

use async_trait::async_trait;

use crate::domain::{Error, Submission, UserId, WeightEntryId, WeightInput};

/// Domain use-case port for mutating a user's data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JourneyCommand: Send + Sync {
    /// Log a new weight stamped with the store's current time.
    async fn add_weight(&self, user_id: UserId, weight: WeightInput)
    -> Result<Submission, Error>;

    /// Replace the user's goal weight.
    async fn update_goal(
        &self,
        user_id: UserId,
        goal_weight: WeightInput,
    ) -> Result<Submission, Error>;

    /// Delete one of the user's entries.
    async fn delete_weight(
        &self,
        user_id: UserId,
        entry_id: WeightEntryId,
    ) -> Result<Submission, Error>;
}
