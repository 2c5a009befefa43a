//! Driving port for motivational messages.

use async_trait::async_trait;

use crate::domain::{Motivation, User};

/// Domain use-case port returning a message for a user's card.
///
/// Implementations never fail; an unavailable generator degrades to the
/// catalog message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MotivationQuery: Send + Sync {
    /// Message for `user`.
    async fn motivation_for(&self, user: &User) -> Motivation;
}
