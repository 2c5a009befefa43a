//! Driving port for read-side journey views.
//!
//! Inbound adapters use this port to render cards, history tables and charts
//! from the reconciler's current snapshot without touching the store.

use async_trait::async_trait;

use crate::domain::{ChartGeometry, ChartView, Dashboard, Error, HistoryView, User, UserId};

/// Domain use-case port for reading the current snapshot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JourneyQuery: Send + Sync {
    /// Both cards from the held snapshot.
    async fn dashboard(&self) -> Result<Dashboard, Error>;

    /// Refetch everything from the store and replace the snapshot.
    async fn reload(&self) -> Result<Dashboard, Error>;

    /// One user as held in the snapshot.
    async fn user(&self, user_id: UserId) -> Result<User, Error>;

    /// Date-descending history for one user.
    async fn history(&self, user_id: UserId) -> Result<HistoryView, Error>;

    /// Chart coordinates for one user.
    async fn chart(&self, user_id: UserId, geometry: ChartGeometry) -> Result<ChartView, Error>;
}
