//! Reconciler holding the current snapshot of both users.
//!
//! This module implements the journey driving ports. All reads are served from
//! one [`JourneySnapshot`] that is only ever replaced wholesale by a full store
//! fetch. Mutations are forwarded to the store and followed by such a fetch;
//! nothing is patched locally.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    JourneyCommand, JourneyQuery, JourneyRepository, JourneyRepositoryError, SeedingResult,
};
use crate::domain::{
    ChartGeometry, ChartView, Dashboard, Error, HistoryView, JourneySnapshot, MutationKind,
    SeedData, Submission, TraceId, User, UserId, UserValidationError, WeightEntryId, WeightInput,
    map_chart,
};

/// What the presentation layer can show right now.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// No fetch has completed yet.
    Loading,
    /// The latest successful fetch.
    Ready(Arc<JourneySnapshot>),
    /// The initial load failed; cleared by the next successful reload.
    Failed(Error),
}

#[derive(Debug)]
struct InstalledView {
    generation: u64,
    state: ViewState,
}

type InFlightKey = (UserId, MutationKind);

/// Releases a double-submit slot when the mutation finishes.
struct InFlightGuard<'a> {
    registry: &'a Mutex<HashSet<InFlightKey>>,
    key: InFlightKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.key);
    }
}

/// Journey service implementing the driving ports.
pub struct JourneyService<R: ?Sized> {
    repository: Arc<R>,
    seed: SeedData,
    view: RwLock<InstalledView>,
    issued: AtomicU64,
    seeded: AtomicBool,
    in_flight: Mutex<HashSet<InFlightKey>>,
}

impl<R: ?Sized> JourneyService<R> {
    /// Create a service in the [`ViewState::Loading`] state.
    pub fn new(repository: Arc<R>, seed: SeedData) -> Self {
        Self {
            repository,
            seed,
            view: RwLock::new(InstalledView {
                generation: 0,
                state: ViewState::Loading,
            }),
            issued: AtomicU64::new(0),
            seeded: AtomicBool::new(false),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Current view state.
    pub fn view_state(&self) -> ViewState {
        self.view
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    fn begin(&self, user_id: UserId, kind: MutationKind) -> Result<InFlightGuard<'_>, Error> {
        let key = (user_id, kind);
        let inserted = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key);
        if !inserted {
            warn!(%user_id, mutation = %kind, "rejected duplicate submission");
            return Err(Error::conflict(format!(
                "a {kind} submission for {user_id} is already in progress"
            ))
            .with_details(json!({
                "userId": user_id,
                "mutation": kind.as_str(),
                "code": "submission_in_flight",
            })));
        }
        Ok(InFlightGuard {
            registry: &self.in_flight,
            key,
        })
    }

    fn decline(user_id: UserId, kind: MutationKind, error: &UserValidationError) -> Submission {
        debug!(%user_id, mutation = %kind, %error, "declined submission");
        Submission::declined(error)
    }

    /// Install `snapshot` unless a newer fetch already landed, returning the
    /// snapshot that is current afterwards.
    fn install(&self, ticket: u64, snapshot: Arc<JourneySnapshot>) -> Arc<JourneySnapshot> {
        let mut view = self.view.write().unwrap_or_else(PoisonError::into_inner);
        if ticket > view.generation {
            view.generation = ticket;
            view.state = ViewState::Ready(Arc::clone(&snapshot));
            return snapshot;
        }
        debug!(
            ticket,
            installed = view.generation,
            "discarded stale snapshot"
        );
        match &view.state {
            ViewState::Ready(current) => Arc::clone(current),
            ViewState::Loading | ViewState::Failed(_) => snapshot,
        }
    }

    fn record_failure(&self, ticket: u64, error: &Error) {
        let mut view = self.view.write().unwrap_or_else(PoisonError::into_inner);
        if matches!(view.state, ViewState::Ready(_)) || ticket <= view.generation {
            return;
        }
        view.generation = ticket;
        view.state = ViewState::Failed(error.clone());
    }

    fn restamp(error: Error) -> Error {
        match TraceId::current() {
            Some(trace_id) => error.with_trace_id(trace_id.to_string()),
            None => error,
        }
    }
}

impl<R> JourneyService<R>
where
    R: JourneyRepository + ?Sized,
{
    fn map_repository_error(error: JourneyRepositoryError) -> Error {
        match error {
            JourneyRepositoryError::NotConfigured { message } => Error::misconfigured(format!(
                "record store is not configured: {message}"
            ))
            .with_details(json!({
                "code": "store_not_configured",
                "remediation": [
                    "Set JOURNEY_DATABASE_URL to a reachable PostgreSQL database.",
                    "Or set JOURNEY_IN_MEMORY_STORE=true for a throwaway local store.",
                    "Restart the service.",
                ],
            })),
            JourneyRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("record store unavailable: {message}"))
                    .with_details(json!({
                        "code": "store_unavailable",
                        "remediation": [
                            "Check that the database is running and reachable.",
                            "Reload once the store is back.",
                        ],
                    }))
            }
            JourneyRepositoryError::PermissionDenied { message } => {
                Error::service_unavailable(format!("record store permission denied: {message}"))
                    .with_details(json!({
                        "code": "store_permission_denied",
                        "remediation": [
                            "Grant the service role SELECT, INSERT, UPDATE and DELETE on users and weight_entries.",
                            "Reload once the grants are in place.",
                        ],
                    }))
            }
            JourneyRepositoryError::Query { message } => {
                Error::internal(format!("record store error: {message}"))
            }
            JourneyRepositoryError::UserNotFound { user_id } => {
                Error::not_found(format!("user {user_id} does not exist"))
            }
            JourneyRepositoryError::EntryNotFound { entry_id } => {
                Error::not_found(format!("weight entry {entry_id} does not exist"))
            }
        }
    }

    async fn ensure_seeded(&self) -> Result<(), Error> {
        if self.seeded.load(Ordering::Acquire) {
            return Ok(());
        }
        let result = self
            .repository
            .seed_if_empty(&self.seed)
            .await
            .map_err(Self::map_repository_error)?;
        match result {
            SeedingResult::Applied => info!("seeded empty record store"),
            SeedingResult::AlreadySeeded => debug!("record store already seeded"),
        }
        self.seeded.store(true, Ordering::Release);
        Ok(())
    }

    async fn refresh(&self) -> Result<Arc<JourneySnapshot>, Error> {
        let ticket = self.issued.fetch_add(1, Ordering::AcqRel) + 1;
        let fetched = self
            .repository
            .fetch_all_users()
            .await
            .map_err(Self::map_repository_error)
            .and_then(JourneySnapshot::from_users);
        match fetched {
            Ok(snapshot) => Ok(self.install(ticket, Arc::new(snapshot))),
            Err(error) => {
                warn!(ticket, %error, "journey reload failed");
                self.record_failure(ticket, &error);
                Err(error)
            }
        }
    }

    /// Seed an empty store, then load the first snapshot.
    ///
    /// A failure leaves the service in [`ViewState::Failed`].
    pub async fn initialise(&self) -> Result<Dashboard, Error> {
        if let Err(error) = self.ensure_seeded().await {
            warn!(%error, "seeding failed");
            let ticket = self.issued.fetch_add(1, Ordering::AcqRel) + 1;
            self.record_failure(ticket, &error);
            return Err(error);
        }
        let snapshot = self.refresh().await?;
        Ok(Dashboard::of(&snapshot))
    }

    async fn current_snapshot(&self) -> Result<Arc<JourneySnapshot>, Error> {
        match self.view_state() {
            ViewState::Ready(snapshot) => Ok(snapshot),
            ViewState::Failed(error) => Err(Self::restamp(error)),
            ViewState::Loading => {
                self.ensure_seeded().await?;
                self.refresh().await
            }
        }
    }

    async fn applied(&self) -> Result<Submission, Error> {
        let snapshot = self.refresh().await?;
        Ok(Submission::Applied(Dashboard::of(&snapshot)))
    }
}

#[async_trait]
impl<R> JourneyQuery for JourneyService<R>
where
    R: JourneyRepository + ?Sized,
{
    async fn dashboard(&self) -> Result<Dashboard, Error> {
        let snapshot = self.current_snapshot().await?;
        Ok(Dashboard::of(&snapshot))
    }

    async fn reload(&self) -> Result<Dashboard, Error> {
        self.ensure_seeded().await?;
        let snapshot = self.refresh().await?;
        Ok(Dashboard::of(&snapshot))
    }

    async fn user(&self, user_id: UserId) -> Result<User, Error> {
        let snapshot = self.current_snapshot().await?;
        Ok(snapshot.user(user_id).clone())
    }

    async fn history(&self, user_id: UserId) -> Result<HistoryView, Error> {
        let snapshot = self.current_snapshot().await?;
        Ok(HistoryView::of(snapshot.user(user_id)))
    }

    async fn chart(&self, user_id: UserId, geometry: ChartGeometry) -> Result<ChartView, Error> {
        let snapshot = self.current_snapshot().await?;
        let user = snapshot.user(user_id);
        Ok(ChartView {
            user_id,
            goal_weight: user.goal_weight(),
            geometry,
            mapping: map_chart(user.weight_history(), user.goal_weight(), geometry),
        })
    }
}

#[async_trait]
impl<R> JourneyCommand for JourneyService<R>
where
    R: JourneyRepository + ?Sized,
{
    async fn add_weight(
        &self,
        user_id: UserId,
        weight: WeightInput,
    ) -> Result<Submission, Error> {
        let kind = MutationKind::AddWeight;
        let weight = match weight.validate() {
            Ok(weight) => weight,
            Err(error) => return Ok(Self::decline(user_id, kind, &error)),
        };
        let _guard = self.begin(user_id, kind)?;
        self.ensure_seeded().await?;
        self.repository
            .append_weight(user_id, weight)
            .await
            .map_err(Self::map_repository_error)?;
        info!(%user_id, weight = weight.kilograms(), "logged weight");
        self.applied().await
    }

    async fn update_goal(
        &self,
        user_id: UserId,
        goal_weight: WeightInput,
    ) -> Result<Submission, Error> {
        let kind = MutationKind::UpdateGoal;
        let goal_weight = match goal_weight.validate() {
            Ok(goal_weight) => goal_weight,
            Err(error) => return Ok(Self::decline(user_id, kind, &error)),
        };
        let _guard = self.begin(user_id, kind)?;
        self.ensure_seeded().await?;
        self.repository
            .set_goal_weight(user_id, goal_weight)
            .await
            .map_err(Self::map_repository_error)?;
        info!(%user_id, goal_weight = goal_weight.kilograms(), "updated goal weight");
        self.applied().await
    }

    async fn delete_weight(
        &self,
        user_id: UserId,
        entry_id: WeightEntryId,
    ) -> Result<Submission, Error> {
        let _guard = self.begin(user_id, MutationKind::DeleteWeight)?;
        self.ensure_seeded().await?;
        self.repository
            .remove_weight(user_id, &entry_id)
            .await
            .map_err(Self::map_repository_error)?;
        info!(%user_id, %entry_id, "deleted weight entry");
        self.applied().await
    }
}

#[cfg(test)]
#[path = "journey_service_tests.rs"]
mod tests;
