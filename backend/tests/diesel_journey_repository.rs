//! Integration tests for `DieselJourneyRepository` against embedded
//! PostgreSQL.
//!
//! Every test provisions its own migrated database on the shared
//! `pg-embed-setup-unpriv` cluster. Set `SKIP_TEST_CLUSTER=1` where the
//! cluster cannot start.

use std::sync::Arc;

use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use weight_journey::domain::ports::{JourneyRepository, JourneyRepositoryError, SeedingResult};
use weight_journey::domain::{JourneyService, SeedData, User, UserId, Weight, WeightEntryId};
use weight_journey::outbound::persistence::{DbPool, DieselJourneyRepository, PoolConfig};

mod support;

use support::{handle_cluster_setup_failure, provision_migrated_database, shared_cluster};

struct TestContext {
    /// Runtime reused for every async call in one test.
    runtime: Runtime,
    repository: Arc<DieselJourneyRepository>,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn seeded(self) -> Self {
        let result = self
            .runtime
            .block_on(self.repository.seed_if_empty(&SeedData::default()))
            .expect("seed store");
        assert_eq!(result, SeedingResult::Applied);
        self
    }

    fn fetch(&self) -> Vec<User> {
        self.runtime
            .block_on(self.repository.fetch_all_users())
            .expect("fetch users")
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_migrated_database(cluster)?;
    let config = PoolConfig::new(database.url())
        .with_max_size(4)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;
    Ok(TestContext {
        runtime,
        repository: Arc::new(DieselJourneyRepository::new(pool)),
        _database: database,
    })
}

#[fixture]
fn context() -> Option<TestContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn user(users: &[User], id: UserId) -> &User {
    users
        .iter()
        .find(|user| user.id() == id)
        .expect("user present")
}

fn weight(kilograms: f64) -> Weight {
    Weight::new(kilograms).expect("positive weight")
}

#[rstest]
fn empty_store_holds_no_users(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    assert!(ctx.fetch().is_empty());
}

#[rstest]
fn seeding_twice_applies_once(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let ctx = ctx.seeded();

    let second = ctx
        .runtime
        .block_on(ctx.repository.seed_if_empty(&SeedData::default()))
        .expect("second seed");
    assert_eq!(second, SeedingResult::AlreadySeeded);

    let users = ctx.fetch();
    let ids: Vec<UserId> = users.iter().map(User::id).collect();
    assert_eq!(ids, vec![UserId::Rola, UserId::Hussein]);
    assert!(users.iter().all(|user| user.weight_history().len() == 2));
}

#[rstest]
fn histories_are_ordered_by_date(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let ctx = ctx.seeded();
    ctx.runtime
        .block_on(ctx.repository.append_weight(UserId::Hussein, weight(97.4)))
        .expect("append");

    let users = ctx.fetch();
    let hussein = user(&users, UserId::Hussein);
    let weights: Vec<f64> = hussein
        .weight_history()
        .iter()
        .map(|entry| entry.weight.kilograms())
        .collect();
    assert_eq!(weights, vec![98.0, 97.5, 97.4]);
    assert!(
        hussein
            .weight_history()
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.date <= b.date))
    );
}

#[rstest]
fn goal_updates_replace_the_stored_goal(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let ctx = ctx.seeded();
    ctx.runtime
        .block_on(ctx.repository.set_goal_weight(UserId::Rola, weight(70.0)))
        .expect("goal update");

    let users = ctx.fetch();
    assert_eq!(user(&users, UserId::Rola).goal_weight(), weight(70.0));
    assert_eq!(user(&users, UserId::Hussein).goal_weight(), weight(85.0));
}

#[rstest]
fn deletes_only_touch_the_owning_user(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let ctx = ctx.seeded();
    let users = ctx.fetch();
    let rola_entry = user(&users, UserId::Rola)
        .weight_history()
        .first()
        .map(|entry| entry.id.clone())
        .expect("rola entry");

    let error = ctx
        .runtime
        .block_on(ctx.repository.remove_weight(UserId::Hussein, &rola_entry))
        .expect_err("entry belongs to rola");
    assert!(matches!(error, JourneyRepositoryError::EntryNotFound { .. }));

    ctx.runtime
        .block_on(ctx.repository.remove_weight(UserId::Rola, &rola_entry))
        .expect("delete own entry");
    let users = ctx.fetch();
    assert_eq!(user(&users, UserId::Rola).weight_history().len(), 1);
    assert_eq!(user(&users, UserId::Hussein).weight_history().len(), 2);
}

#[rstest]
#[case("not-a-uuid")]
#[case("6f1c0e8e-0000-4000-8000-000000000000")]
fn unknown_entry_ids_are_not_found(context: Option<TestContext>, #[case] raw: &str) {
    let Some(ctx) = context else { return };
    let ctx = ctx.seeded();
    let entry_id = WeightEntryId::new(raw).expect("non-empty id");

    let error = ctx
        .runtime
        .block_on(ctx.repository.remove_weight(UserId::Rola, &entry_id))
        .expect_err("unknown entry");
    assert!(matches!(error, JourneyRepositoryError::EntryNotFound { .. }));
}

#[rstest]
fn mutations_before_seeding_report_the_missing_user(context: Option<TestContext>) {
    let Some(ctx) = context else { return };

    let append = ctx
        .runtime
        .block_on(ctx.repository.append_weight(UserId::Rola, weight(70.0)))
        .expect_err("no users yet");
    assert!(matches!(append, JourneyRepositoryError::UserNotFound { .. }));

    let goal = ctx
        .runtime
        .block_on(ctx.repository.set_goal_weight(UserId::Rola, weight(60.0)))
        .expect_err("no users yet");
    assert!(matches!(goal, JourneyRepositoryError::UserNotFound { .. }));
}

#[rstest]
fn fetches_never_mix_goal_and_history_from_different_commits(context: Option<TestContext>) {
    const ROUNDS: u32 = 40;
    let Some(ctx) = context else { return };
    let ctx = ctx.seeded();
    let repository = ctx.repository.clone();
    ctx.runtime
        .block_on(repository.set_goal_weight(UserId::Hussein, weight(100.0)))
        .expect("baseline goal");

    // The writer raises the goal before logging the matching weight, so every
    // committed state has no entry heavier than the goal.
    let writer = {
        let repository = repository.clone();
        ctx.runtime.spawn(async move {
            for round in 1..=ROUNDS {
                let kilograms = 100.0 + f64::from(round);
                repository
                    .set_goal_weight(UserId::Hussein, weight(kilograms))
                    .await
                    .expect("raise goal");
                repository
                    .append_weight(UserId::Hussein, weight(kilograms))
                    .await
                    .expect("log weight");
            }
        })
    };
    let reader = ctx.runtime.spawn(async move {
        let mut observed = Vec::new();
        for _ in 0..ROUNDS * 2 {
            let users = repository.fetch_all_users().await.expect("fetch users");
            let hussein = user(&users, UserId::Hussein);
            let heaviest = hussein
                .weight_history()
                .iter()
                .map(|entry| entry.weight.kilograms())
                .fold(0.0_f64, f64::max);
            observed.push((hussein.goal_weight().kilograms(), heaviest));
        }
        observed
    });

    ctx.runtime.block_on(writer).expect("writer task");
    let observed = ctx.runtime.block_on(reader).expect("reader task");
    for (goal, heaviest) in observed {
        assert!(
            heaviest <= goal,
            "snapshot mixed goal {goal} with entry {heaviest}"
        );
    }
}

#[rstest]
fn service_initialises_from_the_store(context: Option<TestContext>) {
    let Some(ctx) = context else { return };
    let service = JourneyService::new(ctx.repository.clone(), SeedData::default());

    let dashboard = ctx
        .runtime
        .block_on(service.initialise())
        .expect("initial load");
    let ids: Vec<UserId> = dashboard.cards.iter().map(|card| card.user_id).collect();
    assert_eq!(ids, vec![UserId::Rola, UserId::Hussein]);
    assert_eq!(dashboard.cards[1].headline, "12.5 kg to go!");
}
