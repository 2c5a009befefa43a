//! Snapshot of both users and the card view derived from it.
//!
//! A [`JourneySnapshot`] is only ever built from a complete store fetch and is
//! replaced wholesale on reload. [`Dashboard`] recomputes every card value from
//! the snapshot on each read.

use serde::Serialize;
use serde_json::json;

use crate::domain::motivation::catalog_message;
use crate::domain::progress::{format_one_decimal, weight_label};
use crate::domain::{Error, Progress, ProgressStatus, User, UserId, Weight};

/// Both tracked users as last fetched from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneySnapshot {
    rola: User,
    hussein: User,
}

impl JourneySnapshot {
    /// Build a snapshot from a full fetch.
    ///
    /// Both users must be present; a partial store is reported as unavailable
    /// so callers never render a single card.
    pub fn from_users(users: Vec<User>) -> Result<Self, Error> {
        let mut rola = None;
        let mut hussein = None;
        for user in users {
            match user.id() {
                UserId::Rola => rola = Some(user),
                UserId::Hussein => hussein = Some(user),
            }
        }
        match (rola, hussein) {
            (Some(rola), Some(hussein)) => Ok(Self { rola, hussein }),
            (rola, hussein) => {
                let missing: Vec<&str> = [
                    (UserId::Rola, rola.is_none()),
                    (UserId::Hussein, hussein.is_none()),
                ]
                .into_iter()
                .filter_map(|(id, absent)| absent.then_some(id.as_str()))
                .collect();
                Err(Error::service_unavailable(
                    "Could not load user data. Check the record store.",
                )
                .with_details(json!({
                    "missingUsers": missing,
                    "remediation": [
                        "Confirm the users table holds rows for rola and hussein.",
                        "Restart the service against an empty store to re-run seeding.",
                    ],
                })))
            }
        }
    }

    /// Look up one user.
    pub fn user(&self, id: UserId) -> &User {
        match id {
            UserId::Rola => &self.rola,
            UserId::Hussein => &self.hussein,
        }
    }

    /// Both users, `rola` first.
    pub fn users(&self) -> [&User; 2] {
        [&self.rola, &self.hussein]
    }
}

/// Footer line describing the other user on a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerSummary {
    /// Partner identifier.
    pub user_id: UserId,
    /// Partner display name.
    pub name: String,
    /// Partner's latest weight.
    pub current_weight: Weight,
    /// Rendered footer, e.g. `Rola's current weight: 74.8kg`.
    pub line: String,
}

impl PartnerSummary {
    fn of(partner: &User) -> Option<Self> {
        partner.current_weight().map(|current_weight| Self {
            user_id: partner.id(),
            name: partner.name().to_string(),
            current_weight,
            line: format!(
                "{}'s current weight: {}kg",
                partner.name(),
                format_one_decimal(current_weight.kilograms())
            ),
        })
    }
}

/// Display labels for the three headline numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardLabels {
    /// Start weight, or `N/A`.
    pub start: String,
    /// Current weight, or `N/A`.
    pub current: String,
    /// Goal weight.
    pub goal: String,
}

/// Everything one user's card shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCard {
    pub user_id: UserId,
    pub name: String,
    pub goal_weight: Weight,
    pub start_weight: Option<Weight>,
    pub current_weight: Option<Weight>,
    pub weight_to_go: Option<String>,
    pub status: ProgressStatus,
    pub headline: String,
    pub message: String,
    pub labels: CardLabels,
    pub entry_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<PartnerSummary>,
}

impl UserCard {
    /// Derive the card for `user`, with `partner` in the footer.
    pub fn of(user: &User, partner: &User) -> Self {
        let progress = Progress::of(user);
        Self {
            user_id: user.id(),
            name: user.name().to_string(),
            goal_weight: progress.goal_weight(),
            start_weight: progress.start_weight(),
            current_weight: progress.current_weight(),
            weight_to_go: progress.weight_to_go().map(str::to_owned),
            status: progress.status(),
            headline: progress.headline(),
            message: catalog_message(user),
            labels: CardLabels {
                start: weight_label(progress.start_weight()),
                current: weight_label(progress.current_weight()),
                goal: weight_label(Some(progress.goal_weight())),
            },
            entry_count: user.weight_history().len(),
            partner: PartnerSummary::of(partner),
        }
    }
}

/// Both cards in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Cards, `rola` first.
    pub cards: Vec<UserCard>,
}

impl Dashboard {
    /// Derive both cards from a snapshot.
    ///
    /// # Examples
    /// ```
    /// use weight_journey::domain::{Dashboard, JourneySnapshot, SeedData, UserId};
    ///
    /// let seed = SeedData::default();
    /// let users = UserId::ALL
    ///     .into_iter()
    ///     .rev()
    ///     .filter_map(|id| seed.to_user(id))
    ///     .collect();
    /// let snapshot = JourneySnapshot::from_users(users).expect("both users");
    /// let dashboard = Dashboard::of(&snapshot);
    /// assert_eq!(dashboard.cards[0].user_id, UserId::Rola);
    /// ```
    pub fn of(snapshot: &JourneySnapshot) -> Self {
        let cards = snapshot
            .users()
            .into_iter()
            .map(|user| UserCard::of(user, snapshot.user(user.id().partner())))
            .collect();
        Self { cards }
    }

    /// Card for one user.
    pub fn card(&self, id: UserId) -> Option<&UserCard> {
        self.cards.iter().find(|card| card.user_id == id)
    }
}
