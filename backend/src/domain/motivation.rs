//! Motivational messages shown on each user's card.
//!
//! The base experience is a deterministic pick from a fixed catalog keyed by
//! history length. A generated message from an external text service may
//! replace it, but only through [`MotivationService`], which always falls
//! back to the catalog.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::ports::{MotivationQuery, MotivationSource};
use crate::domain::{User, UserId};

/// Encouragement strings indexed by `history length % len`.
pub const MOTIVATION_CATALOG: [&str; 8] = [
    "Every step counts. Keep going!",
    "Consistency beats intensity. You're doing great.",
    "Small changes add up to big results.",
    "Progress, not perfection.",
    "You showed up today, and that matters.",
    "Trust the process. Your future self will thank you.",
    "One entry at a time, one day at a time.",
    "Believe in yourself. You've got this!",
];

/// Catalog message for a user.
///
/// An empty history selects the welcome message rather than `catalog[0]`.
///
/// # Examples
/// ```
/// use weight_journey::domain::{catalog_message, SeedData, UserId, MOTIVATION_CATALOG};
///
/// let rola = SeedData::default().to_user(UserId::Rola).expect("seeded user");
/// assert_eq!(catalog_message(&rola), MOTIVATION_CATALOG[2]);
/// ```
pub fn catalog_message(user: &User) -> String {
    let length = user.weight_history().len();
    if length == 0 {
        return welcome_message(user);
    }
    MOTIVATION_CATALOG
        .get(length % MOTIVATION_CATALOG.len())
        .map_or_else(|| welcome_message(user), |message| (*message).to_owned())
}

/// Greeting for a user who has not logged anything yet.
pub fn welcome_message(user: &User) -> String {
    format!(
        "Welcome, {}! Add your first weight to start your journey.",
        user.name()
    )
}

/// Instruction sent to the text-generation service.
///
/// The current weight falls back to the goal when nothing is logged, and the
/// start weight falls back to the current weight.
pub fn motivation_prompt(user: &User) -> String {
    let goal = user.goal_weight();
    let current = user.current_weight().unwrap_or(goal);
    let start = user.start_weight().unwrap_or(current);
    format!(
        "You are a kind and motivating wellness coach. My name is {name}. I just logged my \
         weight. My current weight is {current}kg, my starting weight was {start}kg, and my \
         goal is {goal}kg. Please write a short (2-3 sentences), personalized, and encouraging \
         message for me based on my progress. Keep it positive and focus on consistency and \
         well-being, not just the numbers. Address me by my name.",
        name = user.name(),
    )
}

/// Where a motivational message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotivationOrigin {
    /// Produced by the text-generation service.
    Generated,
    /// Picked from [`MOTIVATION_CATALOG`] or the welcome message.
    Catalog,
}

/// Message returned by the motivation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Motivation {
    /// User the message addresses.
    pub user_id: UserId,
    /// Message text.
    pub text: String,
    /// Message provenance.
    pub origin: MotivationOrigin,
}

impl Motivation {
    /// Deterministic catalog message for `user`.
    pub fn from_catalog(user: &User) -> Self {
        Self {
            user_id: user.id(),
            text: catalog_message(user),
            origin: MotivationOrigin::Catalog,
        }
    }
}

/// Motivation use case backed by an optional text-generation source.
#[derive(Clone, Default)]
pub struct MotivationService {
    source: Option<Arc<dyn MotivationSource>>,
}

impl MotivationService {
    /// Service that asks `source` first.
    pub fn new(source: Arc<dyn MotivationSource>) -> Self {
        Self {
            source: Some(source),
        }
    }

    /// Service that only serves catalog messages.
    pub fn disabled() -> Self {
        Self { source: None }
    }

    /// Whether a text-generation source is wired.
    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }
}

impl fmt::Debug for MotivationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MotivationService")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[async_trait]
impl MotivationQuery for MotivationService {
    async fn motivation_for(&self, user: &User) -> Motivation {
        let Some(source) = self.source.as_ref() else {
            return Motivation::from_catalog(user);
        };

        match source.generate(&motivation_prompt(user)).await {
            Ok(text) if !text.trim().is_empty() => {
                debug!(user_id = %user.id(), "generated motivational message");
                Motivation {
                    user_id: user.id(),
                    text: text.trim().to_owned(),
                    origin: MotivationOrigin::Generated,
                }
            }
            Ok(_) => {
                warn!(user_id = %user.id(), "motivation source returned an empty reply");
                Motivation::from_catalog(user)
            }
            Err(error) => {
                warn!(user_id = %user.id(), %error, "motivation source failed; using catalog message");
                Motivation::from_catalog(user)
            }
        }
    }
}
