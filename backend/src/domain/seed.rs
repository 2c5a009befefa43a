//! Starting data applied when the record store is empty.
//!
//! Seed histories carry explicit dates so a fresh store looks the same no
//! matter when the process started. The built-in default can be replaced by a
//! JSON document of the same shape.

use std::collections::HashSet;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DisplayName, User, UserId, Weight, WeightEntry, WeightEntryId};

/// Validation errors raised for seed documents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedDataError {
    /// A tracked user has no seed record.
    #[error("seed data is missing user {user_id}")]
    MissingUser {
        /// Identifier without a record.
        user_id: UserId,
    },
    /// A tracked user appears more than once.
    #[error("seed data lists user {user_id} more than once")]
    DuplicateUser {
        /// Repeated identifier.
        user_id: UserId,
    },
    /// The document could not be decoded.
    #[error("seed data is not valid JSON: {message}")]
    Malformed {
        /// Decoder diagnostics.
        message: String,
    },
}

/// One dated starting measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedEntry {
    /// Recorded instant.
    pub date: DateTime<Utc>,
    /// Measured weight.
    pub weight: Weight,
}

/// Starting record for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedUser {
    /// Fixed identifier.
    pub id: UserId,
    /// Display name.
    pub name: DisplayName,
    /// Target weight.
    pub goal_weight: Weight,
    /// Starting history in any order.
    #[serde(default)]
    pub entries: Vec<SeedEntry>,
}

/// Seed document covering both tracked users.
///
/// ## Invariants
/// - Every [`UserId`] appears exactly once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[serde(try_from = "SeedDataDto")]
pub struct SeedData {
    users: Vec<SeedUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SeedDataDto {
    users: Vec<SeedUser>,
}

impl TryFrom<SeedDataDto> for SeedData {
    type Error = SeedDataError;

    fn try_from(value: SeedDataDto) -> Result<Self, Self::Error> {
        Self::new(value.users)
    }
}

impl SeedData {
    /// Validate a set of seed users.
    pub fn new(mut users: Vec<SeedUser>) -> Result<Self, SeedDataError> {
        let mut seen = HashSet::new();
        for user in &users {
            if !seen.insert(user.id) {
                return Err(SeedDataError::DuplicateUser { user_id: user.id });
            }
        }
        if let Some(missing) = UserId::ALL.into_iter().find(|id| !seen.contains(id)) {
            return Err(SeedDataError::MissingUser { user_id: missing });
        }
        users.sort_by_key(|user| user.id.display_rank());
        Ok(Self { users })
    }

    /// Decode and validate a JSON seed document.
    pub fn from_json(contents: &str) -> Result<Self, SeedDataError> {
        serde_json::from_str(contents).map_err(|error| SeedDataError::Malformed {
            message: error.to_string(),
        })
    }

    /// Seed users in display order.
    pub fn users(&self) -> &[SeedUser] {
        &self.users
    }

    /// Seed record for one user.
    pub fn user(&self, id: UserId) -> Option<&SeedUser> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Materialise the seed record as a domain user with synthetic entry ids.
    pub fn to_user(&self, id: UserId) -> Option<User> {
        self.user(id).map(|seed| {
            let history = seed
                .entries
                .iter()
                .enumerate()
                .filter_map(|(index, entry)| {
                    WeightEntryId::new(format!("seed-{}-{index}", id.as_str()))
                        .ok()
                        .map(|entry_id| WeightEntry {
                            id: entry_id,
                            date: entry.date,
                            weight: entry.weight,
                        })
                })
                .collect();
            User::new(id, seed.name.clone(), seed.goal_weight, history)
        })
    }
}

impl Default for SeedData {
    /// Two users with two dated entries each.
    fn default() -> Self {
        Self {
            users: vec![
                default_user(UserId::Rola, "Rola", 65.0, [75.0, 74.8]),
                default_user(UserId::Hussein, "Hussein", 85.0, [98.0, 97.5]),
            ],
        }
    }
}

fn default_user(id: UserId, name: &'static str, goal: f64, weights: [f64; 2]) -> SeedUser {
    let dates = [
        Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).single().unwrap_or_default(),
        Utc.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).single().unwrap_or_default(),
    ];
    SeedUser {
        id,
        name: DisplayName::from_static(name),
        goal_weight: Weight::from_static(goal),
        entries: dates
            .into_iter()
            .zip(weights)
            .map(|(date, weight)| SeedEntry {
                date,
                weight: Weight::from_static(weight),
            })
            .collect(),
    }
}
