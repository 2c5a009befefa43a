//! User and weight entry data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors returned by the user model constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    UnknownId { value: String },
    EmptyDisplayName,
    DisplayNameTooLong { max: usize },
    InvalidWeight { value: String },
    NonPositiveWeight,
    EmptyEntryId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownId { value } => {
                write!(f, "user id must be one of rola or hussein, got {value}")
            }
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "display name must be at most {max} characters")
            }
            Self::InvalidWeight { value } => write!(f, "weight must be a number, got {value}"),
            Self::NonPositiveWeight => write!(f, "weight must be a finite value above zero"),
            Self::EmptyEntryId => write!(f, "weight entry id must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Identifier of one of the two tracked users.
///
/// The set is closed: every match over `UserId` is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserId {
    Rola,
    Hussein,
}

impl UserId {
    /// Both identifiers in display order.
    pub const ALL: [Self; 2] = [Self::Rola, Self::Hussein];

    /// Literal identifier used by the store and the HTTP surface.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rola => "rola",
            Self::Hussein => "hussein",
        }
    }

    /// Position in any list or side-by-side layout; `rola` always comes first.
    pub const fn display_rank(self) -> u8 {
        match self {
            Self::Rola => 0,
            Self::Hussein => 1,
        }
    }

    /// The other tracked user.
    pub const fn partner(self) -> Self {
        match self {
            Self::Rola => Self::Hussein,
            Self::Hussein => Self::Rola,
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rola" => Ok(Self::Rola),
            "hussein" => Ok(Self::Hussein),
            other => Err(UserValidationError::UnknownId {
                value: other.to_owned(),
            }),
        }
    }
}

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 32;

/// Human readable display name for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`] from owned input.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        Self::from_owned(display_name.into())
    }

    fn from_owned(display_name: String) -> Result<Self, UserValidationError> {
        if display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if display_name.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(display_name))
    }

    /// Wrap a compile-time constant known to satisfy the invariants.
    pub(crate) fn from_static(display_name: &'static str) -> Self {
        Self(display_name.to_owned())
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Body weight or goal weight in kilograms.
///
/// ## Invariants
/// - The value is finite and strictly greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    /// Validate and construct a [`Weight`].
    pub fn new(kilograms: f64) -> Result<Self, UserValidationError> {
        if !kilograms.is_finite() || kilograms <= 0.0 {
            return Err(UserValidationError::NonPositiveWeight);
        }
        Ok(Self(kilograms))
    }

    /// Parse user-entered text such as `"97.4"`.
    ///
    /// # Examples
    /// ```
    /// use weight_journey::domain::Weight;
    ///
    /// assert_eq!(Weight::parse(" 97.4 ").map(Weight::kilograms), Ok(97.4));
    /// assert!(Weight::parse("-1").is_err());
    /// assert!(Weight::parse("heavy").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let trimmed = raw.trim();
        let kilograms = trimmed
            .parse::<f64>()
            .map_err(|_| UserValidationError::InvalidWeight {
                value: trimmed.to_owned(),
            })?;
        Self::new(kilograms)
    }

    /// Wrap a compile-time constant known to be positive.
    pub(crate) const fn from_static(kilograms: f64) -> Self {
        Self(kilograms)
    }

    /// Raw value in kilograms.
    pub const fn kilograms(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Weight> for f64 {
    fn from(value: Weight) -> Self {
        value.0
    }
}

impl TryFrom<f64> for Weight {
    type Error = UserValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Store-assigned opaque identifier of a weight entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeightEntryId(String);

impl WeightEntryId {
    /// Validate and construct a [`WeightEntryId`].
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(UserValidationError::EmptyEntryId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for WeightEntryId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for WeightEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<WeightEntryId> for String {
    fn from(value: WeightEntryId) -> Self {
        value.0
    }
}

impl TryFrom<String> for WeightEntryId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A single dated weight measurement. Entries are never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightEntry {
    /// Store-assigned identifier.
    pub id: WeightEntryId,
    /// Instant the entry was recorded.
    pub date: DateTime<Utc>,
    /// Measured weight.
    pub weight: Weight,
}

/// A tracked user and their full weight history.
///
/// ## Invariants
/// - `weight_history` is ordered by `date` ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: DisplayName,
    goal_weight: Weight,
    weight_history: Vec<WeightEntry>,
}

impl User {
    /// Build a user, ordering the history by date ascending.
    ///
    /// The sort is stable so entries sharing a timestamp keep the order the
    /// store returned them in.
    pub fn new(
        id: UserId,
        name: DisplayName,
        goal_weight: Weight,
        mut weight_history: Vec<WeightEntry>,
    ) -> Self {
        weight_history.sort_by_key(|entry| entry.date);
        Self {
            id,
            name,
            goal_weight,
            weight_history,
        }
    }

    /// Fixed identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Target weight.
    pub fn goal_weight(&self) -> Weight {
        self.goal_weight
    }

    /// Entries ordered by date ascending.
    pub fn weight_history(&self) -> &[WeightEntry] {
        &self.weight_history
    }

    /// Chronologically last weight, absent when the history is empty.
    pub fn current_weight(&self) -> Option<Weight> {
        self.weight_history.last().map(|entry| entry.weight)
    }

    /// Chronologically first weight, absent when the history is empty.
    pub fn start_weight(&self) -> Option<Weight> {
        self.weight_history.first().map(|entry| entry.weight)
    }

    /// Look up an entry by identifier.
    pub fn entry(&self, id: &WeightEntryId) -> Option<&WeightEntry> {
        self.weight_history.iter().find(|entry| &entry.id == id)
    }
}

/// Order users for display: `rola` first regardless of input order.
pub fn order_for_display(users: &mut [User]) {
    users.sort_by_key(|user| user.id().display_rank());
}
