//! Input and outcome types for the three mutating intents.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Dashboard, UserValidationError, Weight};

/// Raw weight value as submitted: a JSON number or user-entered text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeightInput {
    Number(f64),
    Text(String),
}

impl WeightInput {
    /// Validate into a positive [`Weight`].
    ///
    /// # Examples
    /// ```
    /// use weight_journey::domain::WeightInput;
    ///
    /// assert!(WeightInput::Text("97.4".into()).validate().is_ok());
    /// assert!(WeightInput::Number(0.0).validate().is_err());
    /// assert!(WeightInput::Text("".into()).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<Weight, UserValidationError> {
        match self {
            Self::Number(value) => Weight::new(*value),
            Self::Text(raw) => Weight::parse(raw),
        }
    }
}

impl From<f64> for WeightInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for WeightInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Kind of mutating intent; the double-submit guard is keyed on it per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    AddWeight,
    UpdateGoal,
    DeleteWeight,
}

impl MutationKind {
    /// Stable label used in logs and error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddWeight => "add_weight",
            Self::UpdateGoal => "update_goal",
            Self::DeleteWeight => "delete_weight",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a mutating intent that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The store accepted the change and the snapshot was reloaded.
    Applied(Dashboard),
    /// Input was rejected before reaching the store.
    Declined {
        /// Validation message.
        reason: String,
    },
}

impl Submission {
    /// Whether the store was changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub(crate) fn declined(error: &UserValidationError) -> Self {
        Self::Declined {
            reason: error.to_string(),
        }
    }
}
