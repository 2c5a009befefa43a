//! Derived progress values for a single user.
//!
//! Everything here is recomputed from the weight history on every read; no
//! derived value is stored.

use serde::Serialize;

use crate::domain::{User, Weight};

/// Placeholder shown in place of an absent weight.
pub const ABSENT_WEIGHT_LABEL: &str = "N/A";

/// Where a user stands relative to their goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// No weight has been logged yet.
    NotStarted,
    /// The current weight is still above the goal.
    ToGo,
    /// The current weight is at or below the goal, to one decimal place.
    GoalReached,
}

/// Start, current and remaining values for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    start_weight: Option<Weight>,
    current_weight: Option<Weight>,
    goal_weight: Weight,
    weight_to_go: Option<String>,
}

impl Progress {
    /// Derive progress from the user's history and goal.
    ///
    /// # Examples
    /// ```
    /// use weight_journey::domain::{Progress, ProgressStatus, SeedData, UserId};
    ///
    /// let seed = SeedData::default();
    /// let hussein = seed.to_user(UserId::Hussein).expect("seeded user");
    /// let progress = Progress::of(&hussein);
    /// assert_eq!(progress.weight_to_go(), Some("12.5"));
    /// assert_eq!(progress.status(), ProgressStatus::ToGo);
    /// ```
    pub fn of(user: &User) -> Self {
        let current_weight = user.current_weight();
        let goal_weight = user.goal_weight();
        Self {
            start_weight: user.start_weight(),
            current_weight,
            goal_weight,
            weight_to_go: current_weight
                .map(|current| format_one_decimal(current.kilograms() - goal_weight.kilograms())),
        }
    }

    /// First logged weight.
    pub fn start_weight(&self) -> Option<Weight> {
        self.start_weight
    }

    /// Last logged weight.
    pub fn current_weight(&self) -> Option<Weight> {
        self.current_weight
    }

    /// Target weight.
    pub fn goal_weight(&self) -> Weight {
        self.goal_weight
    }

    /// `current - goal` to one decimal place.
    pub fn weight_to_go(&self) -> Option<&str> {
        self.weight_to_go.as_deref()
    }

    /// Status decided from the formatted remainder, so `"0.0"` is reached.
    pub fn status(&self) -> ProgressStatus {
        match self.weight_to_go.as_deref() {
            None => ProgressStatus::NotStarted,
            Some(formatted) => match formatted.parse::<f64>() {
                Ok(remaining) if remaining > 0.0 => ProgressStatus::ToGo,
                _ => ProgressStatus::GoalReached,
            },
        }
    }

    /// Banner text shown on the user's card.
    pub fn headline(&self) -> String {
        match (self.status(), self.weight_to_go.as_deref()) {
            (ProgressStatus::ToGo, Some(remaining)) => format!("{remaining} kg to go!"),
            (ProgressStatus::GoalReached, _) => "Goal Reached! 🎉".to_owned(),
            _ => "Log a weight to begin!".to_owned(),
        }
    }
}

/// Format kilograms with one decimal place, rounding halves away from zero.
///
/// `{:.1}` alone resolves exact ties such as `12.25` to even digits.
pub fn format_one_decimal(kilograms: f64) -> String {
    let rounded = (kilograms * 10.0).round() / 10.0;
    format!("{rounded:.1}")
}

/// Card label for an optional weight, e.g. `97.5kg` or `N/A`.
pub fn weight_label(weight: Option<Weight>) -> String {
    weight.map_or_else(
        || ABSENT_WEIGHT_LABEL.to_owned(),
        |value| format!("{}kg", format_one_decimal(value.kilograms())),
    )
}
