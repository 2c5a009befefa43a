//! Date-descending history table for one user.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::progress::format_one_decimal;
use crate::domain::{User, UserId, Weight, WeightEntryId};

/// Placeholder shown when a user has no entries.
pub const EMPTY_HISTORY_MESSAGE: &str = "No weight entries yet.";

/// One row of the history table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRow {
    /// Entry identifier used for deletion.
    pub entry_id: WeightEntryId,
    /// Entry date.
    pub date: DateTime<Utc>,
    /// Entry weight.
    pub weight: Weight,
    /// Weight to one decimal place.
    pub weight_label: String,
}

/// History table with the newest entry first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    /// Owner of the history.
    pub user_id: UserId,
    /// Owner's display name.
    pub name: String,
    /// Rows, newest first.
    pub rows: Vec<HistoryRow>,
    /// Placeholder text when `rows` is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

impl HistoryView {
    /// Build the table from a user's ascending history.
    pub fn of(user: &User) -> Self {
        let rows: Vec<HistoryRow> = user
            .weight_history()
            .iter()
            .rev()
            .map(|entry| HistoryRow {
                entry_id: entry.id.clone(),
                date: entry.date,
                weight: entry.weight,
                weight_label: format_one_decimal(entry.weight.kilograms()),
            })
            .collect();
        let empty_message = rows.is_empty().then(|| EMPTY_HISTORY_MESSAGE.to_owned());
        Self {
            user_id: user.id(),
            name: user.name().to_string(),
            rows,
            empty_message,
        }
    }
}
