//! Mapping from a weight history to plot coordinates.
//!
//! The mapping is a pure function of the history, the goal and the plot
//! geometry. Higher weights map to smaller vertical coordinates so they sit
//! higher on the plot, and the goal shares the vertical scale with the points.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{UserId, Weight, WeightEntry, WeightEntryId};

/// Vertical headroom, in kilograms, added above and below the plotted range.
pub const CHART_HEADROOM_KG: f64 = 2.0;

/// Plot dimensions in abstract drawing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartGeometry {
    /// Total width.
    pub width: f64,
    /// Total height.
    pub height: f64,
    /// Padding applied on every side.
    pub padding: f64,
}

impl Default for ChartGeometry {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 150.0,
            padding: 20.0,
        }
    }
}

impl ChartGeometry {
    fn x_for(&self, index: usize, count: usize) -> f64 {
        let span = count.saturating_sub(1).max(1);
        let fraction = index as f64 / span as f64;
        fraction * (self.width - 2.0 * self.padding) + self.padding
    }

    fn y_for(&self, weight: f64, bounds: &WeightBounds) -> f64 {
        let range = bounds.max - bounds.min;
        self.height - ((weight - bounds.min) / range) * (self.height - 2.0 * self.padding)
            - self.padding
    }
}

/// One plotted entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Entry identifier.
    pub entry_id: WeightEntryId,
    /// Entry date.
    pub date: DateTime<Utc>,
    /// Entry weight.
    pub weight: Weight,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// Coordinates for a history with enough spread to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPlot {
    /// Points in chronological order.
    pub points: Vec<ChartPoint>,
    /// Vertical coordinate of the goal reference line.
    pub goal_y: f64,
    /// Lower bound of the vertical scale, headroom included.
    pub min_weight: f64,
    /// Upper bound of the vertical scale, headroom included.
    pub max_weight: f64,
}

/// Result of mapping a history onto the plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartMapping {
    /// Fewer than two entries, or every weight equals the goal.
    InsufficientData,
    /// Drawable coordinates.
    Plotted(ChartPlot),
}

/// Chart for one user, as served to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    /// Owner of the history.
    pub user_id: UserId,
    /// Goal drawn as the reference line.
    pub goal_weight: Weight,
    /// Geometry the coordinates were computed for.
    pub geometry: ChartGeometry,
    /// Computed coordinates.
    pub mapping: ChartMapping,
}

struct WeightBounds {
    min: f64,
    max: f64,
}

/// Map a chronologically ordered history onto the plot.
///
/// # Examples
/// ```
/// use weight_journey::domain::{map_chart, ChartGeometry, ChartMapping, SeedData, UserId};
///
/// let hussein = SeedData::default().to_user(UserId::Hussein).expect("seeded user");
/// let mapping = map_chart(hussein.weight_history(), hussein.goal_weight(), ChartGeometry::default());
/// let ChartMapping::Plotted(plot) = mapping else { panic!("two entries plot") };
/// assert_eq!(plot.min_weight, 83.0);
/// assert_eq!(plot.max_weight, 100.0);
/// ```
pub fn map_chart(history: &[WeightEntry], goal: Weight, geometry: ChartGeometry) -> ChartMapping {
    if history.len() < 2 {
        return ChartMapping::InsufficientData;
    }

    let goal_kg = goal.kilograms();
    let (lowest, highest) = history
        .iter()
        .map(|entry| entry.weight.kilograms())
        .fold((goal_kg, goal_kg), |(low, high), weight| {
            (low.min(weight), high.max(weight))
        });
    if highest - lowest == 0.0 {
        return ChartMapping::InsufficientData;
    }

    let bounds = WeightBounds {
        min: lowest - CHART_HEADROOM_KG,
        max: highest + CHART_HEADROOM_KG,
    };
    let count = history.len();
    let points = history
        .iter()
        .enumerate()
        .map(|(index, entry)| ChartPoint {
            entry_id: entry.id.clone(),
            date: entry.date,
            weight: entry.weight,
            x: geometry.x_for(index, count),
            y: geometry.y_for(entry.weight.kilograms(), &bounds),
        })
        .collect();

    ChartMapping::Plotted(ChartPlot {
        points,
        goal_y: geometry.y_for(goal_kg, &bounds),
        min_weight: bounds.min,
        max_weight: bounds.max,
    })
}
