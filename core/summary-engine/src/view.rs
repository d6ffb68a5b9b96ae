//! FILENAME: core/summary-engine/src/view.rs
//! Summary View - Results of a summary calculation.
//!
//! Ranked entries borrow the records they rank; everything else is plain
//! data that can be serialized for a host UI.

use engine::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::definition::ChartType;

// ============================================================================
// RANKINGS
// ============================================================================

/// A record with the score it was ranked by.
pub struct Ranked<'a, R> {
    pub record: &'a R,
    pub score: f64,
}

impl<R> Clone for Ranked<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Ranked<'_, R> {}

impl<R: fmt::Debug> fmt::Debug for Ranked<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ranked")
            .field("record", self.record)
            .field("score", &self.score)
            .finish()
    }
}

impl<'a, R: Record> Ranked<'a, R> {
    pub fn id(&self) -> &'a str {
        self.record.id()
    }
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Average over positive ratings. `has_data` separates "no samples" from a
/// genuine zero average; with no samples `value` is reported as 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAverage {
    pub value: f64,
    pub samples: usize,
    pub has_data: bool,
}

impl RatingAverage {
    pub fn no_data() -> Self {
        RatingAverage {
            value: 0.0,
            samples: 0,
            has_data: false,
        }
    }

    /// The average, or `None` when there were no samples.
    pub fn value(&self) -> Option<f64> {
        self.has_data.then_some(self.value)
    }
}

/// One group's share of the total record count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupShare {
    pub key: String,
    pub count: usize,
    /// Rounded percentage, 0..=100.
    pub percentage: u32,
}

/// Signed difference between a current percentage and a fixed baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthDelta {
    pub current: f64,
    pub baseline: f64,
    pub delta: f64,
    /// e.g. `+5.0%` or `-12.5%`.
    pub display: String,
}

// ============================================================================
// AGGREGATE RESULT
// ============================================================================

/// Everything `summarize` derives from one record set.
pub struct AggregateResult<'a, R> {
    pub count: usize,
    pub average_rating: RatingAverage,
    pub top_n: Vec<Ranked<'a, R>>,
    pub percentage_of_total: Vec<GroupShare>,
    pub growth_delta: Option<GrowthDelta>,
    /// Sum of the score field (missing values count as 0).
    pub total_score: f64,
}

impl<R: fmt::Debug> fmt::Debug for AggregateResult<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateResult")
            .field("count", &self.count)
            .field("average_rating", &self.average_rating)
            .field("top_n", &self.top_n)
            .field("percentage_of_total", &self.percentage_of_total)
            .field("growth_delta", &self.growth_delta)
            .field("total_score", &self.total_score)
            .finish()
    }
}

// ============================================================================
// CHART DATA
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Series backing the visual summary of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub chart_type: ChartType,
    pub points: Vec<ChartPoint>,
}
