//! FILENAME: core/summary-engine/src/definition.rs
//! Summary Definition - What a summary computes.
//!
//! Built fresh for every report request from the report configuration and
//! the record kind being summarized. Never cached between requests.

use serde::{Deserialize, Serialize};

/// Default number of entries in a top-N ranking.
pub const DEFAULT_TOP_N: usize = 5;

// ============================================================================
// CHART TYPE
// ============================================================================

/// Visual summary requested alongside the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Pie,
    Line,
}

// ============================================================================
// GROWTH
// ============================================================================

/// Point-in-time growth heuristic: the share of records in `status`,
/// compared against a fixed `baseline` percentage. This is not a
/// period-over-period comparison; no prior period is ever queried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthConfig {
    pub status: String,
    pub baseline: f64,
}

// ============================================================================
// SUMMARY CONFIG
// ============================================================================

/// Fields a summary reads, for one record kind.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryConfig<F> {
    /// Size of the top-N ranking.
    pub top_n: usize,
    /// Field ranked by top-N and totalled.
    pub score: F,
    /// Field averaged as a rating (only samples `> 0` count).
    pub rating: Option<F>,
    /// Field whose values partition the records for percentage-of-total.
    pub group_by: F,
    pub growth: Option<GrowthConfig>,
}

impl<F> SummaryConfig<F> {
    pub fn new(score: F, group_by: F) -> Self {
        SummaryConfig {
            top_n: DEFAULT_TOP_N,
            score,
            rating: None,
            group_by,
            growth: None,
        }
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    pub fn with_rating(mut self, field: F) -> Self {
        self.rating = Some(field);
        self
    }

    pub fn with_growth(mut self, status: impl Into<String>, baseline: f64) -> Self {
        self.growth = Some(GrowthConfig {
            status: status.into(),
            baseline,
        });
        self
    }
}
