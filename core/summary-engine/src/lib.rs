//! FILENAME: core/summary-engine/src/lib.rs
//! Summary subsystem for the report pipeline.
//!
//! Derives statistics from an already filtered (and usually sorted) record
//! set. It depends on `engine` only for the record model.
//!
//! Layers:
//! - `definition`: Configuration (what to summarize)
//! - `aggregate`: Calculations (averages, shares, top-N, growth, chart series)
//! - `similarity`: Related-product scoring
//! - `view`: Results handed to projection and rendering

pub mod definition;
pub mod aggregate;
pub mod similarity;
pub mod view;

pub use definition::*;
pub use view::*;
pub use aggregate::{
    average_rating, chart_series, group_counts, growth_delta, percentage_shares,
    status_share, summarize, top_n,
};
pub use similarity::{related_products, similarity_score, SimilarityWeights};
