//! Ready-to-plot output tables for the presentation layer.
//!
//! Every builder returns flat, column-typed records; no chart encoding, no
//! rendering. The presentation layer is expected to catch [`ReportError`] and
//! render a fallback rather than crash the session.

use crate::bucket::BucketError;
use crate::cache::SourceError;
use crate::party::PartyError;
use serde::{Deserialize, Serialize};

pub mod builders;

pub use builders::{
    capitals_diff_table, capitals_table, choropleth_table, growth_table, pyramid_table,
    region_median_diff, region_summary_table, scatter_table,
};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("bucket error: {0}")]
    Bucket(#[from] BucketError),
    #[error("party error: {0}")]
    Party(#[from] PartyError),
    #[error("no data for: {0}")]
    NoData(String),
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;

/// One municipality of one party's choropleth, bucketized and enriched with
/// the municipality reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethRow {
    pub year: u16,
    pub region: String,
    pub uf: String,
    pub municipality_code: u32,
    pub ibge_code: u32,
    pub name: String,
    pub party: String,
    pub valid_votes: u64,
    pub total_votes_municipality: u64,
    pub pct_votes_municipality: f64,
    pub pct_bucket: String,
}

/// One party-year bar of the pyramid comparison, aligned to the Top-K order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PyramidRow {
    pub year: u16,
    pub party: String,
    pub ideology_label: String,
    pub color: String,
    pub valid_votes: u64,
    pub national_total: u64,
    pub pct: f64,
    /// Reference-year vote total; sorts both years' bars identically.
    pub rank_key: u64,
}

/// Vote totals and share per (selection, region), legend-stamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSummaryRow {
    pub legend: String,
    pub year: u16,
    pub party: String,
    pub region: String,
    pub vote_total: u64,
    pub region_total: u64,
    pub pct: f64,
}

/// Regional vote growth between the two compared selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRow {
    pub region: String,
    pub votes_a: u64,
    pub votes_b: u64,
    pub qty_diff: i64,
}

/// One capital's share for one compared selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalRow {
    pub legend: String,
    pub year: u16,
    pub region: String,
    pub uf: String,
    pub municipality_code: u32,
    pub name: String,
    pub party: String,
    pub valid_votes: u64,
    pub total_votes_municipality: u64,
    pub pct_votes_municipality: f64,
}

/// Year-over-year delta for one capital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalDiffRow {
    pub name: String,
    pub region: String,
    pub votes_a: u64,
    pub votes_b: u64,
    pub pct_a: f64,
    pub pct_b: f64,
    pub qty_diff: i64,
    pub pct_diff: f64,
}

/// Median municipal share shift per region, the rule line of the capital
/// difference charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionMedianRow {
    pub region: String,
    pub median_diff: Option<f64>,
}

/// The wide two-sided municipal join behind the scatter views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterRow {
    pub municipality_code: u32,
    pub name: String,
    pub uf: String,
    pub region: String,
    pub votes_a: u64,
    pub votes_b: u64,
    pub total_a: u64,
    pub total_b: u64,
    pub pct_a: f64,
    pub pct_b: f64,
}
