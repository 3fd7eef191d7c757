//! Comparative electoral statistics between the 2018 and 2022 Brazilian
//! presidential elections, at municipality, state and region granularity.
//!
//! This is an in-process data-transformation library: raw per-municipality
//! vote tallies go in (via a host-implemented [`cache::ReferenceSource`]),
//! ready-to-plot flat tables come out. The pipeline is synchronous and pure;
//! every stage reads an immutable input table and produces a new one, and
//! re-running a stage on the same input yields identical output.
//!
//! Chart rendering, remote fetching and UI state belong to the hosting
//! application, not to this crate.

pub mod aggregate;
pub mod bucket;
pub mod cache;
pub mod diff;
pub mod filter;
pub mod model;
pub mod party;
pub mod pipeline;
pub mod reports;
pub mod stats;
pub mod topk;

pub use crate::aggregate::{collapse_zones, municipal_shares, regional_summaries, ShareBasis};
pub use crate::bucket::Bucketizer;
pub use crate::cache::{ReferenceCache, ReferenceSource};
pub use crate::diff::{diff_by_municipality, diff_by_party_region};
pub use crate::filter::{drop_overseas, Selection, VoteFilter};
pub use crate::model::{
    DiffRecord, MunicipalShare, Municipality, PartyColor, PartyRef, RegionalSummary,
    TopKSelection, VoteRecord,
};
pub use crate::party::party_colors;
pub use crate::pipeline::{run_comparison, run_pyramid, ComparisonSide, ComparisonSpec, PipelineConfig};
pub use crate::topk::top_k_parties;
