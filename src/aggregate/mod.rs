//! Vote aggregation: municipal shares and the regional/national rollup.
//!
//! Both stages are pure and deterministic: grouping goes through `BTreeMap`s
//! so re-running on the same input yields byte-identical tables.

pub mod municipal;
pub mod rollup;

pub use municipal::{collapse_zones, municipal_shares, ShareBasis};
pub use rollup::{align_to_selection, regional_summaries};
