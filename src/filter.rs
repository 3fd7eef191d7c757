//! Row selection by office, party and region.
//!
//! Every downstream stage consumes the output of a [`VoteFilter`]. The filter
//! is a pure predicate conjunction; it never mutates its input. "No filter on
//! this dimension" and "filter to nothing" are distinct [`Selection`]
//! variants, so an empty allowlist is unambiguous.

use crate::model::{VoteRecord, OVERSEAS_REGION};
use std::collections::BTreeSet;

/// An allowlist for one filter dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T: Ord> {
    /// No restriction: every value passes.
    All,
    /// Only the listed values pass. An empty set excludes every row.
    Only(BTreeSet<T>),
}

impl<T: Ord> Selection<T> {
    pub fn only<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Selection::Only(values.into_iter().collect())
    }

    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(set) => set.contains(value),
        }
    }
}

impl Selection<String> {
    pub fn only_str<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Selection::Only(values.into_iter().map(|v| v.to_string()).collect())
    }
}

/// Conjunction of per-dimension selections over [`VoteRecord`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteFilter {
    pub offices: Selection<u8>,
    pub parties: Selection<String>,
    pub regions: Selection<String>,
}

impl Default for VoteFilter {
    fn default() -> Self {
        VoteFilter {
            offices: Selection::All,
            parties: Selection::All,
            regions: Selection::All,
        }
    }
}

impl VoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offices<I>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        self.offices = Selection::only(codes);
        self
    }

    pub fn parties<'a, I>(mut self, parties: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.parties = Selection::only_str(parties);
        self
    }

    pub fn regions<'a, I>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.regions = Selection::only_str(regions);
        self
    }

    pub fn matches(&self, record: &VoteRecord) -> bool {
        self.offices.admits(&record.office_code)
            && self.parties.admits(&record.party)
            && self.regions.admits(&record.region)
    }

    /// Returns the rows admitted by every dimension, in input order.
    pub fn apply(&self, records: &[VoteRecord]) -> Vec<VoteRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Drops rows for ballots cast abroad (the TSE "ZZ" pseudo-region), which the
/// dashboards exclude before any aggregation.
pub fn drop_overseas(records: &[VoteRecord]) -> Vec<VoteRecord> {
    records
        .iter()
        .filter(|r| r.region != OVERSEAS_REGION)
        .cloned()
        .collect()
}
