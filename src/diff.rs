//! Joins two aggregated tables and computes absolute and percentage deltas.
//!
//! Both joins are inner by policy: keys present on only one side are
//! excluded, never zero-filled. Callers that need completeness across years
//! must pre-validate key-set equality and choose outer semantics themselves.

use crate::bucket::Bucketizer;
use crate::model::{DiffRecord, MunicipalShare, RegionalDiff, RegionalSummary};
use log::{debug, warn};
use std::collections::BTreeMap;

/// Inner-joins two municipal share tables on municipality code and computes
/// `qty_diff = votes_b - votes_a` and `pct_diff = pct_b - pct_a`, with
/// `pct_diff` bucketized for choropleth legends.
///
/// Each side is expected to hold one row per municipality (a single party's
/// shares); duplicate keys keep the last row in input order and are flagged.
pub fn diff_by_municipality(
    side_a: &[MunicipalShare],
    side_b: &[MunicipalShare],
    buckets: &Bucketizer,
) -> Vec<DiffRecord> {
    let a_by_muni = index_by_municipality(side_a, "A");
    let b_by_muni = index_by_municipality(side_b, "B");

    let mut out = Vec::new();
    for (code, a) in &a_by_muni {
        let b = match b_by_muni.get(code) {
            Some(b) => b,
            None => continue,
        };
        let pct_diff = b.pct_votes_municipality - a.pct_votes_municipality;
        out.push(DiffRecord {
            municipality_code: *code,
            region: a.region.clone(),
            party_a: a.party.clone(),
            party_b: b.party.clone(),
            year_a: a.year,
            year_b: b.year,
            votes_a: a.valid_votes,
            votes_b: b.valid_votes,
            total_a: a.total_votes_municipality,
            total_b: b.total_votes_municipality,
            pct_a: a.pct_votes_municipality,
            pct_b: b.pct_votes_municipality,
            qty_diff: b.valid_votes as i64 - a.valid_votes as i64,
            pct_diff,
            pct_diff_bucket: buckets.label_for(pct_diff).to_string(),
        });
    }

    let dropped = a_by_muni.len() + b_by_muni.len() - 2 * out.len();
    if dropped > 0 {
        debug!(
            "inner join dropped {} municipalities present on one side only",
            dropped
        );
    }
    out
}

fn index_by_municipality<'a>(
    shares: &'a [MunicipalShare],
    side: &str,
) -> BTreeMap<u32, &'a MunicipalShare> {
    let mut index: BTreeMap<u32, &MunicipalShare> = BTreeMap::new();
    for s in shares {
        if index.insert(s.municipality_code, s).is_some() {
            warn!(
                "side {} has more than one row for municipality {}; keeping the last",
                side, s.municipality_code
            );
        }
    }
    index
}

/// Inner-joins two regional summary tables on (party, region); used for
/// same-party year-over-year growth views.
pub fn diff_by_party_region(
    side_a: &[RegionalSummary],
    side_b: &[RegionalSummary],
) -> Vec<RegionalDiff> {
    let mut b_by_key: BTreeMap<(String, String), &RegionalSummary> = BTreeMap::new();
    for s in side_b {
        b_by_key.insert((s.party.clone(), s.region.clone()), s);
    }

    let mut out = Vec::new();
    for a in side_a {
        let b = match b_by_key.get(&(a.party.clone(), a.region.clone())) {
            Some(b) => b,
            None => continue,
        };
        out.push(RegionalDiff {
            party: a.party.clone(),
            region: a.region.clone(),
            year_a: a.year,
            year_b: b.year,
            votes_a: a.vote_total,
            votes_b: b.vote_total,
            pct_a: a.pct_of_region,
            pct_b: b.pct_of_region,
            qty_diff: b.vote_total as i64 - a.vote_total as i64,
            pct_diff: b.pct_of_region - a.pct_of_region,
        });
    }
    out
}
