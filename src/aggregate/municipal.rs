//! Per-municipality vote totals and party shares.

use crate::filter::Selection;
use crate::model::{MunicipalShare, VoteRecord};
use log::warn;
use std::collections::BTreeMap;

/// Which denominator `pct_votes_municipality` is computed against.
///
/// The two modes answer different questions and both exist in the dashboards,
/// so the choice is an explicit input rather than an implicit default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareBasis {
    /// Share of all valid votes cast in the municipality: the municipal total
    /// is summed over every party, before the party selection is applied.
    OfMunicipality,
    /// Share among the selected parties only: the party selection is applied
    /// first and the total covers just the surviving rows.
    OfSelection,
}

/// Re-groups per-zone rows into one row per (year, office, region,
/// municipality, party), summing valid votes. Loaders that already collapse
/// zones can skip this; running it twice is a no-op.
pub fn collapse_zones(records: &[VoteRecord]) -> Vec<VoteRecord> {
    let mut groups: BTreeMap<(u16, u8, String, u32, String), u64> = BTreeMap::new();
    for r in records {
        *groups
            .entry((
                r.year,
                r.office_code,
                r.region.clone(),
                r.municipality_code,
                r.party.clone(),
            ))
            .or_insert(0) += r.valid_votes;
    }

    groups
        .into_iter()
        .map(
            |((year, office_code, region, municipality_code, party), valid_votes)| VoteRecord {
                year,
                office_code,
                region,
                municipality_code,
                party,
                valid_votes,
            },
        )
        .collect()
}

/// Computes one [`MunicipalShare`] row per (year, party, municipality).
///
/// Input rows are expected to be zone-collapsed and already filtered to the
/// offices and regions of interest. `parties` narrows the output rows;
/// `basis` decides whether the denominator is taken before or after that
/// narrowing.
///
/// A municipality whose total is zero is a data-quality fault, not an error:
/// its rows carry a NaN percentage, which the bucketizer later maps to its
/// no-data label.
pub fn municipal_shares(
    records: &[VoteRecord],
    parties: &Selection<String>,
    basis: ShareBasis,
) -> Vec<MunicipalShare> {
    // Denominators per (year, municipality).
    let mut totals: BTreeMap<(u16, u32), u64> = BTreeMap::new();
    for r in records {
        if basis == ShareBasis::OfSelection && !parties.admits(&r.party) {
            continue;
        }
        *totals.entry((r.year, r.municipality_code)).or_insert(0) += r.valid_votes;
    }

    // Numerators per (year, region, municipality, party).
    let mut groups: BTreeMap<(u16, String, u32, String), u64> = BTreeMap::new();
    for r in records {
        if !parties.admits(&r.party) {
            continue;
        }
        *groups
            .entry((r.year, r.region.clone(), r.municipality_code, r.party.clone()))
            .or_insert(0) += r.valid_votes;
    }

    groups
        .into_iter()
        .map(|((year, region, municipality_code, party), valid_votes)| {
            let total = totals
                .get(&(year, municipality_code))
                .copied()
                .unwrap_or(0);
            let pct = if total == 0 {
                warn!(
                    "municipality {} has zero valid votes in {}; share is not computable",
                    municipality_code, year
                );
                f64::NAN
            } else {
                valid_votes as f64 / total as f64
            };
            MunicipalShare {
                year,
                region,
                municipality_code,
                party,
                valid_votes,
                total_votes_municipality: total,
                pct_votes_municipality: pct,
            }
        })
        .collect()
}
