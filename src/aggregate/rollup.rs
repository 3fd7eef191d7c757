//! Regional and national rollup of municipal shares.

use crate::model::{MunicipalShare, RegionalSummary, TopKSelection, NATIONAL_REGION};
use std::collections::BTreeMap;

/// Re-aggregates municipal shares to one row per (year, party, region), plus
/// a synthetic national row per (year, party) under [`NATIONAL_REGION`].
///
/// `region_total` sums each municipality's total exactly once per (year,
/// region), so it is independent of how many party rows a municipality has.
pub fn regional_summaries(shares: &[MunicipalShare]) -> Vec<RegionalSummary> {
    // Each municipality contributes its total once per year.
    let mut muni_totals: BTreeMap<(u16, String, u32), u64> = BTreeMap::new();
    for s in shares {
        muni_totals
            .entry((s.year, s.region.clone(), s.municipality_code))
            .or_insert(s.total_votes_municipality);
    }

    let mut region_totals: BTreeMap<(u16, String), u64> = BTreeMap::new();
    let mut national_totals: BTreeMap<u16, u64> = BTreeMap::new();
    for ((year, region, _), total) in &muni_totals {
        *region_totals.entry((*year, region.clone())).or_insert(0) += total;
        *national_totals.entry(*year).or_insert(0) += total;
    }

    let mut votes: BTreeMap<(u16, String, String), u64> = BTreeMap::new();
    for s in shares {
        *votes
            .entry((s.year, s.party.clone(), s.region.clone()))
            .or_insert(0) += s.valid_votes;
    }

    let mut national_votes: BTreeMap<(u16, String), u64> = BTreeMap::new();
    for ((year, party, _), vote_total) in &votes {
        *national_votes.entry((*year, party.clone())).or_insert(0) += vote_total;
    }

    let mut out = Vec::with_capacity(votes.len() + national_votes.len());
    for ((year, party, region), vote_total) in votes {
        let region_total = region_totals
            .get(&(year, region.clone()))
            .copied()
            .unwrap_or(0);
        out.push(summary(year, party, region, vote_total, region_total));
    }
    for ((year, party), vote_total) in national_votes {
        let region_total = national_totals.get(&year).copied().unwrap_or(0);
        out.push(summary(
            year,
            party,
            NATIONAL_REGION.to_string(),
            vote_total,
            region_total,
        ));
    }
    out
}

fn summary(
    year: u16,
    party: String,
    region: String,
    vote_total: u64,
    region_total: u64,
) -> RegionalSummary {
    let pct_of_region = if region_total == 0 {
        f64::NAN
    } else {
        vote_total as f64 / region_total as f64
    };
    RegionalSummary {
        year,
        party,
        region,
        vote_total,
        region_total,
        pct_of_region,
    }
}

/// Right-joins a year's summaries against a Top-K party list so that every
/// ranked party has a row even when it did not contest that year (renamed or
/// newly founded parties). Missing parties get zero-filled votes and
/// percentages and are stamped with `fill_year`, giving comparison charts a
/// defined baseline. Output follows the selection's rank order.
pub fn align_to_selection(
    summaries: &[RegionalSummary],
    selection: &TopKSelection,
    fill_year: u16,
) -> Vec<RegionalSummary> {
    let mut out = Vec::new();
    for entry in &selection.entries {
        let mut matched = false;
        for s in summaries {
            if s.party == entry.party {
                out.push(s.clone());
                matched = true;
            }
        }
        if !matched {
            out.push(RegionalSummary {
                year: fill_year,
                party: entry.party.clone(),
                region: NATIONAL_REGION.to_string(),
                vote_total: 0,
                region_total: 0,
                pct_of_region: 0.0,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TopKEntry;

    fn share(
        year: u16,
        region: &str,
        municipality: u32,
        party: &str,
        votes: u64,
        total: u64,
    ) -> MunicipalShare {
        MunicipalShare {
            year,
            region: region.to_string(),
            municipality_code: municipality,
            party: party.to_string(),
            valid_votes: votes,
            total_votes_municipality: total,
            pct_votes_municipality: votes as f64 / total as f64,
        }
    }

    #[test]
    fn region_total_counts_each_municipality_once() {
        let shares = vec![
            share(2022, "Sul", 1, "PT", 600, 1000),
            share(2022, "Sul", 1, "PL", 400, 1000),
            share(2022, "Sul", 2, "PT", 200, 500),
            share(2022, "Sul", 2, "PL", 300, 500),
        ];
        let summaries = regional_summaries(&shares);
        let pt_sul = summaries
            .iter()
            .find(|s| s.party == "PT" && s.region == "Sul")
            .unwrap();
        assert_eq!(pt_sul.vote_total, 800);
        assert_eq!(pt_sul.region_total, 1500);
        assert!((pt_sul.pct_of_region - 800.0 / 1500.0).abs() < 1e-9);
        assert!(pt_sul.vote_total <= pt_sul.region_total);
    }

    #[test]
    fn national_row_equals_sum_of_regions() {
        let shares = vec![
            share(2022, "Sul", 1, "PT", 600, 1000),
            share(2022, "Nordeste", 2, "PT", 900, 1200),
            share(2022, "Nordeste", 3, "PT", 100, 300),
        ];
        let summaries = regional_summaries(&shares);

        let regional_sum: u64 = summaries
            .iter()
            .filter(|s| s.party == "PT" && s.region != NATIONAL_REGION)
            .map(|s| s.vote_total)
            .sum();
        let national = summaries
            .iter()
            .find(|s| s.party == "PT" && s.region == NATIONAL_REGION)
            .unwrap();
        assert_eq!(national.vote_total, regional_sum);
        assert_eq!(national.region_total, 2500);
    }

    #[test]
    fn align_zero_fills_missing_parties_in_rank_order() {
        let shares = vec![share(2018, "Sul", 1, "PT", 600, 1000)];
        let summaries = regional_summaries(&shares);
        let selection = TopKSelection {
            reference_year: 2022,
            entries: vec![
                TopKEntry {
                    party: "PL".to_string(),
                    rank_key: 900,
                },
                TopKEntry {
                    party: "PT".to_string(),
                    rank_key: 800,
                },
            ],
        };
        let aligned = align_to_selection(&summaries, &selection, 2018);

        assert_eq!(aligned[0].party, "PL");
        assert_eq!(aligned[0].vote_total, 0);
        assert_eq!(aligned[0].year, 2018);
        assert_eq!(aligned[0].pct_of_region, 0.0);
        assert!(aligned.iter().skip(1).all(|s| s.party == "PT"));
    }
}
