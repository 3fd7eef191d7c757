//! Selection of the K most voted parties of a reference year.

use crate::model::{RegionalSummary, TopKEntry, TopKSelection, NATIONAL_REGION};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Ranks parties by national vote total in `reference_year` and keeps the
/// first `k`.
///
/// National rows are preferred when the input already carries them; otherwise
/// regional rows are summed, so the function accepts either a full rollup or
/// a regional slice. Ordering is fully deterministic: descending vote total,
/// then ascending party code.
pub fn top_k_parties(
    summaries: &[RegionalSummary],
    reference_year: u16,
    k: usize,
) -> TopKSelection {
    let has_national = summaries
        .iter()
        .any(|s| s.year == reference_year && s.region == NATIONAL_REGION);

    let mut totals: BTreeMap<String, u64> = BTreeMap::new();
    for s in summaries {
        if s.year != reference_year {
            continue;
        }
        if has_national {
            if s.region == NATIONAL_REGION {
                totals.insert(s.party.clone(), s.vote_total);
            }
        } else {
            *totals.entry(s.party.clone()).or_insert(0) += s.vote_total;
        }
    }

    let entries = totals
        .into_iter()
        .sorted_by(|(party_a, votes_a), (party_b, votes_b)| {
            votes_b.cmp(votes_a).then_with(|| party_a.cmp(party_b))
        })
        .take(k)
        .map(|(party, rank_key)| TopKEntry { party, rank_key })
        .collect();

    TopKSelection {
        reference_year,
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(year: u16, party: &str, region: &str, votes: u64) -> RegionalSummary {
        RegionalSummary {
            year,
            party: party.to_string(),
            region: region.to_string(),
            vote_total: votes,
            region_total: votes * 2,
            pct_of_region: 0.5,
        }
    }

    #[test]
    fn ranks_descending_and_truncates() {
        let summaries = vec![
            summary(2022, "PT", NATIONAL_REGION, 800),
            summary(2022, "PL", NATIONAL_REGION, 900),
            summary(2022, "MDB", NATIONAL_REGION, 100),
            summary(2018, "PSL", NATIONAL_REGION, 999),
        ];
        let selection = top_k_parties(&summaries, 2022, 2);
        assert_eq!(selection.reference_year, 2022);
        assert_eq!(selection.entries.len(), 2);
        assert_eq!(selection.entries[0].party, "PL");
        assert_eq!(selection.entries[0].rank_key, 900);
        assert_eq!(selection.entries[1].party, "PT");
        assert!(!selection.contains("PSL"));
    }

    #[test]
    fn ties_break_by_ascending_party_code() {
        let summaries = vec![
            summary(2022, "PSB", NATIONAL_REGION, 500),
            summary(2022, "PDT", NATIONAL_REGION, 500),
            summary(2022, "PV", NATIONAL_REGION, 500),
        ];
        let selection = top_k_parties(&summaries, 2022, 3);
        let parties: Vec<_> = selection.parties().collect();
        assert_eq!(parties, vec!["PDT", "PSB", "PV"]);
    }

    #[test]
    fn sums_regions_when_no_national_row_is_present() {
        let summaries = vec![
            summary(2022, "PT", "Sul", 300),
            summary(2022, "PT", "Nordeste", 600),
            summary(2022, "PL", "Sul", 500),
        ];
        let selection = top_k_parties(&summaries, 2022, 10);
        assert_eq!(selection.entries.len(), 2);
        assert_eq!(selection.entries[0].party, "PT");
        assert_eq!(selection.entries[0].rank_key, 900);
    }

    #[test]
    fn k_larger_than_party_count_returns_all_without_duplicates() {
        let summaries = vec![
            summary(2022, "PT", NATIONAL_REGION, 800),
            summary(2022, "PL", NATIONAL_REGION, 900),
        ];
        let selection = top_k_parties(&summaries, 2022, 10);
        assert_eq!(selection.entries.len(), 2);
        let mut parties: Vec<_> = selection.parties().collect();
        parties.dedup();
        assert_eq!(parties.len(), 2);
    }
}
