//! Builders for the output tables, one per chart family of the dashboards.

use super::{
    CapitalDiffRow, CapitalRow, ChoroplethRow, GrowthRow, PyramidRow, RegionMedianRow,
    RegionSummaryRow, ReportResult, ScatterRow,
};
use crate::aggregate::{align_to_selection, regional_summaries};
use crate::bucket::Bucketizer;
use crate::model::{
    DiffRecord, MunicipalShare, Municipality, PartyColor, RegionalSummary, TopKSelection,
    NATIONAL_REGION,
};
use crate::stats;
use log::debug;
use std::collections::BTreeMap;

fn municipality_index(municipalities: &[Municipality]) -> BTreeMap<u32, &Municipality> {
    municipalities.iter().map(|m| (m.tse_code, m)).collect()
}

/// Bucketizes one party's municipal shares and joins (inner) the municipality
/// reference. Shares without a reference row are dropped, like every other
/// inner join in this crate.
pub fn choropleth_table(
    shares: &[MunicipalShare],
    party: &str,
    municipalities: &[Municipality],
    buckets: &Bucketizer,
) -> Vec<ChoroplethRow> {
    let by_code = municipality_index(municipalities);

    let mut dropped = 0usize;
    let mut out = Vec::new();
    for s in shares.iter().filter(|s| s.party == party) {
        let muni = match by_code.get(&s.municipality_code) {
            Some(m) => m,
            None => {
                dropped += 1;
                continue;
            }
        };
        out.push(ChoroplethRow {
            year: s.year,
            region: s.region.clone(),
            uf: muni.uf.clone(),
            municipality_code: s.municipality_code,
            ibge_code: muni.ibge_code,
            name: muni.name.clone(),
            party: s.party.clone(),
            valid_votes: s.valid_votes,
            total_votes_municipality: s.total_votes_municipality,
            pct_votes_municipality: s.pct_votes_municipality,
            pct_bucket: buckets.label_for(s.pct_votes_municipality).to_string(),
        });
    }
    if dropped > 0 {
        debug!(
            "choropleth join dropped {} municipalities missing from the reference",
            dropped
        );
    }
    out
}

/// National party totals for both years, aligned to the Top-K selection of
/// the reference year with zero-fill, enriched with ideology colors.
///
/// Parties without a color row are dropped; the color table is validated at
/// construction, so a hole there means the party is absent from the
/// reference, not that an ideology went unmapped.
pub fn pyramid_table(
    side_a: &[RegionalSummary],
    year_a: u16,
    side_b: &[RegionalSummary],
    year_b: u16,
    colors: &[PartyColor],
    selection: &TopKSelection,
) -> ReportResult<Vec<PyramidRow>> {
    let color_by_party: BTreeMap<&str, &PartyColor> =
        colors.iter().map(|c| (c.party.as_str(), c)).collect();
    let rank_by_party: BTreeMap<&str, u64> = selection
        .entries
        .iter()
        .map(|e| (e.party.as_str(), e.rank_key))
        .collect();

    let mut out = Vec::new();
    for (side, year) in [(side_a, year_a), (side_b, year_b)].iter() {
        let national: Vec<RegionalSummary> = side
            .iter()
            .filter(|s| s.region == NATIONAL_REGION)
            .cloned()
            .collect();
        let aligned = align_to_selection(&national, selection, *year);
        for s in aligned {
            let color = match color_by_party.get(s.party.as_str()) {
                Some(c) => c,
                None => {
                    debug!("party {} has no color reference; dropped from pyramid", s.party);
                    continue;
                }
            };
            let rank_key = rank_by_party.get(s.party.as_str()).copied().unwrap_or(0);
            out.push(PyramidRow {
                year: s.year,
                party: s.party.clone(),
                ideology_label: color.ideology_label.clone(),
                color: color.color.clone(),
                valid_votes: s.vote_total,
                national_total: s.region_total,
                pct: if s.region_total == 0 {
                    0.0
                } else {
                    s.pct_of_region
                },
                rank_key,
            });
        }
    }
    Ok(out)
}

/// Regional and national vote summaries for the two compared selections,
/// stamped with their legend (`"<PARTY> <YEAR>"`).
pub fn region_summary_table(
    shares_a: &[MunicipalShare],
    legend_a: &str,
    shares_b: &[MunicipalShare],
    legend_b: &str,
) -> Vec<RegionSummaryRow> {
    let mut out = Vec::new();
    for (shares, legend) in [(shares_a, legend_a), (shares_b, legend_b)].iter() {
        for s in regional_summaries(shares) {
            out.push(RegionSummaryRow {
                legend: legend.to_string(),
                year: s.year,
                party: s.party,
                region: s.region,
                vote_total: s.vote_total,
                region_total: s.region_total,
                pct: s.pct_of_region,
            });
        }
    }
    out
}

/// Regional vote growth from the municipal diff join, plus the national row.
pub fn growth_table(diffs: &[DiffRecord]) -> Vec<GrowthRow> {
    let mut by_region: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for d in diffs {
        let entry = by_region.entry(d.region.clone()).or_insert((0, 0));
        entry.0 += d.votes_a;
        entry.1 += d.votes_b;
    }

    let mut national = (0u64, 0u64);
    let mut out: Vec<GrowthRow> = by_region
        .into_iter()
        .map(|(region, (votes_a, votes_b))| {
            national.0 += votes_a;
            national.1 += votes_b;
            GrowthRow {
                region,
                votes_a,
                votes_b,
                qty_diff: votes_b as i64 - votes_a as i64,
            }
        })
        .collect();
    out.push(GrowthRow {
        region: NATIONAL_REGION.to_string(),
        votes_a: national.0,
        votes_b: national.1,
        qty_diff: national.1 as i64 - national.0 as i64,
    });
    out
}

/// The wide municipal join with reference names, for the scatter views.
pub fn scatter_table(diffs: &[DiffRecord], municipalities: &[Municipality]) -> Vec<ScatterRow> {
    let by_code = municipality_index(municipalities);
    diffs
        .iter()
        .filter_map(|d| {
            by_code.get(&d.municipality_code).map(|muni| ScatterRow {
                municipality_code: d.municipality_code,
                name: muni.name.clone(),
                uf: muni.uf.clone(),
                region: d.region.clone(),
                votes_a: d.votes_a,
                votes_b: d.votes_b,
                total_a: d.total_a,
                total_b: d.total_b,
                pct_a: d.pct_a,
                pct_b: d.pct_b,
            })
        })
        .collect()
}

/// One compared selection's shares restricted to the 26 state capitals
/// (plus the federal district).
pub fn capitals_table(
    shares: &[MunicipalShare],
    legend: &str,
    municipalities: &[Municipality],
) -> Vec<CapitalRow> {
    let by_code = municipality_index(municipalities);
    shares
        .iter()
        .filter_map(|s| match by_code.get(&s.municipality_code) {
            Some(muni) if muni.capital => Some(CapitalRow {
                legend: legend.to_string(),
                year: s.year,
                region: s.region.clone(),
                uf: muni.uf.clone(),
                municipality_code: s.municipality_code,
                name: muni.name.clone(),
                party: s.party.clone(),
                valid_votes: s.valid_votes,
                total_votes_municipality: s.total_votes_municipality,
                pct_votes_municipality: s.pct_votes_municipality,
            }),
            _ => None,
        })
        .collect()
}

/// Per-capital deltas from the municipal diff join.
pub fn capitals_diff_table(
    diffs: &[DiffRecord],
    municipalities: &[Municipality],
) -> Vec<CapitalDiffRow> {
    let by_code = municipality_index(municipalities);
    diffs
        .iter()
        .filter_map(|d| match by_code.get(&d.municipality_code) {
            Some(muni) if muni.capital => Some(CapitalDiffRow {
                name: muni.name.clone(),
                region: d.region.clone(),
                votes_a: d.votes_a,
                votes_b: d.votes_b,
                pct_a: d.pct_a,
                pct_b: d.pct_b,
                qty_diff: d.qty_diff,
                pct_diff: d.pct_diff,
            }),
            _ => None,
        })
        .collect()
}

/// Median municipal share shift per region, over every joined municipality
/// (not only capitals); `None` when a region has no computable shares.
pub fn region_median_diff(diffs: &[DiffRecord]) -> Vec<RegionMedianRow> {
    let mut by_region: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for d in diffs {
        by_region.entry(d.region.clone()).or_default().push(d.pct_diff);
    }
    by_region
        .into_iter()
        .map(|(region, values)| RegionMedianRow {
            median_diff: stats::median(&values),
            region,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::diff_by_municipality;
    use crate::model::TopKEntry;

    fn share(year: u16, municipality: u32, party: &str, votes: u64, total: u64) -> MunicipalShare {
        MunicipalShare {
            year,
            region: "Sul".to_string(),
            municipality_code: municipality,
            party: party.to_string(),
            valid_votes: votes,
            total_votes_municipality: total,
            pct_votes_municipality: votes as f64 / total as f64,
        }
    }

    fn municipality(code: u32, name: &str, capital: bool) -> Municipality {
        Municipality {
            tse_code: code,
            ibge_code: code * 10,
            name: name.to_string(),
            uf: "RS".to_string(),
            region: "Sul".to_string(),
            capital,
            latitude: -30.0,
            longitude: -51.0,
        }
    }

    #[test]
    fn choropleth_joins_and_bucketizes() {
        let shares = vec![
            share(2022, 1, "PT", 600, 1000),
            share(2022, 2, "PT", 100, 1000),
            share(2022, 3, "PT", 100, 1000), // no reference row
            share(2022, 1, "PL", 400, 1000), // other party
        ];
        let munis = vec![municipality(1, "Porto Alegre", true), municipality(2, "Canoas", false)];
        let rows = choropleth_table(&shares, "PT", &munis, &Bucketizer::vote_share());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Porto Alegre");
        assert_eq!(rows[0].ibge_code, 10);
        assert_eq!(rows[0].pct_bucket, ">55%");
        assert_eq!(rows[1].pct_bucket, "<=25%");
    }

    #[test]
    fn growth_table_appends_national_row() {
        let a = vec![share(2018, 1, "PT", 100, 1000), share(2018, 2, "PT", 200, 1000)];
        let b = vec![share(2022, 1, "PT", 150, 1000), share(2022, 2, "PT", 300, 1000)];
        let diffs = diff_by_municipality(&a, &b, &Bucketizer::share_shift());
        let growth = growth_table(&diffs);

        assert_eq!(growth.len(), 2);
        assert_eq!(growth[0].region, "Sul");
        assert_eq!(growth[0].votes_a, 300);
        assert_eq!(growth[0].votes_b, 450);
        assert_eq!(growth[0].qty_diff, 150);
        let national = growth.last().unwrap();
        assert_eq!(national.region, NATIONAL_REGION);
        assert_eq!(national.votes_b, 450);
    }

    #[test]
    fn capitals_tables_keep_only_capitals() {
        let shares = vec![share(2022, 1, "PT", 600, 1000), share(2022, 2, "PT", 100, 1000)];
        let munis = vec![municipality(1, "Porto Alegre", true), municipality(2, "Canoas", false)];

        let rows = capitals_table(&shares, "PT 2022", &munis);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Porto Alegre");
        assert_eq!(rows[0].legend, "PT 2022");
    }

    #[test]
    fn region_summary_has_both_legends_and_national_rows() {
        let a = vec![share(2018, 1, "PT", 100, 1000)];
        let b = vec![share(2022, 1, "PL", 900, 1000)];
        let rows = region_summary_table(&a, "PT 2018", &b, "PL 2022");

        assert_eq!(rows.len(), 4); // Sul + Brasil per side
        assert!(rows.iter().any(|r| r.legend == "PT 2018" && r.region == NATIONAL_REGION));
        assert!(rows.iter().any(|r| r.legend == "PL 2022" && r.region == "Sul"));
        let pl = rows
            .iter()
            .find(|r| r.legend == "PL 2022" && r.region == "Sul")
            .unwrap();
        assert!((pl.pct - 0.9).abs() < 1e-9);
    }

    #[test]
    fn pyramid_rows_follow_rank_and_zero_fill() {
        let b_shares = vec![share(2022, 1, "PL", 900, 1500), share(2022, 1, "PT", 600, 1500)];
        let a_shares = vec![share(2018, 1, "PT", 700, 1000)]; // PL absent in 2018
        let sum_a = regional_summaries(&a_shares);
        let sum_b = regional_summaries(&b_shares);

        let selection = TopKSelection {
            reference_year: 2022,
            entries: vec![
                TopKEntry { party: "PL".to_string(), rank_key: 900 },
                TopKEntry { party: "PT".to_string(), rank_key: 600 },
            ],
        };
        let colors = vec![
            PartyColor {
                party: "PL".to_string(),
                ideology_code: "D".to_string(),
                ideology_label: "Direita".to_string(),
                ideology_score: 7.3,
                color: "#262DDA".to_string(),
            },
            PartyColor {
                party: "PT".to_string(),
                ideology_code: "E".to_string(),
                ideology_label: "Esquerda".to_string(),
                ideology_score: 2.97,
                color: "#FF0000".to_string(),
            },
        ];

        let rows = pyramid_table(&sum_a, 2018, &sum_b, 2022, &colors, &selection).unwrap();
        assert_eq!(rows.len(), 4);

        // 2018 side: PL zero-filled, stamped with the fill year.
        let pl_18 = rows.iter().find(|r| r.party == "PL" && r.year == 2018).unwrap();
        assert_eq!(pl_18.valid_votes, 0);
        assert_eq!(pl_18.pct, 0.0);
        assert_eq!(pl_18.rank_key, 900);

        let pt_22 = rows.iter().find(|r| r.party == "PT" && r.year == 2022).unwrap();
        assert!((pt_22.pct - 0.4).abs() < 1e-9);
        assert_eq!(pt_22.color, "#FF0000");
    }

    #[test]
    fn region_median_diff_is_per_region() {
        let a = vec![share(2018, 1, "PT", 100, 1000), share(2018, 2, "PT", 200, 1000)];
        let b = vec![share(2022, 1, "PT", 200, 1000), share(2022, 2, "PT", 400, 1000)];
        let diffs = diff_by_municipality(&a, &b, &Bucketizer::share_shift());
        let medians = region_median_diff(&diffs);

        assert_eq!(medians.len(), 1);
        assert_eq!(medians[0].region, "Sul");
        let m = medians[0].median_diff.unwrap();
        assert!((m - 0.15).abs() < 1e-9);
    }
}
