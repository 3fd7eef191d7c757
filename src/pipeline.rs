//! One-call orchestration: filter, aggregate, roll up, diff, build tables.
//!
//! The hosting layer re-runs [`run_comparison`] on every filter change; each
//! run recomputes everything from the cached raw records, which is the
//! documented consistency mechanism (no incremental recomputation). Runs are
//! pure and deterministic, so two runs over the same cache produce identical
//! tables.

use crate::aggregate::{collapse_zones, municipal_shares, regional_summaries, ShareBasis};
use crate::bucket::Bucketizer;
use crate::cache::{ReferenceCache, ReferenceSource};
use crate::diff::diff_by_municipality;
use crate::filter::{drop_overseas, Selection, VoteFilter};
use crate::model::{office, DiffRecord, MunicipalShare, TopKSelection};
use crate::party::party_colors;
use crate::reports::{
    builders, CapitalDiffRow, CapitalRow, ChoroplethRow, GrowthRow, PyramidRow, RegionMedianRow,
    RegionSummaryRow, ReportResult, ScatterRow,
};
use crate::topk::top_k_parties;
use serde::{Deserialize, Serialize};

/// Host-supplied pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Offices whose votes enter the pipeline.
    pub office_codes: Vec<u8>,
    /// How many parties the pyramid comparison ranks.
    pub k: usize,
    pub year_a: u16,
    pub year_b: u16,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            office_codes: vec![office::PRESIDENT],
            k: 10,
            year_a: 2018,
            year_b: 2022,
        }
    }
}

/// One side of a comparison: a party in one of the two election years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSide {
    pub party: String,
    pub year: u16,
}

impl ComparisonSide {
    pub fn new(party: &str, year: u16) -> Self {
        ComparisonSide {
            party: party.to_string(),
            year,
        }
    }

    /// Legend string the dashboards use, e.g. `"PT 2018"`.
    pub fn legend(&self) -> String {
        format!("{} {}", self.party, self.year)
    }
}

/// What to compare: two (party, year) sides and an optional region narrowing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonSpec {
    pub side_a: ComparisonSide,
    pub side_b: ComparisonSide,
    pub regions: Selection<String>,
}

/// Everything the interactive views consume, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonTables {
    pub shares_a: Vec<MunicipalShare>,
    pub shares_b: Vec<MunicipalShare>,
    pub choropleth_a: Vec<ChoroplethRow>,
    pub choropleth_b: Vec<ChoroplethRow>,
    pub diffs: Vec<DiffRecord>,
    pub region_summary: Vec<RegionSummaryRow>,
    pub growth: Vec<GrowthRow>,
    pub scatter: Vec<ScatterRow>,
    pub capitals_a: Vec<CapitalRow>,
    pub capitals_b: Vec<CapitalRow>,
    pub capitals_diff: Vec<CapitalDiffRow>,
    pub region_median_diff: Vec<RegionMedianRow>,
}

fn side_shares<S: ReferenceSource>(
    cache: &ReferenceCache<S>,
    config: &PipelineConfig,
    side: &ComparisonSide,
    regions: &Selection<String>,
) -> ReportResult<Vec<MunicipalShare>> {
    let records = cache.votes(side.year)?;
    let records = drop_overseas(records);
    let filter = VoteFilter {
        offices: Selection::only(config.office_codes.iter().copied()),
        parties: Selection::All,
        regions: regions.clone(),
    };
    let records = collapse_zones(&filter.apply(&records));
    // Share of the whole municipality: the denominator is fixed before the
    // party narrowing.
    Ok(municipal_shares(
        &records,
        &Selection::only_str(vec![side.party.as_str()]),
        ShareBasis::OfMunicipality,
    ))
}

/// Runs the full comparison pipeline for two (party, year) sides.
pub fn run_comparison<S: ReferenceSource>(
    cache: &ReferenceCache<S>,
    config: &PipelineConfig,
    spec: &ComparisonSpec,
) -> ReportResult<ComparisonTables> {
    let shares_a = side_shares(cache, config, &spec.side_a, &spec.regions)?;
    let shares_b = side_shares(cache, config, &spec.side_b, &spec.regions)?;

    let municipalities = cache.municipalities()?;
    let share_buckets = Bucketizer::vote_share();
    let shift_buckets = Bucketizer::share_shift();

    let choropleth_a =
        builders::choropleth_table(&shares_a, &spec.side_a.party, municipalities, &share_buckets);
    let choropleth_b =
        builders::choropleth_table(&shares_b, &spec.side_b.party, municipalities, &share_buckets);

    let diffs = diff_by_municipality(&shares_a, &shares_b, &shift_buckets);

    let legend_a = spec.side_a.legend();
    let legend_b = spec.side_b.legend();
    let region_summary = builders::region_summary_table(&shares_a, &legend_a, &shares_b, &legend_b);
    let growth = builders::growth_table(&diffs);
    let scatter = builders::scatter_table(&diffs, municipalities);
    let capitals_a = builders::capitals_table(&shares_a, &legend_a, municipalities);
    let capitals_b = builders::capitals_table(&shares_b, &legend_b, municipalities);
    let capitals_diff = builders::capitals_diff_table(&diffs, municipalities);
    let region_median_diff = builders::region_median_diff(&diffs);

    Ok(ComparisonTables {
        shares_a,
        shares_b,
        choropleth_a,
        choropleth_b,
        diffs,
        region_summary,
        growth,
        scatter,
        capitals_a,
        capitals_b,
        capitals_diff,
        region_median_diff,
    })
}

/// Builds the party pyramid table: every party's national totals in both
/// years, ranked by the Top-K of `year_b` and colored by ideology.
pub fn run_pyramid<S: ReferenceSource>(
    cache: &ReferenceCache<S>,
    config: &PipelineConfig,
) -> ReportResult<(TopKSelection, Vec<PyramidRow>)> {
    let filter = VoteFilter {
        offices: Selection::only(config.office_codes.iter().copied()),
        parties: Selection::All,
        regions: Selection::All,
    };

    let mut summaries = Vec::new();
    for year in [config.year_a, config.year_b].iter() {
        let records = drop_overseas(cache.votes(*year)?);
        let records = collapse_zones(&filter.apply(&records));
        let shares = municipal_shares(&records, &Selection::All, ShareBasis::OfMunicipality);
        summaries.push(regional_summaries(&shares));
    }
    let summaries_b = summaries.pop().unwrap_or_default();
    let summaries_a = summaries.pop().unwrap_or_default();

    let selection = top_k_parties(&summaries_b, config.year_b, config.k);
    let colors = party_colors(cache.parties()?)?;
    let rows = builders::pyramid_table(
        &summaries_a,
        config.year_a,
        &summaries_b,
        config.year_b,
        &colors,
        &selection,
    )?;
    Ok((selection, rows))
}
