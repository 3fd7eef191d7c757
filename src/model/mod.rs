//! Row types shared by every pipeline stage.
//!
//! All tables are plain `Vec<T>` snapshots of serde-derived value structs.
//! A stage never mutates its input table; each transform produces a new one.

use serde::{Deserialize, Serialize};

/// TSE office codes, as they appear in the raw vote files.
pub mod office {
    pub const PRESIDENT: u8 = 1;
    pub const GOVERNOR: u8 = 3;
    pub const SENATOR: u8 = 5;
    pub const FEDERAL_DEPUTY: u8 = 6;
    pub const STATE_DEPUTY: u8 = 7;
    pub const DISTRICT_DEPUTY: u8 = 8;
}

/// Pseudo-region code the TSE assigns to ballots cast abroad.
pub const OVERSEAS_REGION: &str = "ZZ";

/// Region name of the synthetic national rollup row.
pub const NATIONAL_REGION: &str = "Brasil";

/// The five Brazilian macro-regions, in the order the dashboards list them.
pub const REGIONS: [&str; 5] = ["Centro-Oeste", "Nordeste", "Norte", "Sudeste", "Sul"];

/// One zone-collapsed vote tally: a party's valid votes in one municipality
/// in one election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub year: u16,
    pub office_code: u8,
    pub region: String,
    pub municipality_code: u32,
    pub party: String,
    pub valid_votes: u64,
}

/// A vote tally enriched with the municipal total and the party's share of it.
///
/// `pct_votes_municipality` is NaN when the municipality recorded zero votes;
/// that marker survives serialization as `null` and the bucketizer maps it to
/// its no-data label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MunicipalShare {
    pub year: u16,
    pub region: String,
    pub municipality_code: u32,
    pub party: String,
    pub valid_votes: u64,
    pub total_votes_municipality: u64,
    pub pct_votes_municipality: f64,
}

/// Vote totals for one party in one region (or in the synthetic national row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalSummary {
    pub year: u16,
    pub party: String,
    pub region: String,
    pub vote_total: u64,
    pub region_total: u64,
    pub pct_of_region: f64,
}

/// Year-over-year (or party-over-party) delta for one municipality.
///
/// Produced by an inner join: municipalities present on only one side are
/// excluded by policy, never silently zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffRecord {
    pub municipality_code: u32,
    pub region: String,
    pub party_a: String,
    pub party_b: String,
    pub year_a: u16,
    pub year_b: u16,
    pub votes_a: u64,
    pub votes_b: u64,
    pub total_a: u64,
    pub total_b: u64,
    pub pct_a: f64,
    pub pct_b: f64,
    pub qty_diff: i64,
    pub pct_diff: f64,
    pub pct_diff_bucket: String,
}

/// Delta between two regional summaries joined on (party, region).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalDiff {
    pub party: String,
    pub region: String,
    pub year_a: u16,
    pub year_b: u16,
    pub votes_a: u64,
    pub votes_b: u64,
    pub pct_a: f64,
    pub pct_b: f64,
    pub qty_diff: i64,
    pub pct_diff: f64,
}

/// Static per-session color and ideology lookup for one party.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyColor {
    pub party: String,
    pub ideology_code: String,
    pub ideology_label: String,
    pub ideology_score: f32,
    pub color: String,
}

/// One ranked entry of a [`TopKSelection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopKEntry {
    pub party: String,
    /// Vote total in the reference year; reused as the ordering key when
    /// aligning the other year's series.
    pub rank_key: u64,
}

/// The K most voted parties of a reference year, descending by vote total,
/// ties broken by ascending party code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopKSelection {
    pub reference_year: u16,
    pub entries: Vec<TopKEntry>,
}

impl TopKSelection {
    pub fn parties(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.party.as_str())
    }

    pub fn contains(&self, party: &str) -> bool {
        self.entries.iter().any(|e| e.party == party)
    }
}

/// Municipality reference row (TSE and IBGE codes, location, capital flag).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Municipality {
    pub tse_code: u32,
    pub ibge_code: u32,
    pub name: String,
    pub uf: String,
    pub region: String,
    pub capital: bool,
    pub latitude: f64,
    pub longitude: f64,
}

/// Party reference row as the loader hands it over. The ideology score is a
/// locale-formatted string (decimal comma) and is parsed by `party_colors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRef {
    pub party: String,
    pub ideology_code: String,
    pub ideology_score: String,
}
