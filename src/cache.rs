//! Explicit load-once cache for the reference tables.
//!
//! The hosting layer re-invokes the pipeline on every user interaction, so
//! the raw inputs must not be re-fetched each time. Instead of module-level
//! memoized fetch functions, the cache is a value the host constructs with an
//! injected [`ReferenceSource`] and passes into the pipeline, with an
//! explicit invalidation hook.

use crate::model::{Municipality, PartyRef, VoteRecord};
use once_cell::sync::OnceCell;
use thiserror::Error;

/// Errors a [`ReferenceSource`] implementation can surface.
#[derive(Debug, Error)]
pub enum SourceError {
    /// An input table is missing an expected column or has the wrong type.
    /// Fatal: every downstream computation assumes the schema.
    #[error("schema violation in table {table}: {detail}")]
    Schema { table: String, detail: String },
    #[error("reference table unavailable: {0}")]
    Unavailable(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, SourceError>;

/// Producer of the raw input tables. Implemented by the hosting application
/// (parquet readers, HTTP fetchers, test fixtures); this crate only defines
/// the contract.
pub trait ReferenceSource {
    /// Zone-aggregated vote records for one election year.
    fn votes(&self, year: u16) -> Result<Vec<VoteRecord>>;
    /// Municipality reference, including the capital flag used by the
    /// capitals views.
    fn municipalities(&self) -> Result<Vec<Municipality>>;
    /// Party reference with ideology code and locale-formatted score.
    fn parties(&self) -> Result<Vec<PartyRef>>;
}

/// Caches each reference table after its first successful load.
pub struct ReferenceCache<S: ReferenceSource> {
    source: S,
    year_a: u16,
    year_b: u16,
    votes_a: OnceCell<Vec<VoteRecord>>,
    votes_b: OnceCell<Vec<VoteRecord>>,
    municipalities: OnceCell<Vec<Municipality>>,
    parties: OnceCell<Vec<PartyRef>>,
}

impl<S: ReferenceSource> ReferenceCache<S> {
    pub fn new(source: S, year_a: u16, year_b: u16) -> Self {
        ReferenceCache {
            source,
            year_a,
            year_b,
            votes_a: OnceCell::new(),
            votes_b: OnceCell::new(),
            municipalities: OnceCell::new(),
            parties: OnceCell::new(),
        }
    }

    pub fn year_a(&self) -> u16 {
        self.year_a
    }

    pub fn year_b(&self) -> u16 {
        self.year_b
    }

    /// Vote records for one of the two cached years. Any other year is a
    /// caller bug surfaced as `Unavailable`.
    pub fn votes(&self, year: u16) -> Result<&[VoteRecord]> {
        let (cell, year) = if year == self.year_a {
            (&self.votes_a, self.year_a)
        } else if year == self.year_b {
            (&self.votes_b, self.year_b)
        } else {
            return Err(SourceError::Unavailable(format!(
                "year {} is not one of the cached elections ({}, {})",
                year, self.year_a, self.year_b
            )));
        };
        cell.get_or_try_init(|| self.source.votes(year))
            .map(|v| v.as_slice())
    }

    pub fn municipalities(&self) -> Result<&[Municipality]> {
        self.municipalities
            .get_or_try_init(|| self.source.municipalities())
            .map(|v| v.as_slice())
    }

    pub fn parties(&self) -> Result<&[PartyRef]> {
        self.parties
            .get_or_try_init(|| self.source.parties())
            .map(|v| v.as_slice())
    }

    /// Drops every cached table; the next access reloads from the source.
    pub fn invalidate(&mut self) {
        self.votes_a.take();
        self.votes_b.take();
        self.municipalities.take();
        self.parties.take();
    }
}
