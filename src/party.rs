//! Static ideology classification and color assignment per party.
//!
//! The spectrum positions and scores follow the Bolognesi classification the
//! reference party table uses. The table is computed once per session and
//! read-only afterwards; an ideology code outside the seven known positions
//! is a hard error, not a silent null.

use crate::model::{PartyColor, PartyRef};
use lazy_static::lazy_static;
use log::warn;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PartyError {
    #[error("party {party} has unknown ideology code {code:?}")]
    UnknownIdeology { party: String, code: String },
    #[error("party {party} has unparsable ideology score {value:?}")]
    BadScore { party: String, value: String },
}

/// The seven ideology codes, left to right.
pub const IDEOLOGY_CODES: [&str; 7] = ["EE", "E", "CE", "C", "CD", "D", "ED"];

lazy_static! {
    /// code -> (display label, legend color).
    static ref IDEOLOGY_TABLE: HashMap<&'static str, (&'static str, &'static str)> = {
        let mut m = HashMap::new();
        m.insert("EE", ("Extrema Esquerda", "#7F0000"));
        m.insert("E", ("Esquerda", "#FF0000"));
        m.insert("CE", ("Centro Esquerda", "#C54B53"));
        m.insert("C", ("Centro", "#FFD966"));
        m.insert("CD", ("Centro Direita", "#97A3FF"));
        m.insert("D", ("Direita", "#262DDA"));
        m.insert("ED", ("Extrema Direita", "#030886"));
        m
    };
}

/// Builds the per-party color table from the party reference rows.
///
/// Duplicate party rows collapse to the first occurrence (later conflicting
/// rows are flagged). Scores arrive locale-formatted with a decimal comma and
/// are normalized before parsing.
pub fn party_colors(refs: &[PartyRef]) -> Result<Vec<PartyColor>, PartyError> {
    let mut unique: BTreeMap<&str, &PartyRef> = BTreeMap::new();
    for r in refs {
        if let Some(first) = unique.get(r.party.as_str()) {
            if *first != r {
                warn!(
                    "party {} appears with conflicting reference rows; keeping the first",
                    r.party
                );
            }
            continue;
        }
        unique.insert(&r.party, r);
    }

    let mut out = Vec::with_capacity(unique.len());
    for (_, r) in unique {
        let (label, color) = IDEOLOGY_TABLE
            .get(r.ideology_code.as_str())
            .ok_or_else(|| PartyError::UnknownIdeology {
                party: r.party.clone(),
                code: r.ideology_code.clone(),
            })?;
        let score: f32 = r
            .ideology_score
            .replace(',', ".")
            .parse()
            .map_err(|_| PartyError::BadScore {
                party: r.party.clone(),
                value: r.ideology_score.clone(),
            })?;
        out.push(PartyColor {
            party: r.party.clone(),
            ideology_code: r.ideology_code.clone(),
            ideology_label: label.to_string(),
            ideology_score: score,
            color: color.to_string(),
        });
    }
    Ok(out)
}

/// Legend color for one ideology code, if it is a known position.
pub fn ideology_color(code: &str) -> Option<&'static str> {
    IDEOLOGY_TABLE.get(code).map(|(_, color)| *color)
}
