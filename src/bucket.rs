//! Classification of continuous percentages into ordered legend categories.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BucketError {
    #[error("expected {expected} labels for {breaks} breaks, got {got}")]
    LabelCount {
        breaks: usize,
        expected: usize,
        got: usize,
    },
    #[error("breaks must be finite and strictly increasing")]
    BadBreaks,
}

/// Maps a numeric column to ordered categories with fixed cut points.
///
/// Each break is the inclusive upper bound of the bucket below it: value `v`
/// gets `labels[i]` for the smallest `i` with `v <= breaks[i]`, and the last
/// label when no break holds. NaN (the "not computable" share marker) maps to
/// a dedicated no-data label, never to a numeric bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucketizer {
    breaks: Vec<f64>,
    labels: Vec<String>,
    no_data: String,
}

impl Bucketizer {
    pub fn new(
        breaks: Vec<f64>,
        labels: Vec<String>,
        no_data: impl Into<String>,
    ) -> Result<Self, BucketError> {
        if labels.len() != breaks.len() + 1 {
            return Err(BucketError::LabelCount {
                breaks: breaks.len(),
                expected: breaks.len() + 1,
                got: labels.len(),
            });
        }
        let increasing = breaks.windows(2).all(|w| w[0] < w[1]);
        if !increasing || breaks.iter().any(|b| !b.is_finite()) {
            return Err(BucketError::BadBreaks);
        }
        Ok(Bucketizer {
            breaks,
            labels,
            no_data: no_data.into(),
        })
    }

    /// The standard choropleth legend for a party's municipal vote share.
    pub fn vote_share() -> Self {
        Bucketizer {
            breaks: vec![0.25, 0.40, 0.55],
            labels: vec!["<=25%", ">25%,<=40%", ">40%,<=55%", ">55%"]
                .into_iter()
                .map(String::from)
                .collect(),
            no_data: "Sem dados".to_string(),
        }
    }

    /// The standard legend for year-over-year share differences.
    pub fn share_shift() -> Self {
        Bucketizer {
            breaks: vec![-0.10, -0.01, 0.01, 0.10],
            labels: vec!["<-10%", ">-10% e <=-1%", ">-1%,<=1%", ">1% e <=10%", ">10%"]
                .into_iter()
                .map(String::from)
                .collect(),
            no_data: "Sem dados".to_string(),
        }
    }

    pub fn label_for(&self, value: f64) -> &str {
        if value.is_nan() {
            return &self.no_data;
        }
        for (i, brk) in self.breaks.iter().enumerate() {
            if value <= *brk {
                return &self.labels[i];
            }
        }
        &self.labels[self.labels.len() - 1]
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn no_data_label(&self) -> &str {
        &self.no_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breaks_are_inclusive_upper_bounds() {
        let buckets = Bucketizer::vote_share();
        assert_eq!(buckets.label_for(0.25), "<=25%");
        assert_eq!(buckets.label_for(0.2501), ">25%,<=40%");
        assert_eq!(buckets.label_for(0.40), ">25%,<=40%");
        assert_eq!(buckets.label_for(0.9), ">55%");
        assert_eq!(buckets.label_for(0.0), "<=25%");
        assert_eq!(buckets.label_for(-0.5), "<=25%");
    }

    #[test]
    fn every_output_is_a_known_label() {
        let buckets = Bucketizer::share_shift();
        for v in [-1.0, -0.10, -0.05, -0.01, 0.0, 0.01, 0.02, 0.10, 0.5] {
            let label = buckets.label_for(v);
            assert!(buckets.labels().iter().any(|l| l == label));
        }
    }

    #[test]
    fn nan_maps_to_no_data_label() {
        let buckets = Bucketizer::vote_share();
        assert_eq!(buckets.label_for(f64::NAN), "Sem dados");
        assert!(!buckets.labels().iter().any(|l| l == "Sem dados"));
    }

    #[test]
    fn label_count_is_validated() {
        let err = Bucketizer::new(
            vec![0.5],
            vec!["only one".to_string()],
            "n/a",
        )
        .unwrap_err();
        assert_eq!(
            err,
            BucketError::LabelCount {
                breaks: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn unsorted_breaks_are_rejected() {
        let err = Bucketizer::new(
            vec![0.4, 0.25],
            vec!["a".into(), "b".into(), "c".into()],
            "n/a",
        )
        .unwrap_err();
        assert_eq!(err, BucketError::BadBreaks);
    }
}
