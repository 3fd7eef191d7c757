//! Descriptive aggregates used by the summary builders.
//!
//! Only what the dashboards display: median and quartiles. Non-finite values
//! (the zero-denominator NaN marker) are skipped, so a municipality without
//! data cannot poison a regional median.

/// Median of the finite values, or `None` when there are none.
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}

/// (q1, median, q3) of the finite values, linearly interpolated.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64, f64)> {
    let q1 = quantile(values, 0.25)?;
    let q2 = quantile(values, 0.5)?;
    let q3 = quantile(values, 0.75)?;
    Some((q1, q2, q3))
}

fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    finite.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let pos = q * (finite.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return Some(finite[lower]);
    }
    let weight = pos - lower as f64;
    Some(finite[lower] * (1.0 - weight) + finite[upper] * weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_of_odd_and_even_counts() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn quartiles_interpolate() {
        let (q1, q2, q3) = quartiles(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((q1 - 1.75).abs() < 1e-9);
        assert!((q2 - 2.5).abs() < 1e-9);
        assert!((q3 - 3.25).abs() < 1e-9);
    }

    #[test]
    fn nan_values_are_skipped() {
        assert_eq!(median(&[f64::NAN, 1.0, 3.0]), Some(2.0));
        assert_eq!(median(&[f64::NAN]), None);
        assert_eq!(median(&[]), None);
    }
}
