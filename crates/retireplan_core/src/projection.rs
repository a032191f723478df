//! Deterministic closed-form projections
//!
//! Rates are converted to monthly (`pct / 100 / 12`) and the horizon to
//! months. With no contribution growth the ordinary-annuity future value is
//! used; with growth each contribution is compounded from its own month to
//! the end of the horizon.

/// Future value of a contribution stream at a fixed annual return.
#[must_use]
pub fn corpus_deterministic(
    monthly_contribution: f64,
    years: u32,
    annual_return_pct: f64,
    annual_income_growth_pct: f64,
) -> f64 {
    let r = annual_return_pct / 100.0 / 12.0;
    let n = years as i32 * 12;

    if annual_income_growth_pct == 0.0 {
        if r == 0.0 {
            return monthly_contribution * f64::from(n);
        }
        return monthly_contribution * ((1.0 + r).powi(n) - 1.0) / r;
    }

    let g = annual_income_growth_pct / 100.0 / 12.0;
    (0..n)
        .map(|m| monthly_contribution * (1.0 + g).powi(m) * (1.0 + r).powi(n - m))
        .sum()
}

/// Sum of all contributions over the horizon, before any returns
#[must_use]
pub fn total_contributions(monthly_contribution: f64, years: u32, annual_income_growth_pct: f64) -> f64 {
    let months = years as i32 * 12;
    if annual_income_growth_pct == 0.0 {
        return monthly_contribution * f64::from(months);
    }
    let g = annual_income_growth_pct / 100.0 / 12.0;
    (0..months)
        .map(|m| monthly_contribution * (1.0 + g).powi(m))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulate::accumulate_corpus;

    fn assert_rel(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_zero_return_is_plain_sum() {
        assert_rel(corpus_deterministic(1_000.0, 10, 0.0, 0.0), 120_000.0);
    }

    #[test]
    fn test_ordinary_annuity() {
        // 12% annual -> 1% monthly over 12 months
        let expected = 100.0 * (1.01_f64.powi(12) - 1.0) / 0.01;
        assert_rel(corpus_deterministic(100.0, 1, 12.0, 0.0), expected);
    }

    #[test]
    fn test_growth_matches_constant_path_accumulation() {
        // With growth the closed form compounds each contribution from its own
        // month, which is exactly the accumulator on a constant return path
        let g = 5.0 / 100.0 / 12.0;
        let simulated = accumulate_corpus(2_000.0, g, &[7.0; 20]);
        assert_rel(corpus_deterministic(2_000.0, 20, 7.0, 5.0), simulated);
    }

    #[test]
    fn test_growth_increases_corpus() {
        let flat = corpus_deterministic(5_000.0, 25, 7.0, 0.0);
        let growing = corpus_deterministic(5_000.0, 25, 7.0, 5.0);
        assert!(growing > flat);
    }

    #[test]
    fn test_total_contributions() {
        assert_rel(total_contributions(5_000.0, 30, 0.0), 1_800_000.0);

        let g: f64 = 6.0 / 100.0 / 12.0;
        let expected: f64 = (0..24).map(|m| 1_000.0 * (1.0 + g).powi(m)).sum();
        assert_rel(total_contributions(1_000.0, 2, 6.0), expected);
    }
}
