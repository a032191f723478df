//! Month-by-month corpus accumulation for a single trial

/// Compound one trajectory of contributions and returns into a final corpus.
///
/// For month `m` (0-based from the start of the horizon) the contribution is
/// `initial_contribution * (1 + monthly_growth_rate)^m`, added before that
/// month's return is applied. The monthly return is the annual return of the
/// year containing `m`, divided by 12. The horizon is
/// `annual_returns_pct.len() * 12` months.
#[must_use]
pub fn accumulate_corpus(
    initial_contribution: f64,
    monthly_growth_rate: f64,
    annual_returns_pct: &[f64],
) -> f64 {
    let mut corpus = 0.0;

    for (year, annual_pct) in annual_returns_pct.iter().enumerate() {
        let monthly_return = annual_pct / 100.0 / 12.0;

        for month in 0..12 {
            let m = (year * 12 + month) as i32;
            let contribution = initial_contribution * (1.0 + monthly_growth_rate).powi(m);
            corpus = (corpus + contribution) * (1.0 + monthly_return);
        }
    }

    corpus
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6 * expected.abs().max(1.0),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_zero_return_zero_growth_is_sum_of_contributions() {
        assert_approx(accumulate_corpus(1_000.0, 0.0, &[0.0; 10]), 120_000.0);
    }

    #[test]
    fn test_contribution_added_before_growth() {
        // One year at 12%: monthly 1%. Add-then-grow is an annuity due:
        // 100 * ((1.01^12 - 1) / 0.01) * 1.01
        let expected = 100.0 * ((1.01_f64.powi(12) - 1.0) / 0.01) * 1.01;
        assert_approx(accumulate_corpus(100.0, 0.0, &[12.0]), expected);
    }

    #[test]
    fn test_each_year_uses_its_own_return() {
        // Second year at 0% only adds contributions on top of year one's value
        let year_one = accumulate_corpus(100.0, 0.0, &[12.0]);
        let two_years = accumulate_corpus(100.0, 0.0, &[12.0, 0.0]);
        assert_approx(two_years, year_one + 1_200.0);
    }

    #[test]
    fn test_growth_compounds_per_month() {
        // No returns: sum of 1000 * (1 + g)^m over 24 months
        let g: f64 = 0.06 / 12.0;
        let expected: f64 = (0..24).map(|m| 1_000.0 * (1.0 + g).powi(m)).sum();
        assert_approx(accumulate_corpus(1_000.0, g, &[0.0, 0.0]), expected);
    }

    #[test]
    fn test_empty_horizon() {
        assert_eq!(accumulate_corpus(1_000.0, 0.0, &[]), 0.0);
    }
}
