//! Risk tiers and their annual-return ranges

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Investment risk tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 3] = [
        RiskProfile::Conservative,
        RiskProfile::Moderate,
        RiskProfile::Aggressive,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }
}

impl std::fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Bounded annual-return range in percent, e.g. `4.0..6.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnRange {
    pub min_pct: f64,
    pub max_pct: f64,
}

impl ReturnRange {
    #[must_use]
    pub const fn new(min_pct: f64, max_pct: f64) -> Self {
        Self { min_pct, max_pct }
    }

    /// Midpoint of the range, used as the deterministic expected return
    #[must_use]
    pub fn expected_pct(&self) -> f64 {
        f64::midpoint(self.min_pct, self.max_pct)
    }

    pub fn validate(&self, field: &'static str) -> Result<(), ValidationError> {
        if !self.min_pct.is_finite() || !self.max_pct.is_finite() {
            return Err(ValidationError::new(field, "return bounds must be finite"));
        }
        if self.min_pct > self.max_pct {
            return Err(ValidationError::new(
                field,
                format!(
                    "min_pct ({}) exceeds max_pct ({})",
                    self.min_pct, self.max_pct
                ),
            ));
        }
        if self.min_pct <= -1200.0 {
            // Monthly factor (1 + pct/1200) would be non-positive
            return Err(ValidationError::new(field, "min_pct must exceed -1200"));
        }
        Ok(())
    }
}

/// Return range for each risk tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnRanges {
    pub conservative: ReturnRange,
    pub moderate: ReturnRange,
    pub aggressive: ReturnRange,
}

impl Default for ReturnRanges {
    fn default() -> Self {
        Self {
            conservative: ReturnRange::new(4.0, 6.0),
            moderate: ReturnRange::new(6.0, 8.0),
            aggressive: ReturnRange::new(8.0, 10.0),
        }
    }
}

impl ReturnRanges {
    #[must_use]
    pub fn range(&self, profile: RiskProfile) -> ReturnRange {
        match profile {
            RiskProfile::Conservative => self.conservative,
            RiskProfile::Moderate => self.moderate,
            RiskProfile::Aggressive => self.aggressive,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.conservative.validate("return_ranges.conservative")?;
        self.moderate.validate("return_ranges.moderate")?;
        self.aggressive.validate("return_ranges.aggressive")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ranges() {
        let ranges = ReturnRanges::default();
        assert_eq!(
            ranges.range(RiskProfile::Conservative),
            ReturnRange::new(4.0, 6.0)
        );
        assert_eq!(ranges.range(RiskProfile::Moderate).expected_pct(), 7.0);
        assert_eq!(ranges.range(RiskProfile::Aggressive).expected_pct(), 9.0);
        assert!(ranges.validate().is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = ReturnRange::new(8.0, 6.0)
            .validate("return_ranges.moderate")
            .unwrap_err();
        assert_eq!(err.field, "return_ranges.moderate");
    }

    #[test]
    fn test_profile_display() {
        assert_eq!(RiskProfile::Aggressive.to_string(), "aggressive");
        assert_eq!(RiskProfile::default(), RiskProfile::Moderate);
    }
}
