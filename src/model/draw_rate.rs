use super::{EstimatorConfig, ProbabilityTriple};
use crate::error::Result;
use crate::stats::EntityRecord;

/// Each side's own win rate, with the draw priced as the mean of the two
/// teams' draw rates.
pub fn estimate(
    home: &EntityRecord,
    away: &EntityRecord,
    config: &EstimatorConfig,
) -> Result<ProbabilityTriple> {
    let h = home.outcome_rates()?;
    let a = away.outcome_rates()?;
    ProbabilityTriple::new(h.win, (h.draw + a.draw) / 2.0, a.win).normalized(config.epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OddsError;
    use approx::assert_relative_eq;

    #[test]
    fn uses_mean_draw_rate() {
        let config = EstimatorConfig::default();
        let a = EntityRecord::new(30, 15, 6).unwrap();
        let b = EntityRecord::new(30, 9, 12).unwrap();
        let t = estimate(&a, &b, &config).unwrap();
        // 0.5 / 0.3 / 0.3 over 1.1
        assert_relative_eq!(t.home, 0.5 / 1.1, epsilon = 1e-12);
        assert_relative_eq!(t.draw, 0.3 / 1.1, epsilon = 1e-12);
        assert_relative_eq!(t.away, 0.3 / 1.1, epsilon = 1e-12);
    }

    #[test]
    fn differing_match_counts_use_own_denominators() {
        let config = EstimatorConfig::default();
        let a = EntityRecord::new(10, 5, 0).unwrap();
        let b = EntityRecord::new(40, 10, 20).unwrap();
        let t = estimate(&a, &b, &config).unwrap();
        // 0.5 / 0.25 / 0.25 already sums to one
        assert_relative_eq!(t.home, 0.5, epsilon = 1e-12);
        assert_relative_eq!(t.draw, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn zero_matches_is_undefined() {
        let config = EstimatorConfig::default();
        let a = EntityRecord::new(0, 0, 0).unwrap();
        let b = EntityRecord::new(40, 10, 20).unwrap();
        assert!(matches!(
            estimate(&b, &a, &config),
            Err(OddsError::DivisionUndefined(_))
        ));
    }
}
