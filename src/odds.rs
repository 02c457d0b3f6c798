//! Probability → decimal odds conversion.
//!
//! Decimal odds are the reciprocal of the outcome probability, optionally
//! inflated by a bookmaker margin:
//!   odds = round((1 / p) · margin, 2)
//!
//! Zero, negative or near-zero probabilities (below epsilon) are replaced by
//! epsilon and the triple is renormalized first, so every price is finite. A
//! margin above 1.0 models bookmaker overhead by lengthening all three prices
//! uniformly.
//!
//! A price that rounds to 1.00 or less is reported as [`NO_BET`]: the outcome
//! is a near-certainty and a stake would only be paid back.

use serde::{Deserialize, Serialize};

use crate::error::{OddsError, Result};
use crate::model::ProbabilityTriple;

/// Default stand-in for a zero probability.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Price of an outcome that returns only the stake.
pub const NO_BET: f64 = 1.0;

/// Decimal 1X2 prices, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OddsTriple {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl OddsTriple {
    /// Sum of implied probabilities; 1.0 for fair odds up to rounding.
    pub fn overround(&self) -> f64 {
        1.0 / self.home + 1.0 / self.draw + 1.0 / self.away
    }

    /// True when any outcome is priced at [`NO_BET`].
    pub fn has_no_bet(&self) -> bool {
        [self.home, self.draw, self.away].contains(&NO_BET)
    }

    /// Implied probabilities with the overround removed.
    pub fn implied_probabilities(&self) -> ProbabilityTriple {
        let total = self.overround();
        ProbabilityTriple::new(
            1.0 / self.home / total,
            1.0 / self.draw / total,
            1.0 / self.away / total,
        )
    }
}

pub(crate) fn check_margin(margin: f64) -> Result<()> {
    if !(margin.is_finite() && margin > 0.0) {
        return Err(OddsError::Config(format!(
            "margin must be a positive number, got {}",
            margin
        )));
    }
    Ok(())
}

/// Round to two decimal places.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Convert a probability triple to decimal odds.
///
/// # Arguments
/// * `triple`  – Home/draw/away probabilities; need not be normalized.
/// * `margin`  – Multiplicative overhead (1.0 = fair odds). Must be > 0.
/// * `epsilon` – Replacement for components below it.
///
/// A price that would not be finite (an enormous margin, or a component
/// dwarfed by the others) is a [`OddsError::Config`] error.
pub fn to_odds(triple: &ProbabilityTriple, margin: f64, epsilon: f64) -> Result<OddsTriple> {
    check_margin(margin)?;
    let p = triple.normalized(epsilon)?;
    let price = |name: &str, p: f64| -> Result<f64> {
        let odds = round2((1.0 / p) * margin);
        if !odds.is_finite() {
            return Err(OddsError::Config(format!(
                "{} price is not finite (probability {}, margin {})",
                name, p, margin
            )));
        }
        Ok(odds.max(NO_BET))
    };
    Ok(OddsTriple {
        home: price("home", p.home)?,
        draw: price("draw", p.draw)?,
        away: price("away", p.away)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fair_odds_are_reciprocals() {
        let odds = to_odds(&ProbabilityTriple::new(0.5, 0.25, 0.25), 1.0, DEFAULT_EPSILON).unwrap();
        assert_eq!(odds, OddsTriple { home: 2.0, draw: 4.0, away: 4.0 });
    }

    #[test]
    fn test_unnormalized_input_is_rescaled() {
        // 2:1:1 → 0.5 / 0.25 / 0.25
        let odds = to_odds(&ProbabilityTriple::new(1.0, 0.5, 0.5), 1.0, DEFAULT_EPSILON).unwrap();
        assert_eq!(odds, OddsTriple { home: 2.0, draw: 4.0, away: 4.0 });
    }

    #[test]
    fn test_zero_probability_gives_finite_odds() {
        let odds = to_odds(&ProbabilityTriple::new(0.0, 0.5, 0.5), 1.0, DEFAULT_EPSILON).unwrap();
        assert!(odds.home.is_finite());
        // 1 / (1e-6 / 1.000001)
        assert_relative_eq!(odds.home, 1_000_001.0, epsilon = 1e-6);
        assert_relative_eq!(odds.draw, 2.0, epsilon = 1e-9);
        assert_relative_eq!(odds.away, 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_negative_and_nan_components_are_replaced() {
        let odds = to_odds(&ProbabilityTriple::new(-0.2, f64::NAN, 0.6), 1.0, DEFAULT_EPSILON).unwrap();
        for o in [odds.home, odds.draw, odds.away] {
            assert!(o.is_finite());
        }
        assert_relative_eq!(odds.away, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_near_zero_probability_gives_finite_odds() {
        let odds = to_odds(&ProbabilityTriple::new(1e-310, 0.5, 0.5), 1.0, DEFAULT_EPSILON).unwrap();
        assert_relative_eq!(odds.home, 1_000_001.0, epsilon = 1e-6);
        assert_eq!(odds.draw, 2.0);
        assert_eq!(odds.away, 2.0);
    }

    #[test]
    fn test_subnormal_epsilon_is_config_error() {
        let p = ProbabilityTriple::new(0.0, 0.5, 0.5);
        assert!(matches!(to_odds(&p, 1.0, 1e-320), Err(OddsError::Config(_))));
    }

    #[test]
    fn test_overflowing_price_is_config_error() {
        let p = ProbabilityTriple::new(0.5, 0.25, 0.25);
        assert!(matches!(to_odds(&p, f64::MAX, DEFAULT_EPSILON), Err(OddsError::Config(_))));
    }

    #[test]
    fn test_certain_outcome_is_no_bet() {
        let odds = to_odds(&ProbabilityTriple::new(1.0, 0.0, 0.0), 1.0, DEFAULT_EPSILON).unwrap();
        assert_eq!(odds.home, NO_BET);
        assert!(odds.has_no_bet());
        assert!(odds.draw.is_finite() && odds.draw > 1.0);

        // a margin below one cannot push a price under the stake
        let odds = to_odds(&ProbabilityTriple::new(0.9, 0.05, 0.05), 0.8, DEFAULT_EPSILON).unwrap();
        assert_eq!(odds.home, NO_BET);
        assert!(!to_odds(&ProbabilityTriple::new(0.5, 0.25, 0.25), 1.0, DEFAULT_EPSILON)
            .unwrap()
            .has_no_bet());
    }

    #[test]
    fn test_margin_inflates_uniformly() {
        let p = ProbabilityTriple::new(0.5, 0.25, 0.25);
        let odds = to_odds(&p, 1.05, DEFAULT_EPSILON).unwrap();
        assert_eq!(odds, OddsTriple { home: 2.1, draw: 4.2, away: 4.2 });
    }

    #[test]
    fn test_non_positive_margin_is_config_error() {
        let p = ProbabilityTriple::new(0.5, 0.25, 0.25);
        for m in [0.0, -1.0, f64::INFINITY] {
            assert!(matches!(
                to_odds(&p, m, DEFAULT_EPSILON),
                Err(OddsError::Config(_))
            ));
        }
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let odds = to_odds(&ProbabilityTriple::new(0.45, 0.3, 0.25), 1.0, DEFAULT_EPSILON).unwrap();
        assert_eq!(odds.home, 2.22);
        assert_eq!(odds.draw, 3.33);
        assert_eq!(odds.away, 4.0);
    }

    #[test]
    fn test_overround_reflects_margin() {
        let fair = OddsTriple { home: 2.0, draw: 4.0, away: 4.0 };
        assert_relative_eq!(fair.overround(), 1.0, epsilon = 1e-12);
        let p = fair.implied_probabilities();
        assert_relative_eq!(p.home, 0.5, epsilon = 1e-12);

        let p = ProbabilityTriple::new(0.5, 0.25, 0.25);
        let priced = to_odds(&p, 1.25, DEFAULT_EPSILON).unwrap();
        assert_relative_eq!(priced.overround(), 0.8, epsilon = 1e-9);
        assert_relative_eq!(priced.implied_probabilities().draw, 0.25, epsilon = 1e-9);
    }
}
