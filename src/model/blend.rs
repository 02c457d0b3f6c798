use tracing::debug;

use super::{check_epsilon, ProbabilityTriple};
use crate::error::{OddsError, Result};

pub(crate) fn check_weight(weight: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&weight) {
        return Err(OddsError::Config(format!(
            "season weight must be in [0, 1], got {}",
            weight
        )));
    }
    Ok(())
}

/// Component-wise weighted mean of two seasons' triples.
///
/// `weight` applies to `recent`; `older` gets `1 − weight`. `weight = 1`
/// returns `recent` exactly and `weight = 0` returns `older` exactly; any
/// other mix is renormalized.
pub fn blend(
    recent: &ProbabilityTriple,
    older: &ProbabilityTriple,
    weight: f64,
    epsilon: f64,
) -> Result<ProbabilityTriple> {
    check_weight(weight)?;
    check_epsilon(epsilon)?;
    if weight == 1.0 {
        return Ok(*recent);
    }
    if weight == 0.0 {
        return Ok(*older);
    }
    let mix = |r: f64, o: f64| weight * r + (1.0 - weight) * o;
    let blended = ProbabilityTriple::new(
        mix(recent.home, older.home),
        mix(recent.draw, older.draw),
        mix(recent.away, older.away),
    )
    .normalized(epsilon)?;
    debug!(weight, ?recent, ?older, ?blended, "blended seasons");
    Ok(blended)
}

/// Fold per-season triples ordered oldest → newest into one, each newer
/// season taking `weight` against everything before it.
pub fn blend_seasons(
    seasons: &[ProbabilityTriple],
    weight: f64,
    epsilon: f64,
) -> Result<ProbabilityTriple> {
    check_weight(weight)?;
    let (first, rest) = seasons.split_first().ok_or_else(|| {
        OddsError::InvalidDataset("no season to blend".into())
    })?;
    rest.iter()
        .try_fold(*first, |acc, newer| blend(newer, &acc, weight, epsilon))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recent() -> ProbabilityTriple {
        ProbabilityTriple::new(0.5, 0.3, 0.2)
    }

    fn older() -> ProbabilityTriple {
        ProbabilityTriple::new(0.3, 0.25, 0.45)
    }

    #[test]
    fn full_weight_returns_recent() {
        assert_eq!(blend(&recent(), &older(), 1.0, 1e-6).unwrap(), recent());
    }

    #[test]
    fn zero_weight_returns_older() {
        assert_eq!(blend(&recent(), &older(), 0.0, 1e-6).unwrap(), older());
    }

    #[test]
    fn full_weight_keeps_epsilon_sized_components() {
        let lifted = ProbabilityTriple::new(0.0, 0.5, 0.5).normalized(1e-6).unwrap();
        assert_eq!(blend(&lifted, &older(), 1.0, 1e-6).unwrap(), lifted);
        assert_eq!(blend(&recent(), &lifted, 0.0, 1e-6).unwrap(), lifted);
    }

    #[test]
    fn partial_weight_lies_between() {
        let (r, o) = (recent(), older());
        let t = blend(&r, &o, 0.6, 1e-6).unwrap();
        for (x, lo, hi) in [
            (t.home, o.home, r.home),
            (t.draw, o.draw, r.draw),
            (t.away, r.away, o.away),
        ] {
            assert!(lo < x && x < hi, "{lo} < {x} < {hi}");
        }
        assert!(t.is_normalized());
    }

    #[test]
    fn weight_out_of_range_is_config_error() {
        for w in [-0.1, 1.1, f64::NAN] {
            assert!(matches!(
                blend(&recent(), &older(), w, 1e-6),
                Err(OddsError::Config(_))
            ));
        }
    }

    #[test]
    fn seasons_fold_oldest_first() {
        let (r, o) = (recent(), older());
        let single = blend_seasons(&[o], 0.6, 1e-6).unwrap();
        assert_eq!(single, o);

        let pair = blend_seasons(&[o, r], 0.6, 1e-6).unwrap();
        assert_eq!(pair, blend(&r, &o, 0.6, 1e-6).unwrap());

        assert!(matches!(
            blend_seasons(&[], 0.6, 1e-6),
            Err(OddsError::InvalidDataset(_))
        ));
    }
}
