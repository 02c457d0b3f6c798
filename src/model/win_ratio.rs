use super::{EstimatorConfig, ProbabilityTriple};
use crate::error::Result;
use crate::stats::EntityRecord;

/// Raw per-team ratios, not yet normalized:
///
/// - home = home wins / home matches
/// - away = away wins / away matches
/// - draw = (home draws + away draws) / (home matches + away matches)
///
/// Zero matches on either side is [`crate::OddsError::DivisionUndefined`].
pub fn raw_probabilities(home: &EntityRecord, away: &EntityRecord) -> Result<ProbabilityTriple> {
    let home_matches = home.matches_played_f64()?;
    let away_matches = away.matches_played_f64()?;

    Ok(ProbabilityTriple::new(
        home.wins as f64 / home_matches,
        (home.draws as f64 + away.draws as f64) / (home_matches + away_matches),
        away.wins as f64 / away_matches,
    ))
}

pub fn estimate(
    home: &EntityRecord,
    away: &EntityRecord,
    config: &EstimatorConfig,
) -> Result<ProbabilityTriple> {
    raw_probabilities(home, away)?.normalized(config.epsilon)
}
