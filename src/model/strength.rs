use super::{EstimatorConfig, ProbabilityTriple};
use crate::error::{OddsError, Result};
use crate::stats::EntityRecord;

/// Table strength: points plus weighted goal difference, floored at zero.
pub fn strength(record: &EntityRecord, goal_difference_weight: f64) -> f64 {
    (record.points as f64 + record.goal_difference as f64 * goal_difference_weight).max(0.0)
}

/// Strength-share model with a proximity draw: the closer the two teams'
/// shares, the heavier the draw weight, from `proximity_draw_floor` for a
/// total mismatch up to `floor + span` for identical strengths.
pub fn estimate(
    home: &EntityRecord,
    away: &EntityRecord,
    config: &EstimatorConfig,
) -> Result<ProbabilityTriple> {
    let sa = strength(home, config.goal_difference_weight);
    let sb = strength(away, config.goal_difference_weight);
    let total = sa + sb;
    if total <= 0.0 {
        return Err(OddsError::DivisionUndefined(
            "both teams have zero strength".into(),
        ));
    }

    let pa = sa / total;
    let pb = sb / total;
    let p_draw = config.proximity_draw_floor + config.proximity_draw_span * (1.0 - (pa - pb).abs());

    ProbabilityTriple::new(pa, p_draw, pb).normalized(config.epsilon)
}
