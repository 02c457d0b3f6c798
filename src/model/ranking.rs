use super::{EstimatorConfig, ProbabilityTriple};
use crate::error::{OddsError, Result};
use crate::stats::EntityRecord;

/// Points-table model.
///
/// The home side's points are scaled by `ranking_home_bonus`; the two scores
/// split the non-draw mass, and the draw gets a fixed `ranking_draw_share`.
/// Negative point totals count as zero.
pub fn estimate(
    home: &EntityRecord,
    away: &EntityRecord,
    config: &EstimatorConfig,
) -> Result<ProbabilityTriple> {
    let score_home = home.points.max(0) as f64 * config.ranking_home_bonus;
    let score_away = away.points.max(0) as f64;
    let total = score_home + score_away;
    if total <= 0.0 {
        return Err(OddsError::DivisionUndefined(
            "both teams have zero points".into(),
        ));
    }

    let p_draw = config.ranking_draw_share;
    let p_home = score_home / total;
    let p_away = 1.0 - p_home;

    ProbabilityTriple::new(p_home * (1.0 - p_draw), p_draw, p_away * (1.0 - p_draw))
        .normalized(config.epsilon)
}
