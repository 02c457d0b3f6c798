use super::{win_ratio, EstimatorConfig, ProbabilityTriple};
use crate::error::Result;
use crate::stats::EntityRecord;

/// Shift a base triple by the configured home/away offsets and renormalize.
///
/// The draw component is left as is before renormalization. An offset that
/// drives a component to zero or below leaves it at `epsilon`.
pub fn adjust(base: &ProbabilityTriple, config: &EstimatorConfig) -> Result<ProbabilityTriple> {
    ProbabilityTriple::new(
        base.home + config.home_advantage,
        base.draw,
        base.away + config.away_advantage,
    )
    .normalized(config.epsilon)
}

/// Win-ratio model with home/away offsets applied on top.
///
/// The offsets shift the raw win-ratio components, so the triple is
/// normalized once, after the shift.
pub fn estimate(
    home: &EntityRecord,
    away: &EntityRecord,
    config: &EstimatorConfig,
) -> Result<ProbabilityTriple> {
    let base = win_ratio::raw_probabilities(home, away)?;
    adjust(&base, config)
}
