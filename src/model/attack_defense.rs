//! Goals-based force model.
//!
//! Attack = goals scored per match over the league average, defence = goals
//! conceded per match over the league average. The home side's chance grows
//! with its attack against the visitor's defence and vice versa.

use super::{EstimatorConfig, ProbabilityTriple};
use crate::error::{OddsError, Result};
use crate::stats::{EntityRecord, LeagueAverages};

/// Attack and defence ratings relative to the league (1.0 = average).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forces {
    pub attack: f64,
    pub defense: f64,
}

pub fn forces(record: &EntityRecord, league: &LeagueAverages) -> Result<Forces> {
    if !(league.attack > 0.0 && league.defense > 0.0) {
        return Err(OddsError::DivisionUndefined(format!(
            "league goal averages must be positive (attack {}, defense {})",
            league.attack, league.defense
        )));
    }
    let m = record.matches_played_f64()?;
    Ok(Forces {
        attack: (record.goals_for as f64 / m) / league.attack,
        defense: (record.goals_against as f64 / m) / league.defense,
    })
}

pub fn estimate(
    home: &EntityRecord,
    away: &EntityRecord,
    league: &LeagueAverages,
    config: &EstimatorConfig,
) -> Result<ProbabilityTriple> {
    let h = forces(home, league)?;
    let a = forces(away, league)?;
    if h.defense <= 0.0 || a.defense <= 0.0 {
        return Err(OddsError::DivisionUndefined(
            "a team with no goals conceded has no defence ratio".into(),
        ));
    }

    let score_home = h.attack / a.defense * config.attack_home_multiplier;
    let score_away = a.attack / h.defense;
    let total = score_home + score_away;
    if total <= 0.0 {
        return Err(OddsError::DivisionUndefined(
            "neither team has scored a goal".into(),
        ));
    }

    let p_home = score_home / total;
    let p_away = score_away / total;
    let p_draw = config.draw_base_share * (p_home + p_away);

    ProbabilityTriple::new(p_home, p_draw, p_away).normalized(config.epsilon)
}
