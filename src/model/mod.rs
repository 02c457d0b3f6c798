//! Pre-match 1X2 probability models.
//!
//! Every model maps the home and away team's season records to a
//! [`ProbabilityTriple`] that sums to one with all components strictly
//! positive. Models differ mainly in how they price the draw:
//!
//! - **win-ratio**: draw share of both teams' matches combined
//! - **home-away**: win-ratio shifted by additive home/away offsets
//! - **attack-defense**: goals-based force ratio, draw as a fixed share
//! - **ranking**: points ratio with a home bonus, draw fixed
//! - **strength**: points + goal difference, draw rises as teams get closer
//! - **draw-rate**: each team's own win rate, draw as the mean draw rate
//!
//! Seasons are combined with [`blend::blend`].

pub mod attack_defense;
pub mod blend;
pub mod draw_rate;
pub mod home_away;
pub mod ranking;
pub mod strength;
pub mod win_ratio;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::error::{OddsError, Result};
use crate::stats::{EntityRecord, LeagueAverages, Transfer};

/// Maximum distance of a triple's sum from 1.0 for it to count as normalized.
pub const SUM_TOLERANCE: f64 = 1e-9;

/// A sum this close to 1.0 is left untouched by [`ProbabilityTriple::normalized`].
const EXACT_SUM_TOLERANCE: f64 = 1e-12;

/// Smallest accepted epsilon; keeps `1 / epsilon` far from overflow.
pub const MIN_EPSILON: f64 = 1e-12;

/// Largest accepted epsilon.
pub const MAX_EPSILON: f64 = 0.01;

/// Home win / draw / away win probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityTriple {
    pub home: f64,
    pub draw: f64,
    pub away: f64,
}

impl ProbabilityTriple {
    pub const fn new(home: f64, draw: f64, away: f64) -> Self {
        Self { home, draw, away }
    }

    pub fn sum(&self) -> f64 {
        self.home + self.draw + self.away
    }

    /// True when all components are finite, strictly positive and sum to 1.
    pub fn is_normalized(&self) -> bool {
        [self.home, self.draw, self.away]
            .iter()
            .all(|p| p.is_finite() && *p > 0.0)
            && (self.sum() - 1.0).abs() <= SUM_TOLERANCE
    }

    /// Replace near-zero (below `epsilon`), negative or non-finite components
    /// with `epsilon`, then scale so the components sum to one.
    ///
    /// A triple that already sums to one within rounding noise is returned
    /// bit-for-bit unchanged.
    pub fn normalized(self, epsilon: f64) -> Result<Self> {
        check_epsilon(epsilon)?;
        let fix = |name: &str, p: f64| -> f64 {
            if p.is_finite() && p >= epsilon {
                p
            } else {
                warn!("{} probability {} replaced by epsilon {}", name, p, epsilon);
                epsilon
            }
        };
        let t = Self::new(
            fix("home", self.home),
            fix("draw", self.draw),
            fix("away", self.away),
        );

        let total = t.sum();
        if (total - 1.0).abs() <= EXACT_SUM_TOLERANCE {
            return Ok(t);
        }
        Ok(Self::new(t.home / total, t.draw / total, t.away / total))
    }
}

pub(crate) fn check_epsilon(epsilon: f64) -> Result<()> {
    if !(epsilon.is_finite() && (MIN_EPSILON..=MAX_EPSILON).contains(&epsilon)) {
        return Err(OddsError::Config(format!(
            "epsilon must be in [{}, {}], got {}",
            MIN_EPSILON, MAX_EPSILON, epsilon
        )));
    }
    Ok(())
}

/// Tuning knobs shared by all models. Immutable per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Added to the home-win probability by the home-away model
    pub home_advantage: f64,
    /// Added to the away-win probability by the home-away model
    pub away_advantage: f64,
    /// Home multiplier on the attack-defense force ratio
    pub attack_home_multiplier: f64,
    /// Draw share of the attack-defense model
    pub draw_base_share: f64,
    /// Home multiplier on points in the ranking model
    pub ranking_home_bonus: f64,
    /// Fixed draw probability of the ranking model
    pub ranking_draw_share: f64,
    /// Goal difference weight in the strength model
    pub goal_difference_weight: f64,
    /// Minimum draw weight of the strength model
    pub proximity_draw_floor: f64,
    /// Extra draw weight of the strength model for evenly matched teams
    pub proximity_draw_span: f64,
    /// Weight of the more recent season when blending
    pub current_season_weight: f64,
    /// Multiplicative bookmaker overhead on odds
    pub margin: f64,
    /// Stand-in for zero probabilities
    pub epsilon: f64,
    pub home_transfer: Option<Transfer>,
    pub away_transfer: Option<Transfer>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            home_advantage: 0.10,
            away_advantage: -0.05,
            attack_home_multiplier: 1.2,
            draw_base_share: 0.25,
            ranking_home_bonus: 1.1,
            ranking_draw_share: 0.25,
            goal_difference_weight: 0.3,
            proximity_draw_floor: 0.15,
            proximity_draw_span: 0.10,
            current_season_weight: 0.6,
            margin: 1.0,
            epsilon: 1e-6,
            home_transfer: None,
            away_transfer: None,
        }
    }
}

impl EstimatorConfig {
    pub fn validate(&self) -> Result<()> {
        fn finite(name: &str, v: f64) -> Result<()> {
            if !v.is_finite() {
                return Err(OddsError::Config(format!("{} must be finite, got {}", name, v)));
            }
            Ok(())
        }
        fn share(name: &str, v: f64) -> Result<()> {
            finite(name, v)?;
            if !(0.0..1.0).contains(&v) {
                return Err(OddsError::Config(format!("{} must be in [0, 1), got {}", name, v)));
            }
            Ok(())
        }
        fn positive(name: &str, v: f64) -> Result<()> {
            finite(name, v)?;
            if v <= 0.0 {
                return Err(OddsError::Config(format!("{} must be positive, got {}", name, v)));
            }
            Ok(())
        }

        finite("home_advantage", self.home_advantage)?;
        finite("away_advantage", self.away_advantage)?;
        positive("attack_home_multiplier", self.attack_home_multiplier)?;
        share("draw_base_share", self.draw_base_share)?;
        positive("ranking_home_bonus", self.ranking_home_bonus)?;
        share("ranking_draw_share", self.ranking_draw_share)?;
        finite("goal_difference_weight", self.goal_difference_weight)?;
        share("proximity_draw_floor", self.proximity_draw_floor)?;
        share("proximity_draw_span", self.proximity_draw_span)?;
        share(
            "proximity_draw_floor + proximity_draw_span",
            self.proximity_draw_floor + self.proximity_draw_span,
        )?;
        blend::check_weight(self.current_season_weight)?;
        crate::odds::check_margin(self.margin)?;
        check_epsilon(self.epsilon)?;
        for (side, transfer) in [("home", self.home_transfer), ("away", self.away_transfer)] {
            if let Some(t) = transfer {
                let impact = t.impact();
                if !(impact.is_finite() && (0.0..=1.0).contains(&impact)) {
                    return Err(OddsError::Config(format!(
                        "{} transfer impact must be in [0, 1], got {}",
                        side, impact
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The two records a model compares, plus league context when available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matchup {
    pub home: EntityRecord,
    pub away: EntityRecord,
    pub league: Option<LeagueAverages>,
}

impl Matchup {
    pub fn new(home: EntityRecord, away: EntityRecord) -> Self {
        Self {
            home,
            away,
            league: None,
        }
    }

    pub fn with_league(mut self, league: LeagueAverages) -> Self {
        self.league = Some(league);
        self
    }
}

/// Model selector, chosen explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimatorKind {
    WinRatio,
    HomeAway,
    AttackDefense,
    Ranking,
    Strength,
    DrawRate,
}

impl EstimatorKind {
    pub const ALL: [EstimatorKind; 6] = [
        EstimatorKind::WinRatio,
        EstimatorKind::HomeAway,
        EstimatorKind::AttackDefense,
        EstimatorKind::Ranking,
        EstimatorKind::Strength,
        EstimatorKind::DrawRate,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EstimatorKind::WinRatio => "win-ratio",
            EstimatorKind::HomeAway => "home-away",
            EstimatorKind::AttackDefense => "attack-defense",
            EstimatorKind::Ranking => "ranking",
            EstimatorKind::Strength => "strength",
            EstimatorKind::DrawRate => "draw-rate",
        }
    }

    /// Whether the model needs league-wide averages in the [`Matchup`].
    pub fn needs_league(&self) -> bool {
        matches!(self, EstimatorKind::AttackDefense)
    }

    /// Run the selected model. Output is normalized with all components > 0.
    pub fn estimate(&self, matchup: &Matchup, config: &EstimatorConfig) -> Result<ProbabilityTriple> {
        config.validate()?;
        let (home, away) = (&matchup.home, &matchup.away);
        let triple = match self {
            EstimatorKind::WinRatio => win_ratio::estimate(home, away, config)?,
            EstimatorKind::HomeAway => home_away::estimate(home, away, config)?,
            EstimatorKind::AttackDefense => {
                let league = matchup.league.ok_or_else(|| {
                    OddsError::InvalidDataset(
                        "attack-defense model needs league goal averages".into(),
                    )
                })?;
                attack_defense::estimate(home, away, &league, config)?
            }
            EstimatorKind::Ranking => ranking::estimate(home, away, config)?,
            EstimatorKind::Strength => strength::estimate(home, away, config)?,
            EstimatorKind::DrawRate => draw_rate::estimate(home, away, config)?,
        };
        debug!(model = self.name(), ?triple, "estimated probabilities");
        Ok(triple)
    }
}

impl fmt::Display for EstimatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EstimatorKind {
    type Err = OddsError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        EstimatorKind::ALL
            .into_iter()
            .find(|k| k.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = EstimatorKind::ALL.iter().map(|k| k.name()).collect();
                OddsError::Config(format!(
                    "unknown model '{}' (expected one of {})",
                    s.trim(),
                    names.join(", ")
                ))
            })
    }
}
