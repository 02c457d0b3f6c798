use clap::Parser;
use std::path::PathBuf;

use matchodds::stats::Transfer;
use matchodds::{EstimatorConfig, EstimatorKind};

/// Pre-match 1X2 odds from season standings
#[derive(Parser, Debug, Clone)]
#[command(name = "matchodds", version, about)]
pub struct Config {
    /// Home team name (case and surrounding spaces are ignored)
    #[arg(long, env = "MATCHODDS_HOME")]
    pub home: String,

    /// Away team name
    #[arg(long, env = "MATCHODDS_AWAY")]
    pub away: String,

    /// Season standings CSV, repeatable, oldest season first
    #[arg(
        long = "season",
        env = "MATCHODDS_SEASONS",
        value_delimiter = ',',
        required = true
    )]
    pub seasons: Vec<PathBuf>,

    /// Probability model: win-ratio, home-away, attack-defense, ranking, strength, draw-rate
    #[arg(long, env = "MATCHODDS_MODEL", default_value = "win-ratio")]
    pub model: EstimatorKind,

    /// Bookmaker margin multiplier (1.0 = fair odds)
    #[arg(long, env = "MATCHODDS_MARGIN", default_value = "1.0")]
    pub margin: f64,

    /// Weight of the newer season when several are given (0.0–1.0)
    #[arg(long, env = "MATCHODDS_WEIGHT", default_value = "0.6")]
    pub weight: f64,

    /// Replacement for zero and near-zero probabilities (1e-12 to 0.01)
    #[arg(long, env = "MATCHODDS_EPSILON", default_value = "0.000001")]
    pub epsilon: f64,

    /// Offset added to the home-win probability (home-away model)
    #[arg(long, default_value = "0.10", allow_negative_numbers = true)]
    pub home_advantage: f64,

    /// Offset added to the away-win probability (home-away model)
    #[arg(long, default_value = "-0.05", allow_negative_numbers = true)]
    pub away_advantage: f64,

    /// Home multiplier on the force ratio (attack-defense model)
    #[arg(long, default_value = "1.2")]
    pub attack_home_multiplier: f64,

    /// Draw share (attack-defense model)
    #[arg(long, default_value = "0.25")]
    pub draw_share: f64,

    /// Home multiplier on points (ranking model)
    #[arg(long, default_value = "1.1")]
    pub ranking_home_bonus: f64,

    /// Fixed draw probability (ranking model)
    #[arg(long, default_value = "0.25")]
    pub ranking_draw_share: f64,

    /// Goal difference weight (strength model)
    #[arg(long, default_value = "0.3")]
    pub goal_difference_weight: f64,

    /// Minimum draw weight (strength model)
    #[arg(long, default_value = "0.15")]
    pub proximity_draw_floor: f64,

    /// Extra draw weight for evenly matched teams (strength model)
    #[arg(long, default_value = "0.10")]
    pub proximity_draw_span: f64,

    /// Home side signed a key player (optional impact, default 0.3)
    #[arg(long, num_args = 0..=1, default_missing_value = "0.3", conflicts_with = "home_leaving")]
    pub home_joining: Option<f64>,

    /// Home side lost a key player (optional impact, default 0.2)
    #[arg(long, num_args = 0..=1, default_missing_value = "0.2")]
    pub home_leaving: Option<f64>,

    /// Away side signed a key player (optional impact, default 0.3)
    #[arg(long, num_args = 0..=1, default_missing_value = "0.3", conflicts_with = "away_leaving")]
    pub away_joining: Option<f64>,

    /// Away side lost a key player (optional impact, default 0.2)
    #[arg(long, num_args = 0..=1, default_missing_value = "0.2")]
    pub away_leaving: Option<f64>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.seasons.is_empty() {
            anyhow::bail!("at least one --season file is required");
        }
        if self.home.trim().is_empty() || self.away.trim().is_empty() {
            anyhow::bail!("--home and --away must name a team");
        }
        self.estimator_config().validate()?;
        Ok(())
    }

    pub fn estimator_config(&self) -> EstimatorConfig {
        fn transfer(joining: Option<f64>, leaving: Option<f64>) -> Option<Transfer> {
            joining
                .map(Transfer::Joining)
                .or_else(|| leaving.map(Transfer::Leaving))
        }

        EstimatorConfig {
            home_advantage: self.home_advantage,
            away_advantage: self.away_advantage,
            attack_home_multiplier: self.attack_home_multiplier,
            draw_base_share: self.draw_share,
            ranking_home_bonus: self.ranking_home_bonus,
            ranking_draw_share: self.ranking_draw_share,
            goal_difference_weight: self.goal_difference_weight,
            proximity_draw_floor: self.proximity_draw_floor,
            proximity_draw_span: self.proximity_draw_span,
            current_season_weight: self.weight,
            margin: self.margin,
            epsilon: self.epsilon,
            home_transfer: transfer(self.home_joining, self.home_leaving),
            away_transfer: transfer(self.away_joining, self.away_leaving),
        }
    }
}
