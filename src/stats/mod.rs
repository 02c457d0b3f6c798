//! Per-team season records and the read-only season tables they come from.

pub mod csv_file;
pub mod dataset;
pub mod provider;
pub mod transfer;

pub use csv_file::CsvSeasonFile;
pub use dataset::{lookup, ColumnMap, LeagueAverages, SeasonDataset};
pub use provider::SeasonProvider;
pub use transfer::{adjust_for_transfer, Transfer, JOINING_IMPACT, LEAVING_IMPACT};

use serde::{Deserialize, Serialize};

use crate::error::{OddsError, Result};

/// Numeric columns a season table may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MatchesPlayed,
    Wins,
    Draws,
    GoalsFor,
    GoalsAgainst,
    Points,
    GoalDifference,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::MatchesPlayed,
        Field::Wins,
        Field::Draws,
        Field::GoalsFor,
        Field::GoalsAgainst,
        Field::Points,
        Field::GoalDifference,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::MatchesPlayed => "matches_played",
            Field::Wins => "wins",
            Field::Draws => "draws",
            Field::GoalsFor => "goals_for",
            Field::GoalsAgainst => "goals_against",
            Field::Points => "points",
            Field::GoalDifference => "goal_difference",
        }
    }

    /// Columns without which no record can be built.
    pub fn is_required(&self) -> bool {
        matches!(self, Field::MatchesPlayed | Field::Wins | Field::Draws)
    }

    fn index(&self) -> usize {
        Field::ALL.iter().position(|f| f == self).unwrap_or(0)
    }
}

/// One team's record for one season.
///
/// Records are snapshots: adjustments (see [`adjust_for_transfer`]) return a
/// new value instead of mutating the one a dataset handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub matches_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    /// League points; may be negative after sporting sanctions
    pub points: i32,
    pub goal_difference: i32,
}

/// Per-match outcome rates of a single team.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutcomeRates {
    pub win: f64,
    pub draw: f64,
    pub loss: f64,
}

impl EntityRecord {
    /// Build a record from the three required counts. Points default to
    /// `3·W + D`, goals to zero.
    pub fn new(matches_played: u32, wins: u32, draws: u32) -> Result<Self> {
        let record = Self {
            matches_played,
            wins,
            draws,
            goals_for: 0,
            goals_against: 0,
            points: (3 * wins as i64 + draws as i64).min(i32::MAX as i64) as i32,
            goal_difference: 0,
        };
        record.validate()?;
        Ok(record)
    }

    /// Set goals for/against; goal difference follows, saturating at the
    /// `i32` range.
    pub fn with_goals(mut self, goals_for: u32, goals_against: u32) -> Self {
        self.goals_for = goals_for;
        self.goals_against = goals_against;
        self.goal_difference = (goals_for as i64 - goals_against as i64)
            .clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        self
    }

    pub fn with_points(mut self, points: i32) -> Self {
        self.points = points;
        self
    }

    pub fn with_goal_difference(mut self, goal_difference: i32) -> Self {
        self.goal_difference = goal_difference;
        self
    }

    /// `wins + draws ≤ matches_played`
    pub fn validate(&self) -> Result<()> {
        if self.wins as u64 + self.draws as u64 > self.matches_played as u64 {
            return Err(OddsError::InvalidDataset(format!(
                "wins ({}) + draws ({}) exceed matches played ({})",
                self.wins, self.draws, self.matches_played
            )));
        }
        Ok(())
    }

    pub fn losses(&self) -> u32 {
        self.matches_played
            .saturating_sub(self.wins.saturating_add(self.draws))
    }

    /// Win, draw and loss rates per match played.
    pub fn outcome_rates(&self) -> Result<OutcomeRates> {
        let m = self.matches_played_f64()?;
        Ok(OutcomeRates {
            win: self.wins as f64 / m,
            draw: self.draws as f64 / m,
            loss: self.losses() as f64 / m,
        })
    }

    /// Matches played as a divisor; zero is a data-quality error.
    pub(crate) fn matches_played_f64(&self) -> Result<f64> {
        if self.matches_played == 0 {
            return Err(OddsError::DivisionUndefined(
                "team has zero matches played".into(),
            ));
        }
        Ok(self.matches_played as f64)
    }
}
