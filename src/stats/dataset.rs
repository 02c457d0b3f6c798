use serde::Serialize;
use tracing::{debug, warn};

use super::{EntityRecord, Field};
use crate::error::{OddsError, Result};

/// Header names accepted for each column, matched case-insensitively.
///
/// The default covers both standings layouts seen in the wild:
/// `Team,M,W,D,GF,GA,PTS,Diff` and `Equipes,J,G,N,BP,BC,PTS,Diff`.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    entity: Vec<String>,
    fields: [Vec<String>; 7],
}

impl Default for ColumnMap {
    fn default() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }
        Self {
            entity: names(&["team", "equipes", "equipe", "club", "squad"]),
            fields: [
                names(&["m", "mp", "j", "matches", "matches_played", "played"]),
                names(&["w", "g", "wins"]),
                names(&["d", "n", "draws"]),
                names(&["gf", "bp", "goals_for", "buts_pour"]),
                names(&["ga", "bc", "goals_against", "buts_contre"]),
                names(&["pts", "points"]),
                names(&["diff", "gd", "+/-", "goal_difference"]),
            ],
        }
    }
}

impl ColumnMap {
    /// Accept an extra header name for the team-name column.
    pub fn entity_alias(mut self, header: &str) -> Self {
        self.entity.push(header.trim().to_lowercase());
        self
    }

    /// Accept an extra header name for a numeric column.
    pub fn alias(mut self, field: Field, header: &str) -> Self {
        self.fields[field.index()].push(header.trim().to_lowercase());
        self
    }

    fn find(aliases: &[String], headers: &[String]) -> Option<usize> {
        headers
            .iter()
            .position(|h| aliases.iter().any(|a| a == &h.trim().to_lowercase()))
    }

    fn resolve(&self, headers: &[String]) -> Result<ResolvedColumns> {
        let entity = Self::find(&self.entity, headers).ok_or_else(|| {
            OddsError::InvalidDataset(format!(
                "missing team-name column (expected one of {:?})",
                self.entity
            ))
        })?;
        let mut fields = [None; 7];
        for field in Field::ALL {
            let idx = Self::find(&self.fields[field.index()], headers);
            if idx.is_none() && field.is_required() {
                return Err(OddsError::InvalidDataset(format!(
                    "missing {} column (expected one of {:?})",
                    field.as_str(),
                    self.fields[field.index()]
                )));
            }
            fields[field.index()] = idx;
        }
        Ok(ResolvedColumns { entity, fields })
    }
}

#[derive(Debug, Clone, Copy)]
struct ResolvedColumns {
    entity: usize,
    fields: [Option<usize>; 7],
}

impl ResolvedColumns {
    fn has(&self, field: Field) -> bool {
        self.fields[field.index()].is_some()
    }
}

/// League-wide goals per match, used to normalise attack and defence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeagueAverages {
    pub attack: f64,
    pub defense: f64,
    pub teams: usize,
}

/// A read-only standings table for one season.
///
/// Cells are kept as text; parsing into [`EntityRecord`] happens on lookup so
/// that one malformed row only fails requests that touch it. League averages
/// skip such rows.
#[derive(Debug, Clone)]
pub struct SeasonDataset {
    label: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    columns: ColumnMap,
}

impl SeasonDataset {
    pub fn new(label: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            label: label.into(),
            headers,
            rows,
            columns: ColumnMap::default(),
        }
    }

    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn resolved(&self) -> Result<ResolvedColumns> {
        if self.headers.is_empty() || self.rows.is_empty() {
            return Err(OddsError::InvalidDataset(format!(
                "season '{}' has no rows",
                self.label
            )));
        }
        self.columns.resolve(&self.headers)
    }

    /// Whether the table carries a column for `field`.
    pub fn has_field(&self, field: Field) -> bool {
        self.columns
            .resolve(&self.headers)
            .map(|c| c.has(field))
            .unwrap_or(false)
    }

    /// Team names as written in the table, trimmed.
    pub fn entity_names(&self) -> Result<Vec<&str>> {
        let cols = self.resolved()?;
        Ok(self
            .rows
            .iter()
            .filter_map(|row| row.get(cols.entity).map(|s| s.trim()))
            .collect())
    }

    /// Find a team's record. Matching ignores case and surrounding whitespace.
    pub fn lookup(&self, entity: &str) -> Result<EntityRecord> {
        let cols = self.resolved()?;
        let wanted = normalize_name(entity);
        let row = self
            .rows
            .iter()
            .find(|row| {
                row.get(cols.entity)
                    .map(|name| normalize_name(name) == wanted)
                    .unwrap_or(false)
            })
            .ok_or_else(|| OddsError::NotFound {
                entity: entity.trim().to_string(),
                season: self.label.clone(),
            })?;
        let record = self.parse_row(&cols, row)?;
        debug!(season = %self.label, team = %entity.trim(), ?record, "resolved team record");
        Ok(record)
    }

    /// Column-name-agnostic accessor for a single numeric value.
    pub fn get(&self, entity: &str, field: Field) -> Result<f64> {
        let record = self.lookup(entity)?;
        Ok(match field {
            Field::MatchesPlayed => record.matches_played as f64,
            Field::Wins => record.wins as f64,
            Field::Draws => record.draws as f64,
            Field::GoalsFor => record.goals_for as f64,
            Field::GoalsAgainst => record.goals_against as f64,
            Field::Points => record.points as f64,
            Field::GoalDifference => record.goal_difference as f64,
        })
    }

    /// Mean goals scored and conceded per match across all teams that have
    /// played at least once. Rows that fail to parse are logged and skipped.
    pub fn league_averages(&self) -> Result<LeagueAverages> {
        let cols = self.resolved()?;
        for field in [Field::GoalsFor, Field::GoalsAgainst] {
            if !cols.has(field) {
                return Err(OddsError::InvalidDataset(format!(
                    "season '{}' has no {} column",
                    self.label,
                    field.as_str()
                )));
            }
        }

        let mut attack = 0.0;
        let mut defense = 0.0;
        let mut teams = 0usize;
        for row in &self.rows {
            let r = match self.parse_row(&cols, row) {
                Ok(r) => r,
                Err(e) => {
                    warn!(season = %self.label, error = %e, "row left out of league averages");
                    continue;
                }
            };
            if r.matches_played == 0 {
                continue;
            }
            let m = r.matches_played as f64;
            attack += r.goals_for as f64 / m;
            defense += r.goals_against as f64 / m;
            teams += 1;
        }
        if teams == 0 {
            return Err(OddsError::DivisionUndefined(format!(
                "season '{}' has no team with matches played",
                self.label
            )));
        }
        Ok(LeagueAverages {
            attack: attack / teams as f64,
            defense: defense / teams as f64,
            teams,
        })
    }

    fn parse_row(&self, cols: &ResolvedColumns, row: &[String]) -> Result<EntityRecord> {
        let name = row.get(cols.entity).map(|s| s.trim()).unwrap_or_default();
        let cell = |field: Field| -> Result<Option<f64>> {
            let Some(idx) = cols.fields[field.index()] else {
                return Ok(None);
            };
            let Some(raw) = row.get(idx).map(|s| s.trim()).filter(|s| !s.is_empty()) else {
                return Ok(None);
            };
            let value: f64 = raw.parse().map_err(|_| {
                OddsError::InvalidDataset(format!(
                    "{}: {} value '{}' is not a number",
                    name,
                    field.as_str(),
                    raw
                ))
            })?;
            if !value.is_finite() || value.fract() != 0.0 {
                return Err(OddsError::InvalidDataset(format!(
                    "{}: {} value '{}' is not an integer",
                    name,
                    field.as_str(),
                    raw
                )));
            }
            Ok(Some(value))
        };
        let count = |field: Field| -> Result<Option<u32>> {
            match cell(field)? {
                Some(v) if v < 0.0 || v > u32::MAX as f64 => Err(OddsError::InvalidDataset(
                    format!("{}: {} must be a non-negative count", name, field.as_str()),
                )),
                Some(v) => Ok(Some(v as u32)),
                None => Ok(None),
            }
        };
        let required = |field: Field| -> Result<u32> {
            count(field)?.ok_or_else(|| {
                OddsError::InvalidDataset(format!("{}: missing {}", name, field.as_str()))
            })
        };

        let mut record = EntityRecord::new(
            required(Field::MatchesPlayed)?,
            required(Field::Wins)?,
            required(Field::Draws)?,
        )
        .map_err(|e| match e {
            OddsError::InvalidDataset(msg) => OddsError::InvalidDataset(format!("{}: {}", name, msg)),
            other => other,
        })?;

        let signed = |field: Field| -> Result<Option<i32>> {
            match cell(field)? {
                Some(v) if v < i32::MIN as f64 || v > i32::MAX as f64 => {
                    Err(OddsError::InvalidDataset(format!(
                        "{}: {} value {} is out of range",
                        name,
                        field.as_str(),
                        v
                    )))
                }
                Some(v) => Ok(Some(v as i32)),
                None => Ok(None),
            }
        };

        // A missing goal column counts as zero; the other one is still used.
        let goals_for = count(Field::GoalsFor)?;
        let goals_against = count(Field::GoalsAgainst)?;
        if goals_for.is_some() || goals_against.is_some() {
            record = record.with_goals(goals_for.unwrap_or(0), goals_against.unwrap_or(0));
        }
        if let Some(pts) = signed(Field::Points)? {
            record = record.with_points(pts);
        }
        if let Some(diff) = signed(Field::GoalDifference)? {
            record = record.with_goal_difference(diff);
        }
        Ok(record)
    }
}

/// Spec-level entry point: `lookup(entity_name, dataset)`.
pub fn lookup(entity: &str, dataset: &SeasonDataset) -> Result<EntityRecord> {
    dataset.lookup(entity)
}

fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
