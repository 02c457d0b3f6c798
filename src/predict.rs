use serde::Serialize;
use tracing::debug;

use crate::error::{OddsError, Result};
use crate::model::{blend::blend_seasons, EstimatorConfig, EstimatorKind, Matchup, ProbabilityTriple};
use crate::odds::{to_odds, OddsTriple};
use crate::stats::{adjust_for_transfer, SeasonDataset};

/// Final probabilities and prices for one fixture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub home: String,
    pub away: String,
    pub model: EstimatorKind,
    /// Season labels used, oldest first
    pub seasons: Vec<String>,
    pub probabilities: ProbabilityTriple,
    pub odds: OddsTriple,
}

/// Build the model input for one season: both records (after any transfer
/// adjustment) and league averages when the model needs them.
fn matchup(
    home: &str,
    away: &str,
    season: &SeasonDataset,
    kind: EstimatorKind,
    config: &EstimatorConfig,
) -> Result<Matchup> {
    let mut home_record = season.lookup(home)?;
    let mut away_record = season.lookup(away)?;
    if let Some(t) = config.home_transfer {
        home_record = adjust_for_transfer(&home_record, t);
    }
    if let Some(t) = config.away_transfer {
        away_record = adjust_for_transfer(&away_record, t);
    }

    let m = Matchup::new(home_record, away_record);
    if kind.needs_league() {
        Ok(m.with_league(season.league_averages()?))
    } else {
        Ok(m)
    }
}

/// Run the full pipeline and keep the intermediate probabilities.
///
/// `seasons` are ordered oldest → newest. Each season is estimated on its own;
/// with more than one, they are folded with `current_season_weight` favouring
/// the newer season at every step.
pub fn forecast(
    home: &str,
    away: &str,
    seasons: &[SeasonDataset],
    kind: EstimatorKind,
    config: &EstimatorConfig,
) -> Result<Prediction> {
    config.validate()?;
    if seasons.is_empty() {
        return Err(OddsError::InvalidDataset("no season data supplied".into()));
    }

    let per_season = seasons
        .iter()
        .map(|season| -> Result<ProbabilityTriple> {
            let m = matchup(home, away, season, kind, config)?;
            let triple = kind.estimate(&m, config)?;
            debug!(season = season.label(), ?triple, "season estimate");
            Ok(triple)
        })
        .collect::<Result<Vec<_>>>()?;

    let probabilities = blend_seasons(&per_season, config.current_season_weight, config.epsilon)?;
    let odds = to_odds(&probabilities, config.margin, config.epsilon)?;
    debug!(home, away, model = %kind, ?probabilities, ?odds, "prediction ready");

    Ok(Prediction {
        home: home.trim().to_string(),
        away: away.trim().to_string(),
        model: kind,
        seasons: seasons.iter().map(|s| s.label().to_string()).collect(),
        probabilities,
        odds,
    })
}

/// Decimal odds for `home` vs `away` under the chosen model.
pub fn predict(
    home: &str,
    away: &str,
    seasons: &[SeasonDataset],
    kind: EstimatorKind,
    config: &EstimatorConfig,
) -> Result<OddsTriple> {
    forecast(home, away, seasons, kind, config).map(|p| p.odds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::win_ratio;
    use crate::stats::Transfer;

    fn season(label: &str, rows: &[&str]) -> SeasonDataset {
        let headers = "Team,M,W,D,GF,GA,PTS,Diff"
            .split(',')
            .map(String::from)
            .collect();
        let rows = rows
            .iter()
            .map(|r| r.split(',').map(String::from).collect())
            .collect();
        SeasonDataset::new(label, headers, rows)
    }

    fn older() -> SeasonDataset {
        season(
            "ligue1-2023-2024",
            &["PSG,34,22,10,81,33,76,48", "Marseille,34,13,11,52,41,50,11"],
        )
    }

    fn recent() -> SeasonDataset {
        season(
            "ligue1-2024-2025",
            &["PSG,34,26,6,92,35,84,57", "Marseille,34,20,5,74,47,65,27"],
        )
    }

    #[test]
    fn single_season_matches_direct_pipeline() {
        let config = EstimatorConfig::default();
        let p = forecast("psg", "marseille", &[recent()], EstimatorKind::WinRatio, &config).unwrap();

        let data = recent();
        let direct = win_ratio::estimate(
            &data.lookup("PSG").unwrap(),
            &data.lookup("Marseille").unwrap(),
            &config,
        )
        .unwrap();
        assert_eq!(p.probabilities, direct);
        assert_eq!(p.odds, to_odds(&direct, 1.0, config.epsilon).unwrap());
        assert_eq!(p.seasons, vec!["ligue1-2024-2025".to_string()]);
    }

    #[test]
    fn every_model_produces_finite_odds() {
        let config = EstimatorConfig::default();
        for kind in EstimatorKind::ALL {
            let odds = predict("PSG", "Marseille", &[older(), recent()], kind, &config).unwrap();
            for o in [odds.home, odds.draw, odds.away] {
                assert!(o.is_finite() && o > 1.0, "{kind}: {o}");
            }
        }
    }

    #[test]
    fn predict_is_idempotent() {
        let config = EstimatorConfig {
            margin: 1.05,
            ..Default::default()
        };
        let seasons = [older(), recent()];
        let a = predict("PSG", "Marseille", &seasons, EstimatorKind::HomeAway, &config).unwrap();
        let b = predict("PSG", "Marseille", &seasons, EstimatorKind::HomeAway, &config).unwrap();
        assert_eq!(a.home.to_bits(), b.home.to_bits());
        assert_eq!(a.draw.to_bits(), b.draw.to_bits());
        assert_eq!(a.away.to_bits(), b.away.to_bits());
    }

    #[test]
    fn errors_propagate_unchanged() {
        let config = EstimatorConfig::default();
        assert!(matches!(
            predict("PSG", "Unknown FC", &[recent()], EstimatorKind::WinRatio, &config),
            Err(OddsError::NotFound { .. })
        ));
        assert!(matches!(
            predict("PSG", "Marseille", &[], EstimatorKind::WinRatio, &config),
            Err(OddsError::InvalidDataset(_))
        ));

        let empty = season("empty", &[]);
        assert!(matches!(
            predict("PSG", "Marseille", &[empty], EstimatorKind::WinRatio, &config),
            Err(OddsError::InvalidDataset(_))
        ));

        let unplayed = season("preseason", &["PSG,0,0,0,0,0,0,0", "Marseille,0,0,0,0,0,0,0"]);
        assert!(matches!(
            predict("PSG", "Marseille", &[unplayed], EstimatorKind::WinRatio, &config),
            Err(OddsError::DivisionUndefined(_))
        ));

        let bad_weight = EstimatorConfig {
            current_season_weight: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            predict("PSG", "Marseille", &[recent()], EstimatorKind::WinRatio, &bad_weight),
            Err(OddsError::Config(_))
        ));
    }

    #[test]
    fn transfers_shift_the_price() {
        let plain = EstimatorConfig::default();
        let signing = EstimatorConfig {
            home_transfer: Some(Transfer::Joining(0.3)),
            away_transfer: Some(Transfer::Leaving(0.2)),
            ..Default::default()
        };
        let a = forecast("Marseille", "PSG", &[recent()], EstimatorKind::WinRatio, &plain).unwrap();
        let b = forecast("Marseille", "PSG", &[recent()], EstimatorKind::WinRatio, &signing).unwrap();
        assert!(b.probabilities.home > a.probabilities.home);
        assert!(b.probabilities.away < a.probabilities.away);
    }

    #[test]
    fn blend_weight_one_uses_recent_season_only() {
        let config = EstimatorConfig {
            current_season_weight: 1.0,
            ..Default::default()
        };
        let both = forecast("PSG", "Marseille", &[older(), recent()], EstimatorKind::Ranking, &config)
            .unwrap();
        let only = forecast("PSG", "Marseille", &[recent()], EstimatorKind::Ranking, &config).unwrap();
        assert_eq!(both.probabilities, only.probabilities);
    }
}
