//! Pre-match 1X2 probabilities and decimal odds from season standings.
//!
//! Pipeline: [`stats`] lookup → [`model`] estimate → [`odds`] conversion,
//! composed by [`predict::predict`].

pub mod error;
pub mod model;
pub mod odds;
pub mod predict;
pub mod stats;

pub use error::{OddsError, Result};
pub use model::{EstimatorConfig, EstimatorKind, Matchup, ProbabilityTriple};
pub use odds::{to_odds, OddsTriple, NO_BET};
pub use predict::{forecast, predict, Prediction};
pub use stats::{lookup, EntityRecord, SeasonDataset};
