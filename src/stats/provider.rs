use anyhow::Result;

use super::SeasonDataset;

/// Trait that every season-table source must implement.
pub trait SeasonProvider: Send + Sync {
    /// Load the full standings table for one season.
    fn load_season(&self) -> Result<SeasonDataset>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
