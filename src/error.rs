use thiserror::Error;

/// Errors raised by the estimation pipeline.
///
/// The core never recovers from these locally; they propagate unchanged to
/// whoever called `predict`/`estimate`/`to_odds`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OddsError {
    /// Entity absent from the dataset after name normalization
    #[error("team '{entity}' not found in season '{season}'")]
    NotFound { entity: String, season: String },

    /// Missing, empty or malformed dataset
    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    /// Zero matches played or another undefined ratio
    #[error("undefined ratio: {0}")]
    DivisionUndefined(String),

    /// Out-of-range configuration parameter
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, OddsError>;
