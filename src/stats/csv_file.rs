use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{ColumnMap, SeasonDataset, SeasonProvider};

/// Standings table stored as a CSV file, one row per team.
///
/// The season label is the file stem, e.g. `ligue1-2024-2025`.
#[derive(Debug, Clone)]
pub struct CsvSeasonFile {
    path: PathBuf,
    label: String,
    columns: ColumnMap,
}

impl CsvSeasonFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            label,
            columns: ColumnMap::default(),
        }
    }

    pub fn with_columns(mut self, columns: ColumnMap) -> Self {
        self.columns = columns;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse CSV text from any reader into a season table.
    pub fn read_from<R: Read>(label: &str, reader: R) -> Result<SeasonDataset> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .with_context(|| format!("reading header row of '{}'", label))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record.with_context(|| format!("reading row {} of '{}'", i + 1, label))?;
            if record.iter().all(|c| c.is_empty()) {
                continue;
            }
            rows.push(record.iter().map(|c| c.to_string()).collect());
        }

        Ok(SeasonDataset::new(label, headers, rows))
    }
}

impl SeasonProvider for CsvSeasonFile {
    fn load_season(&self) -> Result<SeasonDataset> {
        let file = std::fs::File::open(&self.path)
            .with_context(|| format!("opening season file {}", self.path.display()))?;
        let dataset = Self::read_from(&self.label, file)?.with_columns(self.columns.clone());
        info!("Loaded season '{}' ({} teams)", self.label, dataset.len());
        Ok(dataset)
    }

    fn name(&self) -> &str {
        &self.label
    }
}
