use super::schema::{FlareRecord, SCHEMA_VERSION};
use crate::error::Result;
use ndarray::Array2;
use std::fs;
use std::path::Path;

/// Načítaný dataset - usporiadaná postupnosť pozorovaní.
///
/// Identitou riadku je iba jeho pozícia, po načítaní sa nemení.
#[derive(Debug, Clone, PartialEq)]
pub struct FlareDataset {
    records: Vec<FlareRecord>,
    schema_version: u32,
}

impl FlareDataset {
    pub fn new(records: Vec<FlareRecord>) -> Self {
        Self {
            records,
            schema_version: SCHEMA_VERSION,
        }
    }

    pub fn records(&self) -> &[FlareRecord] {
        &self.records
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn num_samples(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Matica N×3 s počtami erupcií C, M, X
    pub fn targets(&self) -> Array2<f64> {
        let mut y = Array2::zeros((self.records.len(), 3));
        for (i, record) in self.records.iter().enumerate() {
            for (j, count) in record.counts().iter().enumerate() {
                y[[i, j]] = *count as f64;
            }
        }
        y
    }
}

/// Strategy pattern pre načítanie dát z rôznych zdrojov
pub trait DataLoader {
    /// Názov loadera
    fn get_name(&self) -> &str;

    /// Načíta dáta zo stringu
    fn load_from_string(&self, data: &str) -> Result<FlareDataset>;

    /// Načíta dáta zo súboru
    fn load_from_path(&self, path: &Path) -> Result<FlareDataset> {
        let data = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "Súbor načítaný");
        self.load_from_string(&data)
    }

    /// Validuje formát dát pred načítaním
    fn validate_format(&self, data: &str) -> Result<()>;
}
