//! CSV-backed sensor reading sources.
//!
//! Each specialist owns one source. Rows are loaded once at construction
//! and served in a cycle, simulating an endless sensor feed over a finite
//! fixture file.

use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use vigil_common::{Result, VigilError};

#[derive(Debug)]
pub struct ReadingSource<T> {
    rows: Vec<T>,
    cursor: AtomicUsize,
    origin: String,
}

impl<T> ReadingSource<T>
where
    T: DeserializeOwned + Clone,
{
    /// Load all readings from a CSV file with a header row.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            VigilError::DataSource(format!("failed to open {}: {e}", path.display()))
        })?;

        let rows: Vec<T> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| {
                VigilError::DataSource(format!("failed to parse {}: {e}", path.display()))
            })?;

        if rows.is_empty() {
            return Err(VigilError::DataSource(format!(
                "{} contains no readings",
                path.display()
            )));
        }

        Ok(Self {
            rows,
            cursor: AtomicUsize::new(0),
            origin: path.display().to_string(),
        })
    }

    /// Build a source from in-memory rows.
    pub fn from_rows(rows: Vec<T>) -> Self {
        Self {
            rows,
            cursor: AtomicUsize::new(0),
            origin: "<memory>".into(),
        }
    }

    /// Pull the next reading, wrapping around at the end of the fixture.
    pub fn next_reading(&self) -> Result<T> {
        if self.rows.is_empty() {
            return Err(VigilError::DataSource(format!(
                "{} has no readings available",
                self.origin
            )));
        }
        let idx = self.cursor.fetch_add(1, Ordering::SeqCst) % self.rows.len();
        Ok(self.rows[idx].clone())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
