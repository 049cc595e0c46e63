//! CSV sequence reader with full input validation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use dtwarp_core::Sequence;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::{Dataset, SequenceId};

/// Reads sequences from a CSV file.
///
/// Expected CSV format:
/// - Header row required (first column is the id, remaining are positional samples)
/// - `id,t0,t1,...,tn`
/// - One row per sequence. Rows may be shorter than the header; trailing
///   empty cells are ignored, so sequences of different lengths can share a file.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::FileNotFound`] | File doesn't exist or is unreadable |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::EmptyDataset`] | Zero data rows after header |
/// | [`IoError::EmptyRow`] | Row has an id but no samples |
/// | [`IoError::NonFiniteValue`] | Cell is NaN, Inf, empty, or unparseable |
/// | [`IoError::DuplicateId`] | Same id appears twice |
pub struct SequenceReader {
    path: PathBuf,
}

impl SequenceReader {
    /// Create a new reader for the given CSV file path.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Read and validate the CSV file, returning a [`Dataset`].
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn read(&self) -> Result<Dataset, IoError> {
        let file = std::fs::File::open(&self.path).map_err(|e| IoError::FileNotFound {
            path: self.path.clone(),
            source: e,
        })?;

        // flexible(true): ragged rows are expected.
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let header = rdr.headers().map_err(|e| self.csv_error(e))?;
        debug!(header_cols = header.len(), "read CSV header");

        let mut ids = Vec::new();
        let mut sequences = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for (row_index, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| self.csv_error(e))?;

            let id = record.get(0).unwrap_or("").to_string();
            if let Some(&first_row) = seen.get(&id) {
                return Err(IoError::DuplicateId {
                    path: self.path.clone(),
                    id,
                    first_row,
                    second_row: row_index,
                });
            }
            seen.insert(id.clone(), row_index);

            let cells: Vec<&str> = record.iter().skip(1).collect();
            let used = cells.iter().rposition(|c| !c.is_empty()).map_or(0, |p| p + 1);
            if used == 0 {
                return Err(IoError::EmptyRow {
                    path: self.path.clone(),
                    row_index,
                    id,
                });
            }

            let mut values = Vec::with_capacity(used);
            for (col_index, raw) in cells[..used].iter().enumerate() {
                let value = raw
                    .parse::<f32>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| IoError::NonFiniteValue {
                        path: self.path.clone(),
                        row_index,
                        col_index,
                        raw: raw.to_string(),
                    })?;
                values.push(value);
            }

            // Non-empty and finite were checked above.
            let sequence = Sequence::new(values).map_err(|_| IoError::EmptyRow {
                path: self.path.clone(),
                row_index,
                id: id.clone(),
            })?;

            ids.push(SequenceId::new(id));
            sequences.push(sequence);
        }

        if ids.is_empty() {
            return Err(IoError::EmptyDataset {
                path: self.path.clone(),
            });
        }

        info!(
            n_sequences = ids.len(),
            max_len = sequences.iter().map(Sequence::len).max().unwrap_or(0),
            "dataset loaded"
        );

        Ok(Dataset { ids, sequences })
    }

    fn csv_error(&self, e: csv::Error) -> IoError {
        IoError::CsvParse {
            path: self.path.clone(),
            offset: e.position().map_or(0, |p| p.byte()),
            source: e,
        }
    }
}
