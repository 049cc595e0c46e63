//! JSON result writer for pairwise, warped-mean, and alignment outputs.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use dtwarp_batch::{DistanceMatrix, WarpedMeanResult};
use dtwarp_core::{AlignmentPath, CostMatrix, DtwDistance};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::IoError;
use crate::domain::{ExperimentName, SequenceId};

/// Writes batch and alignment results to JSON files.
///
/// Creates the output directory on construction if it does not exist.
/// Output files are named `{experiment}_pairwise.json`,
/// `{experiment}_mean.json` and `{experiment}_alignment.json`.
pub struct ResultWriter {
    output_dir: PathBuf,
    experiment: ExperimentName,
}

impl ResultWriter {
    /// Create a new writer targeting the given directory and experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::OutputDirCreate`] if the directory cannot be created.
    #[instrument(skip_all, fields(dir = %output_dir.display(), experiment = %experiment))]
    pub fn new(output_dir: &Path, experiment: ExperimentName) -> Result<Self, IoError> {
        fs::create_dir_all(output_dir).map_err(|e| IoError::OutputDirCreate {
            path: output_dir.to_path_buf(),
            source: e,
        })?;
        debug!("output directory ready");
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            experiment,
        })
    }

    /// Return the path of the artifact with the given suffix.
    #[must_use]
    pub fn artifact_path(&self, suffix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{suffix}.json", self.experiment.as_str()))
    }

    /// Write a pairwise distance matrix to `{experiment}_pairwise.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Serialize`] or [`IoError::WriteFile`] on failure.
    #[instrument(skip_all)]
    pub fn write_pairwise(&self, ids: &[SequenceId], matrix: &DistanceMatrix) -> Result<(), IoError> {
        let artifact = PairwiseArtifact {
            experiment: self.experiment.as_str(),
            n_sequences: matrix.len(),
            ids: ids.iter().map(SequenceId::as_str).collect(),
            distances: matrix.to_square(),
        };
        let path = self.write_json("pairwise", &artifact)?;
        info!(path = %path.display(), "pairwise result written");
        Ok(())
    }

    /// Write a warped mean to `{experiment}_mean.json`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Serialize`] or [`IoError::WriteFile`] on failure.
    #[instrument(skip_all)]
    pub fn write_mean(&self, ids: &[SequenceId], result: &WarpedMeanResult) -> Result<(), IoError> {
        let artifact = MeanArtifact {
            experiment: self.experiment.as_str(),
            n_sequences: result.n_sequences,
            reference_id: ids.get(result.reference_index).map(SequenceId::as_str),
            reference_index: result.reference_index,
            reference_mean_distance: result.reference_mean_distance,
            mean: result.mean.as_ref(),
        };
        let path = self.write_json("mean", &artifact)?;
        info!(path = %path.display(), "warped mean written");
        Ok(())
    }

    /// Write a single alignment to `{experiment}_alignment.json`.
    ///
    /// The cost matrix is included only when supplied.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Serialize`] or [`IoError::WriteFile`] on failure.
    #[instrument(skip_all, fields(a = %a, b = %b))]
    pub fn write_alignment(
        &self,
        a: &SequenceId,
        b: &SequenceId,
        distance: DtwDistance,
        path: &AlignmentPath,
        matrix: Option<&CostMatrix>,
    ) -> Result<(), IoError> {
        let mut ids = BTreeMap::new();
        ids.insert("a", a.as_str());
        ids.insert("b", b.as_str());

        let artifact = AlignmentArtifact {
            experiment: self.experiment.as_str(),
            ids,
            distance: distance.value(),
            path_len: path.len(),
            path: path.steps().iter().map(|s| [s.i, s.j]).collect(),
            cost_matrix: matrix.map(CostMatrix::to_rows),
        };
        let out = self.write_json("alignment", &artifact)?;
        info!(path = %out.display(), "alignment written");
        Ok(())
    }

    fn write_json<T: Serialize>(&self, suffix: &str, artifact: &T) -> Result<PathBuf, IoError> {
        let path = self.artifact_path(suffix);
        let json = serde_json::to_string_pretty(artifact).map_err(|e| IoError::Serialize {
            path: path.clone(),
            source: e,
        })?;
        fs::write(&path, &json).map_err(|e| IoError::WriteFile {
            path: path.clone(),
            source: e,
        })?;
        Ok(path)
    }
}

// --- Shadow structs for JSON serialization ---

#[derive(Serialize)]
struct PairwiseArtifact<'a> {
    experiment: &'a str,
    n_sequences: usize,
    ids: Vec<&'a str>,
    distances: Vec<Vec<f32>>,
}

#[derive(Serialize)]
struct MeanArtifact<'a> {
    experiment: &'a str,
    n_sequences: usize,
    reference_id: Option<&'a str>,
    reference_index: usize,
    reference_mean_distance: f32,
    mean: &'a [f32],
}

#[derive(Serialize)]
struct AlignmentArtifact<'a> {
    experiment: &'a str,
    ids: BTreeMap<&'static str, &'a str>,
    distance: f32,
    path_len: usize,
    path: Vec<[usize; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost_matrix: Option<Vec<Vec<f32>>>,
}
