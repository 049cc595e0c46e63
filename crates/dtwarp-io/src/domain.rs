//! Domain types for dtwarp-io.

use dtwarp_core::Sequence;

use crate::IoError;

/// A sequence identifier parsed from the first column of the input CSV.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequenceId(String);

impl SequenceId {
    pub(crate) fn new(id: String) -> Self {
        Self(id)
    }

    /// Return the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SequenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated experiment name for output file naming.
///
/// Must match `[a-zA-Z0-9_-]+`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentName(String);

impl ExperimentName {
    /// Parse and validate an experiment name.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidExperimentName`] if the name is empty or
    /// contains characters outside `[a-zA-Z0-9_-]`.
    pub fn new(name: String) -> Result<Self, IoError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(IoError::InvalidExperimentName { name });
        }
        Ok(Self(name))
    }

    /// Return the experiment name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ExperimentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequences with their identifiers.
///
/// Produced by [`SequenceReader`](crate::SequenceReader). `ids[i]`
/// corresponds to `sequences[i]`.
#[derive(Debug)]
pub struct Dataset {
    /// Sequence identifiers in CSV row order.
    pub ids: Vec<SequenceId>,
    /// Validated sequences in the same order as `ids`.
    pub sequences: Vec<Sequence>,
}

impl Dataset {
    /// Return the number of sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Return true if the dataset holds no sequences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Look up a sequence by id, returning its index and the sequence.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnknownId`] if no row carries `id`.
    pub fn find(&self, id: &str) -> Result<(usize, &Sequence), IoError> {
        self.ids
            .iter()
            .position(|s| s.as_str() == id)
            .map(|i| (i, &self.sequences[i]))
            .ok_or_else(|| IoError::UnknownId { id: id.to_string() })
    }
}
