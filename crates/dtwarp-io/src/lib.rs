//! File I/O, validation, and serialization for the dtwarp pipeline.

mod domain;
mod error;
mod reader;
mod writer;

pub use domain::{Dataset, ExperimentName, SequenceId};
pub use error::IoError;
pub use reader::SequenceReader;
pub use writer::ResultWriter;
