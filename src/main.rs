use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use dtwarp_batch::{WarpedMeanConfig, dtw_distance, pairwise};
use dtwarp_core::{Dtw, Sequence};
use dtwarp_io::{Dataset, ExperimentName, ResultWriter, SequenceReader};

#[derive(Parser)]
#[command(name = "dtwarp")]
#[command(about = "Dynamic Time Warping alignment of 1-D sequences")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,

    /// Number of threads for batch computation (defaults to all cores)
    #[arg(long, global = true)]
    threads: Option<usize>,
}

/// Selects two sequences of a dataset by id.
#[derive(Args, Debug, Clone)]
struct PairArgs {
    /// Path to the input CSV file
    #[arg(long)]
    data: PathBuf,

    /// Id of the first sequence (matrix rows)
    #[arg(long)]
    a: String,

    /// Id of the second sequence (matrix columns)
    #[arg(long)]
    b: String,
}

/// Where result artifacts are written.
#[derive(Args, Debug, Clone)]
struct OutputArgs {
    /// Experiment name for output files (must match [a-zA-Z0-9_-]+)
    #[arg(long)]
    experiment: String,

    /// Output directory for result files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the DTW distance between two sequences (linear memory)
    Distance {
        #[command(flatten)]
        pair: PairArgs,
    },

    /// Compute the cost matrix and optimal alignment path between two sequences
    Align {
        #[command(flatten)]
        pair: PairArgs,

        /// Include the full cost matrix in the output
        #[arg(long, default_value_t = false)]
        with_matrix: bool,

        /// Experiment name; when set, the alignment is also written as an artifact
        #[arg(long)]
        experiment: Option<String>,

        /// Output directory for the artifact
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Compute the pairwise DTW distance matrix of every sequence in a dataset
    Pairwise {
        /// Path to the input CSV file
        #[arg(long)]
        data: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Compute the DTW warped mean of a dataset
    Mean {
        /// Path to the input CSV file
        #[arg(long)]
        data: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

// --- JSON stdout output structs ---

#[derive(Serialize)]
struct DistanceOutput<'a> {
    a: &'a str,
    b: &'a str,
    distance: f32,
}

#[derive(Serialize)]
struct AlignOutput<'a> {
    a: &'a str,
    b: &'a str,
    distance: f32,
    path: Vec<[usize; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost_matrix: Option<Vec<Vec<f32>>>,
}

#[derive(Serialize)]
struct PairwiseOutput {
    experiment: String,
    n_sequences: usize,
    closest_pair: Option<(String, String, f32)>,
}

#[derive(Serialize)]
struct MeanOutput {
    experiment: String,
    n_sequences: usize,
    reference_id: String,
    mean_len: usize,
}

fn read_dataset(path: &Path) -> Result<Dataset> {
    let dataset = SequenceReader::new(path)
        .read()
        .context("failed to read input CSV")?;
    info!(n_sequences = dataset.len(), "dataset loaded");
    Ok(dataset)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    let dtw = Dtw::new();

    match cli.command {
        Command::Distance { pair } => {
            let dataset = read_dataset(&pair.data)?;
            let (_, a) = dataset.find(&pair.a)?;
            let (_, b) = dataset.find(&pair.b)?;

            let distance = dtw.distance(a.as_view(), b.as_view());
            info!(%distance, "distance computed");

            let output = DistanceOutput {
                a: &pair.a,
                b: &pair.b,
                distance: distance.value(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Align {
            pair,
            with_matrix,
            experiment,
            output_dir,
        } => {
            // Validate the name before doing any work.
            let experiment_name = experiment.map(ExperimentName::new).transpose()?;

            let dataset = read_dataset(&pair.data)?;
            let (ia, a) = dataset.find(&pair.a)?;
            let (ib, b) = dataset.find(&pair.b)?;

            let matrix = dtw.cost_matrix(a.as_view(), b.as_view());
            let path = matrix.path().context("path backtracking failed")?;
            let distance = matrix
                .distance()
                .context("cost matrix has no cells")?;
            info!(%distance, path_len = path.len(), "alignment computed");

            if let Some(name) = experiment_name {
                let writer = ResultWriter::new(&output_dir, name)?;
                writer.write_alignment(
                    &dataset.ids[ia],
                    &dataset.ids[ib],
                    distance,
                    &path,
                    with_matrix.then_some(&matrix),
                )?;
            }

            let output = AlignOutput {
                a: &pair.a,
                b: &pair.b,
                distance: distance.value(),
                path: path.steps().iter().map(|s| [s.i, s.j]).collect(),
                cost_matrix: with_matrix.then(|| matrix.to_rows()),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Pairwise { data, output } => {
            let experiment_name = ExperimentName::new(output.experiment.clone())?;
            let dataset = read_dataset(&data)?;

            let views: Vec<_> = dataset.sequences.iter().map(Sequence::as_view).collect();
            let matrix = pairwise(&views, dtw_distance);
            info!(n = matrix.len(), "pairwise matrix computed");

            let writer = ResultWriter::new(&output.output_dir, experiment_name)?;
            writer.write_pairwise(&dataset.ids, &matrix)?;

            let closest_pair = matrix
                .iter()
                .min_by(|x, y| x.2.total_cmp(&y.2))
                .map(|(i, j, d)| {
                    (
                        dataset.ids[i].to_string(),
                        dataset.ids[j].to_string(),
                        d.value(),
                    )
                });

            let summary = PairwiseOutput {
                experiment: output.experiment,
                n_sequences: matrix.len(),
                closest_pair,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Command::Mean { data, output } => {
            let experiment_name = ExperimentName::new(output.experiment.clone())?;
            let dataset = read_dataset(&data)?;

            let views: Vec<_> = dataset.sequences.iter().map(Sequence::as_view).collect();
            let result = WarpedMeanConfig::new()
                .compute(&views)
                .context("warped mean failed")?;
            let reference_id = dataset.ids[result.reference_index].to_string();
            info!(reference = %reference_id, "warped mean computed");

            let writer = ResultWriter::new(&output.output_dir, experiment_name)?;
            writer.write_mean(&dataset.ids, &result)?;

            let summary = MeanOutput {
                experiment: output.experiment,
                n_sequences: result.n_sequences,
                reference_id,
                mean_len: result.mean.len(),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}
