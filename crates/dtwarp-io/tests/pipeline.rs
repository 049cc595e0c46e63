//! End-to-end integration tests: CSV -> align/pairwise/mean -> JSON -> deserialize.

use std::fs;
use std::path::{Path, PathBuf};

use dtwarp_batch::{WarpedMeanConfig, dtw_distance, pairwise};
use dtwarp_core::{Dtw, Sequence};
use dtwarp_io::{ExperimentName, ResultWriter, SequenceReader};
use tempfile::TempDir;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn fixture_loads_with_ragged_lengths() {
    let ds = SequenceReader::new(&fixture_path("ragged_6.csv"))
        .read()
        .expect("fixture should parse");
    let lens: Vec<usize> = ds.sequences.iter().map(Sequence::len).collect();
    assert_eq!(lens, vec![8, 6, 10, 6, 7, 9]);
}

#[test]
fn pairwise_round_trip() {
    let ds = SequenceReader::new(&fixture_path("ragged_6.csv")).read().unwrap();
    let views: Vec<_> = ds.sequences.iter().map(Sequence::as_view).collect();
    let matrix = pairwise(&views, dtw_distance);

    let dir = TempDir::new().unwrap();
    let writer = ResultWriter::new(dir.path(), ExperimentName::new("pw_rt".into()).unwrap()).unwrap();
    writer.write_pairwise(&ds.ids, &matrix).unwrap();

    let content = read_json(&dir.path().join("pw_rt_pairwise.json"));
    let ids: Vec<&str> = content["ids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["flat_a", "flat_b", "ramp_a", "ramp_b", "peak_a", "peak_b"]);

    let rows = content["distances"].as_array().unwrap();
    // Shifted peaks warp onto each other exactly.
    assert_eq!(rows[4][5].as_f64().unwrap(), 0.0);
    // Flats are close to each other and far from the ramps.
    let flat = rows[0][1].as_f64().unwrap();
    let flat_ramp = rows[0][2].as_f64().unwrap();
    assert!(flat < 0.2, "flat-flat distance {flat}");
    assert!(flat_ramp > 5.0, "flat-ramp distance {flat_ramp}");
}

#[test]
fn mean_round_trip() {
    let ds = SequenceReader::new(&fixture_path("ragged_6.csv")).read().unwrap();
    let peaks = [ds.find("peak_a").unwrap().1.as_view(), ds.find("peak_b").unwrap().1.as_view()];
    let result = WarpedMeanConfig::new().compute(&peaks).unwrap();

    let dir = TempDir::new().unwrap();
    let writer = ResultWriter::new(dir.path(), ExperimentName::new("mean_rt".into()).unwrap()).unwrap();
    let ids = [ds.ids[4].clone(), ds.ids[5].clone()];
    writer.write_mean(&ids, &result).unwrap();

    let content = read_json(&dir.path().join("mean_rt_mean.json"));
    assert_eq!(content["reference_id"], "peak_a");
    let mean: Vec<f64> = content["mean"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_f64().unwrap())
        .collect();
    // Both peaks land on the reference peak position.
    assert_eq!(mean, vec![0.0, 0.0, 5.0, 0.0, 0.0, 0.0, 0.0]);
}

#[test]
fn alignment_round_trip() {
    let ds = SequenceReader::new(&fixture_path("ragged_6.csv")).read().unwrap();
    let (_, a) = ds.find("ramp_a").unwrap();
    let (_, b) = ds.find("ramp_b").unwrap();

    let matrix = Dtw::new().cost_matrix(a.as_view(), b.as_view());
    let path = matrix.path().unwrap();
    let distance = Dtw::new().distance(a.as_view(), b.as_view());

    let dir = TempDir::new().unwrap();
    let writer = ResultWriter::new(dir.path(), ExperimentName::new("al_rt".into()).unwrap()).unwrap();
    writer
        .write_alignment(&ds.ids[2], &ds.ids[3], distance, &path, Some(&matrix))
        .unwrap();

    let content = read_json(&dir.path().join("al_rt_alignment.json"));
    let steps = content["path"].as_array().unwrap();
    assert_eq!(steps.first().unwrap(), &serde_json::json!([0, 0]));
    assert_eq!(steps.last().unwrap(), &serde_json::json!([9, 5]));
    assert_eq!(content["cost_matrix"].as_array().unwrap().len(), 10);
    let corner = content["cost_matrix"][9][5].as_f64().unwrap();
    assert!((corner - f64::from(distance.value())).abs() < 1e-5);
}
