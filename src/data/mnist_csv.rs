//! Reader for the MNIST CSV layout.
//!
//! One record per line: `label,p0,p1,...,pN` with the label a class index
//! and each pixel an integer-valued intensity in `[0, 255]`. Pixels are
//! scaled with [`scale_pixel`] and the label becomes a `0.01 / 0.99`
//! one-hot target. A first line with no numeric cell at all is taken to be
//! a header and skipped; blank lines are ignored.

use tracing::{debug, warn};

use crate::data::sample::{scale_pixel, Sample};
use crate::error::{NetworkError, Result};

/// Parses a single record. `line_no` is 1-based and only used in errors.
pub fn parse_record(line: &str, line_no: usize, n_classes: usize) -> Result<Sample> {
    let mut cells = line.trim().split(',').map(str::trim);

    let label_cell = cells.next().unwrap_or("");
    let label: usize = label_cell.parse().map_err(|_| NetworkError::Dataset {
        line: line_no,
        reason: format!("label {label_cell:?} is not a class index"),
    })?;
    if label >= n_classes {
        return Err(NetworkError::Dataset {
            line: line_no,
            reason: format!("label {label} out of range for {n_classes} classes"),
        });
    }

    let input = cells
        .map(|cell| {
            let raw: f64 = cell.parse().map_err(|_| NetworkError::Dataset {
                line: line_no,
                reason: format!("pixel {cell:?} is not numeric"),
            })?;
            if !(0.0..=255.0).contains(&raw) {
                return Err(NetworkError::Dataset {
                    line: line_no,
                    reason: format!("pixel {raw} outside [0, 255]"),
                });
            }
            Ok(scale_pixel(raw))
        })
        .collect::<Result<Vec<f64>>>()?;

    if input.is_empty() {
        return Err(NetworkError::Dataset { line: line_no, reason: "record has no pixels".into() });
    }

    Ok(Sample::new(input, label, n_classes))
}

/// Parses every record in `text`. All records must have the same length.
pub fn parse_records(text: &str, n_classes: usize) -> Result<Vec<Sample>> {
    let mut samples: Vec<Sample> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        if samples.is_empty() && is_header(line) {
            debug!(line = line_no, "skipping csv header");
            continue;
        }

        let sample = parse_record(line, line_no, n_classes)?;
        if let Some(first) = samples.first() {
            if sample.input.len() != first.input.len() {
                return Err(NetworkError::Dataset {
                    line: line_no,
                    reason: format!(
                        "record has {} pixels, expected {}",
                        sample.input.len(),
                        first.input.len()
                    ),
                });
            }
        }
        samples.push(sample);
    }

    Ok(samples)
}

/// Reads and parses a CSV file.
pub fn load(path: &str, n_classes: usize) -> Result<Vec<Sample>> {
    let text = std::fs::read_to_string(path)?;
    let samples = parse_records(&text, n_classes)?;
    if samples.is_empty() {
        warn!(path, "dataset contains no records");
    } else {
        debug!(path, records = samples.len(), "dataset loaded");
    }
    Ok(samples)
}

/// A line with any numeric cell is a record, even if its label is broken.
fn is_header(line: &str) -> bool {
    line.split(',').all(|cell| cell.trim().parse::<f64>().is_err())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_scaled_and_one_hot() {
        let s = parse_record("3,0,255,51", 1, 10).unwrap();
        assert_eq!(s.label, 3);
        assert_eq!(s.input.len(), 3);
        assert_eq!(s.input[0], 0.01);
        assert!((s.input[1] - 1.0).abs() < 1e-12);
        assert!((s.input[2] - (51.0 / 255.0 * 0.99 + 0.01)).abs() < 1e-12);
        assert_eq!(s.target[3], 0.99);
        assert_eq!(s.target.iter().filter(|&&t| t == 0.01).count(), 9);
    }

    #[test]
    fn header_and_blank_lines_are_skipped() {
        let text = "label,p0,p1\n1,0,0\n\n0,255,255\n";
        let samples = parse_records(text, 2).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].label, 0);
    }

    #[test]
    fn bad_records_report_their_line() {
        let err = parse_records("1,0,0\n1,0,x\n", 10).unwrap_err();
        assert!(matches!(err, NetworkError::Dataset { line: 2, .. }));

        let err = parse_records("1,0,0\n1,0\n", 10).unwrap_err();
        assert!(matches!(err, NetworkError::Dataset { line: 2, .. }));

        let err = parse_record("12,0,0", 5, 10).unwrap_err();
        assert!(matches!(err, NetworkError::Dataset { line: 5, .. }));

        let err = parse_record("1,300", 1, 10).unwrap_err();
        assert!(matches!(err, NetworkError::Dataset { .. }));
    }

    #[test]
    fn corrupt_first_record_is_not_mistaken_for_header() {
        let err = parse_records("x,0,0\n1,0,0\n", 2).unwrap_err();
        assert!(matches!(err, NetworkError::Dataset { line: 1, .. }));

        assert!(is_header("label,pixel0,pixel1"));
        assert!(!is_header("x,0,0"));
        assert!(!is_header("7,0,0"));
    }

    fn temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_reads_records_from_file() {
        let path = temp_csv("neuro_mlp_test_load.csv", "label,p0,p1\n2,0,255\n0,51,0\n");
        let samples = load(path.to_str().unwrap(), 3).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].label, 2);
        assert_eq!(samples[0].target, vec![0.01, 0.01, 0.99]);
        assert_eq!(samples[1].input.len(), 2);
    }

    #[test]
    fn load_header_only_file_is_empty() {
        let path = temp_csv("neuro_mlp_test_header_only.csv", "label,p0,p1\n\n");
        let samples = load(path.to_str().unwrap(), 10).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(samples.is_empty());
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("neuro_mlp_test_missing.csv");
        std::fs::remove_file(&path).ok();
        let err = load(path.to_str().unwrap(), 10).unwrap_err();
        assert!(matches!(err, NetworkError::Io(_)));
    }
}
