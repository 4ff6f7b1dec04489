//! Observation files and goodness-of-fit statistics
//!
//! Reads MODFLOW-style HOB output — a header line followed by whitespace
//! separated `SIMULATED  OBSERVED  NAME` rows — and scores the fit with the
//! standard calibration statistics:
//!
//! ```text
//! ME   = mean(sim - obs)                        (bias, signed)
//! MAE  = mean(|sim - obs|)
//! RMSE = sqrt(mean((sim - obs)²))
//! NSE  = 1 - Σ(sim - obs)² / Σ(obs - mean(obs))²
//! ```
//!
//! NSE = 1 is a perfect fit; NSE ≤ 0 means the model predicts no better
//! than the observation mean.

use std::io::BufRead;

use crate::output::OutputError;

// =================================================================================================
// Records
// =================================================================================================

/// One simulated/observed head pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRecord {
    /// Simulated equivalent [m]
    pub simulated: f64,

    /// Observed value [m]
    pub observed: f64,

    /// Observation name from the file
    pub name: String,
}

impl ObservationRecord {
    /// Signed residual: simulated minus observed.
    #[inline]
    pub fn residual(&self) -> f64 {
        self.simulated - self.observed
    }
}

/// Parses a HOB output stream.
///
/// The first line is treated as a header when its first field is not a
/// number; blank lines are skipped. Each data line must carry at least
/// three whitespace-separated fields: simulated, observed, name.
///
/// # Errors
///
/// Fails on I/O errors and on any malformed data line, reporting the
/// 1-based line number.
pub fn parse_hob_out<R: BufRead>(reader: R) -> Result<Vec<ObservationRecord>, OutputError> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let first = match fields.next() {
            Some(field) => field,
            None => continue,
        };

        let simulated: f64 = match first.parse() {
            Ok(value) => value,
            // Header line ("SIMULATED EQUIVALENT" ...) is only legal first.
            Err(_) if records.is_empty() && index == 0 => continue,
            Err(_) => {
                return Err(OutputError::Parse {
                    line: index + 1,
                    message: format!("expected a simulated value, got '{}'", first),
                });
            }
        };

        let observed: f64 = match fields.next() {
            Some(field) => field.parse().map_err(|_| OutputError::Parse {
                line: index + 1,
                message: format!("expected an observed value, got '{}'", field),
            })?,
            None => {
                return Err(OutputError::Parse {
                    line: index + 1,
                    message: "missing observed value".to_string(),
                });
            }
        };

        let name = match fields.next() {
            Some(field) => field.to_string(),
            None => {
                return Err(OutputError::Parse {
                    line: index + 1,
                    message: "missing observation name".to_string(),
                });
            }
        };

        records.push(ObservationRecord {
            simulated,
            observed,
            name,
        });
    }

    Ok(records)
}

// =================================================================================================
// Statistics
// =================================================================================================

/// Calibration statistics over a set of observation records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationStatistics {
    /// Mean error (bias) [m]
    pub mean_error: f64,

    /// Mean absolute error [m]
    pub mean_absolute_error: f64,

    /// Root-mean-square error [m]
    pub root_mean_square_error: f64,

    /// Nash-Sutcliffe efficiency [-]; NaN when the observations have zero
    /// variance (the denominator is undefined)
    pub nash_sutcliffe: f64,

    /// Number of records scored
    pub count: usize,
}

impl ObservationStatistics {
    /// Computes the statistics over `records`.
    ///
    /// # Errors
    ///
    /// Fails when the record set is empty.
    pub fn from_records(records: &[ObservationRecord]) -> Result<Self, OutputError> {
        if records.is_empty() {
            return Err(OutputError::Inconsistent(
                "cannot score an empty observation set".to_string(),
            ));
        }

        let n = records.len() as f64;
        let mean_error = records.iter().map(ObservationRecord::residual).sum::<f64>() / n;
        let mean_absolute_error = records
            .iter()
            .map(|r| r.residual().abs())
            .sum::<f64>()
            / n;
        let sum_squared_residuals = records
            .iter()
            .map(|r| r.residual() * r.residual())
            .sum::<f64>();
        let root_mean_square_error = (sum_squared_residuals / n).sqrt();

        let observed_mean = records.iter().map(|r| r.observed).sum::<f64>() / n;
        let observed_variance = records
            .iter()
            .map(|r| (r.observed - observed_mean).powi(2))
            .sum::<f64>();
        let nash_sutcliffe = if observed_variance > 0.0 {
            1.0 - sum_squared_residuals / observed_variance
        } else {
            f64::NAN
        };

        Ok(Self {
            mean_error,
            mean_absolute_error,
            root_mean_square_error,
            nash_sutcliffe,
            count: records.len(),
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HOB_SAMPLE: &str = "\
\"SIMULATED EQUIVALENT\" \"OBSERVED VALUE\" \"OBSERVATION NAME\"
  12.50   12.30  OBS_01
  10.10   10.40  OBS_02

   8.75    8.75  OBS_03
";

    #[test]
    fn test_parse_hob_out() {
        let records = parse_hob_out(HOB_SAMPLE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "OBS_01");
        assert_relative_eq!(records[0].simulated, 12.5);
        assert_relative_eq!(records[1].observed, 10.4);
        assert_relative_eq!(records[2].residual(), 0.0);
    }

    #[test]
    fn test_parse_reports_the_failing_line() {
        let text = "1.0 2.0 A\n3.0 not_a_number B\n";
        let err = parse_hob_out(text.as_bytes()).unwrap_err();
        match err {
            OutputError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_short_rows() {
        assert!(parse_hob_out("1.0 2.0\n".as_bytes()).is_err());
        assert!(parse_hob_out("1.0\n".as_bytes()).is_err());
    }

    #[test]
    fn test_statistics_hand_computed() {
        let records = parse_hob_out(HOB_SAMPLE.as_bytes()).unwrap();
        let stats = ObservationStatistics::from_records(&records).unwrap();

        // Residuals: +0.2, -0.3, 0.0
        assert_relative_eq!(stats.mean_error, -0.1 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(stats.mean_absolute_error, 0.5 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(
            stats.root_mean_square_error,
            (0.13_f64 / 3.0).sqrt(),
            max_relative = 1e-12
        );
        assert_eq!(stats.count, 3);
        assert!(stats.nash_sutcliffe > 0.9 && stats.nash_sutcliffe < 1.0);
    }

    #[test]
    fn test_perfect_fit_has_unit_efficiency() {
        let records = vec![
            ObservationRecord {
                simulated: 5.0,
                observed: 5.0,
                name: "A".to_string(),
            },
            ObservationRecord {
                simulated: 7.0,
                observed: 7.0,
                name: "B".to_string(),
            },
        ];
        let stats = ObservationStatistics::from_records(&records).unwrap();
        assert_eq!(stats.root_mean_square_error, 0.0);
        assert_relative_eq!(stats.nash_sutcliffe, 1.0);
    }

    #[test]
    fn test_zero_variance_observations_yield_nan_efficiency() {
        let records = vec![
            ObservationRecord {
                simulated: 5.1,
                observed: 5.0,
                name: "A".to_string(),
            },
            ObservationRecord {
                simulated: 4.9,
                observed: 5.0,
                name: "B".to_string(),
            },
        ];
        let stats = ObservationStatistics::from_records(&records).unwrap();
        assert!(stats.nash_sutcliffe.is_nan());
    }

    #[test]
    fn test_empty_set_is_rejected() {
        assert!(ObservationStatistics::from_records(&[]).is_err());
    }
}
