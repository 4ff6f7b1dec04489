//! CSV export of profiles and plan-view fields
//!
//! Plain comma-separated text, one header row, full `f64` precision via the
//! shortest round-trippable representation. NaN sentinels (dewatered
//! points) are written literally as `NaN`, which both spreadsheet tools and
//! plotting scripts treat as missing data.

use std::io::Write;

use nalgebra::{DMatrix, DVector};

use crate::grid::AxisSpec;
use crate::output::OutputError;

/// Writes paired columns, e.g. a drawdown profile s(x).
///
/// # Errors
///
/// Fails when the two columns differ in length or the writer errors.
///
/// # Example
///
/// ```rust
/// use nalgebra::DVector;
/// use hydrogeo_rs::output::csv::write_profile;
///
/// let xs = DVector::from_vec(vec![0.0, 10.0]);
/// let ss = DVector::from_vec(vec![1.25, 0.8]);
///
/// let mut out = Vec::new();
/// write_profile(&mut out, "x_m", "drawdown_m", &xs, &ss).unwrap();
/// assert!(String::from_utf8(out).unwrap().starts_with("x_m,drawdown_m\n0,1.25\n"));
/// ```
pub fn write_profile<W: Write>(
    writer: &mut W,
    x_label: &str,
    value_label: &str,
    xs: &DVector<f64>,
    values: &DVector<f64>,
) -> Result<(), OutputError> {
    if xs.len() != values.len() {
        return Err(OutputError::Inconsistent(format!(
            "profile columns differ in length: {} vs {}",
            xs.len(),
            values.len()
        )));
    }

    writeln!(writer, "{},{}", x_label, value_label)?;
    for (x, value) in xs.iter().zip(values.iter()) {
        writeln!(writer, "{},{}", x, value)?;
    }
    Ok(())
}

/// Writes a plan-view field in long format: one `x,y,value` row per grid
/// point, row-major over x then y to keep x the fastest-varying column.
///
/// # Errors
///
/// Fails when the field shape does not match the axes or the writer errors.
pub fn write_field<W: Write>(
    writer: &mut W,
    x_axis: &AxisSpec,
    y_axis: &AxisSpec,
    value_label: &str,
    field: &DMatrix<f64>,
) -> Result<(), OutputError> {
    if field.nrows() != x_axis.points || field.ncols() != y_axis.points {
        return Err(OutputError::Inconsistent(format!(
            "field shape {}x{} does not match axes {}x{}",
            field.nrows(),
            field.ncols(),
            x_axis.points,
            y_axis.points
        )));
    }

    let xs = x_axis.linspace();
    let ys = y_axis.linspace();

    writeln!(writer, "x,y,{}", value_label)?;
    for j in 0..y_axis.points {
        for i in 0..x_axis.points {
            writeln!(writer, "{},{},{}", xs[i], ys[j], field[(i, j)])?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trips_precision() {
        let xs = DVector::from_vec(vec![0.0, 2.5]);
        let values = DVector::from_vec(vec![0.123_456_789_012_345_6, f64::NAN]);

        let mut out = Vec::new();
        write_profile(&mut out, "x_m", "s_m", &xs, &values).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("x_m,s_m"));

        // Display of f64 is shortest-round-trip; parsing back must be exact.
        let row = lines.next().unwrap();
        let printed: f64 = row.split(',').nth(1).unwrap().parse().unwrap();
        assert_eq!(printed, 0.123_456_789_012_345_6);

        assert_eq!(lines.next(), Some("2.5,NaN"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_profile_rejects_mismatched_columns() {
        let xs = DVector::from_vec(vec![0.0, 1.0, 2.0]);
        let values = DVector::from_vec(vec![1.0]);
        let mut out = Vec::new();
        assert!(matches!(
            write_profile(&mut out, "x", "s", &xs, &values),
            Err(OutputError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_field_long_format() {
        let x_axis = AxisSpec::new(0.0, 1.0, 2).unwrap();
        let y_axis = AxisSpec::new(0.0, 10.0, 2).unwrap();
        let field = DMatrix::from_fn(2, 2, |i, j| (i + 10 * j) as f64);

        let mut out = Vec::new();
        write_field(&mut out, &x_axis, &y_axis, "s_m", &field).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "x,y,s_m\n0,0,0\n1,0,1\n0,10,10\n1,10,11\n"
        );
    }

    #[test]
    fn test_field_shape_check() {
        let x_axis = AxisSpec::new(0.0, 1.0, 3).unwrap();
        let y_axis = AxisSpec::new(0.0, 1.0, 2).unwrap();
        let field = DMatrix::zeros(2, 2);

        let mut out = Vec::new();
        assert!(write_field(&mut out, &x_axis, &y_axis, "s", &field).is_err());
    }
}
