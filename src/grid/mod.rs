//! Coordinate grids and vectorized evaluation
//!
//! Builds 1D/2D/3D coordinate grids and evaluates a solution function
//! across them, producing arrays ready for the presentation layer:
//!
//! - [`AxisSpec`] + [`AxisSpec::linspace`]: evenly spaced coordinates
//! - [`evaluate_line`]: 1D profiles (drawdown vs. distance, breakthrough
//!   curves vs. time)
//! - [`evaluate_plane`]: 2D plan views (drawdown fields, capture zones)
//! - [`evaluate_volume`]: 3D blocks, typically rendered as paired 2D slices
//!
//! Domain-guard sentinels (±∞ at a well axis, NaN outside the physical
//! domain) propagate through the grid untouched; a single singular point
//! never aborts the evaluation of the remaining points.
//! [`non_finite_count`] reports how many such sentinels a finished
//! evaluation contains, so the presentation layer can annotate them.
//!
//! # Parallelism
//!
//! Plane and volume evaluation switch to Rayon when the crate is built with
//! the `parallel` feature and the total element count exceeds the runtime
//! [`parallel_threshold()`]. The threshold lives here, not in the physics
//! modules: deciding *when* to hand work to Rayon is an execution concern,
//! not a physics concern.

use nalgebra::{DMatrix, DVector};
use ndarray::{Array3, ArrayD};
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::physics::error::DomainError;

// =================================================================================================
// Parallel execution threshold
// =================================================================================================

/// Default number of elements above which grid evaluation switches to
/// parallel iteration.
///
/// Below ~1000 elements the overhead of Rayon's thread-pool dispatch
/// outweighs the per-element cost of the closed-form formulas evaluated
/// here.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Relaxed ordering is sufficient: the value is a performance hint, not a
/// synchronisation point.
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`; a zero threshold would force parallel
/// dispatch for every single-element evaluation.
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop. Test-only; prevents one test from leaking a modified
/// threshold into the next.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Axis specification
// =================================================================================================

/// One evenly spaced coordinate axis.
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::grid::AxisSpec;
///
/// let axis = AxisSpec::new(0.0, 100.0, 101).unwrap();
/// let xs = axis.linspace();
/// assert_eq!(xs.len(), 101);
/// assert_eq!(xs[0], 0.0);
/// assert_eq!(xs[100], 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisSpec {
    /// First coordinate
    pub start: f64,

    /// Last coordinate (inclusive)
    pub stop: f64,

    /// Number of points, at least 2
    pub points: usize,
}

impl AxisSpec {
    /// Creates an axis specification.
    ///
    /// # Errors
    ///
    /// Fails when `start >= stop`, either bound is non-finite, or fewer
    /// than 2 points are requested.
    pub fn new(start: f64, stop: f64, points: usize) -> Result<Self, DomainError> {
        if !start.is_finite() || !stop.is_finite() || start >= stop || points < 2 {
            return Err(DomainError::InvalidAxis {
                start,
                stop,
                points,
            });
        }
        Ok(Self {
            start,
            stop,
            points,
        })
    }

    /// Spacing between consecutive points.
    #[inline]
    pub fn step(&self) -> f64 {
        (self.stop - self.start) / (self.points - 1) as f64
    }

    /// Materialize the axis coordinates.
    ///
    /// Coordinates are computed directly from the index (`start + i·step`)
    /// rather than accumulated, so the last point is exactly `stop` within
    /// machine epsilon.
    pub fn linspace(&self) -> DVector<f64> {
        let step = self.step();
        DVector::from_fn(self.points, |i, _| self.start + step * i as f64)
    }
}

// =================================================================================================
// Grid evaluation
// =================================================================================================

/// Evaluate `f` along a 1D axis.
///
/// Sentinels returned by `f` (NaN, ±∞) are stored as-is.
pub fn evaluate_line<F>(axis: &AxisSpec, f: F) -> DVector<f64>
where
    F: Fn(f64) -> f64 + Sync,
{
    let xs = axis.linspace();
    DVector::from_fn(axis.points, |i, _| f(xs[i]))
}

/// Evaluate `f(x, y)` over a 2D plane.
///
/// The result is indexed `[(i, j)]` with `i` along `x_axis` (rows) and `j`
/// along `y_axis` (columns). Switches to parallel column evaluation when
/// the element count exceeds [`parallel_threshold()`] and the `parallel`
/// feature is enabled.
pub fn evaluate_plane<F>(x_axis: &AxisSpec, y_axis: &AxisSpec, f: F) -> DMatrix<f64>
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    let xs = x_axis.linspace();
    let ys = y_axis.linspace();
    let nx = x_axis.points;
    let ny = y_axis.points;

    // Column-major storage to match nalgebra's layout.
    let mut data = vec![0.0_f64; nx * ny];

    let fill_column = |j: usize, column: &mut [f64]| {
        let y = ys[j];
        for (i, slot) in column.iter_mut().enumerate() {
            *slot = f(xs[i], y);
        }
    };

    if nx * ny > parallel_threshold() {
        #[cfg(feature = "parallel")]
        data.par_chunks_mut(nx)
            .enumerate()
            .for_each(|(j, column)| fill_column(j, column));
        #[cfg(not(feature = "parallel"))]
        data.chunks_mut(nx)
            .enumerate()
            .for_each(|(j, column)| fill_column(j, column));
    } else {
        data.chunks_mut(nx)
            .enumerate()
            .for_each(|(j, column)| fill_column(j, column));
    }

    DMatrix::from_vec(nx, ny, data)
}

/// Evaluate `f(x, y, z)` over a 3D block.
///
/// Indexed `[[i, j, k]]` along (x, y, z). Presentation layers typically
/// render two orthogonal slices of the result.
pub fn evaluate_volume<F>(
    x_axis: &AxisSpec,
    y_axis: &AxisSpec,
    z_axis: &AxisSpec,
    f: F,
) -> ArrayD<f64>
where
    F: Fn(f64, f64, f64) -> f64 + Sync,
{
    let xs = x_axis.linspace();
    let ys = y_axis.linspace();
    let zs = z_axis.linspace();

    Array3::from_shape_fn(
        (x_axis.points, y_axis.points, z_axis.points),
        |(i, j, k)| f(xs[i], ys[j], zs[k]),
    )
    .into_dyn()
}

/// Number of NaN or ±∞ entries in an evaluated field.
///
/// Non-finite values are expected sentinels (singular well axis, dry grid
/// points), not failures; this lets the caller detect and annotate them.
/// `DVector`, `DMatrix` and `ArrayD` results all iterate their elements by
/// reference:
///
/// ```rust
/// use hydrogeo_rs::grid::{evaluate_line, non_finite_count, AxisSpec};
///
/// let axis = AxisSpec::new(-1.0, 1.0, 5).unwrap();
/// let values = evaluate_line(&axis, |x| 1.0 / x);
/// assert_eq!(non_finite_count(values.iter()), 1);
/// ```
pub fn non_finite_count<'a, I>(values: I) -> usize
where
    I: IntoIterator<Item = &'a f64>,
{
    values.into_iter().filter(|v| !v.is_finite()).count()
}

// =================================================================================================
// Tests
// =================================================================================================
