//! Superposition of well fields, time stages, and boundary images
//!
//! # Mathematical Background
//!
//! The governing flow equation is linear in drawdown, so compound well
//! fields are assembled from single-well solutions by plain summation:
//!
//! - **Space**: each source contributes its radial drawdown at the
//!   observation point; pumping and injection differ only in sign.
//! - **Time**: a source that starts at t₀ contributes nothing before t₀; a
//!   source of finite duration is a start superposed with an equal and
//!   opposite start at shutdown (Theis recovery).
//! - **Boundaries**: a straight no-flow or constant-head boundary is
//!   replaced by an image well mirrored across it — same sign for no-flow,
//!   opposite sign for constant head.
//!
//! # Unconfined ordering
//!
//! Superposition is linear only in the equivalent confined space.
//! Water-table results therefore sum all confined contributions first and
//! apply the Jacob correction once to the total
//! ([`SuperpositionEngine::water_table_drawdown_at`]). Correcting each
//! source separately and summing afterwards is wrong and is not offered.
//!
//! # Singularities
//!
//! Radial solutions diverge at r = 0. The engine floors every
//! source-to-observation distance at a minimum radius (default 0.1 m,
//! configurable to the physical well radius), so evaluating a grid across a
//! well yields the well-face drawdown instead of ±∞.

use nalgebra::{DMatrix, DVector};

use crate::grid::{evaluate_line, evaluate_plane, AxisSpec};
use crate::models::theis::{unconfined_drawdown, CorrectedDrawdown, TheisWell};

/// Default floor on source-to-observation distance [m].
pub const DEFAULT_MIN_RADIUS: f64 = 0.1;

// =================================================================================================
// Radial solution abstraction
// =================================================================================================

/// A transient radial drawdown solution usable as a superposition kernel.
///
/// Implementations must be linear in `discharge`, return 0 for `time <= 0`,
/// and accept any radius the engine's floor lets through.
pub trait RadialSolution {
    /// Drawdown [m] at distance `radius` after pumping `discharge` for
    /// `time` seconds.
    fn radial_drawdown(&self, discharge: f64, radius: f64, time: f64) -> f64;
}

impl RadialSolution for TheisWell {
    fn radial_drawdown(&self, discharge: f64, radius: f64, time: f64) -> f64 {
        self.drawdown(discharge, radius, time)
    }
}

// =================================================================================================
// Source terms
// =================================================================================================

/// One well in the plan-view well field.
///
/// The sign convention lives in the rate: positive rates withdraw water
/// (drawdown), negative rates inject (mounding). The named constructors
/// keep call sites readable.
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::superposition::SourceTerm;
///
/// // A well pumping 20 L/s for one week, starting on day 3.
/// let well = SourceTerm::pumping((120.0, -40.0), 0.02)
///     .starting_at(3.0 * 86_400.0)
///     .lasting(7.0 * 86_400.0);
/// assert_eq!(well.rate(), 0.02);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceTerm {
    position: (f64, f64),
    rate: f64,
    start_time: f64,
    duration: Option<f64>,
}

impl SourceTerm {
    /// A withdrawal well at `position` [m] pumping `rate` [m³/s], active
    /// from t = 0 onward.
    pub fn pumping(position: (f64, f64), rate: f64) -> Self {
        Self {
            position,
            rate: rate.abs(),
            start_time: 0.0,
            duration: None,
        }
    }

    /// An injection well at `position` [m] recharging `rate` [m³/s].
    pub fn injection(position: (f64, f64), rate: f64) -> Self {
        Self {
            position,
            rate: -rate.abs(),
            start_time: 0.0,
            duration: None,
        }
    }

    /// Delays the source until `start_time` [s].
    pub fn starting_at(mut self, start_time: f64) -> Self {
        self.start_time = start_time;
        self
    }

    /// Limits the source to `duration` [s]; afterwards it contributes its
    /// recovery signal only.
    pub fn lasting(mut self, duration: f64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Plan-view position (x, y) [m]
    #[inline]
    pub fn position(&self) -> (f64, f64) {
        self.position
    }

    /// Signed rate [m³/s]; positive withdraws
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Contribution of this source at distance `radius` and absolute time
    /// `time`, for a given radial kernel.
    fn contribution<W: RadialSolution>(&self, well: &W, radius: f64, time: f64) -> f64 {
        let elapsed = time - self.start_time;
        let pumping = well.radial_drawdown(self.rate, radius, elapsed);
        match self.duration {
            // Shutdown = superposed injection of equal rate.
            Some(duration) => pumping - well.radial_drawdown(self.rate, radius, elapsed - duration),
            None => pumping,
        }
    }
}

// =================================================================================================
// Boundary images
// =================================================================================================

/// A straight, fully penetrating hydraulic boundary in plan view, either a
/// line of constant x ("vertical") or constant y ("horizontal").
///
/// The boundary is honored by the method of images: every real source gains
/// one mirrored image source per boundary. Corners (two intersecting
/// boundaries) would require an infinite image series and are out of scope;
/// with several boundaries each acts independently at first order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarBoundary {
    kind: BoundaryKind,
    line: BoundaryLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundaryKind {
    /// Impermeable: image has the same sign, doubling drawdown at the wall.
    NoFlow,
    /// Fixed head (river, lake): image has the opposite sign, pinning the
    /// drawdown to zero on the line.
    ConstantHead,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BoundaryLine {
    /// x = position
    Vertical(f64),
    /// y = position
    Horizontal(f64),
}

impl PlanarBoundary {
    /// No-flow boundary along the line x = `x` [m].
    pub fn no_flow_vertical(x: f64) -> Self {
        Self {
            kind: BoundaryKind::NoFlow,
            line: BoundaryLine::Vertical(x),
        }
    }

    /// No-flow boundary along the line y = `y` [m].
    pub fn no_flow_horizontal(y: f64) -> Self {
        Self {
            kind: BoundaryKind::NoFlow,
            line: BoundaryLine::Horizontal(y),
        }
    }

    /// Constant-head boundary along the line x = `x` [m].
    pub fn constant_head_vertical(x: f64) -> Self {
        Self {
            kind: BoundaryKind::ConstantHead,
            line: BoundaryLine::Vertical(x),
        }
    }

    /// Constant-head boundary along the line y = `y` [m].
    pub fn constant_head_horizontal(y: f64) -> Self {
        Self {
            kind: BoundaryKind::ConstantHead,
            line: BoundaryLine::Horizontal(y),
        }
    }

    /// The image of `source` across this boundary: mirrored position, sign
    /// preserved for no-flow and flipped for constant head. Timing carries
    /// over unchanged.
    pub fn image_of(&self, source: &SourceTerm) -> SourceTerm {
        let (x, y) = source.position;
        let position = match self.line {
            BoundaryLine::Vertical(x0) => (2.0 * x0 - x, y),
            BoundaryLine::Horizontal(y0) => (x, 2.0 * y0 - y),
        };
        let rate = match self.kind {
            BoundaryKind::NoFlow => source.rate,
            BoundaryKind::ConstantHead => -source.rate,
        };
        SourceTerm {
            position,
            rate,
            start_time: source.start_time,
            duration: source.duration,
        }
    }
}

// =================================================================================================
// Superposition engine
// =================================================================================================

/// Assembles drawdown fields from a well field, boundary images, and a
/// radial kernel.
///
/// # Example
///
/// ```rust
/// use hydrogeo_rs::models::TheisWell;
/// use hydrogeo_rs::superposition::{PlanarBoundary, SourceTerm, SuperpositionEngine};
///
/// let kernel = TheisWell::new(2e-3, 1e-4).unwrap();
/// let engine = SuperpositionEngine::new(vec![
///     SourceTerm::pumping((0.0, 0.0), 0.02),
/// ])
/// .with_boundary(PlanarBoundary::constant_head_vertical(150.0));
///
/// // On the constant-head line the image cancels the real well exactly.
/// let on_river = engine.drawdown_at(&kernel, (150.0, 35.0), 86_400.0);
/// assert!(on_river.abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SuperpositionEngine {
    sources: Vec<SourceTerm>,
    boundaries: Vec<PlanarBoundary>,
    min_radius: f64,
}

impl SuperpositionEngine {
    /// Creates an engine over the given well field with no boundaries and
    /// the default minimum radius.
    pub fn new(sources: Vec<SourceTerm>) -> Self {
        Self {
            sources,
            boundaries: Vec::new(),
            min_radius: DEFAULT_MIN_RADIUS,
        }
    }

    /// Adds a boundary; each boundary mirrors every real source once.
    pub fn with_boundary(mut self, boundary: PlanarBoundary) -> Self {
        self.boundaries.push(boundary);
        self
    }

    /// Overrides the distance floor, typically with the physical well
    /// radius.
    ///
    /// # Panics
    ///
    /// Panics when `min_radius` is not strictly positive; a zero floor
    /// would re-admit the r = 0 singularity this floor exists to remove.
    pub fn with_min_radius(mut self, min_radius: f64) -> Self {
        assert!(
            min_radius > 0.0,
            "minimum radius must be strictly positive, got {}",
            min_radius
        );
        self.min_radius = min_radius;
        self
    }

    /// The real (non-image) sources.
    #[inline]
    pub fn sources(&self) -> &[SourceTerm] {
        &self.sources
    }

    /// Real sources followed by their first-order boundary images.
    fn effective_sources(&self) -> Vec<SourceTerm> {
        let mut all =
            Vec::with_capacity(self.sources.len() * (1 + self.boundaries.len()));
        all.extend_from_slice(&self.sources);
        for boundary in &self.boundaries {
            for source in &self.sources {
                all.push(boundary.image_of(source));
            }
        }
        all
    }

    /// Total drawdown [m] at `point` and absolute time `time` [s], in the
    /// (equivalent) confined space.
    pub fn drawdown_at<W: RadialSolution>(
        &self,
        well: &W,
        point: (f64, f64),
        time: f64,
    ) -> f64 {
        self.effective_sources()
            .iter()
            .map(|source| {
                let (sx, sy) = source.position();
                let (dx, dy) = (point.0 - sx, point.1 - sy);
                let radius = (dx * dx + dy * dy).sqrt().max(self.min_radius);
                source.contribution(well, radius, time)
            })
            .sum()
    }

    /// Drawdown profile along a line of constant `y`.
    pub fn drawdown_profile<W: RadialSolution + Sync>(
        &self,
        well: &W,
        axis: &AxisSpec,
        y: f64,
        time: f64,
    ) -> DVector<f64> {
        evaluate_line(axis, |x| self.drawdown_at(well, (x, y), time))
    }

    /// Plan-view drawdown field, indexed `[(i, j)]` along (x, y).
    pub fn drawdown_field<W: RadialSolution + Sync>(
        &self,
        well: &W,
        x_axis: &AxisSpec,
        y_axis: &AxisSpec,
        time: f64,
    ) -> DMatrix<f64> {
        evaluate_plane(x_axis, y_axis, |x, y| self.drawdown_at(well, (x, y), time))
    }

    /// Water-table drawdown at a point: all confined contributions are
    /// summed first, then the Jacob correction is applied once to the
    /// total.
    pub fn water_table_drawdown_at<W: RadialSolution>(
        &self,
        well: &W,
        point: (f64, f64),
        time: f64,
        thickness: f64,
    ) -> CorrectedDrawdown {
        unconfined_drawdown(self.drawdown_at(well, point, time), thickness)
    }

    /// Water-table drawdown profile along a line of constant `y`.
    ///
    /// Dewatered points are reported as NaN so they survive grid transport
    /// and can be masked downstream.
    pub fn water_table_profile<W: RadialSolution + Sync>(
        &self,
        well: &W,
        axis: &AxisSpec,
        y: f64,
        time: f64,
        thickness: f64,
    ) -> DVector<f64> {
        evaluate_line(axis, |x| {
            match self.water_table_drawdown_at(well, (x, y), time, thickness) {
                CorrectedDrawdown::Drawdown(s) => s,
                CorrectedDrawdown::Dry => f64::NAN,
            }
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

    fn kernel() -> TheisWell {
        TheisWell::new(1e-3, 1e-4).unwrap()
    }

    const DAY: f64 = 86_400.0;

    #[test]
    fn test_superposition_is_linear() {
        let well = kernel();
        let a = SourceTerm::pumping((-250.0, 0.0), 0.01);
        let b = SourceTerm::pumping((250.0, 0.0), 0.02);

        let combined = SuperpositionEngine::new(vec![a, b]);
        let only_a = SuperpositionEngine::new(vec![a]);
        let only_b = SuperpositionEngine::new(vec![b]);

        for point in [(0.0, 0.0), (-100.0, 50.0), (400.0, -30.0)] {
            let sum =
                only_a.drawdown_at(&well, point, DAY) + only_b.drawdown_at(&well, point, DAY);
            assert_relative_eq!(
                combined.drawdown_at(&well, point, DAY),
                sum,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_injection_cancels_equal_pumping_at_midpoint() {
        let well = kernel();
        let engine = SuperpositionEngine::new(vec![
            SourceTerm::pumping((-100.0, 0.0), 0.01),
            SourceTerm::injection((100.0, 0.0), 0.01),
        ]);

        // The midline x = 0 is equidistant from both wells.
        for y in [0.0, 50.0, -200.0] {
            assert_relative_eq!(
                engine.drawdown_at(&well, (0.0, y), DAY),
                0.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_no_flow_image_doubles_drawdown_at_the_wall() {
        let well = kernel();
        let bounded = SuperpositionEngine::new(vec![SourceTerm::pumping((100.0, 0.0), 0.01)])
            .with_boundary(PlanarBoundary::no_flow_vertical(0.0));
        let unbounded = SuperpositionEngine::new(vec![SourceTerm::pumping((100.0, 0.0), 0.01)]);

        let on_wall = bounded.drawdown_at(&well, (0.0, 0.0), DAY);
        assert_relative_eq!(
            on_wall,
            2.0 * unbounded.drawdown_at(&well, (0.0, 0.0), DAY),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_no_flow_boundary_kills_the_normal_gradient() {
        let well = kernel();
        let engine = SuperpositionEngine::new(vec![SourceTerm::pumping((100.0, 0.0), 0.01)])
            .with_boundary(PlanarBoundary::no_flow_vertical(0.0));

        // Central difference of s across the wall; the image well makes the
        // field symmetric, so the normal derivative vanishes.
        let eps = 1e-3;
        let left = engine.drawdown_at(&well, (-eps, 40.0), DAY);
        let right = engine.drawdown_at(&well, (eps, 40.0), DAY);
        assert_relative_eq!(left, right, max_relative = 1e-9);
    }

    #[test]
    fn test_constant_head_boundary_pins_drawdown_to_zero() {
        let well = kernel();
        let engine = SuperpositionEngine::new(vec![SourceTerm::pumping((80.0, -20.0), 0.02)])
            .with_boundary(PlanarBoundary::constant_head_horizontal(50.0));

        for x in [-300.0, 0.0, 80.0, 500.0] {
            assert_relative_eq!(
                engine.drawdown_at(&well, (x, 50.0), DAY),
                0.0,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_delayed_source_contributes_nothing_before_start() {
        let well = kernel();
        let engine = SuperpositionEngine::new(vec![
            SourceTerm::pumping((0.0, 0.0), 0.01).starting_at(10.0 * DAY),
        ]);

        assert_eq!(engine.drawdown_at(&well, (50.0, 0.0), 5.0 * DAY), 0.0);
        assert!(engine.drawdown_at(&well, (50.0, 0.0), 15.0 * DAY) > 0.0);
    }

    #[test]
    fn test_finite_duration_source_recovers() {
        let well = kernel();
        let engine = SuperpositionEngine::new(vec![
            SourceTerm::pumping((0.0, 0.0), 0.01).lasting(DAY),
        ]);

        let while_pumping = engine.drawdown_at(&well, (50.0, 0.0), DAY);
        let long_after = engine.drawdown_at(&well, (50.0, 0.0), 200.0 * DAY);
        assert!(while_pumping > 0.0);
        assert!(long_after < 0.02 * while_pumping);
    }

    #[test]
    fn test_radius_floor_caps_drawdown_at_the_well_axis() {
        let well = kernel();
        let engine = SuperpositionEngine::new(vec![SourceTerm::pumping((0.0, 0.0), 0.01)])
            .with_min_radius(0.3);

        let at_axis = engine.drawdown_at(&well, (0.0, 0.0), DAY);
        let at_face = engine.drawdown_at(&well, (0.3, 0.0), DAY);
        assert!(at_axis.is_finite());
        assert_relative_eq!(at_axis, at_face, max_relative = 1e-12);
    }

    #[test]
    fn test_profile_matches_pointwise_evaluation() {
        let well = kernel();
        let engine = SuperpositionEngine::new(vec![
            SourceTerm::pumping((-250.0, 0.0), 0.01),
            SourceTerm::pumping((250.0, 0.0), 0.02),
        ]);

        let axis = AxisSpec::new(-1000.0, 1000.0, 41).unwrap();
        let profile = engine.drawdown_profile(&well, &axis, 0.0, DAY);
        let xs = axis.linspace();

        assert_eq!(profile.len(), 41);
        for i in [0, 10, 20, 40] {
            assert_relative_eq!(
                profile[i],
                engine.drawdown_at(&well, (xs[i], 0.0), DAY),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_water_table_correction_applied_after_summation() {
        use crate::models::theis::confined_equivalent;

        let well = kernel();
        let engine = SuperpositionEngine::new(vec![
            SourceTerm::pumping((-50.0, 0.0), 0.01),
            SourceTerm::pumping((50.0, 0.0), 0.01),
        ]);
        let thickness = 20.0;

        let confined_total = engine.drawdown_at(&well, (0.0, 0.0), DAY);
        let corrected = engine
            .water_table_drawdown_at(&well, (0.0, 0.0), DAY, thickness)
            .value()
            .unwrap();

        // Inverting the correction must recover the confined total.
        assert_relative_eq!(
            confined_equivalent(corrected, thickness),
            confined_total,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_water_table_profile_marks_dry_points_as_nan() {
        let well = kernel();
        // Thin aquifer: the near field dewaters, the far field stays wet.
        let engine = SuperpositionEngine::new(vec![SourceTerm::pumping((0.0, 0.0), 0.002)]);
        let axis = AxisSpec::new(-500.0, 500.0, 101).unwrap();
        let profile = engine.water_table_profile(&well, &axis, 0.0, DAY, 5.0);

        assert!(profile[50].is_nan(), "the well axis must be dewatered");
        assert!(profile[0].is_finite(), "the far field must stay wet");
    }
}
