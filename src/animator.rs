//! Time-based path animation.
//!
//! A [`PathAnimator`] moves a marker along a decoded polyline over a fixed
//! wall-clock duration, independent of frame rate. It is a cooperative
//! single-step state machine: the host calls [`PathAnimator::tick`] with a
//! monotonic timestamp from whatever scheduler it has (frame callback,
//! timer, manual test clock) and receives the interpolated position for
//! that instant. No threads, no event loop, no shared timing state;
//! concurrent animations are fully independent because each animator owns
//! its own [`AnimationState`].
//!
//! The start timestamp is latched on the *first tick*, not when the
//! animator is constructed, so setup work done between construction and the
//! first frame never eats into the animation.

use crate::RoutePoint;
use log::debug;

/// Interpolation capability injected into the animator.
///
/// Abstracts the geometry helpers a mapping SDK would otherwise provide as
/// ambient globals. The engine ships [`LinearGeometry`]; a host embedding a
/// real mapping SDK can wrap its spherical interpolation instead.
pub trait GeometryProvider {
    /// Interpolate between `a` and `b` at `t ∈ [0, 1]`.
    fn interpolate(&self, a: RoutePoint, b: RoutePoint, t: f64) -> RoutePoint;
}

/// Componentwise linear interpolation on lat and lng.
///
/// Parametric in time, not physically accurate over long distances, which
/// matches the engine's contract: animation speed is never derived from
/// real-world distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearGeometry;

impl GeometryProvider for LinearGeometry {
    fn interpolate(&self, a: RoutePoint, b: RoutePoint, t: f64) -> RoutePoint {
        RoutePoint::new(a.lat + (b.lat - a.lat) * t, a.lng + (b.lng - a.lng) * t)
    }
}

/// Animation tuning.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimatorConfig {
    /// Wall-clock duration of one full traversal in milliseconds.
    /// A configuration constant, never derived from path length.
    /// Default: 5000.
    pub duration_ms: f64,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self { duration_ms: 5000.0 }
    }
}

/// Ephemeral per-animation state. One per [`PathAnimator`], never shared.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationState {
    /// Normalized progress along the path.
    pub progress: f64,
    /// Timestamp of the first tick, `None` until the first frame arrives.
    pub start_timestamp: Option<f64>,
    /// Whether further ticks will produce frames.
    pub running: bool,
}

/// One computed animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    /// Interpolated marker position for this instant.
    pub position: RoutePoint,
    /// Progress in `[0, 1]`.
    pub progress: f64,
    /// Set on the final frame; no further frames follow.
    pub done: bool,
}

/// Sample a position along a path at normalized `progress`.
///
/// Maps `progress` to a segment by `index = floor(progress * (n - 1))` and
/// interpolates within it. Returns `None` for an empty path; a single-point
/// path always yields that point.
pub fn point_along<P: GeometryProvider>(
    path: &[RoutePoint],
    progress: f64,
    provider: &P,
) -> Option<RoutePoint> {
    match path {
        [] => None,
        [only] => Some(*only),
        _ => {
            let progress = progress.clamp(0.0, 1.0);
            let scaled = progress * (path.len() - 1) as f64;
            // At progress == 1 the floor lands on the last vertex; clamp the
            // segment index so interpolation stays in range with t == 1.
            let index = (scaled.floor() as usize).min(path.len() - 2);
            let t = scaled - index as f64;
            Some(provider.interpolate(path[index], path[index + 1], t))
        }
    }
}

/// Animates a marker along one path. See the module docs for the model.
///
/// # Example
/// ```
/// use route_viz::{PathAnimator, RoutePoint};
///
/// let path = vec![RoutePoint::new(0.0, 0.0), RoutePoint::new(0.0, 10.0)];
/// let mut animator = PathAnimator::start(path, 1000.0);
///
/// // The first tick latches the start timestamp.
/// animator.tick(10_000.0);
///
/// let frame = animator.tick(10_500.0).unwrap();
/// assert!((frame.progress - 0.5).abs() < 1e-9);
/// assert!((frame.position.lng - 5.0).abs() < 1e-9);
///
/// let last = animator.tick(11_000.0).unwrap();
/// assert!(last.done);
/// assert_eq!(animator.tick(11_016.0), None); // no frames after completion
/// ```
#[derive(Debug, Clone)]
pub struct PathAnimator<P: GeometryProvider = LinearGeometry> {
    path: Vec<RoutePoint>,
    duration_ms: f64,
    provider: P,
    state: AnimationState,
}

impl PathAnimator<LinearGeometry> {
    /// Start an animation over `path` lasting `duration_ms`, with linear
    /// interpolation.
    pub fn start(path: Vec<RoutePoint>, duration_ms: f64) -> Self {
        Self::start_with(path, duration_ms, LinearGeometry)
    }

    /// Start with the default duration from [`AnimatorConfig`].
    pub fn start_default(path: Vec<RoutePoint>) -> Self {
        Self::start(path, AnimatorConfig::default().duration_ms)
    }
}

impl<P: GeometryProvider> PathAnimator<P> {
    /// Start an animation using a custom [`GeometryProvider`].
    pub fn start_with(path: Vec<RoutePoint>, duration_ms: f64, provider: P) -> Self {
        debug!("starting path animation: {} points over {duration_ms}ms", path.len());
        Self {
            path,
            duration_ms,
            provider,
            state: AnimationState { running: true, ..AnimationState::default() },
        }
    }

    /// Advance the animation to `now_ms` (monotonic, in milliseconds) and
    /// compute the frame for that instant.
    ///
    /// Returns `None` once the animation has completed or been canceled,
    /// which is the host's signal to stop scheduling frames. Progress is
    /// strictly non-decreasing for a given handle even if the supplied
    /// clock stalls or steps backwards.
    ///
    /// Paths with fewer than two points complete immediately: an empty path
    /// produces no frame at all, a single point produces one final static
    /// frame at that point.
    pub fn tick(&mut self, now_ms: f64) -> Option<AnimationFrame> {
        if !self.state.running {
            return None;
        }
        if self.path.is_empty() {
            self.state.running = false;
            return None;
        }
        if self.path.len() < 2 {
            self.state.progress = 1.0;
            self.state.running = false;
            return Some(AnimationFrame { position: self.path[0], progress: 1.0, done: true });
        }

        let start = *self.state.start_timestamp.get_or_insert(now_ms);
        let elapsed = (now_ms - start).max(0.0);
        let progress = if self.duration_ms > 0.0 {
            (elapsed / self.duration_ms).min(1.0)
        } else {
            1.0
        };
        let progress = progress.max(self.state.progress);
        self.state.progress = progress;

        let position =
            point_along(&self.path, progress, &self.provider).unwrap_or(self.path[0]);
        let done = progress >= 1.0;
        if done {
            self.state.running = false;
        }
        Some(AnimationFrame { position, progress, done })
    }

    /// Cancel the animation.
    ///
    /// Resets progress to 0 and clears the latched start timestamp so a
    /// later [`restart`](Self::restart) begins cleanly. Idempotent: calling
    /// it on an already canceled or completed handle is a no-op, so stale
    /// handles are safe to cancel.
    pub fn cancel(&mut self) {
        if self.state.running {
            debug!("canceling path animation at progress {:.3}", self.state.progress);
        }
        self.state = AnimationState::default();
    }

    /// Restart from the beginning. The start timestamp is latched again on
    /// the next tick.
    pub fn restart(&mut self) {
        self.state = AnimationState { running: true, ..AnimationState::default() };
    }

    /// Whether the next tick will produce a frame.
    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// The current animation state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// The animated path.
    pub fn path(&self) -> &[RoutePoint] {
        &self.path
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn straight_path() -> Vec<RoutePoint> {
        vec![RoutePoint::new(0.0, 0.0), RoutePoint::new(0.0, 10.0)]
    }

    #[test]
    fn test_point_along_endpoints_and_midpoint() {
        let path = straight_path();
        let geom = LinearGeometry;

        assert_eq!(point_along(&path, 0.0, &geom), Some(RoutePoint::new(0.0, 0.0)));
        assert_eq!(point_along(&path, 1.0, &geom), Some(RoutePoint::new(0.0, 10.0)));

        let mid = point_along(&path, 0.5, &geom).unwrap();
        assert!(approx_eq(mid.lng, 5.0, 1e-9));
    }

    #[test]
    fn test_point_along_multi_segment() {
        let path = vec![
            RoutePoint::new(0.0, 0.0),
            RoutePoint::new(0.0, 10.0),
            RoutePoint::new(10.0, 10.0),
        ];
        // progress 0.75 → segment 1, halfway through it.
        let p = point_along(&path, 0.75, &LinearGeometry).unwrap();
        assert!(approx_eq(p.lat, 5.0, 1e-9));
        assert!(approx_eq(p.lng, 10.0, 1e-9));
    }

    #[test]
    fn test_point_along_degenerate_paths() {
        let geom = LinearGeometry;
        assert_eq!(point_along(&[], 0.5, &geom), None);

        let single = [RoutePoint::new(3.0, 4.0)];
        assert_eq!(point_along(&single, 0.9, &geom), Some(single[0]));
    }

    #[test]
    fn test_tick_progress_and_midpoint() {
        let mut animator = PathAnimator::start(straight_path(), 1000.0);

        let first = animator.tick(50_000.0).unwrap();
        assert_eq!(first.progress, 0.0);
        assert!(!first.done);

        let mid = animator.tick(50_500.0).unwrap();
        assert!(approx_eq(mid.progress, 0.5, 1e-9));
        assert!(approx_eq(mid.position.lng, 5.0, 1e-9));
        assert!(!mid.done);
    }

    #[test]
    fn test_tick_completes_and_stops() {
        let mut animator = PathAnimator::start(straight_path(), 1000.0);
        animator.tick(0.0);

        let last = animator.tick(1500.0).unwrap();
        assert!(last.done);
        assert_eq!(last.progress, 1.0);
        assert_eq!(last.position, RoutePoint::new(0.0, 10.0));

        assert!(!animator.is_running());
        assert_eq!(animator.tick(1600.0), None);
    }

    #[test]
    fn test_start_latched_on_first_tick() {
        // Construction happens "early"; the clock only starts counting from
        // the first frame.
        let mut animator = PathAnimator::start(straight_path(), 1000.0);

        animator.tick(7000.0);
        let frame = animator.tick(7250.0).unwrap();
        assert!(approx_eq(frame.progress, 0.25, 1e-9));
    }

    #[test]
    fn test_cancel_resets_and_restart_is_clean() {
        let mut animator = PathAnimator::start(straight_path(), 1000.0);
        animator.tick(0.0);
        animator.tick(600.0);

        animator.cancel();
        assert!(!animator.is_running());
        assert_eq!(animator.state().progress, 0.0);
        assert_eq!(animator.state().start_timestamp, None);
        assert_eq!(animator.tick(700.0), None); // no frames after cancel

        animator.restart();
        let frame = animator.tick(2000.0).unwrap();
        assert_eq!(frame.progress, 0.0);
        let frame = animator.tick(2500.0).unwrap();
        assert!(approx_eq(frame.progress, 0.5, 1e-9));
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut animator = PathAnimator::start(straight_path(), 1000.0);
        animator.tick(0.0);
        animator.tick(2000.0); // completes

        animator.cancel();
        animator.cancel();
        assert_eq!(animator.state(), &AnimationState::default());
    }

    #[test]
    fn test_empty_path_is_noop() {
        let mut animator = PathAnimator::start(vec![], 1000.0);
        assert_eq!(animator.tick(0.0), None);
        assert!(!animator.is_running());
    }

    #[test]
    fn test_single_point_path_completes_immediately() {
        let point = RoutePoint::new(2.0, 3.0);
        let mut animator = PathAnimator::start(vec![point], 1000.0);

        let frame = animator.tick(0.0).unwrap();
        assert!(frame.done);
        assert_eq!(frame.position, point);
        assert_eq!(animator.tick(100.0), None);
    }

    #[test]
    fn test_progress_never_decreases() {
        let mut animator = PathAnimator::start(straight_path(), 1000.0);
        animator.tick(1000.0);
        animator.tick(1400.0);

        // Clock steps backwards; progress holds.
        let frame = animator.tick(1200.0).unwrap();
        assert!(approx_eq(frame.progress, 0.4, 1e-9));
    }

    #[test]
    fn test_zero_duration_jumps_to_end() {
        let mut animator = PathAnimator::start(straight_path(), 0.0);
        let frame = animator.tick(123.0).unwrap();
        assert!(frame.done);
        assert_eq!(frame.position, RoutePoint::new(0.0, 10.0));
    }

    #[test]
    fn test_concurrent_animators_are_independent() {
        let mut a = PathAnimator::start(straight_path(), 1000.0);
        let mut b = PathAnimator::start(straight_path(), 2000.0);

        a.tick(0.0);
        b.tick(500.0); // different latch points, no shared timing state

        let fa = a.tick(500.0).unwrap();
        let fb = b.tick(1500.0).unwrap();
        assert!(approx_eq(fa.progress, 0.5, 1e-9));
        assert!(approx_eq(fb.progress, 0.5, 1e-9));

        a.cancel();
        assert!(b.is_running());
    }

    #[test]
    fn test_custom_geometry_provider() {
        struct SnapToStart;
        impl GeometryProvider for SnapToStart {
            fn interpolate(&self, a: RoutePoint, _b: RoutePoint, _t: f64) -> RoutePoint {
                a
            }
        }

        let mut animator = PathAnimator::start_with(straight_path(), 1000.0, SnapToStart);
        animator.tick(0.0);
        let frame = animator.tick(500.0).unwrap();
        assert_eq!(frame.position, RoutePoint::new(0.0, 0.0));
    }
}
