//! Viewport computation: centroid, bounds, and camera framing.
//!
//! The initial camera position spans every leg in the catalog (centroid of
//! all resolved points); once a single route is focused the camera frames
//! that leg's bounding box. Legs whose geometry fails to decode contribute
//! nothing, so one bad leg never skews the framing of the rest.

use crate::catalog::RouteCatalog;
use crate::RoutePoint;

/// Axis-aligned bounding box of a route path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from route points.
    ///
    /// Returns `None` for an empty slice. A single point yields a
    /// degenerate zero-area box, which is still valid for framing.
    pub fn from_points(points: &[RoutePoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }

        Some(Self { min_lat, max_lat, min_lng, max_lng })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> RoutePoint {
        RoutePoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    /// True for a zero-area box (single-point path, or origin == destination).
    pub fn is_degenerate(&self) -> bool {
        self.lat_span() == 0.0 && self.lng_span() == 0.0
    }
}

/// Camera limits and defaults for [`CameraFraming::for_bounds`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraConfig {
    /// Minimum zoom level. Default: 0 (whole world).
    pub min_zoom: f64,
    /// Maximum zoom level. Default: 18 (street level).
    pub max_zoom: f64,
    /// Zoom used for a degenerate (single-point) bounds, where no span is
    /// available to derive one. Default: 10.
    pub point_zoom: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { min_zoom: 0.0, max_zoom: 18.0, point_zoom: 10.0 }
    }
}

/// A center point and zoom level ready to push to the map widget.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraFraming {
    pub center: RoutePoint,
    pub zoom: f64,
}

impl CameraFraming {
    /// Frame a bounding box: center on it and derive a zoom that fits the
    /// larger of its spans, clamped to the config's limits.
    ///
    /// The zoom scale follows web-mercator tiling, where zoom 0 shows 360
    /// degrees of longitude and each level halves the visible span.
    pub fn for_bounds(bounds: &Bounds, config: &CameraConfig) -> Self {
        let span = bounds.lat_span().max(bounds.lng_span());
        let zoom = if span <= 0.0 {
            config.point_zoom
        } else {
            (360.0 / span).log2().clamp(config.min_zoom, config.max_zoom)
        };
        Self { center: bounds.center(), zoom }
    }
}

/// Arithmetic-mean center of every resolved point of every leg.
///
/// The defined fallback for an empty catalog (or one where every leg
/// resolved to empty geometry) is `(0, 0)`; callers must treat that as "no
/// bounds available" rather than a real location.
///
/// # Example
/// ```
/// use route_viz::{centroid, LegGeometry, RouteCatalog, RouteLeg, RoutePoint, TransportMode};
///
/// let catalog = RouteCatalog::new(vec![RouteLeg::new(
///     "sea-1",
///     TransportMode::Sea,
///     "A",
///     "B",
///     LegGeometry::coordinates(vec![RoutePoint::new(0.0, 0.0), RoutePoint::new(10.0, 10.0)]),
/// )]);
///
/// let center = centroid(&catalog);
/// assert_eq!(center, RoutePoint::new(5.0, 5.0));
/// ```
pub fn centroid(catalog: &RouteCatalog) -> RoutePoint {
    let mut sum_lat = 0.0;
    let mut sum_lng = 0.0;
    let mut count = 0usize;

    for leg in catalog.legs() {
        for p in leg.resolved_path() {
            sum_lat += p.lat;
            sum_lng += p.lng;
            count += 1;
        }
    }

    if count == 0 {
        return RoutePoint::new(0.0, 0.0);
    }
    RoutePoint::new(sum_lat / count as f64, sum_lng / count as f64)
}

/// Bounding box of one leg's resolved path, used to re-frame the camera
/// when that route is selected.
///
/// Returns `None` for an unknown id or a leg with empty geometry.
pub fn bounds_of(catalog: &RouteCatalog, id: &str) -> Option<Bounds> {
    Bounds::from_points(catalog.get(id)?.resolved_path())
}

// ============================================================================
// Tests
// ============================================================================
