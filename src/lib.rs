//! # Route Viz
//!
//! Geometry and animation core for multi-modal shipment route visualization.
//!
//! This library provides:
//! - Encoded polyline decoding (with a reference encoder for fixtures)
//! - Aggregate viewport computation (centroid, bounds, camera framing)
//! - A selectable-route catalog driving highlighting and camera focus
//! - A frame-rate-independent path animator for marker movement
//! - A total transport-mode → rendering-style lookup
//!
//! The crate is deliberately host-agnostic: it never touches a map widget or
//! an event loop. The hosting view owns the rendering surface, feeds UI
//! events into the [`RouteCatalog`], and drives the [`PathAnimator`] from
//! whatever scheduling primitive it has (frame callback, timer, test clock).
//!
//! ## Features
//!
//! - **`serde`** - Serialize/Deserialize derives on the public data model
//!
//! ## Quick Start
//!
//! ```rust
//! use route_viz::{
//!     centroid, style_for, LegGeometry, PathAnimator, RouteCatalog, RouteLeg,
//!     RoutePoint, TransportMode,
//! };
//!
//! let legs = vec![
//!     RouteLeg::new(
//!         "sea-1",
//!         TransportMode::Sea,
//!         "Rotterdam",
//!         "Singapore",
//!         LegGeometry::coordinates(vec![
//!             RoutePoint::new(51.95, 4.14),
//!             RoutePoint::new(1.26, 103.84),
//!         ]),
//!     ),
//! ];
//!
//! let mut catalog = RouteCatalog::new(legs);
//! let center = centroid(&catalog);
//! assert!(center.lat > 0.0);
//!
//! assert!(catalog.select_route("sea-1"));
//! let path = catalog.selected_leg().unwrap().resolved_path().to_vec();
//! let style = style_for(TransportMode::Sea);
//!
//! let mut animator = PathAnimator::start(path, 5000.0);
//! let frame = animator.tick(0.0).unwrap();
//! assert_eq!(frame.progress, 0.0);
//! println!("marker at {:?} with stroke {}", frame.position, style.stroke_color);
//! ```

pub mod animator;
pub mod catalog;
pub mod polyline;
pub mod style;
pub mod viewport;

pub use animator::{
    point_along, AnimationFrame, AnimationState, AnimatorConfig, GeometryProvider,
    LinearGeometry, PathAnimator,
};
pub use catalog::{
    LegGeometry, MapEvent, RouteCatalog, RouteLeg, SelectionState, TransportMode,
};
pub use polyline::{decode, decode_opt, encode, DecodeError};
pub use style::{fallback_style, style_for, style_for_name, RouteStyle};
pub use viewport::{bounds_of, centroid, Bounds, CameraConfig, CameraFraming};

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate with latitude and longitude in degrees.
///
/// # Example
/// ```
/// use route_viz::RoutePoint;
/// let point = RoutePoint::new(51.5074, -0.1278); // London
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
}

impl RoutePoint {
    /// Create a new route point.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check if the point has valid WGS84 coordinates.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_point_validation() {
        assert!(RoutePoint::new(51.5074, -0.1278).is_valid());
        assert!(RoutePoint::new(-90.0, 180.0).is_valid());
        assert!(!RoutePoint::new(91.0, 0.0).is_valid());
        assert!(!RoutePoint::new(0.0, -181.0).is_valid());
        assert!(!RoutePoint::new(f64::NAN, 0.0).is_valid());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_route_point_wire_shape() {
        let point: RoutePoint = serde_json::from_str(r#"{"lat": 38.5, "lng": -120.2}"#)
            .expect("valid point JSON");
        assert_eq!(point, RoutePoint::new(38.5, -120.2));
    }
}
