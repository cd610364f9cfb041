//! Transport-mode styling.
//!
//! Pure, table-driven lookup from transport mode to rendering parameters.
//! Total over the mode domain: every mode has a style and the string
//! boundary falls back to a neutral gray, so callers never hit an error
//! from styling.

use crate::catalog::TransportMode;

/// Rendering parameters for one route overlay and its marker.
///
/// All fields are always present; `dash_pattern` is `None` for a solid
/// stroke and `Some([dash, gap])` in pixels otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteStyle {
    pub stroke_color: &'static str,
    pub stroke_weight: f64,
    pub stroke_opacity: f64,
    pub dash_pattern: Option<[f64; 2]>,
    pub marker_glyph: &'static str,
}

/// Style for a transport mode.
///
/// # Example
/// ```
/// use route_viz::{style_for, TransportMode};
///
/// let sea = style_for(TransportMode::Sea);
/// assert!(sea.dash_pattern.is_some()); // sea lanes render dashed
/// ```
pub fn style_for(mode: TransportMode) -> RouteStyle {
    match mode {
        TransportMode::Land => RouteStyle {
            stroke_color: "#c0392b",
            stroke_weight: 4.0,
            stroke_opacity: 0.9,
            dash_pattern: None,
            marker_glyph: "truck",
        },
        TransportMode::Sea => RouteStyle {
            stroke_color: "#2471a3",
            stroke_weight: 3.0,
            stroke_opacity: 0.8,
            dash_pattern: Some([12.0, 8.0]),
            marker_glyph: "ship",
        },
        TransportMode::Air => RouteStyle {
            stroke_color: "#148f77",
            stroke_weight: 2.5,
            stroke_opacity: 0.75,
            dash_pattern: Some([2.0, 6.0]),
            marker_glyph: "plane",
        },
    }
}

/// Neutral gray style for anything outside the known mode domain.
pub fn fallback_style() -> RouteStyle {
    RouteStyle {
        stroke_color: "#7f8c8d",
        stroke_weight: 2.0,
        stroke_opacity: 0.6,
        dash_pattern: None,
        marker_glyph: "marker",
    }
}

/// Style for a mode name as it appears in fetched data.
///
/// An unrecognized name resolves to [`fallback_style`] rather than failing.
pub fn style_for_name(name: &str) -> RouteStyle {
    TransportMode::from_name(name)
        .map(style_for)
        .unwrap_or_else(fallback_style)
}

// ============================================================================
// Tests
// ============================================================================
