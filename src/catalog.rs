//! Route catalog and selection state.
//!
//! The catalog owns the immutable, insertion-ordered set of route legs for
//! one page view plus the only mutable piece of route-level state: which leg
//! is selected, which marker popup is open, and whether the sidebar is
//! shown. All transitions go through the methods here; nothing else in the
//! crate mutates selection.

use crate::polyline::{self, DecodeError};
use crate::RoutePoint;
use indexmap::IndexMap;
use log::warn;
use std::sync::OnceLock;

/// Transport mode of a route leg. Closed enum, exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TransportMode {
    Land,
    Sea,
    Air,
}

impl TransportMode {
    /// Parse a mode name as it appears in fetched data.
    ///
    /// Returns `None` for anything other than `land`, `sea`, or `air`
    /// (ASCII case-insensitive); callers at the string boundary fall back
    /// to [`crate::fallback_style`] for styling.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "land" => Some(Self::Land),
            "sea" => Some(Self::Sea),
            "air" => Some(Self::Air),
            _ => None,
        }
    }

    /// Canonical lowercase name of the mode.
    pub fn name(self) -> &'static str {
        match self {
            Self::Land => "land",
            Self::Sea => "sea",
            Self::Air => "air",
        }
    }
}

/// Geometry of one leg: either a compact encoded polyline (land legs) or a
/// raw coordinate list (sea/air legs). Exactly one is present by
/// construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum LegGeometry {
    Encoded {
        #[cfg_attr(feature = "serde", serde(rename = "encodedPolyline"))]
        encoded_polyline: String,
    },
    Coordinates {
        coordinates: Vec<RoutePoint>,
    },
}

impl LegGeometry {
    /// Geometry from an encoded polyline string.
    pub fn encoded(encoded_polyline: impl Into<String>) -> Self {
        Self::Encoded { encoded_polyline: encoded_polyline.into() }
    }

    /// Geometry from a raw coordinate list.
    pub fn coordinates(coordinates: Vec<RoutePoint>) -> Self {
        Self::Coordinates { coordinates }
    }
}

/// One segment of a shipment's journey.
///
/// `origin` and `destination` are display labels (free-text place names),
/// not geocoded positions. The decoded path is computed lazily on first
/// access and cached for the lifetime of the leg.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteLeg {
    pub id: String,
    pub mode: TransportMode,
    pub origin: String,
    pub destination: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    geometry: LegGeometry,
    #[cfg_attr(feature = "serde", serde(skip))]
    decoded: OnceLock<Result<Vec<RoutePoint>, DecodeError>>,
}

impl Clone for RouteLeg {
    fn clone(&self) -> Self {
        let decoded = OnceLock::new();
        if let Some(cached) = self.decoded.get() {
            let _ = decoded.set(cached.clone());
        }
        Self {
            id: self.id.clone(),
            mode: self.mode,
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            geometry: self.geometry.clone(),
            decoded,
        }
    }
}

impl RouteLeg {
    /// Create a new leg.
    pub fn new(
        id: impl Into<String>,
        mode: TransportMode,
        origin: impl Into<String>,
        destination: impl Into<String>,
        geometry: LegGeometry,
    ) -> Self {
        Self {
            id: id.into(),
            mode,
            origin: origin.into(),
            destination: destination.into(),
            geometry,
            decoded: OnceLock::new(),
        }
    }

    /// The raw geometry as supplied by the host.
    pub fn geometry(&self) -> &LegGeometry {
        &self.geometry
    }

    /// The leg's coordinate sequence, decoding on first access.
    ///
    /// # Errors
    ///
    /// Returns the cached [`DecodeError`] when the leg carries a malformed
    /// encoded polyline. The result (success or failure) is computed once
    /// per leg and reused on every later call.
    pub fn path(&self) -> Result<&[RoutePoint], DecodeError> {
        let cached = self.decoded.get_or_init(|| match &self.geometry {
            LegGeometry::Encoded { encoded_polyline } => {
                let result = polyline::decode(encoded_polyline);
                if let Err(ref e) = result {
                    warn!("leg {}: malformed polyline, treating as empty geometry: {e}", self.id);
                }
                result
            }
            LegGeometry::Coordinates { coordinates } => Ok(coordinates.clone()),
        });
        match cached {
            Ok(points) => Ok(points.as_slice()),
            Err(e) => Err(e.clone()),
        }
    }

    /// The leg's coordinate sequence with the decode-failure policy applied:
    /// a malformed polyline renders as empty geometry instead of failing.
    pub fn resolved_path(&self) -> &[RoutePoint] {
        self.path().unwrap_or(&[])
    }
}

/// Selection and presentation state for one route map view.
///
/// Owned exclusively by the [`RouteCatalog`]; transitions happen only
/// through its methods.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionState {
    /// The focused route, always a key of the current catalog when set.
    pub selected_id: Option<String>,
    /// The open marker popup, at most one at a time.
    pub active_marker_id: Option<String>,
    pub sidebar_visible: bool,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            selected_id: None,
            active_marker_id: None,
            sidebar_visible: true,
        }
    }
}

/// A UI event emitted by the host's map widget, translated into a state
/// transition by [`RouteCatalog::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    /// The user clicked a rendered route path.
    RouteClick(String),
    /// The user clicked a point marker.
    MarkerClick(String),
    /// The user toggled the route list sidebar.
    SidebarToggle,
}

/// The set of route legs for one page view, keyed by leg id in insertion
/// order, plus the selection state machine.
///
/// The leg set is immutable after construction: a new fetch produces a new
/// catalog. A selected id therefore always references a live leg.
///
/// # Example
/// ```
/// use route_viz::{LegGeometry, RouteCatalog, RouteLeg, RoutePoint, TransportMode};
///
/// let mut catalog = RouteCatalog::new(vec![RouteLeg::new(
///     "air-1",
///     TransportMode::Air,
///     "Frankfurt",
///     "Shanghai",
///     LegGeometry::coordinates(vec![
///         RoutePoint::new(50.03, 8.57),
///         RoutePoint::new(31.14, 121.81),
///     ]),
/// )]);
///
/// assert!(catalog.select_route("air-1"));
/// assert!(!catalog.select_route("missing"));
/// assert_eq!(catalog.selection().selected_id.as_deref(), Some("air-1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    legs: IndexMap<String, RouteLeg>,
    selection: SelectionState,
}

impl RouteCatalog {
    /// Build a catalog from fetched legs, keyed by leg id.
    ///
    /// A duplicate id replaces the earlier leg while keeping its position,
    /// matching last-write-wins on the wire.
    pub fn new(legs: impl IntoIterator<Item = RouteLeg>) -> Self {
        let legs = legs.into_iter().map(|leg| (leg.id.clone(), leg)).collect();
        Self { legs, selection: SelectionState::default() }
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Look up a leg by id.
    pub fn get(&self, id: &str) -> Option<&RouteLeg> {
        self.legs.get(id)
    }

    /// Legs in insertion order.
    pub fn legs(&self) -> impl Iterator<Item = &RouteLeg> {
        self.legs.values()
    }

    /// The current selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The currently selected leg, if any.
    pub fn selected_leg(&self) -> Option<&RouteLeg> {
        self.selection
            .selected_id
            .as_deref()
            .and_then(|id| self.legs.get(id))
    }

    /// Focus a route.
    ///
    /// Returns `true` and updates the selection when `id` names a leg in
    /// this catalog. An unknown id is rejected: the previous selection
    /// (and all other state) is retained, a warning is logged for host
    /// diagnostics, and `false` is returned. There is deliberately no
    /// deselect transition; once any route is focused, only another
    /// `select_route` changes focus.
    ///
    /// On success the host is expected to re-frame the camera (see
    /// [`crate::bounds_of`]) and restart the marker animation for the new
    /// leg's path.
    pub fn select_route(&mut self, id: &str) -> bool {
        if !self.legs.contains_key(id) {
            warn!("ignoring selection of unknown route {id:?}");
            return false;
        }
        self.selection.selected_id = Some(id.to_string());
        true
    }

    /// Toggle a marker popup open or closed.
    ///
    /// Toggling the active marker closes it; toggling a different marker
    /// replaces the active one, so at most one popup is open at a time.
    pub fn toggle_marker(&mut self, marker_key: &str) {
        let active = &mut self.selection.active_marker_id;
        if active.as_deref() == Some(marker_key) {
            *active = None;
        } else {
            *active = Some(marker_key.to_string());
        }
    }

    /// Flip sidebar visibility. Purely presentational.
    pub fn toggle_sidebar(&mut self) {
        self.selection.sidebar_visible = !self.selection.sidebar_visible;
    }

    /// Apply a map-widget event, returning `true` if state changed.
    pub fn apply(&mut self, event: MapEvent) -> bool {
        match event {
            MapEvent::RouteClick(id) => self.select_route(&id),
            MapEvent::MarkerClick(key) => {
                self.toggle_marker(&key);
                true
            }
            MapEvent::SidebarToggle => {
                self.toggle_sidebar();
                true
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
