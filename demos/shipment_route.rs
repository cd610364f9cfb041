//! End-to-end walk through the visualization engine for one shipment.
//!
//! Run with: cargo run --example shipment_route

use route_viz::{
    bounds_of, centroid, polyline, style_for, CameraConfig, CameraFraming, LegGeometry,
    MapEvent, RouteCatalog, RouteLeg, RoutePoint, TransportMode,
};

fn main() {
    // A three-leg shipment: truck to the port, container ship to Singapore,
    // air freight onward. Land legs arrive as encoded polylines, sea/air
    // legs as raw coordinate lists — exactly the shape a fetch would give us.
    let land_path = vec![
        RoutePoint::new(53.5511, 9.9937),  // Hamburg
        RoutePoint::new(52.3676, 4.9041),  // Amsterdam
        RoutePoint::new(51.9244, 4.4777),  // Rotterdam
    ];

    let legs = vec![
        RouteLeg::new(
            "land-1",
            TransportMode::Land,
            "Hamburg",
            "Rotterdam",
            LegGeometry::encoded(polyline::encode(&land_path)),
        ),
        RouteLeg::new(
            "sea-1",
            TransportMode::Sea,
            "Rotterdam",
            "Singapore",
            LegGeometry::coordinates(vec![
                RoutePoint::new(51.9244, 4.4777),
                RoutePoint::new(36.1408, -5.3536), // Gibraltar
                RoutePoint::new(30.0444, 32.3499), // Suez
                RoutePoint::new(1.2644, 103.8400), // Singapore
            ]),
        ),
        RouteLeg::new(
            "air-1",
            TransportMode::Air,
            "Singapore",
            "Sydney",
            LegGeometry::coordinates(vec![
                RoutePoint::new(1.3644, 103.9915),
                RoutePoint::new(-33.9399, 151.1753),
            ]),
        ),
    ];

    let mut catalog = RouteCatalog::new(legs);

    println!("Shipment Route Visualization\n");

    // Initial camera framing spans every leg.
    let center = centroid(&catalog);
    println!("Initial map center: {:.4}, {:.4}\n", center.lat, center.lng);

    // Render every path with its mode style.
    for leg in catalog.legs() {
        let style = style_for(leg.mode);
        println!(
            "  {} [{}] {} -> {}: {} points, stroke {} ({}{})",
            leg.id,
            leg.mode.name(),
            leg.origin,
            leg.destination,
            leg.resolved_path().len(),
            style.stroke_color,
            style.marker_glyph,
            if style.dash_pattern.is_some() { ", dashed" } else { "" },
        );
    }

    // The user clicks the sea leg on the map.
    catalog.apply(MapEvent::RouteClick("sea-1".into()));
    let selected = catalog.selected_leg().expect("sea-1 was just selected");
    println!("\nSelected: {} ({} -> {})", selected.id, selected.origin, selected.destination);

    // Re-frame the camera to the selected leg's bounds.
    let bounds = bounds_of(&catalog, "sea-1").expect("sea-1 has geometry");
    let framing = CameraFraming::for_bounds(&bounds, &CameraConfig::default());
    println!(
        "Camera: center {:.4}, {:.4} at zoom {:.1}",
        framing.center.lat, framing.center.lng, framing.zoom
    );

    // Selecting an id that is not in the catalog is rejected and the
    // selection is retained.
    catalog.apply(MapEvent::RouteClick("rail-9".into()));
    println!(
        "After clicking unknown route: still {:?}",
        catalog.selection().selected_id
    );

    // Marker popups: at most one open at a time.
    catalog.apply(MapEvent::MarkerClick("origin:sea-1".into()));
    catalog.apply(MapEvent::MarkerClick("dest:sea-1".into()));
    println!("Active marker: {:?}", catalog.selection().active_marker_id);
}
