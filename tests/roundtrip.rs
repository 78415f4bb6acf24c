//! End-to-end exercises of the full stack: ellipsoid → geodetics,
//! ellipsoid → UTM projection → mesh, with round trips over the whole
//! supported domain and a handful of externally pinned scenarios.

use float_eq::assert_float_eq;
use geomesh::projection::{EuclidianCoordinate, Projection};
use geomesh::{
    Angle, Ellipsoid, Error, GeodeticCalculator, GlobalCoordinates, GlobalMesh, UtmGrid,
    UtmProjection,
};

#[test]
fn geodetics_and_projection_agree() -> Result<(), Error> {
    // The flat distance between two nearby projected points approximates
    // the geodesic distance, off by the local scale factor
    let ellipsoid = Ellipsoid::named("WGS84")?;
    let calculator = GeodeticCalculator::new(ellipsoid);
    let projection = UtmProjection::new(ellipsoid);

    let a = GlobalCoordinates::from_degrees(50.00, 9.00);
    let b = GlobalCoordinates::from_degrees(50.01, 9.01);

    let geodesic = calculator.curve(a, b).ellipsoidal_distance();
    let pa = projection.to_euclidian(a)?;
    let pb = projection.to_euclidian(b)?;
    let flat = pa.distance_to(&pb)?;

    let k = (pa.scale_factor() + pb.scale_factor()) / 2.;
    assert_float_eq!(flat / geodesic, k, abs <= 1e-6);
    Ok(())
}

#[test]
fn utm_roundtrip_over_the_domain() -> Result<(), Error> {
    let projection = UtmProjection::new(Ellipsoid::named("WGS84")?);

    // ~1e-9° over most of the domain, a few nanodegrees at the edges
    let mut lat = -79.75;
    while lat < 84. {
        let mut lon = -179.75;
        while lon <= 180. {
            let geo = GlobalCoordinates::from_degrees(lat, lon);
            let back = projection.from_euclidian(&projection.to_euclidian(geo)?)?;
            assert_float_eq!(back.latitude().degrees(), lat, abs <= 1e-8);
            assert_float_eq!(back.longitude().degrees(), lon, abs <= 1e-8);
            lon += 11.5;
        }
        lat += 6.5;
    }
    Ok(())
}

#[test]
fn pinned_scenario() -> Result<(), Error> {
    // One position, all the way through the stack
    let ellipsoid = Ellipsoid::named("WGS84")?;
    let here = GlobalCoordinates::from_degrees(49.8459444, 8.7993944);
    let there = GlobalCoordinates::from_degrees(50.2160806, 8.6152611);

    let curve = GeodeticCalculator::new(ellipsoid).curve(here, there);
    assert_float_eq!(curve.ellipsoidal_distance(), 43232.317, abs <= 5e-3);
    assert_float_eq!(curve.azimuth().degrees(), 342.302315, abs <= 1e-5);

    let projection = UtmProjection::new(ellipsoid);
    let utm = projection.to_euclidian(here)?;
    assert_eq!(utm.grid().to_string(), "32U");
    assert_eq!(utm.easting().floor(), 485_577.);
    assert_eq!(utm.northing().floor(), 5_521_521.);

    let mesh = GlobalMesh::with_default_cell_size(projection)?;
    let id = mesh.mesh_number(here)?;
    assert_eq!(mesh.grid(id)?.to_string(), "32U");
    assert_eq!(mesh.neighborhood(id, 0)?, vec![id]);
    assert_eq!(mesh.neighborhood(id, 1)?.len(), 8);

    // The cell center is in the same cell, less than half a cell diagonal away
    let center = mesh.center_of(id)?;
    assert_eq!(mesh.mesh_number_of(&center)?, id);
    assert!(center.distance_to(&utm)? < 1000. / 2f64.sqrt());
    Ok(())
}

#[test]
fn mesh_roundtrip_across_all_grids() -> Result<(), Error> {
    // For a sample of valid grids, the center of the grid's middle cell
    // reconstructs its own mesh number, and the geographic position of
    // that center resolves to the same cell
    let projection = UtmProjection::new(Ellipsoid::named("WGS84")?);
    let mesh = GlobalMesh::new(projection, 5000)?;

    for ordinal in 0..UtmGrid::NUMBER_OF_GRIDS {
        if ordinal % 7 != 0 || !UtmGrid::is_valid_ordinal(ordinal) {
            continue;
        }
        let grid = UtmGrid::from_ordinal(&projection, ordinal)?;

        // A point near the middle of the cell, via the geographic route
        let lat = grid.lower_left_corner().latitude() + grid.height() / 2.;
        let lon = grid.lower_left_corner().longitude() + grid.width() / 2.;
        let id = mesh.mesh_number_for(lat, lon)?;
        assert_eq!(mesh.grid(id)?, grid, "grid {grid}");

        let center = mesh.center_of(id)?;
        assert_eq!(mesh.mesh_number_of(&center)?, id, "center of {grid}");

        // ...and the center's geographic position still lands in the cell
        let geo = projection.from_euclidian(&center)?;
        assert_eq!(mesh.mesh_number(geo)?, id, "reprojected center of {grid}");
    }
    Ok(())
}

#[test]
fn norway_and_svalbard_end_to_end() -> Result<(), Error> {
    let projection = UtmProjection::new(Ellipsoid::named("WGS84")?);

    // Bergen is in the annexed western part of 32V
    let bergen = GlobalCoordinates::from_degrees(60.39, 5.32);
    assert_eq!(projection.to_euclidian(bergen)?.grid().to_string(), "32V");

    // Longyearbyen projects into the widened 33X
    let longyearbyen = GlobalCoordinates::from_degrees(78.22, 15.65);
    assert_eq!(projection.to_euclidian(longyearbyen)?.grid().to_string(), "33X");

    // Both round-trip as exactly as anywhere else
    for geo in [bergen, longyearbyen] {
        let back = projection.from_euclidian(&projection.to_euclidian(geo)?)?;
        assert_float_eq!(back.latitude().degrees(), geo.latitude().degrees(), abs <= 1e-8);
        assert_float_eq!(back.longitude().degrees(), geo.longitude().degrees(), abs <= 1e-8);
    }
    Ok(())
}

#[test]
fn paths_follow_curves() -> Result<(), Error> {
    let calculator = GeodeticCalculator::new(Ellipsoid::named("WGS84")?);
    let start = GlobalCoordinates::from_degrees(49.8459444, 8.7993944);
    let end = GlobalCoordinates::from_degrees(50.2160806, 8.6152611);

    let path = calculator.path(start, end, 9)?;
    assert_eq!(path.len(), 9);
    assert_eq!(path[0], start);
    assert_eq!(path[8], end);

    // Leg lengths are equal to well below the solver tolerance
    let step = calculator.curve(start, end).ellipsoidal_distance() / 8.;
    for pair in path.windows(2) {
        let leg = calculator.curve(pair[0], pair[1]).ellipsoidal_distance();
        assert_float_eq!(leg, step, abs <= 1e-3);
    }
    Ok(())
}

#[test]
fn angle_and_coordinates_invariants() {
    // Canonicalization is a fixed point, abs is idempotent
    let c = GlobalCoordinates::from_degrees(91., 361.);
    let again = GlobalCoordinates::new(c.latitude(), c.longitude());
    assert_eq!(c, again);

    let a = Angle::new(-271.5);
    assert_eq!(a.abs().abs(), a.abs());
}
