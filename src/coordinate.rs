use crate::Angle;
use std::fmt;

/// A geographic position: latitude and longitude on the reference ellipsoid.
///
/// The coordinates are canonicalized on construction and on every mutation:
/// latitude ends up in [-90°, 90°] and longitude in (-180°, 180°]. A
/// latitude wrapping past a pole is reflected back and pushed to the
/// opposite meridian, so e.g. (91°N, 0°E) canonicalizes to (89°N, 180°E).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlobalCoordinates {
    latitude: Angle,
    longitude: Angle,
}

// ----- C O N S T R U C T O R S ---------------------------------------------

impl GlobalCoordinates {
    #[must_use]
    pub fn new(latitude: Angle, longitude: Angle) -> GlobalCoordinates {
        GlobalCoordinates::canonical(latitude.degrees(), longitude.degrees())
    }

    /// A `GlobalCoordinates` from latitude/longitude in degrees
    #[must_use]
    pub fn from_degrees(latitude: f64, longitude: f64) -> GlobalCoordinates {
        GlobalCoordinates::canonical(latitude, longitude)
    }

    fn canonical(latitude: f64, longitude: f64) -> GlobalCoordinates {
        // Latitude first: wrap into [-180, 180), then reflect anything
        // beyond a pole onto the opposite meridian
        let mut lat = (latitude + 180.) % 360.;
        if lat < 0. {
            lat += 360.;
        }
        lat -= 180.;

        let mut lon = longitude;
        if lat > 90. {
            lat = 180. - lat;
            lon += 180.;
        } else if lat < -90. {
            lat = -180. - lat;
            lon += 180.;
        }

        // Longitude into (-180, 180]
        let mut lon = (lon + 180.) % 360.;
        if lon <= 0. {
            lon += 360.;
        }
        lon -= 180.;

        GlobalCoordinates {
            latitude: Angle::new(lat),
            longitude: Angle::new(lon),
        }
    }

    // ----- A C C E S S O R S -----------------------------------------------

    #[must_use]
    pub fn latitude(&self) -> Angle {
        self.latitude
    }

    #[must_use]
    pub fn longitude(&self) -> Angle {
        self.longitude
    }

    /// This position with another latitude (re-canonicalized)
    #[must_use]
    pub fn with_latitude(&self, latitude: Angle) -> GlobalCoordinates {
        GlobalCoordinates::new(latitude, self.longitude)
    }

    /// This position with another longitude (re-canonicalized)
    #[must_use]
    pub fn with_longitude(&self, longitude: Angle) -> GlobalCoordinates {
        GlobalCoordinates::new(self.latitude, longitude)
    }

    /// The point on the exact opposite side of the globe
    #[must_use]
    pub fn antipode(&self) -> GlobalCoordinates {
        GlobalCoordinates::new(-self.latitude, self.longitude + Angle::STRAIGHT)
    }
}

impl fmt::Display for GlobalCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude.degrees() < 0. { 'S' } else { 'N' };
        let ew = if self.longitude.degrees() < 0. { 'W' } else { 'E' };
        write!(
            f,
            "{}{}, {}{}",
            self.latitude.degrees().abs(),
            ns,
            self.longitude.degrees().abs(),
            ew
        )
    }
}

// ----- P O S I T I O N -----------------------------------------------------

/// A geographic position with an elevation in meters above the surface of
/// the reference ellipsoid
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlobalPosition {
    coordinates: GlobalCoordinates,
    elevation: f64,
}

impl GlobalPosition {
    #[must_use]
    pub fn new(coordinates: GlobalCoordinates, elevation: f64) -> GlobalPosition {
        GlobalPosition {
            coordinates,
            elevation,
        }
    }

    /// A position on the surface of the reference ellipsoid
    #[must_use]
    pub fn at_surface(coordinates: GlobalCoordinates) -> GlobalPosition {
        GlobalPosition::new(coordinates, 0.)
    }

    #[must_use]
    pub fn coordinates(&self) -> GlobalCoordinates {
        self.coordinates
    }

    #[must_use]
    pub fn elevation(&self) -> f64 {
        self.elevation
    }
}

impl fmt::Display for GlobalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}m", self.coordinates, self.elevation)
    }
}

// ----- T E S T S -----------------------------------------------------------
