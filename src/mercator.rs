//! The single-map Mercator projections: spherical and elliptical.
//!
//! Both map longitude proportionally to x and send latitude through the
//! (inverse) Gudermannian, resp. the isometric latitude — the elliptical
//! variant is the conformal one on a flattened ellipsoid. Formulas follow
//! [Snyder 1987](crate::Bibliography::Sny87), ch. 7.

use crate::math::gudermannian;
use crate::projection::EuclidianCoordinate;
use crate::projection::Projection;
use crate::Angle;
use crate::Direction;
use crate::Ellipsoid;
use crate::Error;
use crate::GlobalCoordinates;
use float_eq::float_eq;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MercatorKind {
    Spherical,
    Elliptical,
}

/// The flat map a Mercator coordinate lives on: the projection variant and
/// its reference ellipsoid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MercatorFrame {
    kind: MercatorKind,
    ellipsoid: Ellipsoid,
}

/// A coordinate on a single-map Mercator plane, in meters
#[derive(Clone, Copy, Debug)]
pub struct MercatorCoordinate {
    frame: MercatorFrame,
    x: f64,
    y: f64,
}

impl MercatorCoordinate {
    /// The coordinate tolerance of [`PartialEq`], in meters
    pub const DEFAULT_PRECISION: f64 = 1e-5;

    #[must_use]
    pub fn new(frame: MercatorFrame, x: f64, y: f64) -> MercatorCoordinate {
        MercatorCoordinate { frame, x, y }
    }

    #[must_use]
    pub fn frame(&self) -> MercatorFrame {
        self.frame
    }
}

impl EuclidianCoordinate for MercatorCoordinate {
    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn same_frame(&self, other: &Self) -> bool {
        self.frame == other.frame
    }
}

impl PartialEq for MercatorCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.same_frame(other)
            && float_eq!(self.x, other.x, abs <= MercatorCoordinate::DEFAULT_PRECISION)
            && float_eq!(self.y, other.y, abs <= MercatorCoordinate::DEFAULT_PRECISION)
    }
}

// ----- S P H E R I C A L ---------------------------------------------------

/// Mercator projection of the sphere: x = a·λ, y = a·gd⁻¹(𝜙). The
/// flattening of the ellipsoid is ignored; hand it a genuine sphere (e.g.
/// `Ellipsoid::named("sphere")`) unless the conformality error is acceptable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SphericalMercator {
    ellipsoid: Ellipsoid,
}

impl SphericalMercator {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid) -> SphericalMercator {
        SphericalMercator { ellipsoid }
    }

    #[must_use]
    pub fn frame(&self) -> MercatorFrame {
        MercatorFrame {
            kind: MercatorKind::Spherical,
            ellipsoid: self.ellipsoid,
        }
    }

    /// The local scale factor, sec 𝜙: the factor by which the map
    /// exaggerates distances at the given latitude
    #[must_use]
    pub fn scale_factor(&self, latitude: Angle) -> f64 {
        1. / latitude.radians().cos()
    }
}

impl Projection for SphericalMercator {
    type Coordinate = MercatorCoordinate;

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    fn to_euclidian(&self, coordinates: GlobalCoordinates) -> Result<MercatorCoordinate, Error> {
        let latitude = coordinates.latitude().degrees();
        if latitude.abs() >= 90. {
            return Err(Error::LatitudeOutOfRange {
                latitude,
                min: -90.,
                max: 90.,
            });
        }
        let a = self.ellipsoid.semimajor_axis();
        let x = a * coordinates.longitude().radians();
        let y = a * gudermannian::inv(coordinates.latitude().radians());
        Ok(MercatorCoordinate::new(self.frame(), x, y))
    }

    fn from_euclidian(&self, coordinate: &MercatorCoordinate) -> Result<GlobalCoordinates, Error> {
        if coordinate.frame() != self.frame() {
            return Err(Error::InvalidArgument(
                "coordinate belongs to another Mercator map",
            ));
        }
        let a = self.ellipsoid.semimajor_axis();
        let longitude = Angle::from_radians(coordinate.x() / a);
        let latitude = Angle::from_radians(gudermannian::fwd(coordinate.y() / a));
        Ok(GlobalCoordinates::new(latitude, longitude))
    }
}

// ----- E L L I P T I C A L -------------------------------------------------

/// Mercator projection of the ellipsoid: x = a·λ, y = a·𝜓(𝜙), with 𝜓 the
/// isometric latitude. This is the conformal Mercator of e.g. nautical
/// charts.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EllipticalMercator {
    ellipsoid: Ellipsoid,
}

impl EllipticalMercator {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid) -> EllipticalMercator {
        EllipticalMercator { ellipsoid }
    }

    #[must_use]
    pub fn frame(&self) -> MercatorFrame {
        MercatorFrame {
            kind: MercatorKind::Elliptical,
            ellipsoid: self.ellipsoid,
        }
    }

    /// The local scale factor, a / (N(𝜙)·cos 𝜙), with N the prime vertical
    /// radius of curvature
    #[must_use]
    pub fn scale_factor(&self, latitude: Angle) -> f64 {
        let phi = latitude.radians();
        let n = self.ellipsoid.prime_vertical_radius_of_curvature(phi);
        self.ellipsoid.semimajor_axis() / (n * phi.cos())
    }
}

impl Projection for EllipticalMercator {
    type Coordinate = MercatorCoordinate;

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    fn to_euclidian(&self, coordinates: GlobalCoordinates) -> Result<MercatorCoordinate, Error> {
        let latitude = coordinates.latitude().degrees();
        if latitude.abs() >= 90. {
            return Err(Error::LatitudeOutOfRange {
                latitude,
                min: -90.,
                max: 90.,
            });
        }
        let a = self.ellipsoid.semimajor_axis();
        let x = a * coordinates.longitude().radians();
        let y = a
            * self
                .ellipsoid
                .isometric_latitude(coordinates.latitude().radians(), Direction::Fwd);
        Ok(MercatorCoordinate::new(self.frame(), x, y))
    }

    fn from_euclidian(&self, coordinate: &MercatorCoordinate) -> Result<GlobalCoordinates, Error> {
        if coordinate.frame() != self.frame() {
            return Err(Error::InvalidArgument(
                "coordinate belongs to another Mercator map",
            ));
        }
        let a = self.ellipsoid.semimajor_axis();
        let longitude = Angle::from_radians(coordinate.x() / a);
        let latitude = Angle::from_radians(
            self.ellipsoid
                .isometric_latitude(coordinate.y() / a, Direction::Inv),
        );
        Ok(GlobalCoordinates::new(latitude, longitude))
    }
}

// ----- T E S T S -----------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn elliptical() -> Result<(), Error> {
        // Validation values from PROJ: echo 12 55 0 0 | cct -d18 +proj=merc
        let merc = EllipticalMercator::new(Ellipsoid::named("GRS80")?);
        let geo = GlobalCoordinates::from_degrees(55., 12.);

        let plane = merc.to_euclidian(geo)?;
        assert_float_eq!(plane.x(), 1_335_833.889_519_282_8, abs <= 1e-6);
        assert_float_eq!(plane.y(), 7_326_837.714_873_877, abs <= 1e-6);

        let back = merc.from_euclidian(&plane)?;
        assert_float_eq!(back.latitude().degrees(), 55., abs <= 1e-11);
        assert_float_eq!(back.longitude().degrees(), 12., abs <= 1e-11);
        Ok(())
    }

    #[test]
    fn spherical() -> Result<(), Error> {
        let merc = SphericalMercator::new(Ellipsoid::named("sphere")?);
        let a = merc.ellipsoid().semimajor_axis();

        // The equator maps onto itself, by quadrant
        for (lat, lon) in [(0., 0.), (1., 2.), (-1., 2.), (1., -2.), (-1., -2.)] {
            let plane = merc.to_euclidian(GlobalCoordinates::from_degrees(lat, lon))?;
            assert_float_eq!(plane.x(), a * lon.to_radians(), abs <= 1e-9);
            assert_eq!(plane.y() > 0., lat > 0.);

            let back = merc.from_euclidian(&plane)?;
            assert_float_eq!(back.latitude().degrees(), lat, abs <= 1e-12);
            assert_float_eq!(back.longitude().degrees(), lon, abs <= 1e-12);
        }

        // The poles are off the map
        assert!(merc
            .to_euclidian(GlobalCoordinates::from_degrees(90., 0.))
            .is_err());
        Ok(())
    }

    #[test]
    fn scale() -> Result<(), Error> {
        let sphere = SphericalMercator::new(Ellipsoid::named("sphere")?);
        assert_float_eq!(sphere.scale_factor(Angle::ZERO), 1., abs <= 1e-15);
        assert_float_eq!(sphere.scale_factor(Angle::new(60.)), 2., abs <= 1e-12);

        // On the ellipsoid the polar flattening shaves a little off the
        // spherical exaggeration
        let merc = EllipticalMercator::new(Ellipsoid::named("GRS80")?);
        let k = merc.scale_factor(Angle::new(60.));
        assert!(k < 2. && k > 1.99);
        Ok(())
    }

    #[test]
    fn frames_do_not_mix() -> Result<(), Error> {
        let sphere = SphericalMercator::new(Ellipsoid::named("sphere")?);
        let merc = EllipticalMercator::new(Ellipsoid::named("GRS80")?);
        let geo = GlobalCoordinates::from_degrees(55., 12.);

        let a = sphere.to_euclidian(geo)?;
        let b = merc.to_euclidian(geo)?;
        assert!(!a.same_frame(&b));
        assert_ne!(a, b);
        assert!(a.distance_to(&b).is_err());
        assert!(merc.from_euclidian(&a).is_err());

        // Same frame, same point
        let c = sphere.to_euclidian(geo)?;
        assert_eq!(a, c);
        assert_float_eq!(a.distance_to(&c)?, 0., abs <= 1e-12);

        // Different ellipsoid means a different map, even for the same variant
        let other = EllipticalMercator::new(Ellipsoid::named("intl")?);
        let d = other.to_euclidian(geo)?;
        assert!(!b.same_frame(&d));
        Ok(())
    }
}
