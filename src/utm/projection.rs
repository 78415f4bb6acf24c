//! Transverse Mercator for the UTM grids, using the Krüger series in the
//! third flattening, after [Krüger 1912](crate::Bibliography::Kru12) in the
//! formulation of [Karney 2011](crate::Bibliography::Kar11) and
//! [Deakin et al 2012](crate::Bibliography::Dea12), truncated at order 3.

use super::UtmCoordinate;
use super::UtmGrid;
use crate::math::angular;
use crate::math::fourier;
use crate::math::fourier_coefficients;
use crate::math::FourierCoefficients;
use crate::math::PolynomialCoefficients;
use crate::projection::EuclidianCoordinate;
use crate::projection::Projection;
use crate::Angle;
use crate::Direction;
use crate::Ellipsoid;
use crate::Error;
use crate::GlobalCoordinates;

/// Coefficient polynomials in the third flattening for the Krüger series:
/// the α coefficients of the geodetic → TM direction forward, the negated β
/// coefficients of the TM → geodetic direction inverse (negated so that
/// both directions are *additive* corrections).
#[rustfmt::skip]
const KRUEGER: PolynomialCoefficients = PolynomialCoefficients {
    fwd: [
        [1. / 2., -2. / 3.,   5. / 16.],
        [0.,      13. / 48., -3. / 5.],
        [0.,       0.,       61. / 240.],
    ],
    inv: [
        [-1. / 2., 2. / 3.,  -37. / 96.],
        [0.,      -1. / 48., -1. / 15.],
        [0.,       0.,      -17. / 480.],
    ],
};

/// The result of the raw per-grid transform: easting/northing (or, inverted,
/// longitude/latitude) plus the point scale factor and the meridian
/// convergence, which fall out of the same intermediate quantities
#[derive(Clone, Copy, Debug)]
pub(crate) struct RawTransform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    /// radians
    pub convergence: f64,
}

/// The Universal Transverse Mercator projection on a chosen ellipsoid.
///
/// UTM is not one map but 60×20 of them: each [`UtmGrid`] is projected
/// around its own central meridian. The forward direction therefore first
/// resolves the owning grid, which fixes the central meridian and the
/// hemisphere; the inverse direction reads them off the coordinate's grid
/// tag.
#[derive(Clone, Copy, Debug)]
pub struct UtmProjection {
    ellipsoid: Ellipsoid,
    /// The rectifying radius, *A*
    rectifying_radius: f64,
    /// α (fwd) and -β (inv) Fourier coefficients
    coefficients: FourierCoefficients,
    /// χ → 𝜙 series for the inverse direction
    conformal: FourierCoefficients,
}

impl Default for UtmProjection {
    fn default() -> UtmProjection {
        UtmProjection::new(Ellipsoid::default())
    }
}

impl PartialEq for UtmProjection {
    fn eq(&self, other: &Self) -> bool {
        // Everything else is derived from the ellipsoid
        self.ellipsoid == other.ellipsoid
    }
}

impl UtmProjection {
    /// The equator-ward edge of band C
    pub const MIN_LATITUDE: Angle = Angle::new(-80.);
    /// The polar edge of band X
    pub const MAX_LATITUDE: Angle = Angle::new(84.);

    /// The scale factor at the central meridian, k₀, by definition of UTM
    pub const CENTRAL_SCALE: f64 = 0.9996;
    /// The false easting of every grid, by definition of UTM
    pub const FALSE_EASTING: f64 = 500_000.;
    /// The false northing of southern-hemisphere grids
    pub const FALSE_NORTHING: f64 = 10_000_000.;

    #[must_use]
    pub fn new(ellipsoid: Ellipsoid) -> UtmProjection {
        let n = ellipsoid.third_flattening();
        UtmProjection {
            ellipsoid,
            rectifying_radius: ellipsoid.rectifying_radius(),
            coefficients: fourier_coefficients(n, &KRUEGER),
            conformal: ellipsoid.coefficients_for_conformal_latitude_computations(),
        }
    }

    /// The scaled rectifying radius k₀·A: one radian of rectifying latitude,
    /// in grid meters
    fn scaled_radius(&self) -> f64 {
        Self::CENTRAL_SCALE * self.rectifying_radius
    }

    /// The raw forward transform into the frame of `grid`. No containment
    /// check: the caller decides which grid owns the point.
    pub(crate) fn project(&self, coordinates: GlobalCoordinates, grid: &UtmGrid) -> RawTransform {
        let lat = coordinates.latitude().radians();
        let lon = coordinates.longitude().radians();
        let dl = angular::normalize_symmetric(lon - grid.central_meridian().radians());
        let (dl_sin, dl_cos) = dl.sin_cos();

        // t = tan 𝜒: the conformal latitude, reached through the isometric
        let t = self
            .ellipsoid
            .isometric_latitude(lat, Direction::Fwd)
            .sinh();

        // The complex spherical angle: ξ on the central meridian, η across
        let xi = t.atan2(dl_cos);
        let eta = (dl_sin / t.hypot(dl_cos)).asinh();

        // The ellipsoidal correction, by complex Clenshaw summation,
        // and its derivative terms σ and τ for scale and convergence
        let d = fourier::complex_sin([2. * xi, 2. * eta], &self.coefficients.fwd);
        let mut sigma = 1.;
        let mut tau = 0.;
        for (j, c) in self.coefficients.fwd.iter().enumerate() {
            let w = 2. * (j + 1) as f64;
            sigma += w * c * (w * xi).cos() * (w * eta).cosh();
            tau += w * c * (w * xi).sin() * (w * eta).sinh();
        }

        let qs = self.scaled_radius();
        let x = Self::FALSE_EASTING + qs * (eta + d[1]);
        let y = grid.northing_origin() + qs * (xi + d[0]);

        // Scale factor and meridian convergence, Karney (2011) eqs. (25), (26)
        let tb = self.ellipsoid.latitude_geographic_to_reduced(lat).tan();
        let t1 = (1. + t * t).sqrt();
        let scale = qs / self.ellipsoid.semimajor_axis()
            * ((1. + tb * tb) * (sigma * sigma + tau * tau) / (t * t + dl_cos * dl_cos)).sqrt();
        let convergence = (tau * t1 + sigma * t * dl.tan()).atan2(sigma * t1 - tau * t * dl.tan());

        RawTransform {
            x,
            y,
            scale,
            convergence,
        }
    }

    /// The raw inverse transform out of the frame of `grid`: x is longitude,
    /// y is latitude, in radians.
    pub(crate) fn unproject(&self, grid: &UtmGrid, easting: f64, northing: f64) -> RawTransform {
        let qs = self.scaled_radius();
        let xi = (northing - grid.northing_origin()) / qs;
        let eta = (easting - Self::FALSE_EASTING) / qs;

        // Undo the ellipsoidal correction (the inverse coefficients carry
        // the sign, so this too is additive), with the derivative terms
        let d = fourier::complex_sin([2. * xi, 2. * eta], &self.coefficients.inv);
        let mut sigma = 1.;
        let mut tau = 0.;
        for (j, c) in self.coefficients.inv.iter().enumerate() {
            let w = 2. * (j + 1) as f64;
            sigma += w * c * (w * xi).cos() * (w * eta).cosh();
            tau += w * c * (w * xi).sin() * (w * eta).sinh();
        }
        let xi = xi + d[0];
        let eta = eta + d[1];

        // Back from the complex spherical angle to the conformal latitude 𝜒
        // and the longitude offset from the central meridian
        let (xi_sin, xi_cos) = xi.sin_cos();
        let eta_sinh = eta.sinh();
        let chi = xi_sin.atan2(eta_sinh.hypot(xi_cos));
        let dl = eta_sinh.atan2(xi_cos);

        let lat = self
            .ellipsoid
            .latitude_conformal_to_geographic(chi, &self.conformal);
        let lon = angular::normalize_symmetric(grid.central_meridian().radians() + dl);

        // Scale factor and meridian convergence; τ of the stored negated
        // series is the negated τ' of the literature
        let tb = self.ellipsoid.latitude_geographic_to_reduced(lat).tan();
        let scale = qs / self.ellipsoid.semimajor_axis()
            * ((1. + tb * tb) * (xi_cos * xi_cos + eta_sinh * eta_sinh)
                / (sigma * sigma + tau * tau))
                .sqrt();
        let th = xi.tan() * eta.tanh();
        let convergence = (-tau + sigma * th).atan2(sigma + tau * th);

        RawTransform {
            x: lon,
            y: lat,
            scale,
            convergence,
        }
    }
}

impl Projection for UtmProjection {
    type Coordinate = UtmCoordinate;

    fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Resolve the owning grid and project into it. Fails for latitudes
    /// outside [-80°, 84°].
    fn to_euclidian(&self, coordinates: GlobalCoordinates) -> Result<UtmCoordinate, Error> {
        let grid = UtmGrid::from_coordinates(self, coordinates)?;
        let raw = self.project(coordinates, &grid);
        Ok(UtmCoordinate::with_extras(grid, raw))
    }

    /// Recover the geographic coordinates of a UTM coordinate. The owning
    /// grid rides inside the coordinate; it must belong to this projection.
    fn from_euclidian(&self, coordinate: &UtmCoordinate) -> Result<GlobalCoordinates, Error> {
        if coordinate.grid().projection() != self {
            return Err(Error::InvalidArgument(
                "coordinate belongs to another UTM projection",
            ));
        }
        let raw = self.unproject(coordinate.grid(), coordinate.x(), coordinate.y());
        Ok(GlobalCoordinates::new(
            Angle::from_radians(raw.y),
            Angle::from_radians(raw.x),
        ))
    }
}

// ----- T E S T S -----------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn krueger_against_proj() -> Result<(), Error> {
        // Validation values from PROJ:
        // echo 12 55 0 0 | cct -d18 +proj=utm +zone=32
        // The third-order truncation costs a few tenths of a millimeter.
        let p = UtmProjection::new(Ellipsoid::named("GRS80")?);

        let north = UtmGrid::new(&p, 32, 16)?; // 32U
        let raw = p.project(GlobalCoordinates::from_degrees(55., 12.), &north);
        assert_float_eq!(raw.x, 691_875.632_139_661, abs <= 1e-3);
        assert_float_eq!(raw.y, 6_098_907.825_005_012, abs <= 1e-3);

        let south = UtmGrid::new(&p, 32, 3)?; // 32F
        let raw = p.project(GlobalCoordinates::from_degrees(-55., 12.), &south);
        assert_float_eq!(raw.x, 691_875.632_139_661, abs <= 1e-3);
        assert_float_eq!(raw.y, 1e7 - 6_098_907.825_005_012, abs <= 1e-3);
        Ok(())
    }

    #[test]
    fn resolves_grid() -> Result<(), Error> {
        let p = UtmProjection::new(Ellipsoid::named("WGS84")?);
        let utm = p.to_euclidian(GlobalCoordinates::from_degrees(49.8459444, 8.7993944))?;
        assert_eq!(format!("{}", utm.grid()), "32U");
        assert_eq!(utm.x().floor(), 485_577.);
        assert_eq!(utm.y().floor(), 5_521_521.);

        // Out of the supported band
        assert!(p
            .to_euclidian(GlobalCoordinates::from_degrees(-80.5, 0.))
            .is_err());
        assert!(p
            .to_euclidian(GlobalCoordinates::from_degrees(84.5, 0.))
            .is_err());
        Ok(())
    }

    #[test]
    fn roundtrip() -> Result<(), Error> {
        let p = UtmProjection::new(Ellipsoid::named("WGS84")?);
        let lats = [-79.5, -45., -10., 0.5, 30., 55., 71., 83.5];
        let lons = [-179., -123., -60., -1., 0.5, 9., 44., 120., 179.9];

        // The third-order series round-trips to ~1e-9° over most of the
        // domain, degrading to a few nanodegrees at the polar edges
        for lat in lats {
            for lon in lons {
                let geo = GlobalCoordinates::from_degrees(lat, lon);
                let utm = p.to_euclidian(geo)?;
                let back = p.from_euclidian(&utm)?;
                assert_float_eq!(back.latitude().degrees(), lat, abs <= 1e-8);
                assert_float_eq!(back.longitude().degrees(), lon, abs <= 1e-8);
            }
        }
        Ok(())
    }

    #[test]
    fn scale_and_convergence() -> Result<(), Error> {
        let p = UtmProjection::new(Ellipsoid::named("WGS84")?);

        // On the central meridian of zone 32, the scale is k₀ and grid
        // north is true north
        let utm = p.to_euclidian(GlobalCoordinates::from_degrees(50., 9.))?;
        assert_float_eq!(utm.scale_factor(), UtmProjection::CENTRAL_SCALE, abs <= 1e-9);
        assert_float_eq!(utm.meridian_convergence().degrees(), 0., abs <= 1e-9);

        // East of it, in the northern hemisphere, the convergence is about
        // Δλ·sin 𝜙, and the scale grows
        let utm = p.to_euclidian(GlobalCoordinates::from_degrees(50., 10.))?;
        assert_float_eq!(utm.meridian_convergence().degrees(), 0.766, abs <= 1e-2);
        assert!(utm.scale_factor() > UtmProjection::CENTRAL_SCALE);

        // The forward-seeded and the lazily recomputed values agree
        let raw = UtmCoordinate::new(utm.grid().clone(), utm.x(), utm.y());
        assert_float_eq!(raw.scale_factor(), utm.scale_factor(), abs <= 1e-9);
        assert_float_eq!(
            raw.meridian_convergence().degrees(),
            utm.meridian_convergence().degrees(),
            abs <= 1e-9
        );
        Ok(())
    }

    #[test]
    fn projections_do_not_mix() -> Result<(), Error> {
        let wgs = UtmProjection::new(Ellipsoid::named("WGS84")?);
        let intl = UtmProjection::new(Ellipsoid::named("intl")?);
        let geo = GlobalCoordinates::from_degrees(55., 12.);

        let utm = wgs.to_euclidian(geo)?;
        assert!(intl.from_euclidian(&utm).is_err());
        Ok(())
    }
}
