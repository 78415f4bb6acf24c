use super::Ellipsoid;
use crate::math::fourier;
use crate::math::fourier_coefficients;
use crate::math::gudermannian;
use crate::math::sinhpsi_to_tanphi;
use crate::math::FourierCoefficients;
use crate::math::PolynomialCoefficients;
use crate::Direction;

/// Coefficient polynomials in the third flattening for the conformal
/// latitude series: geographic to conformal forward, conformal to
/// geographic inverse. [Karney 2011](crate::Bibliography::Kar11),
/// truncated at order 3.
#[rustfmt::skip]
const CONFORMAL: PolynomialCoefficients = PolynomialCoefficients {
    fwd: [
        [-2.,      2. / 3.,   4. / 3.],
        [ 0.,      5. / 3., -16. / 15.],
        [ 0.,      0.,      -26. / 15.],
    ],
    inv: [
        [ 2.,     -2. / 3.,  -2.],
        [ 0.,      7. / 3.,  -8. / 5.],
        [ 0.,      0.,       56. / 15.],
    ],
};

// ----- Latitudes -------------------------------------------------------------
impl Ellipsoid {
    // --- Classic latitudes: geographic & reduced ---

    /// Geographic latitude, 𝜙, to reduced latitude, 𝛽
    #[must_use]
    pub fn latitude_geographic_to_reduced(&self, latitude: f64) -> f64 {
        latitude.tan().atan2(1. / (1. - self.flattening()))
    }

    /// Reduced latitude, 𝛽, to geographic latitude, 𝜙
    #[must_use]
    pub fn latitude_reduced_to_geographic(&self, latitude: f64) -> f64 {
        latitude.tan().atan2(1. - self.flattening())
    }

    // --- Isometric latitude ---

    /// Geographic latitude to Isometric latitude, 𝜓
    /// (or vice versa if `direction` is `Inv`).
    ///
    /// The isometric latitude is the vertical coordinate of the unit-radius
    /// Mercator projection.
    #[must_use]
    pub fn isometric_latitude(&self, latitude: f64, direction: Direction) -> f64 {
        let e = self.eccentricity();
        if direction == Direction::Fwd {
            return gudermannian::inv(latitude) - (e * latitude.sin()).atanh() * e;
        }
        sinhpsi_to_tanphi(latitude.sinh(), e).atan()
    }

    // --- Conformal latitude ---

    /// Geographic latitude, 𝜙, to conformal latitude, 𝜒, in closed form
    /// via the isometric latitude: 𝜒 = gd(𝜓). Exact to machine precision;
    /// the series counterpart lives in the coefficients obtained from
    /// [`coefficients_for_conformal_latitude_computations`](Ellipsoid::coefficients_for_conformal_latitude_computations).
    #[must_use]
    pub fn latitude_geographic_to_conformal(&self, latitude: f64) -> f64 {
        gudermannian::fwd(self.isometric_latitude(latitude, Direction::Fwd))
    }

    /// Conformal latitude, 𝜒, to geographic, 𝜙, by Clenshaw summation of
    /// the inverse series
    #[must_use]
    pub fn latitude_conformal_to_geographic(
        &self,
        conformal_latitude: f64,
        coefficients: &FourierCoefficients,
    ) -> f64 {
        conformal_latitude + fourier::sin(2. * conformal_latitude, &coefficients.inv)
    }

    /// Obtain the coefficients needed for working with conformal latitudes
    #[must_use]
    pub fn coefficients_for_conformal_latitude_computations(&self) -> FourierCoefficients {
        fourier_coefficients(self.third_flattening(), &CONFORMAL)
    }
}

// ----- Tests ---------------------------------------------------------------------
