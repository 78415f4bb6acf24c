use super::GeodeticCurve;
use super::GeodeticMeasurement;
use crate::math::angular;
use crate::Angle;
use crate::Ellipsoid;
use crate::Error;
use crate::GlobalCoordinates;
use crate::GlobalPosition;
use log::warn;

/// Solver for the direct and inverse geodetic problems on a given
/// ellipsoid, using the algorithm by Vincenty
/// ([1975](crate::Bibliography::Vin75)), with updates by the same author
/// ([1976](crate::Bibliography::Vin76)).
///
/// The Vincenty algorithm is relatively simple to implement, but for
/// near-antipodal cases it suffers from lack of convergence and loss of
/// accuracy; the inverse solver then falls back to the cardinal-direction
/// azimuth (NaN for the fully degenerate equatorial case) rather than
/// failing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeodeticCalculator {
    ellipsoid: Ellipsoid,
}

impl GeodeticCalculator {
    #[must_use]
    pub fn new(ellipsoid: Ellipsoid) -> GeodeticCalculator {
        GeodeticCalculator { ellipsoid }
    }

    #[must_use]
    pub fn ellipsoid(&self) -> Ellipsoid {
        self.ellipsoid
    }

    /// The direct geodetic problem: where do we end up, and at which
    /// heading, after walking `distance` meters from `start` along the
    /// geodesic leaving at azimuth `start_bearing`?
    ///
    /// A negative distance is an input error; walking backwards is done by
    /// turning around first.
    #[allow(non_snake_case)] // make it possible to mimic math notation from the original paper
    #[allow(clippy::many_single_char_names)]
    pub fn ending_coordinates(
        &self,
        start: GlobalCoordinates,
        start_bearing: Angle,
        distance: f64,
    ) -> Result<(GlobalCoordinates, Angle), Error> {
        if distance < 0. {
            return Err(Error::InvalidArgument("geodesic distance must be non-negative"));
        }

        let f = self.ellipsoid.flattening();
        let b = self.ellipsoid.semiminor_axis();

        // Coordinates of the point of origin, P1
        let B1 = start.latitude().radians();
        let L1 = start.longitude().radians();
        let azimuth = start_bearing.radians();

        // The latitude of P1 projected onto the auxiliary sphere
        let U1 = self.ellipsoid.latitude_geographic_to_reduced(B1);
        let U1cos = U1.cos();
        let U1sin = U1.sin();

        // σ_1, here ss1, is the angular distance on the aux sphere from P1 to equator
        let azicos = azimuth.cos();
        let ss1 = ((1. - f) * B1.tan()).atan2(azicos);

        // α, the forward azimuth of the geodesic at equator
        let aasin = U1cos * azimuth.sin();
        let aasin2 = aasin * aasin;
        let aacos2 = 1. - aasin2;

        // A and B according to Vincenty's update (1976)
        let eps = self.ellipsoid.second_eccentricity_squared();
        let us = aacos2 * eps;
        let t = (1. + us).sqrt();
        let k1 = (t - 1.) / (t + 1.);
        let A = (1. + k1 * k1 / 4.) / (1. - k1);
        let B = k1 * (1. - 3. * k1 * k1 / 8.);

        // Initial estimate for σ, the angular distance on the aux sphere
        let mut ss = distance / (b * A);
        let mut i: i32 = 0;
        let mut t1 = 0.;
        let mut ssmx2cos = 0.;

        while i < 1000 {
            i += 1;

            // 2σ_m, where σ_m is the latitude of the midpoint on the aux sphere
            let ssmx2 = 2. * ss1 + ss;

            // dσ = dss: The correction term for σ
            ssmx2cos = ssmx2.cos();
            let ssmx2cos2 = ssmx2cos * ssmx2cos;
            t1 = -1. + 2. * ssmx2cos2;
            let t2 = -3. + 4. * ssmx2cos2;
            let sssin = ss.sin();
            let sscos = ss.cos();
            let t3 = -3. + 4. * sssin * sssin;
            let dss = B * sssin * (ssmx2cos + B / 4. * (sscos * t1 - B / 6. * ssmx2cos * t2 * t3));

            let prevss = ss;
            ss = distance / (b * A) + dss;

            // Stop criterion: Last update of σ made little difference
            if (prevss - ss).abs() < 1e-13 {
                break;
            }
        }

        // B2: Latitude of destination
        let sssin = ss.sin();
        let sscos = ss.cos();
        let t4 = U1cos * azicos * sssin;
        let t5 = U1cos * azicos * sscos;
        let B2 = (U1sin * sscos + t4).atan2((1. - f) * aasin.hypot(U1sin * sssin - t5));

        // L2: Longitude of destination
        let azisin = azimuth.sin();
        let ll = (sssin * azisin).atan2(U1cos * sscos - U1sin * sssin * azicos);
        let C = (4. + f * (4. - 3. * aacos2)) * f * aacos2 / 16.;
        let L = ll - (1. - C) * f * aasin * (ss + C * sssin * (ssmx2cos + C * sscos * t1));
        let L2 = L1 + L;

        // Return azimuth
        let aa2 = aasin.atan2(U1cos * sscos * azicos - U1sin * sssin);

        // Construction canonicalizes a longitude pushed across the antimeridian
        let end = GlobalCoordinates::new(Angle::from_radians(B2), Angle::from_radians(L2));
        let end_bearing = Angle::from_radians(angular::normalize_positive(aa2));
        Ok((end, end_bearing))
    }

    /// The inverse geodetic problem: the geodesic between `start` and `end`.
    ///
    /// Iterates the longitude difference on the auxiliary sphere for at most
    /// 20 rounds, accepting convergence only from the second round on (the
    /// first round can satisfy the criterion spuriously). When the iteration
    /// does not converge — near-antipodal points — the azimuth falls back to
    /// due south/north by latitude ordering, or NaN when the latitudes are
    /// equal and every direction is as good as any other.
    #[allow(non_snake_case)]
    #[allow(clippy::many_single_char_names)]
    #[must_use]
    pub fn curve(&self, start: GlobalCoordinates, end: GlobalCoordinates) -> GeodeticCurve {
        let f = self.ellipsoid.flattening();
        let b = self.ellipsoid.semiminor_axis();

        let B1 = start.latitude().radians();
        let B2 = end.latitude().radians();
        let B = B2 - B1;

        let L1 = start.longitude().radians();
        let L2 = end.longitude().radians();
        let L = angular::normalize_symmetric(L2 - L1);

        // Below the micrometer level, we don't care about directions
        if L.hypot(B) < 1e-15 {
            return GeodeticCurve::new(self.ellipsoid, 0., Angle::ZERO);
        }

        let U1 = self.ellipsoid.latitude_geographic_to_reduced(B1);
        let U2 = self.ellipsoid.latitude_geographic_to_reduced(B2);

        let U1cos = U1.cos();
        let U2cos = U2.cos();
        let U1sin = U1.sin();
        let U2sin = U2.sin();
        let eps = self.ellipsoid.second_eccentricity_squared();

        // Initial estimate for λ, the longitude difference on the auxiliary sphere
        let mut ll = L;

        let mut aacos2 = 0.;
        let mut ssmx2cos = 0.;
        let mut sscos = 0.;
        let mut sssin = 0.;
        let mut ss = 0.;

        let mut converged = false;
        for i in 0..20 {
            // σ, the angular separation between the points
            let llsin = ll.sin();
            let llcos = ll.cos();
            let t1 = U2cos * llsin;
            let t2 = U1cos * U2sin - U2cos * U1sin * llcos;
            sssin = t1.hypot(t2);
            sscos = U1sin * U2sin + U1cos * U2cos * llcos;
            ss = sssin.atan2(sscos);

            // α, the forward azimuth of the geodesic at equator
            let aasin = U1cos * U2cos * llsin / sssin;
            aacos2 = 1. - aasin * aasin;

            // cosine of 2 times σ_m, the angular separation from the midpoint to the equator.
            // Equatorial geodesics make this 0/0; Vincenty defines it as 0.
            ssmx2cos = sscos - 2. * U1sin * U2sin / aacos2;
            if ssmx2cos.is_nan() {
                ssmx2cos = 0.;
            }
            let C = (4. + f * (4. - 3. * aacos2)) * f * aacos2 / 16.;
            let ll_next = L
                + (1. - C)
                    * f
                    * aasin
                    * (ss + C * sssin * (ssmx2cos + C * sscos * (-1. + 2. * ssmx2cos * ssmx2cos)));

            // The first round satisfies the criterion spuriously, so only
            // accept convergence from the second round on
            let dl = ((ll - ll_next) / ll_next).abs();
            ll = ll_next;
            if i > 1 && dl < 1e-13 {
                converged = true;
                break;
            }
        }

        // A and B according to Vincenty's update (1976)
        let us = aacos2 * eps;
        let t = (1. + us).sqrt();
        let k1 = (t - 1.) / (t + 1.);
        let A = (1. + k1 * k1 / 4.) / (1. - k1);
        let B = k1 * (1. - 3. * k1 * k1 / 8.);

        // The difference between the distance on the aux sphere and on the ellipsoid
        let t1 = -1. + 2. * ssmx2cos * ssmx2cos;
        let t2 = -3. + 4. * sssin * sssin;
        let t3 = -3. + 4. * ssmx2cos * ssmx2cos;
        let dss = B * sssin * (ssmx2cos + B / 4. * (sscos * t1 - B / 6. * ssmx2cos * t2 * t3));

        let s = b * A * (ss - dss);

        let azimuth = if converged {
            let llsin = ll.sin();
            let llcos = ll.cos();
            let a1 = (U2cos * llsin).atan2(U1cos * U2sin - U1sin * U2cos * llcos);
            Angle::from_radians(angular::normalize_positive(a1))
        } else if B1 > B2 {
            Angle::STRAIGHT
        } else if B1 < B2 {
            Angle::ZERO
        } else {
            warn!("inverse geodesic between equatorial antipodes did not converge, azimuth is NaN");
            Angle::NAN
        };

        GeodeticCurve::new(self.ellipsoid, s, azimuth)
    }

    /// The three dimensional measurement between two elevated positions:
    /// the geodesic recomputed on an ellipsoid whose semimajor axis is
    /// expanded to the mean elevation of the two positions, plus the
    /// elevation difference.
    #[must_use]
    pub fn measurement(&self, start: GlobalPosition, end: GlobalPosition) -> GeodeticMeasurement {
        let elev12 = (start.elevation() + end.elevation()) / 2.;
        let phi12 = (start.coordinates().latitude().radians()
            + end.coordinates().latitude().radians())
            / 2.;

        // An ellipsoid tailored to the average elevation and latitude
        let f = self.ellipsoid.flattening();
        let a = self.ellipsoid.semimajor_axis() + elev12 * (1. + f * phi12.sin());
        let calculator = GeodeticCalculator::new(Ellipsoid::new(a, f));

        let average_curve = calculator.curve(start.coordinates(), end.coordinates());
        GeodeticMeasurement::new(average_curve, end.elevation() - start.elevation())
    }

    /// `count` equally spaced points along the geodesic from `start` to
    /// `end`, endpoints included, by repeated application of the direct
    /// solver along the initial azimuth.
    ///
    /// `count < 2` is an input error. For `count == 2`, or coincident
    /// endpoints, the solver is not invoked at all.
    pub fn path(
        &self,
        start: GlobalCoordinates,
        end: GlobalCoordinates,
        count: usize,
    ) -> Result<Vec<GlobalCoordinates>, Error> {
        if count < 2 {
            return Err(Error::InvalidArgument("a geodetic path needs at least two points"));
        }
        if count == 2 || start == end {
            return Ok(vec![start, end]);
        }

        let curve = self.curve(start, end);
        let step = curve.ellipsoidal_distance() / (count - 1) as f64;

        let mut path = Vec::with_capacity(count);
        path.push(start);
        for i in 1..count - 1 {
            let (point, _) = self.ending_coordinates(start, curve.azimuth(), step * i as f64)?;
            path.push(point);
        }
        path.push(end);
        Ok(path)
    }
}

// ----- T E S T S -----------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn inverse() -> Result<(), Error> {
        // Darmstadt--Frankfurt, reference values from Karney's GeodSolve
        let calc = GeodeticCalculator::new(Ellipsoid::named("WGS84")?);
        let start = GlobalCoordinates::from_degrees(49.8459444, 8.7993944);
        let end = GlobalCoordinates::from_degrees(50.2160806, 8.6152611);

        let curve = calc.curve(start, end);
        assert_float_eq!(curve.ellipsoidal_distance(), 43232.317, abs <= 5e-3);
        assert_float_eq!(curve.azimuth().degrees(), 342.302315, abs <= 1e-5);
        assert_float_eq!(curve.reverse_azimuth().degrees(), 162.302315, abs <= 1e-5);
        Ok(())
    }

    #[test]
    fn inverse_and_direct_consistency() -> Result<(), Error> {
        // Copenhagen--Paris on GRS80; the expected values stem from
        // Karney: https://geographiclib.sourceforge.io/cgi-bin/GeodSolve
        let calc = GeodeticCalculator::new(Ellipsoid::named("GRS80")?);
        let p1 = GlobalCoordinates::from_degrees(55., 12.);
        let p2 = GlobalCoordinates::from_degrees(49., 2.);

        let d = calc.curve(p1, p2);
        assert_float_eq!(d.ellipsoidal_distance(), 956066.231959, abs <= 1e-5);
        assert_float_eq!(d.azimuth().degrees(), 360. - 130.15406042072, abs <= 1e-9);

        // And the other way round...
        let (b, end_bearing) = calc.ending_coordinates(p1, d.azimuth(), d.ellipsoidal_distance())?;
        assert_float_eq!(b.latitude().degrees(), 49., abs <= 1e-9);
        assert_float_eq!(b.longitude().degrees(), 2., abs <= 1e-9);
        assert_float_eq!(end_bearing.degrees(), 360. - 138.05257941874, abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn meridional() -> Result<(), Error> {
        // Due north: the λ iteration never converges here, and the
        // cardinal fallback is the exact answer
        let calc = GeodeticCalculator::new(Ellipsoid::named("WGS84")?);
        let start = GlobalCoordinates::from_degrees(50., 9.);
        let end = GlobalCoordinates::from_degrees(60., 9.);

        let up = calc.curve(start, end);
        assert_eq!(up.azimuth(), Angle::ZERO);
        let down = calc.curve(end, start);
        assert_eq!(down.azimuth(), Angle::STRAIGHT);
        assert_float_eq!(up.ellipsoidal_distance(), down.ellipsoidal_distance(), abs <= 1e-9);

        // Self consistency with the direct problem
        let (there, _) = calc.ending_coordinates(start, up.azimuth(), up.ellipsoidal_distance())?;
        assert_float_eq!(there.latitude().degrees(), 60., abs <= 1e-9);
        assert_float_eq!(there.longitude().degrees(), 9., abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn degenerate_antipodes() -> Result<(), Error> {
        let calc = GeodeticCalculator::new(Ellipsoid::named("WGS84")?);

        // Equatorial antipodes: no unique azimuth, NaN by definition
        let start = GlobalCoordinates::from_degrees(0., 10.);
        let end = GlobalCoordinates::from_degrees(0.99999998 * start.antipode().latitude().degrees(),
            start.antipode().longitude().degrees());
        let curve = calc.curve(start, end);
        assert!(curve.azimuth().is_nan());
        assert!(curve.reverse_azimuth().is_nan());
        assert!(curve.ellipsoidal_distance() > 1.9e7);

        // Slightly off the equator the fallback picks the cardinal direction
        let start = GlobalCoordinates::from_degrees(0.5, 10.);
        let end = GlobalCoordinates::from_degrees(-0.5, -170.);
        assert_eq!(calc.curve(start, end).azimuth(), Angle::STRAIGHT);
        assert_eq!(calc.curve(end, start).azimuth(), Angle::ZERO);
        Ok(())
    }

    #[test]
    fn equatorial() -> Result<(), Error> {
        // Along the equator the geodesic is the equator itself,
        // s = a·Δλ exactly
        let calc = GeodeticCalculator::new(Ellipsoid::named("WGS84")?);
        let start = GlobalCoordinates::from_degrees(0., 10.);
        let end = GlobalCoordinates::from_degrees(0., 20.);

        let curve = calc.curve(start, end);
        let expected = calc.ellipsoid().semimajor_axis() * 10f64.to_radians();
        assert_float_eq!(curve.ellipsoidal_distance(), expected, abs <= 1e-4);
        assert_float_eq!(curve.azimuth().degrees(), 90., abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn coincident() -> Result<(), Error> {
        let calc = GeodeticCalculator::new(Ellipsoid::named("WGS84")?);
        let p = GlobalCoordinates::from_degrees(55., 12.);
        let curve = calc.curve(p, p);
        assert_eq!(curve.ellipsoidal_distance(), 0.);
        assert_eq!(curve.azimuth(), Angle::ZERO);
        Ok(())
    }

    #[test]
    fn direct_rejects_negative_distance() -> Result<(), Error> {
        let calc = GeodeticCalculator::new(Ellipsoid::named("WGS84")?);
        let p = GlobalCoordinates::from_degrees(55., 12.);
        assert!(calc.ending_coordinates(p, Angle::ZERO, -1.).is_err());
        Ok(())
    }

    #[test]
    fn measurement() -> Result<(), Error> {
        let calc = GeodeticCalculator::new(Ellipsoid::named("WGS84")?);
        let a = GlobalCoordinates::from_degrees(49.8459444, 8.7993944);
        let b = GlobalCoordinates::from_degrees(50.2160806, 8.6152611);

        // At the surface, the measurement is the plain curve
        let m = calc.measurement(GlobalPosition::at_surface(a), GlobalPosition::at_surface(b));
        assert_eq!(m.elevation_change(), 0.);
        assert_float_eq!(m.point_to_point_distance(), 43232.317, abs <= 5e-3);

        // Elevation both lengthens the curve (larger working ellipsoid)
        // and adds the vertical leg
        let m = calc.measurement(GlobalPosition::new(a, 100.), GlobalPosition::new(b, 300.));
        assert_eq!(m.elevation_change(), 200.);
        assert!(m.average_curve().ellipsoidal_distance() > 43232.317);
        assert!(m.point_to_point_distance() > m.average_curve().ellipsoidal_distance());
        Ok(())
    }

    #[test]
    fn path() -> Result<(), Error> {
        let calc = GeodeticCalculator::new(Ellipsoid::named("GRS80")?);
        let p1 = GlobalCoordinates::from_degrees(55., 12.);
        let p2 = GlobalCoordinates::from_degrees(49., 2.);

        assert!(calc.path(p1, p2, 0).is_err());
        assert!(calc.path(p1, p2, 1).is_err());
        assert_eq!(calc.path(p1, p2, 2)?, vec![p1, p2]);
        assert_eq!(calc.path(p1, p1, 5)?, vec![p1, p1]);

        let path = calc.path(p1, p2, 5)?;
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], p1);
        assert_eq!(path[4], p2);

        // The interior points lie on the curve: each prefix is the
        // proportional share of the full distance
        let full = calc.curve(p1, p2).ellipsoidal_distance();
        for (i, p) in path.iter().enumerate().skip(1) {
            let partial = calc.curve(p1, *p).ellipsoidal_distance();
            assert_float_eq!(partial, full * i as f64 / 4., abs <= 1e-3);
        }
        Ok(())
    }
}
