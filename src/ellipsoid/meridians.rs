use super::Ellipsoid;
use crate::math::horner;
use std::f64::consts::FRAC_PI_2;

/// The power series for the normalized meridian arc unit, in the squared
/// third flattening. [Karney 2010](crate::Bibliography::Kar10) eq. (29)
const MERIDIAN_ARC_COEFFICIENTS: [f64; 5] = [1., 1. / 4., 1. / 64., 1. / 256., 25. / 16384.];

// ----- Meridian geometry -----------------------------------------------------
impl Ellipsoid {
    /// The Normalized Meridian Arc Unit, *Qn*, is the mean length of one radian
    /// of the meridian. "Normalized", because we measure it in units of the
    /// semimajor axis, *a*.
    ///
    /// König und Weise p.50 (96), p.19 (38b), p.5 (2), here using the extended
    /// version from [Karney 2010](crate::Bibliography::Kar10) eq. (29)
    #[must_use]
    pub fn normalized_meridian_arc_unit(&self) -> f64 {
        let n = self.third_flattening();
        horner(n * n, &MERIDIAN_ARC_COEFFICIENTS) / (1. + n)
    }

    /// The rectifying radius, *A*, is the radius of a sphere of the same
    /// meridian circumference as the ellipsoid: *A = a · Qn*. One radian of
    /// rectifying latitude corresponds to *A* meters of meridian arc, which
    /// makes *A* the natural unit of the transverse Mercator series.
    ///
    /// [Karney 2010](crate::Bibliography::Kar10) eq. (29), elaborated in
    /// [Deakin et al 2012](crate::Bibliography::Dea12) eq. (41)
    #[must_use]
    pub fn rectifying_radius(&self) -> f64 {
        self.semimajor_axis() * self.normalized_meridian_arc_unit()
    }

    /// The Meridian Quadrant, *Qm*, is the distance from the equator to one of the poles.
    /// i.e. *π/2 · Qn · a*, where *Qn* is the
    /// [normalized meridian arc unit](Ellipsoid::normalized_meridian_arc_unit)
    #[must_use]
    pub fn meridian_quadrant(&self) -> f64 {
        self.semimajor_axis() * FRAC_PI_2 * self.normalized_meridian_arc_unit()
    }
}

// ----- Tests ---------------------------------------------------------------------
