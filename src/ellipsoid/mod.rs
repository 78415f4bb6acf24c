mod latitudes;
mod meridians;

use crate::Error;
use float_eq::float_eq;

/// Representation of a biaxial reference ellipsoid: a semimajor axis in
/// meters and a flattening.
///
/// Equality is approximate (the semimajor axes within 5 mm, the flattenings
/// within 1e-12), since ellipsoid parameters from different authorities for
/// the same figure routinely differ in the last few digits.
#[derive(Clone, Copy, Debug)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// WGS84 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::new(6_378_137.0, 1. / 298.257_223_563)
    }
}

impl PartialEq for Ellipsoid {
    fn eq(&self, other: &Self) -> bool {
        float_eq!(self.a, other.a, abs <= 5e-3) && float_eq!(self.f, other.f, abs <= 1e-12)
    }
}

impl Ellipsoid {
    /// User defined ellipsoid
    #[must_use]
    pub fn new(semimajor_axis: f64, flattening: f64) -> Ellipsoid {
        Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        }
    }

    /// User defined ellipsoid, given by semimajor axis and *inverse*
    /// flattening (the conventional publication form). An inverse
    /// flattening of 0 denotes a sphere.
    #[must_use]
    pub fn from_inverse_flattening(semimajor_axis: f64, inverse_flattening: f64) -> Ellipsoid {
        let f = if inverse_flattening == 0. {
            0.
        } else {
            1. / inverse_flattening
        };
        Ellipsoid::new(semimajor_axis, f)
    }

    /// Predefined ellipsoid, selected by conventional name
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        match name {
            "WGS84" => Ok(Ellipsoid::new(6_378_137.0, 1. / 298.257_223_563)),
            "GRS80" => Ok(Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7)),
            "intl" => Ok(Ellipsoid::new(6_378_388.0, 1. / 297.0)),
            "bessel" => Ok(Ellipsoid::new(6_377_397.155, 1. / 299.152_812_8)),
            "clrk66" => Ok(Ellipsoid::new(6_378_206.4, 1. / 294.978_698_2)),
            // The authalic-radius sphere used for spherical approximations
            "sphere" => Ok(Ellipsoid::new(6_371_000.0, 0.)),
            _ => Err(Error::UnknownEllipsoid(name.to_string())),
        }
    }

    // ----- Eccentricities --------------------------------------------------------

    /// The linear eccentricity *E* = sqrt(a² - b²)
    #[must_use]
    pub fn linear_eccentricity(&self) -> f64 {
        let b = self.semiminor_axis();
        (self.a * self.a - b * b).sqrt()
    }

    /// The squared eccentricity *e² = (a² - b²) / a² = f(2 - f)*
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2_f64 - self.f)
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// The squared second eccentricity *e'² = (a² - b²) / b² = e² / (1 - e²)*
    #[must_use]
    pub fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1.0 - es)
    }

    /// The second eccentricity *e'*
    #[must_use]
    pub fn second_eccentricity(&self) -> f64 {
        self.second_eccentricity_squared().sqrt()
    }

    // ----- Axes ------------------------------------------------------------------

    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    // ----- Flattenings -----------------------------------------------------------

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The inverse flattening, *1/f*. Infinite for a sphere.
    #[must_use]
    pub fn inverse_flattening(&self) -> f64 {
        1. / self.f
    }

    /// The second flattening, *f' = (a - b) / b*
    #[must_use]
    pub fn second_flattening(&self) -> f64 {
        let b = self.semiminor_axis();
        (self.a - b) / b
    }

    /// The third flattening, *n = (a - b) / (a + b) = f / (2 - f)*
    #[must_use]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    /// The aspect ratio, *b / a  =  1 - f  =  sqrt(1 - e²)*
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        1.0 - self.f
    }

    // ----- Curvatures ------------------------------------------------------------

    /// The radius of curvature in the prime vertical, *N*
    #[must_use]
    pub fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.f == 0.0 {
            return self.a;
        }
        self.a / (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).sqrt()
    }
}

// ----- Tests ---------------------------------------------------------------------
