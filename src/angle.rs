use crate::math::angular;
use float_eq::float_eq;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// An angular measurement, held in degrees.
///
/// `Angle` is a plain scalar: comparisons and arithmetic work directly on
/// the unwrapped degree value, so `Angle::new(360.)` and `Angle::ZERO` are
/// different angles. Construction is always explicit — there is no blanket
/// conversion from bare numbers, which keeps degrees, radians and unitless
/// quantities from being confused silently.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle {
    degrees: f64,
}

// ----- C O N S T R U C T O R S ---------------------------------------------

impl Angle {
    /// The tolerance used by [`approximates`](Angle::approximates)
    pub const DEFAULT_TOLERANCE: f64 = 1e-10;

    pub const ZERO: Angle = Angle::new(0.);
    pub const RIGHT: Angle = Angle::new(90.);
    pub const STRAIGHT: Angle = Angle::new(180.);
    pub const FULL: Angle = Angle::new(360.);
    pub const NAN: Angle = Angle::new(f64::NAN);

    /// An angle of `degrees` degrees
    #[must_use]
    pub const fn new(degrees: f64) -> Angle {
        Angle { degrees }
    }

    /// Synonym for [`new`](Angle::new), for call sites where the unit
    /// deserves spelling out
    #[must_use]
    pub const fn from_degrees(degrees: f64) -> Angle {
        Angle { degrees }
    }

    #[must_use]
    pub fn from_radians(radians: f64) -> Angle {
        Angle {
            degrees: radians.to_degrees(),
        }
    }

    /// An angle given as degrees, minutes and seconds-with-decimals.
    /// The sign is taken from the degree component.
    #[must_use]
    pub fn from_dms(degrees: i32, minutes: u16, seconds: f64) -> Angle {
        Angle::new(angular::dms_to_dd(degrees, minutes, seconds))
    }

    // ----- A C C E S S O R S -----------------------------------------------

    #[must_use]
    pub const fn degrees(&self) -> f64 {
        self.degrees
    }

    #[must_use]
    pub fn radians(&self) -> f64 {
        self.degrees.to_radians()
    }

    /// The magnitude of the angle. Idempotent.
    #[must_use]
    pub fn abs(&self) -> Angle {
        Angle::new(self.degrees.abs())
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.degrees.is_nan()
    }

    /// Approximate equality, within [`DEFAULT_TOLERANCE`](Angle::DEFAULT_TOLERANCE)
    /// degrees. NaN approximates nothing, not even itself.
    #[must_use]
    pub fn approximates(&self, other: Angle) -> bool {
        float_eq!(self.degrees, other.degrees, abs <= Angle::DEFAULT_TOLERANCE)
    }
}

// ----- O P E R A T O R S ---------------------------------------------------

impl Add for Angle {
    type Output = Angle;
    fn add(self, other: Angle) -> Angle {
        Angle::new(self.degrees + other.degrees)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, other: Angle) -> Angle {
        Angle::new(self.degrees - other.degrees)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle::new(-self.degrees)
    }
}

impl Mul<f64> for Angle {
    type Output = Angle;
    fn mul(self, factor: f64) -> Angle {
        Angle::new(self.degrees * factor)
    }
}

impl Div<f64> for Angle {
    type Output = Angle;
    fn div(self, divisor: f64) -> Angle {
        Angle::new(self.degrees / divisor)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees)
    }
}

// ----- T E S T S -----------------------------------------------------------
