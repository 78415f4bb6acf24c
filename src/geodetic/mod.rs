//! The direct and inverse geodetic problems on a reference ellipsoid,
//! solved with Vincenty's method ([1975](crate::Bibliography::Vin75),
//! with the updates from [1976](crate::Bibliography::Vin76)).

mod calculator;
mod curve;

pub use calculator::GeodeticCalculator;
pub use curve::GeodeticCurve;
pub use curve::GeodeticMeasurement;
