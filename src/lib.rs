//! *Geodetic and map projection mathematics with a global mesh index.*
//!
//! Three tightly coupled areas are covered:
//!
//! - The direct and inverse geodetic problems on a reference ellipsoid,
//!   solved with Vincenty's nested-equation method
//!   ([`GeodeticCalculator`]).
//! - Conversions between geographic coordinates and flat-map coordinates
//!   under the Mercator family of projections: the spherical and elliptical
//!   single-map variants ([`SphericalMercator`], [`EllipticalMercator`]),
//!   and the zone/band partitioned Universal Transverse Mercator
//!   ([`UtmProjection`], [`UtmGrid`]).
//! - A partition of the globe into fixed-size square cells addressed by
//!   globally unique integer ids, built on top of the UTM grids
//!   ([`GlobalMesh`]).
//!
//! All types are plain values: construction may do some bounded
//! precomputation, after which every operation is a deterministic pure
//! function with no I/O and no shared mutable state. Lazily derived fields
//! are memoized idempotently, so instances may be shared freely between
//! threads.

use thiserror::Error;

pub mod angle;
pub mod coordinate;
pub mod ellipsoid;
pub mod geodetic;
pub mod math;
pub mod mercator;
pub mod mesh;
pub mod projection;
pub mod utm;

pub use angle::Angle;
pub use coordinate::GlobalCoordinates;
pub use coordinate::GlobalPosition;
pub use ellipsoid::Ellipsoid;
pub use geodetic::GeodeticCalculator;
pub use geodetic::GeodeticCurve;
pub use geodetic::GeodeticMeasurement;
pub use mercator::EllipticalMercator;
pub use mercator::MercatorCoordinate;
pub use mercator::SphericalMercator;
pub use mesh::GlobalMesh;
pub use projection::EuclidianCoordinate;
pub use projection::Projection;
pub use utm::UtmCoordinate;
pub use utm::UtmGrid;
pub use utm::UtmProjection;

pub use crate::Direction::Fwd;
pub use crate::Direction::Inv;

/// `Fwd`: Run a two-way function, method or operation in the *forward*
/// direction. `Inv`: Run it in the *inverse* direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Fwd,
    Inv,
}

/// The bread-and-butter of the crate: everything fallible returns
/// `Result<_, Error>`.
///
/// Precondition violations ([`Error::InvalidArgument`] and the range
/// variants) are reported immediately and never retried internally.
/// Topological absence ([`Error::NoSuchNeighbor`],
/// [`Error::NoUniqueNeighbor`]) is a condition callers are expected to
/// branch on, not a misuse.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("unknown ellipsoid '{0}'")]
    UnknownEllipsoid(String),

    #[error("latitude {latitude}° outside the supported range [{min}°, {max}°]")]
    LatitudeOutOfRange { latitude: f64, min: f64, max: f64 },

    #[error("no UTM grid at zone {zone}, band '{band}'")]
    NoSuchGrid { zone: u8, band: char },

    #[error("UTM grid ordinal {0} does not identify a grid")]
    OrdinalOutOfRange(u16),

    #[error("mesh number {0} out of range")]
    MeshNumberOutOfRange(u64),

    #[error("the grid has no {0} neighbor")]
    NoSuchNeighbor(&'static str),

    #[error("the {0} neighbor of the grid is not unique")]
    NoUniqueNeighbor(&'static str),
}

/// Literature, that has been useful in designing and implementing this crate.
pub enum Bibliography {
    /// R.E. Deakin, M.N. Hunter and C.F.F. Karney (2012):
    /// *A fresh look at the UTM projection: Karney-Krueger equations*.
    /// Surveying and Spatial Sciences Institute (SSSI)
    /// Land Surveying Commission National Conference,
    /// Melbourne, 18-21 April, 2012.
    Dea12,

    /// Charles F.F. Karney (2010): *Transverse Mercator with an accuracy of a few nanometers*.
    /// [pdf](https://arxiv.org/pdf/1002.1417.pdf)
    Kar10,

    /// Charles F.F. Karney (2011): *Transverse Mercator with an accuracy of a few nanometers*.
    /// J. Geodesy. 85(8): 475–485.
    /// [DOI](https://doi.org/10.1007/s00190-011-0445-3).
    Kar11,

    /// L. Krüger (1912). Konforme Abbildung des Erdellipsoids in der Ebene.
    /// Royal Prussian Geodetic Institute, New Series 52.
    /// [DOI](https://dx.doi.org/10.2312/GFZ.b103-krueger28).
    Kru12,

    /// John P. Snyder (1987): *Map projections — A working manual*.
    /// USGS Professional Paper 1395.
    Sny87,

    /// T. Vincenty (1975) Direct and Inverse Solutions of Geodesics on the Ellipsoid
    /// with application of nested equations.
    /// Survey Review, 23(176): 88-93.
    /// [pdf](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf)
    /// (See also Wikipedia: [Vincenty's formulae](https://en.wikipedia.org/wiki/Vincenty's_formulae)).
    Vin75,

    /// T. Vincenty (1976). Correspondence. Survey Review. 23(180): 294.
    Vin76,
}
