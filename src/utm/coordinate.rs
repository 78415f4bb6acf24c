use super::projection::RawTransform;
use super::UtmGrid;
use crate::projection::EuclidianCoordinate;
use crate::Angle;
use float_eq::float_eq;
use once_cell::sync::OnceCell;
use std::fmt;

/// The derived point properties: computed eagerly by the forward
/// projection, lazily from the inverse otherwise
#[derive(Clone, Copy, Debug)]
struct Extras {
    scale: f64,
    /// radians
    convergence: f64,
}

/// A coordinate in the flat frame of one UTM grid: easting and northing in
/// meters, tagged with the owning grid.
///
/// The point scale factor and the meridian convergence are memoized on
/// first access; two racing threads at worst compute the same numbers
/// twice.
#[derive(Clone, Debug)]
pub struct UtmCoordinate {
    grid: UtmGrid,
    easting: f64,
    northing: f64,
    extras: OnceCell<Extras>,
}

impl UtmCoordinate {
    /// The coordinate tolerance of [`PartialEq`], in meters. Deliberately
    /// coarser than for the single-map projections: centimeters are below
    /// the meaning of a UTM grid reference.
    pub const DEFAULT_PRECISION: f64 = 1e-2;

    /// A coordinate at (easting, northing) in the frame of `grid`
    #[must_use]
    pub fn new(grid: UtmGrid, easting: f64, northing: f64) -> UtmCoordinate {
        UtmCoordinate {
            grid,
            easting,
            northing,
            extras: OnceCell::new(),
        }
    }

    /// A coordinate with the scale factor and convergence already known
    /// from the forward transform
    pub(crate) fn with_extras(grid: UtmGrid, raw: RawTransform) -> UtmCoordinate {
        UtmCoordinate {
            grid,
            easting: raw.x,
            northing: raw.y,
            extras: OnceCell::with_value(Extras {
                scale: raw.scale,
                convergence: raw.convergence,
            }),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &UtmGrid {
        &self.grid
    }

    /// The easting, including the false easting of the frame
    #[must_use]
    pub fn easting(&self) -> f64 {
        self.easting
    }

    /// The northing, including the false northing of southern frames
    #[must_use]
    pub fn northing(&self) -> f64 {
        self.northing
    }

    fn extras(&self) -> &Extras {
        self.extras.get_or_init(|| {
            let raw = self
                .grid
                .projection()
                .unproject(&self.grid, self.easting, self.northing);
            Extras {
                scale: raw.scale,
                convergence: raw.convergence,
            }
        })
    }

    /// The point scale factor: the local exaggeration of distances on the
    /// grid plane
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.extras().scale
    }

    /// The meridian convergence: the angle from grid north to true north
    #[must_use]
    pub fn meridian_convergence(&self) -> Angle {
        Angle::from_radians(self.extras().convergence)
    }
}

impl EuclidianCoordinate for UtmCoordinate {
    fn x(&self) -> f64 {
        self.easting
    }

    fn y(&self) -> f64 {
        self.northing
    }

    fn same_frame(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl PartialEq for UtmCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.same_frame(other)
            && float_eq!(self.easting, other.easting, abs <= UtmCoordinate::DEFAULT_PRECISION)
            && float_eq!(self.northing, other.northing, abs <= UtmCoordinate::DEFAULT_PRECISION)
    }
}

impl fmt::Display for UtmCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.0} {:.0}", self.grid, self.easting, self.northing)
    }
}

// ----- T E S T S -----------------------------------------------------------
