use crate::Ellipsoid;
use crate::Error;
use crate::GlobalCoordinates;

/// A flat-map coordinate, tied to the frame of the projection that produced
/// it.
///
/// The frame rides inside the concrete coordinate type (the Mercator
/// variant and ellipsoid, or the UTM grid), so coordinates from different
/// projection families can never meet: passing a Mercator coordinate to the
/// UTM inverse transform is a type error, not a runtime check. Within one
/// family, [`same_frame`](EuclidianCoordinate::same_frame) answers whether
/// two coordinates live on the same flat map and are thus comparable.
pub trait EuclidianCoordinate: Sized {
    fn x(&self) -> f64;
    fn y(&self) -> f64;

    /// Do the two coordinates live on the same flat map?
    fn same_frame(&self, other: &Self) -> bool;

    /// The plane distance between two coordinates of the same frame.
    /// Coordinates of different frames have no meaningful distance, and
    /// asking for one is an input error.
    fn distance_to(&self, other: &Self) -> Result<f64, Error> {
        if !self.same_frame(other) {
            return Err(Error::InvalidArgument(
                "coordinates belong to different map frames",
            ));
        }
        Ok((self.x() - other.x()).hypot(self.y() - other.y()))
    }
}

/// A bidirectional mapping between geographic coordinates on a reference
/// ellipsoid and coordinates on a flat map.
///
/// `to_euclidian` and `from_euclidian` are mutual near-inverses: round
/// tripping a position within the projection's supported domain recovers it
/// to far below the precision of any survey.
pub trait Projection {
    /// The flat-map coordinate type of this projection family
    type Coordinate: EuclidianCoordinate;

    fn ellipsoid(&self) -> &Ellipsoid;

    /// Project geographic coordinates onto the flat map
    fn to_euclidian(&self, coordinates: GlobalCoordinates) -> Result<Self::Coordinate, Error>;

    /// Recover the geographic coordinates of a flat-map coordinate
    fn from_euclidian(&self, coordinate: &Self::Coordinate) -> Result<GlobalCoordinates, Error>;
}
