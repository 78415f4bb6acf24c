//! The Universal Transverse Mercator system: the zone/band partition of the
//! globe ([`UtmGrid`]), the per-grid transverse Mercator transform
//! ([`UtmProjection`]) and the grid-tagged flat coordinate
//! ([`UtmCoordinate`]).

mod coordinate;
mod grid;
mod projection;

pub use coordinate::UtmCoordinate;
pub use grid::UtmGrid;
pub use projection::UtmProjection;
