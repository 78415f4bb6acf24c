//! A global addressing scheme: every UTM grid is rastered into fixed-size
//! square cells, and every cell gets a globally unique 64 bit integer id,
//! reconstructible by plain arithmetic.

use crate::projection::Projection;
use crate::Angle;
use crate::Error;
use crate::GlobalCoordinates;
use crate::UtmCoordinate;
use crate::UtmGrid;
use crate::UtmProjection;
use log::debug;

/// A partition of the globe into square cells of a fixed size, on top of
/// the UTM grids.
///
/// Each grid is covered by a `modulus` × `modulus` raster of cells,
/// anchored at the grid's projected [origin](UtmGrid::origin); the modulus
/// is the smallest power of two covering the flat extent of *any* grid on
/// the globe, so a mesh number decomposes into (grid ordinal, column, row)
/// by plain integer arithmetic, with headroom at the grid edges.
///
/// Construction sweeps all 1197 grids once for the global extents; reuse
/// the instance.
#[derive(Clone, Debug)]
pub struct GlobalMesh {
    projection: UtmProjection,
    cell_size: u32,
    modulus: u64,
    cells_per_grid: u64,
}

impl GlobalMesh {
    /// One square kilometer cells
    pub const DEFAULT_CELL_SIZE: u32 = 1000;

    /// Neighborhood enumeration is supported for rings 0 through 3
    pub const MAX_RING: u32 = 3;

    /// A mesh with cells of `cell_size` × `cell_size` meters. Cells of a
    /// meter or less, and cells too large to put at least two on each grid
    /// axis, are input errors.
    pub fn new(projection: UtmProjection, cell_size: u32) -> Result<GlobalMesh, Error> {
        if cell_size < 2 {
            return Err(Error::InvalidArgument("mesh cell size must be at least 2 meters"));
        }

        // The bounded one-time sweep: the flat extent maxima over the globe
        let mut max_width: f64 = 0.;
        let mut max_height: f64 = 0.;
        for ordinal in 0..UtmGrid::NUMBER_OF_GRIDS {
            if !UtmGrid::is_valid_ordinal(ordinal) {
                continue;
            }
            let grid = UtmGrid::from_ordinal(&projection, ordinal)?;
            max_width = max_width.max(grid.map_width());
            max_height = max_height.max(grid.map_height());
        }

        let size = cell_size as f64;
        let cells_x = (max_width / size).ceil() as u64;
        let cells_y = (max_height / size).ceil() as u64;
        if cells_x < 2 || cells_y < 2 {
            return Err(Error::InvalidArgument(
                "mesh cell size too large: a grid must hold at least 2 cells per axis",
            ));
        }

        let modulus = cells_x.max(cells_y).next_power_of_two();
        let cells_per_grid = modulus * modulus;
        debug!("global mesh: {cell_size} m cells, modulus {modulus}, {cells_per_grid} cells per grid");

        Ok(GlobalMesh {
            projection,
            cell_size,
            modulus,
            cells_per_grid,
        })
    }

    /// A mesh with the default kilometer cells
    pub fn with_default_cell_size(projection: UtmProjection) -> Result<GlobalMesh, Error> {
        Self::new(projection, Self::DEFAULT_CELL_SIZE)
    }

    // ----- A C C E S S O R S -----------------------------------------------

    #[must_use]
    pub fn projection(&self) -> &UtmProjection {
        &self.projection
    }

    /// The cell edge length, in meters
    #[must_use]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// The per-axis cell count of the raster covering one grid
    #[must_use]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// The number of cell slots per grid, modulus²
    #[must_use]
    pub fn cell_count_per_grid(&self) -> u64 {
        self.cells_per_grid
    }

    /// The size of the global mesh number space: cell slots per grid times
    /// the 1200 theoretical grid slots. Numbers decoding into one of the
    /// three void band-X slots do not address a cell, but they keep the
    /// ordinal arithmetic dense.
    #[must_use]
    pub fn global_cell_count(&self) -> u64 {
        self.cells_per_grid * UtmGrid::NUMBER_OF_GRIDS as u64
    }

    // ----- M E S H   N U M B E R S -----------------------------------------

    /// The mesh number of the cell containing the given position
    pub fn mesh_number(&self, coordinates: GlobalCoordinates) -> Result<u64, Error> {
        self.mesh_number_of(&self.projection.to_euclidian(coordinates)?)
    }

    /// The mesh number of the cell containing (latitude, longitude)
    pub fn mesh_number_for(&self, latitude: Angle, longitude: Angle) -> Result<u64, Error> {
        self.mesh_number(GlobalCoordinates::new(latitude, longitude))
    }

    /// The mesh number of the cell containing an already-projected
    /// coordinate
    pub fn mesh_number_of(&self, coordinate: &UtmCoordinate) -> Result<u64, Error> {
        let origin = coordinate.grid().origin();
        let size = self.cell_size as f64;
        let x = ((coordinate.easting() - origin.easting()) / size).floor();
        let y = ((coordinate.northing() - origin.northing()) / size).floor();
        if x < 0. || y < 0. || x >= self.modulus as f64 || y >= self.modulus as f64 {
            return Err(Error::InvalidArgument(
                "coordinate outside the flat extent of its grid",
            ));
        }
        Ok(self.compose(coordinate.grid().ordinal(), x as u64, y as u64))
    }

    fn compose(&self, ordinal: u16, x: u64, y: u64) -> u64 {
        ordinal as u64 * self.cells_per_grid + x * self.modulus + y
    }

    /// Split a mesh number into its grid and 0-based (column, row),
    /// validating the number and rejecting the void grid slots
    fn decompose(&self, mesh_number: u64) -> Result<(UtmGrid, u64, u64), Error> {
        if mesh_number >= self.global_cell_count() {
            return Err(Error::MeshNumberOutOfRange(mesh_number));
        }
        let ordinal = (mesh_number / self.cells_per_grid) as u16;
        let grid = UtmGrid::from_ordinal(&self.projection, ordinal)?;
        let rel = mesh_number % self.cells_per_grid;
        Ok((grid, rel / self.modulus, rel % self.modulus))
    }

    /// The grid a mesh number belongs to
    pub fn grid(&self, mesh_number: u64) -> Result<UtmGrid, Error> {
        Ok(self.decompose(mesh_number)?.0)
    }

    fn cell_point(&self, mesh_number: u64, dx: f64, dy: f64) -> Result<UtmCoordinate, Error> {
        let (grid, x, y) = self.decompose(mesh_number)?;
        let origin = grid.origin();
        let size = self.cell_size as f64;
        Ok(UtmCoordinate::new(
            grid,
            origin.easting() + (x as f64 + dx) * size,
            origin.northing() + (y as f64 + dy) * size,
        ))
    }

    /// The center of the addressed cell
    pub fn center_of(&self, mesh_number: u64) -> Result<UtmCoordinate, Error> {
        self.cell_point(mesh_number, 0.5, 0.5)
    }

    /// The corner of the addressed cell with the smallest easting and
    /// northing. This one belongs to the cell; the other three corners
    /// belong to its neighbors.
    pub fn lower_left_of(&self, mesh_number: u64) -> Result<UtmCoordinate, Error> {
        self.cell_point(mesh_number, 0., 0.)
    }

    pub fn lower_right_of(&self, mesh_number: u64) -> Result<UtmCoordinate, Error> {
        self.cell_point(mesh_number, 1., 0.)
    }

    pub fn upper_left_of(&self, mesh_number: u64) -> Result<UtmCoordinate, Error> {
        self.cell_point(mesh_number, 0., 1.)
    }

    pub fn upper_right_of(&self, mesh_number: u64) -> Result<UtmCoordinate, Error> {
        self.cell_point(mesh_number, 1., 1.)
    }

    // ----- N E I G H B O R H O O D S ---------------------------------------

    /// The cells of the square ring at Chebyshev distance `ring` around the
    /// addressed cell: 1, 8, 16 or 24 positions for rings 0 to 3.
    ///
    /// Positions beyond the populated raster of the cell's grid hop into
    /// the West/East neighbor grid (wrapping the column against the
    /// neighbor's raster), resp. the North/South one. Where no unique such
    /// grid exists — polar edges, the band-X exception columns — the
    /// position contributes nothing; the result may legitimately be
    /// shorter than the full ring.
    pub fn neighborhood(&self, mesh_number: u64, ring: u32) -> Result<Vec<u64>, Error> {
        if ring > Self::MAX_RING {
            return Err(Error::InvalidArgument("neighborhood rings beyond 3 are unsupported"));
        }
        let (grid, x, y) = self.decompose(mesh_number)?;
        if ring == 0 {
            return Ok(vec![mesh_number]);
        }

        let r = ring as i64;
        let mut result = Vec::with_capacity(8 * r as usize);
        for dx in -r..=r {
            for dy in -r..=r {
                if dx.abs().max(dy.abs()) != r {
                    continue;
                }
                if let Some(id) = self.translate(&grid, x as i64 + dx, y as i64 + dy) {
                    result.push(id);
                }
            }
        }
        Ok(result)
    }

    /// The per-grid raster actually covered by cells. Everything at or
    /// beyond these counts belongs to a neighbor grid.
    fn populated_cells(&self, grid: &UtmGrid) -> (i64, i64) {
        let size = self.cell_size as f64;
        (
            (grid.map_width() / size).ceil() as i64,
            (grid.map_height() / size).ceil() as i64,
        )
    }

    /// Resolve a possibly out-of-raster cell position to a mesh number,
    /// hopping at most one grid per axis — west/east first, then
    /// north/south from the hopped grid. `None` where no (unique) neighbor
    /// grid exists.
    fn translate(&self, grid: &UtmGrid, x: i64, y: i64) -> Option<u64> {
        let mut grid = grid.clone();
        let mut x = x;
        let mut y = y;

        let (columns, _) = self.populated_cells(&grid);
        if x < 0 {
            grid = grid.west();
            x += self.populated_cells(&grid).0;
            if x < 0 {
                return None;
            }
        } else if x >= columns {
            x -= columns;
            grid = grid.east();
            if x >= self.populated_cells(&grid).0 {
                return None;
            }
        }

        let (_, rows) = self.populated_cells(&grid);
        if y < 0 {
            grid = grid.south().ok()?;
            y += self.populated_cells(&grid).1;
            if y < 0 {
                return None;
            }
        } else if y >= rows {
            y -= rows;
            grid = grid.north().ok()?;
            if y >= self.populated_cells(&grid).1 {
                return None;
            }
        }

        Some(self.compose(grid.ordinal(), x as u64, y as u64))
    }
}

// ----- T E S T S -----------------------------------------------------------
