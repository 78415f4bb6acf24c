//! The UTM grid cells: 60 zones of nominally 6° of longitude times 20
//! bands of nominally 8° of latitude, with the classic exceptions — the
//! widened 32V cell along the Norwegian coast, the 12° tall band X, and
//! the three void cells 32X/34X/36X around Svalbard whose space is taken
//! by their widened neighbors.

use super::projection::UtmProjection;
use super::UtmCoordinate;
use crate::Angle;
use crate::Error;
use crate::GlobalCoordinates;
use once_cell::sync::OnceCell;
use std::fmt;

/// The band letters, equator-ward to pole-ward; I and O are skipped to
/// avoid confusion with digits
const BAND_LETTERS: &[u8] = b"CDEFGHJKLMNPQRSTUVWX";

/// Shrink applied to the derived corners, in degrees, so that a corner
/// resolves back into its own cell rather than the neighbor's
const CORNER_EPSILON: f64 = 1e-12;

/// The projected geometry of a cell: the component-wise minimal corner of
/// the flat map image, and its extents
#[derive(Clone, Copy, Debug)]
struct Chart {
    easting: f64,
    northing: f64,
    width: f64,
    height: f64,
}

/// One cell of the UTM grid, identified by zone and band, tagged with the
/// projection it belongs to.
///
/// The projected origin and flat extents are computed lazily on first
/// access and memoized; racing threads at worst duplicate the (pure)
/// computation.
#[derive(Clone, Debug)]
pub struct UtmGrid {
    projection: UtmProjection,
    zone: u8,
    band: u8,
    // Geographic cell geometry, in degrees
    ll_latitude: f64,
    ll_longitude: f64,
    width: f64,
    height: f64,
    chart: OnceCell<Chart>,
}

impl PartialEq for UtmGrid {
    fn eq(&self, other: &Self) -> bool {
        self.zone == other.zone && self.band == other.band && self.projection == other.projection
    }
}

impl fmt::Display for UtmGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.zone, self.band_letter())
    }
}

// ----- C O N S T R U C T O R S ---------------------------------------------

impl UtmGrid {
    pub const MIN_ZONE: u8 = 1;
    pub const MAX_ZONE: u8 = 60;
    pub const NUMBER_OF_BANDS: u8 = 20;

    /// The theoretical number of zone×band slots
    pub const NUMBER_OF_GRIDS: u16 = 1200;
    /// The number of slots actually holding a grid: everything but the
    /// void cells 32X, 34X and 36X
    pub const NUMBER_OF_USED_GRIDS: u16 = 1197;

    /// The grid at (zone, band index). Rejects out-of-range zones and
    /// bands as well as the three void band-X cells.
    pub fn new(projection: &UtmProjection, zone: u8, band: u8) -> Result<UtmGrid, Error> {
        if !Self::is_valid(zone, band) {
            return Err(Error::NoSuchGrid {
                zone,
                band: Self::letter(band),
            });
        }
        Ok(Self::assemble(*projection, zone, band))
    }

    /// The grid at (zone, band letter), e.g. (32, 'U')
    pub fn new_with_band_letter(
        projection: &UtmProjection,
        zone: u8,
        band: char,
    ) -> Result<UtmGrid, Error> {
        let Some(index) = BAND_LETTERS.iter().position(|c| *c as char == band) else {
            return Err(Error::NoSuchGrid { zone, band });
        };
        Self::new(projection, zone, index as u8)
    }

    /// The grid with the given ordinal. The three void slots are rejected,
    /// like any out-of-range ordinal.
    pub fn from_ordinal(projection: &UtmProjection, ordinal: u16) -> Result<UtmGrid, Error> {
        if ordinal >= Self::NUMBER_OF_GRIDS {
            return Err(Error::OrdinalOutOfRange(ordinal));
        }
        let zone = (ordinal / Self::NUMBER_OF_BANDS as u16) as u8 + 1;
        let band = (ordinal % Self::NUMBER_OF_BANDS as u16) as u8;
        Self::new(projection, zone, band)
    }

    /// The grid owning the given position. This is where the exception
    /// rules of the coordinate→cell direction live: a point in the widened
    /// part of 32V resolves to zone 32 although its longitude says 31, and
    /// points in the void band-X cells fall to whichever neighbor's side of
    /// the void cell's center they are on.
    pub fn from_coordinates(
        projection: &UtmProjection,
        coordinates: GlobalCoordinates,
    ) -> Result<UtmGrid, Error> {
        let latitude = coordinates.latitude().degrees();
        let min = UtmProjection::MIN_LATITUDE.degrees();
        let max = UtmProjection::MAX_LATITUDE.degrees();
        if !(min..=max).contains(&latitude) {
            return Err(Error::LatitudeOutOfRange { latitude, min, max });
        }

        let band = Self::band_for(latitude);
        let zone = Self::zone_for(band, coordinates.longitude().degrees());
        Ok(Self::assemble(*projection, zone, band))
    }

    /// Is there a grid at (zone, band index)?
    #[must_use]
    pub fn is_valid(zone: u8, band: u8) -> bool {
        (Self::MIN_ZONE..=Self::MAX_ZONE).contains(&zone)
            && band < Self::NUMBER_OF_BANDS
            && !(band == 19 && matches!(zone, 32 | 34 | 36))
    }

    /// Is the ordinal one of the 1197 used slots?
    #[must_use]
    pub fn is_valid_ordinal(ordinal: u16) -> bool {
        ordinal < Self::NUMBER_OF_GRIDS
            && Self::is_valid(
                (ordinal / Self::NUMBER_OF_BANDS as u16) as u8 + 1,
                (ordinal % Self::NUMBER_OF_BANDS as u16) as u8,
            )
    }

    /// Build a known-valid grid, including its geographic cell geometry.
    /// Callers guarantee (zone, band) passes [`is_valid`](UtmGrid::is_valid).
    fn assemble(projection: UtmProjection, zone: u8, band: u8) -> UtmGrid {
        let mut ll_longitude = -180. + (zone as f64 - 1.) * 6.;
        let ll_latitude = -80. + band as f64 * 8.;
        let mut width = 6.;
        let mut height = 8.;

        if band == 19 {
            // Band X runs all the way up to 84°
            height = 12.;
        }
        match (zone, band) {
            // The Norway exception: 31V keeps only its western half...
            (31, 17) => width = 3.,
            // ...which 32V annexes
            (32, 17) => {
                ll_longitude -= 3.;
                width = 9.;
            }
            // The Svalbard exception: 31X/33X/35X/37X split the space of
            // the void cells 32X/34X/36X between them
            (31, 19) => width = 9.,
            (33, 19) | (35, 19) => {
                ll_longitude -= 3.;
                width = 12.;
            }
            (37, 19) => {
                ll_longitude -= 3.;
                width = 9.;
            }
            _ => (),
        }

        UtmGrid {
            projection,
            zone,
            band,
            ll_latitude,
            ll_longitude,
            width,
            height,
            chart: OnceCell::new(),
        }
    }

    /// The band index for a latitude inside the UTM domain
    fn band_for(latitude: f64) -> u8 {
        if latitude >= 72. {
            return 19;
        }
        (((latitude + 80.) / 8.).floor() as i32).clamp(0, 19) as u8
    }

    /// The zone owning a longitude within the given band, with the Norway
    /// and Svalbard adjustments applied in that order
    fn zone_for(band: u8, longitude: f64) -> u8 {
        let index = (((longitude + 180.) / 6.).floor() as i64).rem_euclid(60);
        let mut zone = index as u8 + 1;

        // Norway: the eastern edge of the narrowed 31V is at 3°E
        if band == 17 && zone == 31 && longitude >= 3. {
            zone = 32;
        }

        // Svalbard: fall off the void cells to the nearer neighbor
        if band == 19 {
            match zone {
                32 => zone = if longitude < 9. { 31 } else { 33 },
                34 => zone = if longitude < 21. { 33 } else { 35 },
                36 => zone = if longitude < 33. { 35 } else { 37 },
                _ => (),
            }
        }
        zone
    }

    fn letter(band: u8) -> char {
        BAND_LETTERS
            .get(band as usize)
            .map(|c| *c as char)
            .unwrap_or('?')
    }

    // ----- A C C E S S O R S -----------------------------------------------

    #[must_use]
    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// The band index, 0 ('C') to 19 ('X')
    #[must_use]
    pub fn band(&self) -> u8 {
        self.band
    }

    #[must_use]
    pub fn band_letter(&self) -> char {
        Self::letter(self.band)
    }

    /// The dense integer id of this grid: (zone-1)·20 + band
    #[must_use]
    pub fn ordinal(&self) -> u16 {
        (self.zone as u16 - 1) * Self::NUMBER_OF_BANDS as u16 + self.band as u16
    }

    /// Southern-hemisphere grids carry the UTM false northing
    #[must_use]
    pub fn is_southern(&self) -> bool {
        self.band < 10
    }

    /// The false northing of this grid's frame
    pub(crate) fn northing_origin(&self) -> f64 {
        if self.is_southern() {
            UtmProjection::FALSE_NORTHING
        } else {
            0.
        }
    }

    /// The central meridian of the projection for this grid: always the
    /// zone's nominal meridian, also for the widened exception cells
    #[must_use]
    pub fn central_meridian(&self) -> Angle {
        Angle::new(6. * self.zone as f64 - 183.)
    }

    pub(crate) fn projection(&self) -> &UtmProjection {
        &self.projection
    }

    /// The longitude span of the cell
    #[must_use]
    pub fn width(&self) -> Angle {
        Angle::new(self.width)
    }

    /// The latitude span of the cell
    #[must_use]
    pub fn height(&self) -> Angle {
        Angle::new(self.height)
    }

    // ----- C O R N E R S ---------------------------------------------------

    /// The south-western corner. Southern and western edges belong to the
    /// cell, so this one is exact.
    #[must_use]
    pub fn lower_left_corner(&self) -> GlobalCoordinates {
        GlobalCoordinates::from_degrees(self.ll_latitude, self.ll_longitude)
    }

    /// The south-eastern corner, pulled a hair inside the cell
    #[must_use]
    pub fn lower_right_corner(&self) -> GlobalCoordinates {
        GlobalCoordinates::from_degrees(
            self.ll_latitude,
            self.ll_longitude + self.width - CORNER_EPSILON,
        )
    }

    /// The north-western corner, pulled a hair inside the cell
    #[must_use]
    pub fn upper_left_corner(&self) -> GlobalCoordinates {
        GlobalCoordinates::from_degrees(
            self.ll_latitude + self.height - CORNER_EPSILON,
            self.ll_longitude,
        )
    }

    /// The north-eastern corner, pulled a hair inside the cell
    #[must_use]
    pub fn upper_right_corner(&self) -> GlobalCoordinates {
        GlobalCoordinates::from_degrees(
            self.ll_latitude + self.height - CORNER_EPSILON,
            self.ll_longitude + self.width - CORNER_EPSILON,
        )
    }

    // ----- N E I G H B O R S -----------------------------------------------

    /// The neighbor across the western edge. Total: zone 1 wraps to 60,
    /// and band X hops over the void cells.
    #[must_use]
    pub fn west(&self) -> UtmGrid {
        let mut zone = if self.zone == Self::MIN_ZONE {
            Self::MAX_ZONE
        } else {
            self.zone - 1
        };
        if self.band == 19 && matches!(zone, 32 | 34 | 36) {
            zone -= 1;
        }
        Self::assemble(self.projection, zone, self.band)
    }

    /// The neighbor across the eastern edge. Total, like
    /// [`west`](UtmGrid::west).
    #[must_use]
    pub fn east(&self) -> UtmGrid {
        let mut zone = if self.zone == Self::MAX_ZONE {
            Self::MIN_ZONE
        } else {
            self.zone + 1
        };
        if self.band == 19 && matches!(zone, 32 | 34 | 36) {
            zone += 1;
        }
        Self::assemble(self.projection, zone, self.band)
    }

    /// The neighbor across the northern edge.
    ///
    /// Reports [`Error::NoSuchNeighbor`] at band X, and
    /// [`Error::NoUniqueNeighbor`] where the exception geometry puts more
    /// than one cell above this one (e.g. north of 31U, 32V, or 32W).
    pub fn north(&self) -> Result<UtmGrid, Error> {
        if self.band + 1 >= Self::NUMBER_OF_BANDS {
            return Err(Error::NoSuchNeighbor("northern"));
        }
        self.vertical_neighbor(self.band + 1, "northern")
    }

    /// The neighbor across the southern edge. Fallible like
    /// [`north`](UtmGrid::north): band C has no southern neighbor, and
    /// south of the widened band-X cells is ambiguous.
    pub fn south(&self) -> Result<UtmGrid, Error> {
        if self.band == 0 {
            return Err(Error::NoSuchNeighbor("southern"));
        }
        self.vertical_neighbor(self.band - 1, "southern")
    }

    /// The neighbor is unique exactly when both ends of this cell's
    /// longitude span resolve to the same grid in the target band
    fn vertical_neighbor(&self, band: u8, direction: &'static str) -> Result<UtmGrid, Error> {
        let inside = 1e-9;
        let west_zone = Self::zone_for(band, self.ll_longitude + inside);
        let east_zone = Self::zone_for(band, self.ll_longitude + self.width - inside);
        if west_zone != east_zone {
            return Err(Error::NoUniqueNeighbor(direction));
        }
        Ok(Self::assemble(self.projection, west_zone, band))
    }

    // ----- C H A R T   D A T A ---------------------------------------------

    /// The projected cell geometry, computed once on demand. The extremes
    /// of the flat image sit on the corners and on the central meridian
    /// crossings of the horizontal edges, so probing those six points is
    /// enough.
    fn chart(&self) -> &Chart {
        self.chart.get_or_init(|| {
            let meridian = self.central_meridian().degrees();
            let top = self.ll_latitude + self.height - CORNER_EPSILON;
            let probes = [
                self.lower_left_corner(),
                self.lower_right_corner(),
                self.upper_left_corner(),
                self.upper_right_corner(),
                GlobalCoordinates::from_degrees(self.ll_latitude, meridian),
                GlobalCoordinates::from_degrees(top, meridian),
            ];

            let mut min = (f64::MAX, f64::MAX);
            let mut max = (f64::MIN, f64::MIN);
            for probe in probes {
                let raw = self.projection.project(probe, self);
                min = (min.0.min(raw.x), min.1.min(raw.y));
                max = (max.0.max(raw.x), max.1.max(raw.y));
            }

            Chart {
                easting: min.0,
                northing: min.1,
                width: max.0 - min.0,
                height: max.1 - min.1,
            }
        })
    }

    /// The projected origin of the cell: the equator-ward lower corner of
    /// its flat image, i.e. the smallest easting and northing it covers.
    /// Mesh-relative offsets are measured from here.
    #[must_use]
    pub fn origin(&self) -> UtmCoordinate {
        let chart = self.chart();
        UtmCoordinate::new(self.clone(), chart.easting, chart.northing)
    }

    /// The easting extent of the cell's flat image, in meters
    #[must_use]
    pub fn map_width(&self) -> f64 {
        self.chart().width
    }

    /// The northing extent of the cell's flat image, in meters
    #[must_use]
    pub fn map_height(&self) -> f64 {
        self.chart().height
    }
}

// ----- T E S T S -----------------------------------------------------------
